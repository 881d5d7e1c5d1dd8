//! # Operator Console (Driving Actor)
//!
//! The interactive surface the orchestrator reports to and asks questions
//! through. The CLI implements it on a terminal; tests script it.

use lanscout_common::network::device::DiscoverySession;

use crate::scanner::Stage;
use crate::stress::{StressPlan, StressReport};

pub trait OperatorConsole {
    /// Called on every state transition of a run.
    fn stage_changed(&mut self, _stage: Stage) {}

    /// A user-visible, non-fatal condition.
    fn notice(&mut self, message: &str);

    /// Presents the enriched device list (possibly empty).
    fn report(&mut self, session: &DiscoverySession);

    /// Asks a question and returns the raw answer, `None` when input is closed.
    fn ask(&mut self, question: &str) -> Option<String>;

    fn stress_started(&mut self, _plan: &StressPlan) {}

    fn stress_finished(&mut self, _report: &StressReport) {}
}
