use thiserror::Error;

/// Failure kinds that may cross a component boundary.
///
/// Every I/O edge (external process, network call, operator prompt) converts
/// whatever went wrong into one of these before handing it upward. Only
/// [`ReconError::NoDevicesFound`] ends a run early.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconError {
    /// An external tool (discovery or port probe) is missing or failed.
    #[error("{capability} unavailable: {reason}")]
    CapabilityUnavailable {
        capability: &'static str,
        reason: String,
    },

    /// A bounded network wait expired.
    #[error("{operation} timed out")]
    NetworkTimeout { operation: &'static str },

    /// The operator typed something the selection surface cannot use.
    #[error("invalid input: {0}")]
    InvalidOperatorInput(String),

    /// Discovery finished with an empty device set.
    #[error("no devices found")]
    NoDevicesFound,

    #[error("invalid subnet: {0}")]
    InvalidSubnet(String),

    #[error("invalid rule set: {0}")]
    RuleSet(String),
}

impl ReconError {
    pub fn unavailable(capability: &'static str, reason: impl ToString) -> Self {
        Self::CapabilityUnavailable {
            capability,
            reason: reason.to_string(),
        }
    }

    /// Whether this error should stop the process rather than a single stage.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::NoDevicesFound)
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
