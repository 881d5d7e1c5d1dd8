//! # Discovery Runner
//!
//! Invokes the host-discovery capability once for a subnet. Whatever goes
//! wrong on the other side of the capability is folded into
//! [`DiscoveryOutcome::Unavailable`], so the pipeline can carry on with an
//! empty report.

use std::sync::Arc;

use lanscout_common::capability::DiscoveryCapability;
use lanscout_common::network::range::Subnet;
use tracing::{debug, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiscoveryOutcome {
    Report(String),
    Unavailable { reason: String },
}

pub struct DiscoveryRunner {
    capability: Arc<dyn DiscoveryCapability>,
}

impl DiscoveryRunner {
    pub fn new(capability: Arc<dyn DiscoveryCapability>) -> Self {
        Self { capability }
    }

    pub async fn run(&self, subnet: &Subnet) -> DiscoveryOutcome {
        debug!(%subnet, "running discovery sweep");
        match self.capability.run_discovery(subnet).await {
            Ok(report) => DiscoveryOutcome::Report(report),
            Err(e) => {
                warn!("Discovery failed: {e}");
                DiscoveryOutcome::Unavailable {
                    reason: e.to_string(),
                }
            }
        }
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
