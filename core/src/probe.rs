//! # Port Probe
//!
//! Checks every device for a fixed list of well-known ports. The probe tool's
//! report is read line by line; a line counts when it starts with a
//! `<port>/<protocol>` token followed by the status word `open`:
//!
//! ```text
//! PORT     STATE SERVICE
//! 80/tcp   open  http
//! 9100/tcp open  jetdirect
//! ```

use std::collections::BTreeSet;
use std::net::IpAddr;
use std::sync::Arc;

use lanscout_common::ReconError;
use lanscout_common::capability::PortProbeCapability;
use tracing::debug;

pub struct PortProbe {
    capability: Arc<dyn PortProbeCapability>,
    candidates: Vec<u16>,
}

impl PortProbe {
    pub fn new(capability: Arc<dyn PortProbeCapability>, candidates: &[u16]) -> Self {
        let mut candidates = candidates.to_vec();
        candidates.sort_unstable();
        candidates.dedup();
        Self {
            capability,
            candidates,
        }
    }

    pub fn candidates(&self) -> &[u16] {
        &self.candidates
    }

    /// Returns the open subset of the candidate ports.
    ///
    /// A timed-out probe counts as "nothing open". Any other failure means the
    /// tool itself is unusable and is handed back so the run can say so once;
    /// callers treat it as an empty set as well.
    pub async fn probe(&self, address: IpAddr) -> Result<BTreeSet<u16>, ReconError> {
        if self.candidates.is_empty() {
            return Ok(BTreeSet::new());
        }

        match self.capability.run_port_probe(address, &self.candidates).await {
            Ok(report) => Ok(parse_open_ports(&report, &self.candidates)),
            Err(ReconError::NetworkTimeout { .. }) => {
                debug!(%address, "port probe timed out");
                Ok(BTreeSet::new())
            }
            Err(e) => {
                debug!(%address, "port probe failed: {e}");
                Err(e)
            }
        }
    }
}

/// Extracts open ports from a probe report, keeping only `candidates`.
pub fn parse_open_ports(report: &str, candidates: &[u16]) -> BTreeSet<u16> {
    report
        .lines()
        .filter_map(open_port)
        .filter(|port| candidates.contains(port))
        .collect()
}

fn open_port(line: &str) -> Option<u16> {
    let mut tokens = line.split_whitespace();
    let (port, protocol) = tokens.next()?.split_once('/')?;
    if protocol.is_empty() {
        return None;
    }
    let port = port.parse::<u16>().ok()?;
    (tokens.next()? == "open").then_some(port)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
