//! # Hostname Resolver
//!
//! Reverse resolution of a device address with a short bounded wait. Any
//! failure simply leaves the hostname absent.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use lanscout_common::capability::HostnameLookup;
use tracing::debug;

pub struct HostnameResolver {
    lookup: Arc<dyn HostnameLookup>,
    timeout: Duration,
    enabled: bool,
}

impl HostnameResolver {
    pub fn new(lookup: Arc<dyn HostnameLookup>, timeout: Duration) -> Self {
        Self {
            lookup,
            timeout,
            enabled: true,
        }
    }

    /// A resolver that never queries (`--no-dns`).
    pub fn disabled(lookup: Arc<dyn HostnameLookup>) -> Self {
        Self {
            lookup,
            timeout: Duration::ZERO,
            enabled: false,
        }
    }

    pub async fn resolve(&self, address: IpAddr) -> Option<String> {
        if !self.enabled {
            return None;
        }

        match tokio::time::timeout(self.timeout, self.lookup.reverse(address)).await {
            Ok(Ok(name)) => name.and_then(|n| clean_hostname(&n, address)),
            Ok(Err(e)) => {
                debug!(%address, "reverse lookup failed: {e}");
                None
            }
            Err(_elapsed) => {
                debug!(%address, "reverse lookup timed out");
                None
            }
        }
    }
}

/// Drops empty answers and resolvers that echo the numeric address back.
fn clean_hostname(name: &str, address: IpAddr) -> Option<String> {
    let name = name.trim().trim_end_matches('.');
    if name.is_empty() || name.parse::<IpAddr>().is_ok_and(|ip| ip == address) {
        return None;
    }
    Some(name.to_string())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
