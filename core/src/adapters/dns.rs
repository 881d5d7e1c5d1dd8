use std::net::IpAddr;

use async_trait::async_trait;
use dns_lookup::lookup_addr;
use lanscout_common::ReconError;
use lanscout_common::capability::HostnameLookup;

/// Reverse lookups through the system resolver.
///
/// `lookup_addr` blocks, so it runs on the blocking pool. The caller bounds
/// the wait.
pub struct SystemResolver;

#[async_trait]
impl HostnameLookup for SystemResolver {
    async fn reverse(&self, address: IpAddr) -> Result<Option<String>, ReconError> {
        let joined = tokio::task::spawn_blocking(move || lookup_addr(&address)).await;
        match joined {
            Ok(Ok(name)) => Ok(Some(name)),
            Ok(Err(_)) => Ok(None),
            Err(e) => Err(ReconError::unavailable("reverse lookup", e)),
        }
    }
}
