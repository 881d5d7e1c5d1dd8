//! # Capabilities (Driven Actors)
//!
//! Contracts for everything the pipeline asks of the outside world: the
//! external discovery and port-probe tools, the vendor lookup service and the
//! system resolver. The core depends only on these traits; concrete adapters
//! live in `lanscout-core` and test doubles in the integration tests.
//!
//! Implementations report failures as [`ReconError`]; callers decide whether a
//! failure degrades to an empty value. `Ok(None)` means the capability worked
//! and had nothing to say.

use std::net::IpAddr;

use async_trait::async_trait;

use crate::error::ReconError;
use crate::network::range::Subnet;

#[async_trait]
pub trait DiscoveryCapability: Send + Sync {
    /// Runs a host-discovery sweep over `subnet` and returns the raw report.
    async fn run_discovery(&self, subnet: &Subnet) -> Result<String, ReconError>;
}

#[async_trait]
pub trait PortProbeCapability: Send + Sync {
    /// Probes `ports` on `address` and returns the raw report.
    async fn run_port_probe(&self, address: IpAddr, ports: &[u16]) -> Result<String, ReconError>;
}

#[async_trait]
pub trait VendorLookup: Send + Sync {
    /// Resolves a hardware address to a manufacturer name.
    async fn lookup(&self, hardware_address: &str) -> Result<Option<String>, ReconError>;
}

#[async_trait]
pub trait HostnameLookup: Send + Sync {
    /// Maps `address` back to a hostname.
    async fn reverse(&self, address: IpAddr) -> Result<Option<String>, ReconError>;
}
