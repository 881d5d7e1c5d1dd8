//! Concrete capabilities backed by the host system.
//!
//! Everything here talks to the outside world: the `nmap` binary, the
//! macvendors HTTP service (or the bundled OUI table when offline) and the
//! system resolver.

use std::sync::Arc;

use anyhow::Context;
use lanscout_common::config::Config;

use crate::scanner::Capabilities;

pub mod dns;
pub mod macvendors;
pub mod nmap;
pub mod oui;

pub use dns::SystemResolver;
pub use macvendors::MacVendorsApi;
pub use nmap::{NmapDiscovery, NmapPortProbe};
pub use oui::OuiDatabase;

/// Wires the production adapters for `cfg`.
pub fn system_capabilities(cfg: &Config) -> anyhow::Result<Capabilities> {
    let vendors: Arc<dyn lanscout_common::capability::VendorLookup> = if cfg.lookup.offline {
        Arc::new(OuiDatabase::load().context("Loading the offline vendor table")?)
    } else {
        Arc::new(
            MacVendorsApi::new(&cfg.lookup, cfg.timeouts.vendor_lookup)
                .context("Building the vendor lookup client")?,
        )
    };

    Ok(Capabilities {
        discovery: Arc::new(NmapDiscovery::new(cfg.timeouts.discovery)),
        port_probe: Arc::new(NmapPortProbe::new(cfg.timeouts.port_probe)),
        vendors,
        hostnames: Arc::new(SystemResolver),
    })
}
