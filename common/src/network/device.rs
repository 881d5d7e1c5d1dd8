//! # Device Records
//!
//! A [`Device`] is created by the report parser the first time an address is
//! seen and is then annotated by each enrichment stage. The `fill_*` helpers
//! only ever move a field from empty to set, never back.

use std::collections::BTreeSet;
use std::fmt;
use std::net::IpAddr;

use chrono::{DateTime, Local};

use crate::network::range::Subnet;

/// Label used when no classification tier matched.
pub const UNKNOWN_VENDOR: &str = "Unknown";

/// Which classification tier produced a device's label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorSource {
    Reported,
    Lookup,
    Hostname,
    Ports,
    Fallback,
}

impl fmt::Display for VendorSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VendorSource::Reported => "reported",
            VendorSource::Lookup => "lookup",
            VendorSource::Hostname => "hostname",
            VendorSource::Ports => "ports",
            VendorSource::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Device {
    pub address: IpAddr,
    pub hardware_address: Option<String>,
    pub reported_vendor: Option<String>,
    pub hostname: Option<String>,
    pub open_ports: BTreeSet<u16>,
    pub resolved_vendor: Option<String>,
    pub vendor_source: Option<VendorSource>,
}

impl Device {
    pub fn new(address: IpAddr) -> Self {
        Self {
            address,
            hardware_address: None,
            reported_vendor: None,
            hostname: None,
            open_ports: BTreeSet::new(),
            resolved_vendor: None,
            vendor_source: None,
        }
    }

    pub fn with_hardware(mut self, mac: impl Into<String>, vendor: Option<String>) -> Self {
        self.hardware_address = Some(mac.into());
        self.reported_vendor = vendor;
        self
    }

    pub fn fill_hostname(&mut self, hostname: Option<String>) {
        if self.hostname.is_none() {
            self.hostname = hostname;
        }
    }

    pub fn fill_open_ports(&mut self, ports: BTreeSet<u16>) {
        if self.open_ports.is_empty() {
            self.open_ports = ports;
        }
    }

    pub fn fill_vendor(&mut self, label: String, source: VendorSource) {
        if self.resolved_vendor.is_none() {
            self.resolved_vendor = Some(label);
            self.vendor_source = Some(source);
        }
    }

    /// The classification label, `Unknown` until one has been assigned.
    pub fn vendor_label(&self) -> &str {
        self.resolved_vendor.as_deref().unwrap_or(UNKNOWN_VENDOR)
    }
}

/// One end-to-end run over a subnet.
#[derive(Debug, Clone)]
pub struct DiscoverySession {
    pub subnet: Subnet,
    pub devices: Vec<Device>,
    pub started_at: DateTime<Local>,
    pub finished_at: Option<DateTime<Local>>,
    /// Set when the discovery capability could not produce a report.
    pub notice: Option<String>,
}

impl DiscoverySession {
    pub fn new(subnet: Subnet) -> Self {
        Self {
            subnet,
            devices: Vec::new(),
            started_at: Local::now(),
            finished_at: None,
            notice: None,
        }
    }

    pub fn finish(&mut self) {
        if self.finished_at.is_none() {
            self.finished_at = Some(Local::now());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.devices.is_empty()
    }

    /// Looks up a device by its 1-based position in the report.
    pub fn by_position(&self, position: usize) -> Option<&Device> {
        position
            .checked_sub(1)
            .and_then(|idx| self.devices.get(idx))
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
