//! # Report Parser
//!
//! Turns the discovery tool's text report into [`Device`] records. The parse
//! is marker driven and tolerant: a host line opens a new record, a hardware
//! line annotates the record that is currently open, everything else is
//! skipped.
//!
//! ```text
//! Nmap scan report for 192.168.1.10
//! Host is up (0.0021s latency).
//! MAC Address: AA:BB:CC:DD:EE:FF (Example Corp)
//! ```

use std::collections::HashSet;
use std::net::IpAddr;

use lanscout_common::network::device::Device;

/// Marks the start of a host record; the address is the last token on the line.
pub const HOST_MARKER: &str = "report for";

/// Marks a hardware-address record for the currently open host.
pub const HARDWARE_MARKER: &str = "MAC Address:";

/// Parses a raw discovery report into devices, in order of first sighting.
pub fn parse_report(report: &str) -> Vec<Device> {
    let mut devices: Vec<Device> = Vec::new();
    let mut seen: HashSet<IpAddr> = HashSet::new();
    let mut current: Option<Device> = None;

    for line in report.lines() {
        if let Some(address) = host_address(line) {
            if let Some(done) = current.take() {
                devices.push(done);
            }
            // A repeated address leaves nothing open.
            if seen.insert(address) {
                current = Some(Device::new(address));
            }
            continue;
        }

        if let Some((mac, vendor)) = hardware_record(line) {
            if let Some(device) = current.as_mut() {
                if device.hardware_address.is_none() {
                    device.hardware_address = Some(mac);
                    device.reported_vendor = vendor;
                }
            }
        }
    }

    if let Some(done) = current.take() {
        devices.push(done);
    }

    devices
}

/// `Nmap scan report for 10.0.0.5` or `... for router.lan (10.0.0.1)`.
fn host_address(line: &str) -> Option<IpAddr> {
    let (_, rest) = line.split_once(HOST_MARKER)?;
    let token = rest.split_whitespace().last()?;
    token
        .trim_matches(|c| c == '(' || c == ')')
        .parse::<IpAddr>()
        .ok()
}

/// `MAC Address: AA:BB:CC:DD:EE:FF (Vendor Name)`
fn hardware_record(line: &str) -> Option<(String, Option<String>)> {
    let (_, rest) = line.split_once(HARDWARE_MARKER)?;
    let mut tokens = rest.split_whitespace();
    let mac = tokens.next()?.to_string();

    let vendor: String = tokens.collect::<Vec<&str>>().join(" ");
    let vendor = vendor.trim_matches(|c: char| c == '(' || c == ')' || c.is_whitespace());
    let vendor = (!vendor.is_empty()).then(|| vendor.to_string());

    Some((mac, vendor))
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
