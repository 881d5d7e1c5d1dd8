use std::collections::BTreeSet;
use std::net::IpAddr;

use colored::*;
use lanscout_common::network::device::Device;

use crate::terminal::colors;

pub type Detail = (String, ColoredString);

pub fn ip_to_detail(ip: &IpAddr) -> Detail {
    match ip {
        IpAddr::V4(v4) => ("IPv4".to_string(), v4.to_string().color(colors::IPV4_ADDR)),
        IpAddr::V6(v6) => ("IPv6".to_string(), v6.to_string().color(colors::IPV6_ADDR)),
    }
}

pub fn mac_to_detail(mac: &Option<String>) -> Option<Detail> {
    mac.as_ref()
        .map(|mac| ("MAC".to_string(), mac.to_uppercase().color(colors::MAC_ADDR)))
}

pub fn vendor_to_detail(device: &Device) -> Detail {
    let label = device.vendor_label().color(colors::VENDOR);
    let value = match device.vendor_source {
        Some(source) => format!("{label} {}", format!("({source})").color(colors::SEPARATOR)).normal(),
        None => label,
    };
    ("Vendor".to_string(), value)
}

pub fn ports_to_detail(ports: &BTreeSet<u16>) -> Option<Detail> {
    if ports.is_empty() {
        return None;
    }
    let joined = ports
        .iter()
        .map(|port| port.to_string().color(colors::PORT).to_string())
        .collect::<Vec<String>>()
        .join(&", ".color(colors::SEPARATOR).to_string());
    Some(("Ports".to_string(), joined.normal()))
}

pub fn device_details(device: &Device) -> Vec<Detail> {
    let mut details = vec![ip_to_detail(&device.address)];
    details.extend(mac_to_detail(&device.hardware_address));
    details.push(vendor_to_detail(device));
    details.extend(ports_to_detail(&device.open_ports));
    details
}
