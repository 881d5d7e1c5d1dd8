use colored::*;

use crate::terminal::{colors, print};
use lanscout_common::network::interface::{AddressInfo, AddressOrigin};
use lanscout_common::warn;
use lanscout_core::system::SystemStatus;

pub fn info(quiet: u8) -> anyhow::Result<()> {
    let local = AddressInfo::detect()?;
    let status = SystemStatus::probe();

    print::header("local network", quiet);
    print::aligned_block(&[
        ("Address", local.local_ip.to_string().color(colors::IPV4_ADDR)),
        ("Subnet", local.subnet.to_string().color(colors::IPV4_ADDR)),
        ("Source", origin_label(&local.origin).color(colors::TEXT_DEFAULT)),
        ("Hosts", local.subnet.address_count().to_string().color(colors::TEXT_DEFAULT)),
    ]);

    print::header("capabilities", quiet);
    let privileged = if status.privileged { "yes".green() } else { "no".yellow() };
    let nmap = match &status.nmap {
        Some(path) => path.display().to_string().green(),
        None => "not found".red(),
    };
    print::aligned_block(&[("Privileged", privileged), ("nmap", nmap)]);
    print::fat_separator();

    if status.nmap.is_none() {
        warn!("Discovery needs nmap on PATH");
    }
    if !status.privileged {
        warn!("Without root, nmap cannot report hardware addresses");
    }
    Ok(())
}

fn origin_label(origin: &AddressOrigin) -> String {
    match origin {
        AddressOrigin::Interface(name) => format!("interface {name}"),
        AddressOrigin::RouteProbe => "route probe (assumed /24)".to_string(),
        AddressOrigin::Loopback => "loopback fallback".to_string(),
    }
}
