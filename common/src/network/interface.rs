//! # Local Address Detection
//!
//! Works out which IPv4 address this machine uses on its LAN and which subnet
//! a discovery pass should cover. Interface data from the datalink layer is
//! preferred because it carries the real prefix; when no interface qualifies
//! the kernel's route selection for an outbound UDP socket is used instead,
//! with the subnet assumed to be a `/24`.

use std::net::{IpAddr, Ipv4Addr, UdpSocket};

use pnet::datalink::{self, NetworkInterface};
use pnet::ipnetwork::{IpNetwork, Ipv4Network};

use crate::error::ReconError;
use crate::network::range::{DEFAULT_PREFIX, Subnet};

#[cfg(target_os = "linux")]
use linux_impl::{is_physical, is_wireless};
#[cfg(not(target_os = "linux"))]
use fallback_impl::{is_physical, is_wireless};

/// Public address used only to make the kernel pick a source address; no
/// packet is sent by a UDP `connect`.
const ROUTE_PROBE: (Ipv4Addr, u16) = (Ipv4Addr::new(8, 8, 8, 8), 80);

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ViabilityError {
    /// The interface is operationally down.
    IsDown,
    /// The interface was filtered out as "not physical" by the provided logic.
    NotPhysical,
    /// The interface does not have a MAC address.
    NoMacAddress,
    /// The interface does not support broadcast.
    NotBroadcast,
    /// The interface is a point-to-point link (e.g., a VPN).
    IsPointToPoint,
    /// The interface has no private IPv4 address.
    NoPrivateIpv4,
}

/// How the local address was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddressOrigin {
    Interface(String),
    RouteProbe,
    Loopback,
}

/// The local address and the subnet derived from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressInfo {
    pub local_ip: Ipv4Addr,
    pub subnet: Subnet,
    pub origin: AddressOrigin,
}

impl AddressInfo {
    /// Detects the local address, falling back from interface data to a route
    /// probe and finally to the loopback address.
    pub fn detect() -> Result<Self, ReconError> {
        let interfaces: Vec<NetworkInterface> = datalink::interfaces();
        if let Some((name, net)) = lan_network(interfaces, is_physical) {
            return Ok(Self {
                local_ip: net.ip(),
                subnet: Subnet::containing(net.ip(), net.prefix())?,
                origin: AddressOrigin::Interface(name),
            });
        }

        tracing::debug!("no viable LAN interface, probing the default route");
        match route_probe_address() {
            Some(ip) => Ok(Self {
                local_ip: ip,
                subnet: Subnet::containing(ip, DEFAULT_PREFIX)?,
                origin: AddressOrigin::RouteProbe,
            }),
            None => {
                tracing::warn!("No route to the outside, falling back to loopback");
                Self::loopback()
            }
        }
    }

    fn loopback() -> Result<Self, ReconError> {
        let ip = Ipv4Addr::LOCALHOST;
        Ok(Self {
            local_ip: ip,
            subnet: Subnet::containing(ip, DEFAULT_PREFIX)?,
            origin: AddressOrigin::Loopback,
        })
    }
}

/// Picks the primary LAN interface and returns its name and private IPv4 network.
fn lan_network(
    interfaces: Vec<NetworkInterface>,
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Option<(String, Ipv4Network)> {
    let viable: Vec<NetworkInterface> = interfaces
        .into_iter()
        .filter(|interface| is_viable_lan_interface(interface, &is_physical).is_ok())
        .collect();

    let interface: NetworkInterface = select_best_lan_interface(viable, is_wired)?;

    interface.ips.iter().find_map(|net| match net {
        IpNetwork::V4(v4) if v4.ip().is_private() => Some((interface.name.clone(), *v4)),
        _ => None,
    })
}

fn is_viable_lan_interface(
    interface: &NetworkInterface,
    is_physical: impl Fn(&NetworkInterface) -> bool,
) -> Result<(), ViabilityError> {
    if !interface.is_up() {
        return Err(ViabilityError::IsDown);
    }
    if interface.is_loopback() || !is_physical(interface) {
        return Err(ViabilityError::NotPhysical);
    }
    if interface.mac.is_none() {
        return Err(ViabilityError::NoMacAddress);
    }
    if !interface.is_broadcast() {
        return Err(ViabilityError::NotBroadcast);
    }
    if interface.is_point_to_point() {
        return Err(ViabilityError::IsPointToPoint);
    }
    let has_private_v4 = interface.ips.iter().any(|net| match net {
        IpNetwork::V4(ipv4) => ipv4.ip().is_private(),
        IpNetwork::V6(_) => false,
    });
    if !has_private_v4 {
        return Err(ViabilityError::NoPrivateIpv4);
    }

    Ok(())
}

fn select_best_lan_interface(
    interfaces: Vec<NetworkInterface>,
    is_wired: impl Fn(&NetworkInterface) -> bool,
) -> Option<NetworkInterface> {
    interfaces
        .iter()
        .find(|&interface| is_wired(interface))
        .or_else(|| interfaces.first())
        .cloned()
}

fn route_probe_address() -> Option<Ipv4Addr> {
    let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0)).ok()?;
    socket.connect(ROUTE_PROBE).ok()?;
    match socket.local_addr().ok()?.ip() {
        IpAddr::V4(ip) if !ip.is_unspecified() => Some(ip),
        _ => None,
    }
}

fn is_wired(interface: &NetworkInterface) -> bool {
    is_physical(interface) && !is_wireless(interface)
}

#[cfg(target_os = "linux")]
mod linux_impl {
    use super::*;
    use std::path::Path;

    pub fn is_physical(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/device", interface.name)).exists()
    }

    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        Path::new(&format!("/sys/class/net/{}/wireless", interface.name)).exists()
    }
}

#[cfg(not(target_os = "linux"))]
mod fallback_impl {
    use super::*;

    pub fn is_physical(_interface: &NetworkInterface) -> bool {
        true
    }

    // Common wireless naming on BSD-derived systems.
    pub fn is_wireless(interface: &NetworkInterface) -> bool {
        interface.name.starts_with("wl") || interface.name.starts_with("ath")
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
