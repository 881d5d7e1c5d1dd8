//! # Subnet Descriptor
//!
//! The address range a discovery pass is bounded to. Only IPv4 CIDR blocks
//! are accepted (e.g. `192.168.1.0/24`); a host address with a prefix such as
//! `192.168.1.37/24` is normalised to its network.

use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

use pnet::ipnetwork::Ipv4Network;

use crate::error::ReconError;

/// Prefix assumed when the local address was found without interface data.
pub const DEFAULT_PREFIX: u8 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subnet {
    network: Ipv4Network,
}

impl Subnet {
    /// Returns the network of the given prefix length that contains `ip`.
    pub fn containing(ip: Ipv4Addr, prefix: u8) -> Result<Self, ReconError> {
        let net = Ipv4Network::new(ip, prefix)
            .map_err(|e| ReconError::InvalidSubnet(format!("{ip}/{prefix}: {e}")))?;
        let network = Ipv4Network::new(net.network(), prefix)
            .map_err(|e| ReconError::InvalidSubnet(e.to_string()))?;
        Ok(Self { network })
    }

    pub fn network_addr(&self) -> Ipv4Addr {
        self.network.network()
    }

    pub fn prefix(&self) -> u8 {
        self.network.prefix()
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.network.contains(ip)
    }

    /// Number of addresses in the block, network and broadcast included.
    pub fn address_count(&self) -> u64 {
        1u64 << (32 - u32::from(self.prefix()))
    }
}

impl fmt::Display for Subnet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network_addr(), self.prefix())
    }
}

impl FromStr for Subnet {
    type Err = ReconError;

    /// Parses CIDR notation like "192.168.1.0/24".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let Some((ip_str, prefix_str)) = s.split_once('/') else {
            return Err(ReconError::InvalidSubnet(format!(
                "'{s}' is missing a '/prefix' suffix"
            )));
        };

        let ip = ip_str
            .parse::<Ipv4Addr>()
            .map_err(|e| ReconError::InvalidSubnet(format!("invalid IP in CIDR '{ip_str}': {e}")))?;

        let prefix = prefix_str.parse::<u8>().map_err(|e| {
            ReconError::InvalidSubnet(format!("invalid prefix in CIDR '{prefix_str}': {e}"))
        })?;

        Self::containing(ip, prefix)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_cidr() {
        let subnet: Subnet = "192.168.1.0/24".parse().unwrap();
        assert_eq!(subnet.network_addr(), Ipv4Addr::new(192, 168, 1, 0));
        assert_eq!(subnet.prefix(), 24);
        assert_eq!(subnet.to_string(), "192.168.1.0/24");
        assert_eq!(subnet.address_count(), 256);
    }

    #[test]
    fn host_address_is_normalised_to_network() {
        let subnet: Subnet = "10.1.2.99/16".parse().unwrap();
        assert_eq!(subnet.to_string(), "10.1.0.0/16");
        assert!(subnet.contains(Ipv4Addr::new(10, 1, 200, 3)));
        assert!(!subnet.contains(Ipv4Addr::new(10, 2, 0, 1)));
    }

    #[test]
    fn containing_derives_the_enclosing_block() {
        let subnet = Subnet::containing(Ipv4Addr::new(192, 168, 0, 42), DEFAULT_PREFIX).unwrap();
        assert_eq!(subnet.to_string(), "192.168.0.0/24");
    }

    #[test]
    fn rejects_malformed_descriptors() {
        assert!("192.168.1.0".parse::<Subnet>().is_err());
        assert!("192.168.1.0/33".parse::<Subnet>().is_err());
        assert!("192.168.1/24".parse::<Subnet>().is_err());
        assert!("lan/24".parse::<Subnet>().is_err());
        assert!("10.0.0.0/abc".parse::<Subnet>().is_err());
    }
}
