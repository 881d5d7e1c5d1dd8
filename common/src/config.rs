use std::time::Duration;

use crate::rules::RuleSet;

/// Immutable settings for one run, built once by the CLI.
#[derive(Debug, Clone)]
pub struct Config {
    /// Skips reverse name resolution entirely.
    pub no_dns: bool,

    /// 0 = full output, 1 = compact, 2 = summary only.
    pub quiet: u8,

    /// Never prompt the operator; the stress phase is skipped.
    pub disable_input: bool,

    /// Candidate ports probed on every device.
    pub probe_ports: Vec<u16>,

    /// Maximum number of devices enriched at the same time.
    pub enrichment_workers: usize,

    pub timeouts: Timeouts,
    pub lookup: LookupConfig,
    pub stress: StressConfig,
    pub rules: RuleSet,
}

#[derive(Debug, Clone, Copy)]
pub struct Timeouts {
    pub discovery: Duration,
    pub port_probe: Duration,
    pub reverse_dns: Duration,
    pub vendor_lookup: Duration,
    pub connect: Duration,
}

#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Base URL; the hardware address is appended as the last path segment.
    pub base_url: String,
    /// Use the bundled OUI database instead of the HTTP service.
    pub offline: bool,
    /// Requests per second allowed against the HTTP service.
    pub requests_per_second: u32,
}

#[derive(Debug, Clone)]
pub struct StressConfig {
    /// The stress phase is offered only when this is set.
    pub enabled: bool,
    pub default_port: u16,
    pub default_duration: Duration,
    pub default_workers: usize,
    pub max_duration: Duration,
    pub max_workers: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            no_dns: false,
            quiet: 0,
            disable_input: false,
            probe_ports: vec![
                22,   // SSH
                23,   // Telnet
                80,   // HTTP
                443,  // HTTPS
                515,  // LPD
                554,  // RTSP
                8000, // HTTP-Alt
                8080, // HTTP-Proxy
                9100, // JetDirect
            ],
            enrichment_workers: 8,
            timeouts: Timeouts::default(),
            lookup: LookupConfig::default(),
            stress: StressConfig::default(),
            rules: RuleSet::default(),
        }
    }
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            discovery: Duration::from_secs(120),
            port_probe: Duration::from_secs(30),
            reverse_dns: Duration::from_secs(2),
            vendor_lookup: Duration::from_secs(2),
            connect: Duration::from_secs(1),
        }
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.macvendors.com".to_string(),
            offline: false,
            requests_per_second: 1,
        }
    }
}

impl Default for StressConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            default_port: 80,
            default_duration: Duration::from_secs(10),
            default_workers: 50,
            max_duration: Duration::from_secs(300),
            max_workers: 500,
        }
    }
}
