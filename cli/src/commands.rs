pub mod discover;
pub mod info;

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use lanscout_common::config::Config;
use lanscout_common::network::range::Subnet;
use lanscout_common::rules::RuleSet;

#[derive(Parser)]
#[command(name = "lanscout")]
#[command(about = "Discover, fingerprint and optionally stress devices on the local network.")]
#[command(version)]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Reduce output (-q compact, -qq summary only)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub quiet: u8,

    /// Show debug logs
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the local address, derived subnet and tool availability
    #[command(alias = "i")]
    Info,
    /// Discover and fingerprint devices on a subnet
    #[command(alias = "d")]
    Discover(DiscoverArgs),
}

#[derive(Args)]
pub struct DiscoverArgs {
    /// Subnet to sweep, e.g. 192.168.1.0/24 (default: the local /24)
    pub subnet: Option<Subnet>,

    /// Offer a connection stress run against one discovered device
    #[arg(long)]
    pub stress: bool,

    /// Use the bundled OUI table instead of the online vendor service
    #[arg(long)]
    pub offline: bool,

    /// JSON file replacing the hostname/port heuristics
    #[arg(long, value_name = "FILE")]
    pub rules: Option<PathBuf>,

    /// Skip reverse name resolution
    #[arg(long)]
    pub no_dns: bool,

    /// Never prompt; the stress run is skipped
    #[arg(long)]
    pub no_input: bool,

    /// Devices enriched concurrently
    #[arg(long, value_name = "N", default_value_t = 8, value_parser = clap::value_parser!(u16).range(1..=256))]
    pub workers: u16,
}

impl DiscoverArgs {
    pub fn to_config(&self, quiet: u8) -> anyhow::Result<Config> {
        let mut cfg = Config {
            no_dns: self.no_dns,
            quiet,
            disable_input: self.no_input,
            enrichment_workers: usize::from(self.workers),
            ..Config::default()
        };
        cfg.lookup.offline = self.offline;
        cfg.stress.enabled = self.stress;

        if let Some(path) = &self.rules {
            cfg.rules = RuleSet::from_json_file(path)
                .with_context(|| format!("Loading rules from {}", path.display()))?;
        }

        Ok(cfg)
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
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
