//! # Vendor Classifier
//!
//! Produces one label per device by walking an ordered chain of tiers. The
//! first tier that yields a label wins and later tiers are never consulted:
//!
//! 1. the vendor the discovery tool reported, unless it is a placeholder;
//! 2. the vendor lookup service, keyed by hardware address;
//! 3. hostname substring rules;
//! 4. open-port rules;
//! 5. `Unknown`.
//!
//! The heuristic tiers read their tables from [`RuleSet`], so rule content
//! can change without touching the chain.

use std::sync::Arc;

use lanscout_common::capability::VendorLookup;
use lanscout_common::network::device::{Device, UNKNOWN_VENDOR, VendorSource};
use lanscout_common::rules::RuleSet;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Reported,
    Lookup,
    Hostname,
    Ports,
}

/// Evaluation order of the chain.
pub const TIER_ORDER: [Tier; 4] = [Tier::Reported, Tier::Lookup, Tier::Hostname, Tier::Ports];

impl From<Tier> for VendorSource {
    fn from(tier: Tier) -> Self {
        match tier {
            Tier::Reported => VendorSource::Reported,
            Tier::Lookup => VendorSource::Lookup,
            Tier::Hostname => VendorSource::Hostname,
            Tier::Ports => VendorSource::Ports,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub source: VendorSource,
}

pub struct VendorClassifier {
    lookup: Arc<dyn VendorLookup>,
    rules: RuleSet,
}

impl VendorClassifier {
    pub fn new(lookup: Arc<dyn VendorLookup>, rules: RuleSet) -> Self {
        Self { lookup, rules }
    }

    /// Classifies a device from its current fields.
    ///
    /// Call only once `reported_vendor`, `hostname` and `open_ports` are final.
    pub async fn classify(&self, device: &Device) -> Classification {
        for tier in TIER_ORDER {
            if let Some(label) = self.evaluate(tier, device).await {
                debug!(address = %device.address, ?tier, %label, "classified");
                return Classification {
                    label,
                    source: tier.into(),
                };
            }
        }

        Classification {
            label: UNKNOWN_VENDOR.to_string(),
            source: VendorSource::Fallback,
        }
    }

    async fn evaluate(&self, tier: Tier, device: &Device) -> Option<String> {
        match tier {
            Tier::Reported => device
                .reported_vendor
                .as_deref()
                .filter(|vendor| !self.rules.is_placeholder(vendor))
                .map(str::to_string),
            Tier::Lookup => self.lookup_vendor(device).await,
            Tier::Hostname => device
                .hostname
                .as_deref()
                .and_then(|hostname| self.rules.match_hostname(hostname))
                .map(str::to_string),
            Tier::Ports => self.rules.match_ports(&device.open_ports).map(str::to_string),
        }
    }

    /// Single attempt; every failure is a miss.
    async fn lookup_vendor(&self, device: &Device) -> Option<String> {
        let mac = device.hardware_address.as_deref()?;
        match self.lookup.lookup(mac).await {
            Ok(Some(vendor)) if !self.rules.is_placeholder(&vendor) => Some(vendor.trim().to_string()),
            Ok(_) => None,
            Err(e) => {
                debug!(%mac, "vendor lookup missed: {e}");
                None
            }
        }
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
