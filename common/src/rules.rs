//! # Classification Rule Tables
//!
//! The heuristic tiers of the vendor classifier are data, not code: an ordered
//! list of hostname substring rules and an ordered list of open-port rules.
//! Order is significant, the first matching rule wins. The built-in tables can
//! be replaced wholesale or per section from a JSON file:
//!
//! ```json
//! {
//!   "hostname": [{ "patterns": ["iphone", "ipad"], "label": "Apple" }],
//!   "ports": [{ "when": { "any": [9100, 515] }, "label": "Printer" }]
//! }
//! ```

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ReconError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostnameRule {
    /// Matched case-insensitively as substrings of the hostname.
    pub patterns: Vec<String>,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PortMatch {
    /// At least one of the ports is open.
    Any(Vec<u16>),
    /// Every one of the ports is open.
    All(Vec<u16>),
}

impl PortMatch {
    pub fn matches(&self, open: &BTreeSet<u16>) -> bool {
        match self {
            PortMatch::Any(ports) => ports.iter().any(|p| open.contains(p)),
            PortMatch::All(ports) => !ports.is_empty() && ports.iter().all(|p| open.contains(p)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortRule {
    pub when: PortMatch,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub hostname: Vec<HostnameRule>,
    pub ports: Vec<PortRule>,
    /// Vendor strings that carry no information ("unknown", "Not Found").
    pub placeholders: Vec<String>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            hostname: vec![
                hostname_rule(&["iphone", "ipad"], "Apple"),
                hostname_rule(&["android"], "Android"),
                hostname_rule(&["hp"], "HP"),
                hostname_rule(&["samsung"], "Samsung"),
                hostname_rule(&["huawei"], "Huawei"),
                hostname_rule(&["xiaomi"], "Xiaomi"),
                hostname_rule(&["printer", "impresora"], "Printer"),
                hostname_rule(&["camera", "camara"], "Camera"),
            ],
            ports: vec![
                PortRule {
                    when: PortMatch::Any(vec![9100, 515]),
                    label: "Printer (likely HP/Canon/Epson)".to_string(),
                },
                PortRule {
                    when: PortMatch::Any(vec![554]),
                    label: "IP camera".to_string(),
                },
                PortRule {
                    when: PortMatch::All(vec![80, 8080]),
                    label: "IoT/web-managed device".to_string(),
                },
            ],
            placeholders: vec!["unknown".to_string(), "not found".to_string()],
        }
    }
}

fn hostname_rule(patterns: &[&str], label: &str) -> HostnameRule {
    HostnameRule {
        patterns: patterns.iter().map(|p| p.to_string()).collect(),
        label: label.to_string(),
    }
}

impl RuleSet {
    /// Loads a rule file; sections missing from the file keep the built-in table.
    pub fn from_json_file(path: &Path) -> Result<Self, ReconError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| ReconError::RuleSet(format!("{}: {e}", path.display())))?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ReconError> {
        let rules: RuleSet =
            serde_json::from_str(raw).map_err(|e| ReconError::RuleSet(e.to_string()))?;
        rules.normalised()
    }

    fn normalised(mut self) -> Result<Self, ReconError> {
        for rule in &mut self.hostname {
            rule.patterns.retain(|p| !p.trim().is_empty());
            if rule.patterns.is_empty() {
                return Err(ReconError::RuleSet(format!(
                    "hostname rule '{}' has no patterns",
                    rule.label
                )));
            }
            for pattern in &mut rule.patterns {
                *pattern = pattern.trim().to_lowercase();
            }
        }
        for rule in &self.ports {
            let ports = match &rule.when {
                PortMatch::Any(ports) | PortMatch::All(ports) => ports,
            };
            if ports.is_empty() {
                return Err(ReconError::RuleSet(format!(
                    "port rule '{}' lists no ports",
                    rule.label
                )));
            }
        }
        for placeholder in &mut self.placeholders {
            *placeholder = placeholder.trim().to_lowercase();
        }
        Ok(self)
    }

    /// First hostname rule (in table order) with a pattern contained in `hostname`.
    pub fn match_hostname(&self, hostname: &str) -> Option<&str> {
        let hostname = hostname.to_lowercase();
        self.hostname
            .iter()
            .find(|rule| rule.patterns.iter().any(|p| hostname.contains(p.as_str())))
            .map(|rule| rule.label.as_str())
    }

    /// First port rule (in table order) satisfied by `open`.
    pub fn match_ports(&self, open: &BTreeSet<u16>) -> Option<&str> {
        self.ports
            .iter()
            .find(|rule| rule.when.matches(open))
            .map(|rule| rule.label.as_str())
    }

    /// Whether a vendor string is empty or one of the placeholder tokens.
    pub fn is_placeholder(&self, vendor: &str) -> bool {
        let vendor = vendor.trim().to_lowercase();
        vendor.is_empty() || self.placeholders.iter().any(|p| *p == vendor)
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
