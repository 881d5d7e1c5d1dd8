use async_trait::async_trait;
use lanscout_common::ReconError;
use lanscout_common::capability::VendorLookup;
use mac_oui::Oui;

/// Offline vendor lookup against the IEEE OUI table bundled with `mac_oui`.
pub struct OuiDatabase {
    db: Oui,
}

impl OuiDatabase {
    pub fn load() -> anyhow::Result<Self> {
        let db = Oui::default().map_err(|e| anyhow::anyhow!("failed to load OUI database: {e:?}"))?;
        Ok(Self { db })
    }
}

#[async_trait]
impl VendorLookup for OuiDatabase {
    async fn lookup(&self, hardware_address: &str) -> Result<Option<String>, ReconError> {
        match self.db.lookup_by_mac(hardware_address) {
            Ok(Some(entry)) => Ok(Some(entry.company_name.clone())),
            _ => Ok(None),
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
