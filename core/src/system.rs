use std::env;
use std::path::PathBuf;

use is_root::is_root;

use crate::adapters::nmap::NMAP;

/// What the host offers the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemStatus {
    pub privileged: bool,
    pub nmap: Option<PathBuf>,
}

impl SystemStatus {
    pub fn probe() -> Self {
        Self {
            privileged: has_raw_privileges(),
            nmap: find_on_path(NMAP),
        }
    }
}

/// `nmap` falls back to TCP connect probes without this, and can't read
/// hardware addresses.
pub fn has_raw_privileges() -> bool {
    is_root()
}

/// First executable named `binary` on `PATH`.
pub fn find_on_path(binary: &str) -> Option<PathBuf> {
    let paths = env::var_os("PATH")?;
    env::split_paths(&paths)
        .flat_map(|dir| candidates(dir, binary))
        .find(|candidate| candidate.is_file())
}

#[cfg(windows)]
fn candidates(dir: PathBuf, binary: &str) -> Vec<PathBuf> {
    vec![dir.join(format!("{binary}.exe")), dir.join(binary)]
}

#[cfg(not(windows))]
fn candidates(dir: PathBuf, binary: &str) -> Vec<PathBuf> {
    vec![dir.join(binary)]
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
