//! `nmap` as the discovery and port-probe capability.

use std::io::ErrorKind;
use std::net::IpAddr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use lanscout_common::ReconError;
use lanscout_common::capability::{DiscoveryCapability, PortProbeCapability};
use lanscout_common::network::range::Subnet;
use tokio::process::Command;
use tracing::debug;

pub const NMAP: &str = "nmap";

/// Ping sweep with ICMP echo and TCP ACK probes on common service ports.
const DISCOVERY_ARGS: [&str; 3] = ["-sn", "-PE", "-PA21,23,80,3389"];

pub struct NmapDiscovery {
    timeout: Duration,
}

impl NmapDiscovery {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl DiscoveryCapability for NmapDiscovery {
    async fn run_discovery(&self, subnet: &Subnet) -> Result<String, ReconError> {
        let mut args: Vec<String> = DISCOVERY_ARGS.iter().map(|a| a.to_string()).collect();
        args.push(subnet.to_string());
        run_tool(NMAP, "discovery", &args, self.timeout).await
    }
}

pub struct NmapPortProbe {
    timeout: Duration,
}

impl NmapPortProbe {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl PortProbeCapability for NmapPortProbe {
    async fn run_port_probe(&self, address: IpAddr, ports: &[u16]) -> Result<String, ReconError> {
        let list: Vec<String> = ports.iter().map(u16::to_string).collect();
        let args = [
            "-p".to_string(),
            list.join(","),
            "--open".to_string(),
            address.to_string(),
        ];
        run_tool(NMAP, "port probe", &args, self.timeout).await
    }
}

/// Runs `program` to completion and returns its stdout.
///
/// The child is killed if the timeout fires first.
async fn run_tool(
    program: &str,
    capability: &'static str,
    args: &[String],
    timeout: Duration,
) -> Result<String, ReconError> {
    debug!("{program} {}", args.join(" "));

    let mut cmd = Command::new(program);
    cmd.args(args).stdin(Stdio::null()).kill_on_drop(true);

    let output = match tokio::time::timeout(timeout, cmd.output()).await {
        Err(_) => return Err(ReconError::NetworkTimeout { operation: capability }),
        Ok(Err(e)) if e.kind() == ErrorKind::NotFound => {
            return Err(ReconError::unavailable(
                capability,
                format!("{program} not found on PATH"),
            ));
        }
        Ok(Err(e)) => return Err(ReconError::unavailable(capability, e)),
        Ok(Ok(output)) => output,
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let reason = match stderr.trim() {
            "" => output.status.to_string(),
            msg => msg.to_string(),
        };
        return Err(ReconError::unavailable(capability, reason));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
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

    const SHORT: Duration = Duration::from_secs(5);

    #[tokio::test]
    async fn missing_binary_is_unavailable() {
        let err = run_tool("lanscout-no-such-binary", "discovery", &[], SHORT)
            .await
            .unwrap_err();

        assert_eq!(
            err,
            ReconError::unavailable("discovery", "lanscout-no-such-binary not found on PATH")
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn stdout_is_returned_on_success() {
        let args = ["Nmap scan report for 10.0.0.1".to_string()];
        let out = run_tool("echo", "discovery", &args, SHORT).await.unwrap();
        assert_eq!(out.trim(), "Nmap scan report for 10.0.0.1");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_is_unavailable() {
        let err = run_tool("false", "port probe", &[], SHORT).await.unwrap_err();
        assert!(matches!(
            err,
            ReconError::CapabilityUnavailable { capability: "port probe", .. }
        ));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_tool_times_out() {
        let args = ["5".to_string()];
        let err = run_tool("sleep", "discovery", &args, Duration::from_millis(100))
            .await
            .unwrap_err();
        assert_eq!(err, ReconError::NetworkTimeout { operation: "discovery" });
    }
}
