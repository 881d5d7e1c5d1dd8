//! # Stress Target Selection
//!
//! Turns the operator's answers into a [`StressPlan`]. The sequence is:
//! device position (0 declines), target port, duration, worker count and a
//! final explicit confirmation. Only the device question can make the phase
//! fail; the numeric follow-ups fall back to their defaults on blank or
//! non-numeric input.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use lanscout_common::ReconError;
use lanscout_common::config::StressConfig;
use lanscout_common::network::device::DiscoverySession;
use tracing::warn;

use crate::operator::OperatorConsole;
use crate::stress::StressPlan;

const CONFIRMATION: &str = "yes";

/// Parses the 1-based device position; `Ok(None)` means the operator declined.
pub fn parse_device_choice(input: &str, device_count: usize) -> Result<Option<usize>, ReconError> {
    let input = input.trim();
    let position = input
        .parse::<usize>()
        .map_err(|_| ReconError::InvalidOperatorInput(format!("'{input}' is not a device number")))?;

    match position {
        0 => Ok(None),
        n if n <= device_count => Ok(Some(n)),
        n => Err(ReconError::InvalidOperatorInput(format!(
            "device {n} is out of range (1-{device_count})"
        ))),
    }
}

/// Digits only; anything else (blank, signs, words) yields `default`.
pub fn numeric_or<T: FromStr>(input: &str, default: T) -> T {
    let input = input.trim();
    if input.is_empty() || !input.chars().all(|c| c.is_ascii_digit()) {
        return default;
    }
    input.parse().unwrap_or(default)
}

pub fn is_confirmation(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(CONFIRMATION)
}

/// Walks the operator through the selection prompts.
///
/// Returns `Ok(None)` when the operator declines or does not confirm.
pub fn select_stress_plan(
    console: &mut dyn OperatorConsole,
    session: &DiscoverySession,
    cfg: &StressConfig,
) -> Result<Option<StressPlan>, ReconError> {
    let count = session.devices.len();
    let Some(answer) = console.ask(&format!(
        "Select a device for the stress run (1-{count}, 0 to skip)"
    )) else {
        return Ok(None);
    };

    let Some(position) = parse_device_choice(&answer, count)? else {
        return Ok(None);
    };
    let Some(device) = session.by_position(position) else {
        return Ok(None);
    };

    if !device.open_ports.is_empty() {
        let ports: Vec<String> = device.open_ports.iter().map(u16::to_string).collect();
        console.notice(&format!("Open ports on {}: {}", device.address, ports.join(", ")));
    }

    let port = ask_number(
        console,
        &format!("Target port (Enter for {})", cfg.default_port),
        cfg.default_port,
    );
    let port = if port == 0 { cfg.default_port } else { port };

    let seconds = ask_number(
        console,
        &format!("Duration in seconds (Enter for {})", cfg.default_duration.as_secs()),
        cfg.default_duration.as_secs(),
    );
    let duration = clamp_duration(Duration::from_secs(seconds), cfg);

    let workers = ask_number(
        console,
        &format!("Worker count (Enter for {})", cfg.default_workers),
        cfg.default_workers,
    );
    let workers = clamp_workers(workers, cfg);

    let plan = StressPlan::new(SocketAddr::new(device.address, port), duration, workers)?;

    let confirmed = console
        .ask(&format!("Stress {plan}? Type '{CONFIRMATION}' to proceed"))
        .is_some_and(|answer| is_confirmation(&answer));

    Ok(confirmed.then_some(plan))
}

fn ask_number<T: FromStr + Copy>(console: &mut dyn OperatorConsole, question: &str, default: T) -> T {
    console
        .ask(question)
        .map(|answer| numeric_or(&answer, default))
        .unwrap_or(default)
}

fn clamp_duration(duration: Duration, cfg: &StressConfig) -> Duration {
    if duration.is_zero() {
        return cfg.default_duration;
    }
    if duration > cfg.max_duration {
        warn!("Duration capped at {}s", cfg.max_duration.as_secs());
        return cfg.max_duration;
    }
    duration
}

fn clamp_workers(workers: usize, cfg: &StressConfig) -> usize {
    if workers == 0 {
        return cfg.default_workers.max(1);
    }
    if workers > cfg.max_workers {
        warn!("Worker count capped at {}", cfg.max_workers);
        return cfg.max_workers;
    }
    workers
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
