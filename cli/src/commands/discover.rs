use std::sync::Arc;
use std::time::{Duration, Instant};

use colored::*;
use console::Term;
use tracing::{Instrument, Span, debug, info_span};

use crate::{mprint, terminal::{colors, format, print, spinner}};
use lanscout_common::{config::Config, success, warn};
use lanscout_common::network::device::DiscoverySession;
use lanscout_common::network::interface::AddressInfo;
use lanscout_common::network::range::Subnet;
use lanscout_core::adapters;
use lanscout_core::operator::OperatorConsole;
use lanscout_core::scanner::{Orchestrator, Stage};
use lanscout_core::stress::{StressPlan, StressReport};

pub async fn discover(subnet: Option<Subnet>, cfg: Config) -> anyhow::Result<()> {
    let local = AddressInfo::detect()?;
    debug!(origin = ?local.origin, "local address {}", local.local_ip);
    let subnet = match subnet {
        Some(subnet) => {
            if !subnet.contains(local.local_ip) {
                warn!("{subnet} is not the local network ({}); hardware addresses will be missing", local.subnet);
            }
            subnet
        }
        None => local.subnet,
    };

    print::header(&format!("sweeping {subnet}"), cfg.quiet);

    let caps = adapters::system_capabilities(&cfg)?;
    let cfg = Arc::new(cfg);

    let span = info_span!("discovery", indicatif.pb_show = true);
    let mut console = TerminalConsole::new(span.clone(), cfg.quiet);
    let mut orchestrator = Orchestrator::new(cfg.clone(), caps);

    orchestrator.run(subnet, &mut console).instrument(span).await?;
    Ok(())
}

/// The operator console on an interactive terminal.
struct TerminalConsole {
    span: Span,
    quiet: u8,
    term: Term,
    started: Instant,
}

impl TerminalConsole {
    fn new(span: Span, quiet: u8) -> Self {
        Self {
            span,
            quiet,
            term: Term::stdout(),
            started: Instant::now(),
        }
    }
}

impl OperatorConsole for TerminalConsole {
    fn stage_changed(&mut self, stage: Stage) {
        spinner::set_message(&self.span, &format!("{stage}..."));
    }

    fn notice(&mut self, message: &str) {
        warn!("{message}");
    }

    fn report(&mut self, session: &DiscoverySession) {
        discovery_ends(session, self.started.elapsed(), self.quiet);
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        let prompt = format!("{} {question}: ", "[?]".cyan().bold());
        let term = &self.term;
        tokio::task::block_in_place(|| {
            tracing_indicatif::suspend_tracing_indicatif(|| {
                term.write_str(&prompt).ok()?;
                term.read_line().ok()
            })
        })
    }

    fn stress_started(&mut self, plan: &StressPlan) {
        spinner::set_message(&self.span, &format!("stressing {plan}"));
    }

    fn stress_finished(&mut self, report: &StressReport) {
        print_stress_report(report, self.quiet);
    }
}

fn discovery_ends(session: &DiscoverySession, total_time: Duration, quiet: u8) {
    if session.is_empty() {
        no_devices_found(quiet);
        return;
    }

    if quiet > 0 {
        mprint!();
    }

    print::header("Network Discovery", quiet);
    print_devices(session, quiet);
    print_summary(session.devices.len(), total_time, quiet);
}

fn no_devices_found(quiet: u8) {
    print::header("ZERO DEVICES DETECTED", quiet);
    if quiet < 2 {
        print::no_results();
    }
}

fn print_devices(session: &DiscoverySession, quiet: u8) {
    for (idx, device) in session.devices.iter().enumerate() {
        let position = idx + 1;
        let name = device.hostname.as_deref().unwrap_or("No hostname");
        match quiet {
            0 => {
                print::device_tree(position, name, &format::device_details(device));
            }
            1 => print::status(&format!(
                "[{}] {} {} {}",
                position.to_string().color(colors::ACCENT),
                device.address.to_string().color(colors::IPV4_ADDR),
                device.vendor_label().color(colors::VENDOR),
                name.color(colors::SEPARATOR)
            )),
            _ => {}
        }
        if quiet == 0 && position != session.devices.len() {
            mprint!();
        }
    }
}

fn print_summary(device_count: usize, total_time: Duration, quiet: u8) {
    let active: ColoredString = format!("{device_count} devices").bold().green();
    let total_time: ColoredString = format!("{:.2}s", total_time.as_secs_f64()).bold().yellow();
    let output: &ColoredString = &format!("Discovery Complete: {active} identified in {total_time}")
        .color(colors::TEXT_DEFAULT);

    match quiet {
        0 => {
            print::fat_separator();
            print::centerln(output);
        }
        _ => {
            mprint!();
            success!("{}", output)
        }
    }
}

fn print_stress_report(report: &StressReport, quiet: u8) {
    let totals = report.totals;
    if quiet > 0 {
        success!(
            "Stress run finished: {} attempts, {} connected, {} failed",
            totals.attempts,
            totals.connected,
            totals.failed
        );
        return;
    }

    print::header("Stress Run", quiet);
    let plain = |text: String| text.color(colors::TEXT_DEFAULT);
    print::aligned_block(&[
        ("Target", plain(report.plan.target.to_string())),
        ("Elapsed", plain(format!("{:.2}s", report.elapsed.as_secs_f64()))),
        (
            "Workers",
            plain(format!("{} joined, {} failed", report.workers_joined, report.workers_failed)),
        ),
        ("Attempts", plain(totals.attempts.to_string())),
        ("Connected", totals.connected.to_string().green()),
        ("Failed", totals.failed.to_string().red()),
    ]);
    print::fat_separator();
}
