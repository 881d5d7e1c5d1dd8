//! # Orchestrator
//!
//! Drives one run over a subnet through a strictly forward state machine:
//!
//! ```text
//! Idle -> Discovering -> Parsing -> Enriching -> Reporting
//!      -> AttackSelection -> Attacking -> Done
//! ```
//!
//! Discovery failure jumps straight to `Reporting` with an empty session, and
//! a parse that yields nothing skips `Enriching`. The stress phase only runs
//! when enabled in the [`Config`] and the operator confirms a plan.
//!
//! Collaborators are injected as capability trait objects through
//! [`Capabilities`], so the same state machine runs against `nmap` and the
//! network in the CLI and against in-memory doubles in tests.

use std::fmt;
use std::sync::Arc;

use lanscout_common::ReconError;
use lanscout_common::capability::{
    DiscoveryCapability, HostnameLookup, PortProbeCapability, VendorLookup,
};
use lanscout_common::config::Config;
use lanscout_common::network::device::{Device, DiscoverySession, UNKNOWN_VENDOR, VendorSource};
use lanscout_common::network::range::Subnet;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::discovery::{DiscoveryOutcome, DiscoveryRunner};
use crate::operator::OperatorConsole;
use crate::parser::parse_report;
use crate::probe::PortProbe;
use crate::resolver::HostnameResolver;
use crate::selection::select_stress_plan;
use crate::stress::{LoadGenerator, StressReport};
use crate::vendors::VendorClassifier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Idle,
    Discovering,
    Parsing,
    Enriching,
    Reporting,
    AttackSelection,
    Attacking,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Idle => "idle",
            Stage::Discovering => "discovering",
            Stage::Parsing => "parsing",
            Stage::Enriching => "enriching",
            Stage::Reporting => "reporting",
            Stage::AttackSelection => "attack selection",
            Stage::Attacking => "attacking",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

/// The external collaborators a run depends on.
#[derive(Clone)]
pub struct Capabilities {
    pub discovery: Arc<dyn DiscoveryCapability>,
    pub port_probe: Arc<dyn PortProbeCapability>,
    pub vendors: Arc<dyn VendorLookup>,
    pub hostnames: Arc<dyn HostnameLookup>,
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub session: DiscoverySession,
    pub stress: Option<StressReport>,
    pub stages: Vec<Stage>,
}

pub struct Orchestrator {
    cfg: Arc<Config>,
    discovery: DiscoveryRunner,
    resolver: Arc<HostnameResolver>,
    probe: Arc<PortProbe>,
    classifier: Arc<VendorClassifier>,
    stages: Vec<Stage>,
}

impl Orchestrator {
    pub fn new(cfg: Arc<Config>, caps: Capabilities) -> Self {
        let resolver = if cfg.no_dns {
            HostnameResolver::disabled(caps.hostnames)
        } else {
            HostnameResolver::new(caps.hostnames, cfg.timeouts.reverse_dns)
        };

        Self {
            discovery: DiscoveryRunner::new(caps.discovery),
            resolver: Arc::new(resolver),
            probe: Arc::new(PortProbe::new(caps.port_probe, &cfg.probe_ports)),
            classifier: Arc::new(VendorClassifier::new(caps.vendors, cfg.rules.clone())),
            stages: vec![Stage::Idle],
            cfg,
        }
    }

    /// The states visited so far, in order.
    pub fn stages(&self) -> &[Stage] {
        &self.stages
    }

    pub fn current(&self) -> Stage {
        self.stages.last().copied().unwrap_or(Stage::Idle)
    }

    /// Runs the whole pipeline once.
    ///
    /// Returns [`ReconError::NoDevicesFound`] after reporting an empty
    /// session; every other fault is handled inside its stage.
    pub async fn run(
        &mut self,
        subnet: Subnet,
        console: &mut dyn OperatorConsole,
    ) -> Result<RunSummary, ReconError> {
        let mut session = DiscoverySession::new(subnet);

        self.advance(Stage::Discovering, console);
        match self.discovery.run(&session.subnet).await {
            DiscoveryOutcome::Report(report) => {
                self.advance(Stage::Parsing, console);
                session.devices = parse_report(&report);
                debug!(devices = session.devices.len(), "parsed discovery report");

                if !session.devices.is_empty() {
                    self.advance(Stage::Enriching, console);
                    session.devices = self
                        .enrich(std::mem::take(&mut session.devices), console)
                        .await;
                }
            }
            DiscoveryOutcome::Unavailable { reason } => {
                let notice = format!("Discovery unavailable: {reason}");
                console.notice(&notice);
                session.notice = Some(notice);
            }
        }

        self.advance(Stage::Reporting, console);
        session.finish();
        console.report(&session);

        if session.is_empty() {
            self.advance(Stage::Done, console);
            return Err(ReconError::NoDevicesFound);
        }

        let stress = self.stress_phase(&session, console).await;
        self.advance(Stage::Done, console);

        Ok(RunSummary {
            session,
            stress,
            stages: self.stages.clone(),
        })
    }

    async fn stress_phase(
        &mut self,
        session: &DiscoverySession,
        console: &mut dyn OperatorConsole,
    ) -> Option<StressReport> {
        if !self.cfg.stress.enabled || self.cfg.disable_input {
            return None;
        }

        self.advance(Stage::AttackSelection, console);
        let plan = match select_stress_plan(console, session, &self.cfg.stress) {
            Ok(Some(plan)) => plan,
            Ok(None) => {
                console.notice("Stress run skipped");
                return None;
            }
            Err(e) => {
                console.notice(&format!("Stress run aborted: {e}"));
                return None;
            }
        };

        self.advance(Stage::Attacking, console);
        console.stress_started(&plan);
        let report = LoadGenerator::new(self.cfg.timeouts.connect).run(plan).await;
        console.stress_finished(&report);
        Some(report)
    }

    /// Resolves, probes and classifies every device on a bounded pool.
    ///
    /// Device order is preserved. A device whose task fails keeps whatever it
    /// had and is labelled `Unknown`. An unusable probe tool is reported to
    /// the operator once per run, however many devices it failed on.
    async fn enrich(&self, mut devices: Vec<Device>, console: &mut dyn OperatorConsole) -> Vec<Device> {
        let permits = Arc::new(Semaphore::new(self.cfg.enrichment_workers.max(1)));
        let mut tasks = JoinSet::new();

        for (idx, device) in devices.iter().cloned().enumerate() {
            let permits = permits.clone();
            let resolver = self.resolver.clone();
            let probe = self.probe.clone();
            let classifier = self.classifier.clone();

            tasks.spawn(async move {
                let _permit = permits.acquire_owned().await.ok()?;
                let (device, failure) = enrich_device(device, &resolver, &probe, &classifier).await;
                Some((idx, device, failure))
            });
        }

        let mut probe_failure: Option<ReconError> = None;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some((idx, device, failure))) => {
                    devices[idx] = device;
                    if probe_failure.is_none() {
                        probe_failure = failure;
                    }
                }
                Ok(None) => warn!("Enrichment pool closed early"),
                Err(e) => warn!("Enrichment task failed: {e}"),
            }
        }

        if let Some(e) = probe_failure {
            console.notice(&format!("Port probe unavailable, open ports not checked: {e}"));
        }

        for device in devices.iter_mut() {
            device.fill_vendor(UNKNOWN_VENDOR.to_string(), VendorSource::Fallback);
        }
        devices
    }

    fn advance(&mut self, next: Stage, console: &mut dyn OperatorConsole) {
        let current = self.current();
        if next <= current {
            warn!("Ignoring backward transition {current} -> {next}");
            return;
        }
        debug!("{current} -> {next}");
        self.stages.push(next);
        console.stage_changed(next);
    }
}

async fn enrich_device(
    mut device: Device,
    resolver: &HostnameResolver,
    probe: &PortProbe,
    classifier: &VendorClassifier,
) -> (Device, Option<ReconError>) {
    let (hostname, probed) = tokio::join!(resolver.resolve(device.address), probe.probe(device.address));
    device.fill_hostname(hostname);
    let failure = match probed {
        Ok(ports) => {
            device.fill_open_ports(ports);
            None
        }
        Err(e) => Some(e),
    };

    let classification = classifier.classify(&device).await;
    device.fill_vendor(classification.label, classification.source);
    (device, failure)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
