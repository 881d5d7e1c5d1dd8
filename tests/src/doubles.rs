use std::collections::{HashMap, VecDeque};
use std::net::IpAddr;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use lanscout_common::ReconError;
use lanscout_common::capability::{
    DiscoveryCapability, HostnameLookup, PortProbeCapability, VendorLookup,
};
use lanscout_common::network::device::DiscoverySession;
use lanscout_common::network::range::Subnet;
use lanscout_core::operator::OperatorConsole;
use lanscout_core::scanner::{Capabilities, Stage};
use lanscout_core::stress::{StressPlan, StressReport};

/*************************************************************
                      Capability doubles
**************************************************************/

pub struct FakeDiscovery {
    report: Result<String, ReconError>,
}

impl FakeDiscovery {
    pub fn report(report: &str) -> Self {
        Self { report: Ok(report.to_string()) }
    }

    pub fn unavailable(reason: &str) -> Self {
        Self { report: Err(ReconError::unavailable("discovery", reason)) }
    }
}

#[async_trait]
impl DiscoveryCapability for FakeDiscovery {
    async fn run_discovery(&self, _subnet: &Subnet) -> Result<String, ReconError> {
        self.report.clone()
    }
}

/// Answers every probe with the `nmap` lines registered for the address.
#[derive(Default)]
pub struct FakeProbe {
    open: HashMap<IpAddr, Vec<u16>>,
    failure: Option<ReconError>,
}

impl FakeProbe {
    /// Every probe fails with `failure`.
    pub fn failing(failure: ReconError) -> Self {
        Self { failure: Some(failure), ..Self::default() }
    }

    pub fn with_open(mut self, address: &str, ports: &[u16]) -> Self {
        self.open.insert(ip(address), ports.to_vec());
        self
    }
}

#[async_trait]
impl PortProbeCapability for FakeProbe {
    async fn run_port_probe(&self, address: IpAddr, _ports: &[u16]) -> Result<String, ReconError> {
        if let Some(failure) = &self.failure {
            return Err(failure.clone());
        }
        let lines: Vec<String> = self
            .open
            .get(&address)
            .into_iter()
            .flatten()
            .map(|port| format!("{port}/tcp open  unknown"))
            .collect();
        Ok(format!("PORT     STATE SERVICE\n{}\n", lines.join("\n")))
    }
}

/// Vendor table keyed by hardware address; records how often it was asked.
#[derive(Default)]
pub struct CountingLookup {
    table: HashMap<String, String>,
    failing: bool,
    calls: AtomicUsize,
}

impl CountingLookup {
    pub fn failing() -> Self {
        Self { failing: true, ..Self::default() }
    }

    pub fn with_vendor(mut self, mac: &str, vendor: &str) -> Self {
        self.table.insert(mac.to_string(), vendor.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl VendorLookup for CountingLookup {
    async fn lookup(&self, hardware_address: &str) -> Result<Option<String>, ReconError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.failing {
            return Err(ReconError::NetworkTimeout { operation: "vendor lookup" });
        }
        Ok(self.table.get(hardware_address).cloned())
    }
}

#[derive(Default)]
pub struct FakeHostnames {
    names: HashMap<IpAddr, String>,
    calls: AtomicUsize,
}

impl FakeHostnames {
    pub fn with_name(mut self, address: &str, name: &str) -> Self {
        self.names.insert(ip(address), name.to_string());
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HostnameLookup for FakeHostnames {
    async fn reverse(&self, address: IpAddr) -> Result<Option<String>, ReconError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.names.get(&address).cloned())
    }
}

pub fn capabilities(
    discovery: FakeDiscovery,
    probe: FakeProbe,
    vendors: Arc<CountingLookup>,
    hostnames: Arc<FakeHostnames>,
) -> Capabilities {
    Capabilities {
        discovery: Arc::new(discovery),
        port_probe: Arc::new(probe),
        vendors,
        hostnames,
    }
}

/*************************************************************
                        Operator double
**************************************************************/

/// Replays canned answers and records everything it is shown.
#[derive(Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    pub questions: Vec<String>,
    pub notices: Vec<String>,
    pub reports: Vec<DiscoverySession>,
    pub stages: Vec<Stage>,
    pub started: Option<StressPlan>,
    pub finished: Option<StressReport>,
}

impl ScriptedConsole {
    pub fn answering(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl OperatorConsole for ScriptedConsole {
    fn stage_changed(&mut self, stage: Stage) {
        self.stages.push(stage);
    }

    fn notice(&mut self, message: &str) {
        self.notices.push(message.to_string());
    }

    fn report(&mut self, session: &DiscoverySession) {
        self.reports.push(session.clone());
    }

    fn ask(&mut self, question: &str) -> Option<String> {
        self.questions.push(question.to_string());
        self.answers.pop_front()
    }

    fn stress_started(&mut self, plan: &StressPlan) {
        self.started = Some(*plan);
    }

    fn stress_finished(&mut self, report: &StressReport) {
        self.finished = Some(report.clone());
    }
}

pub fn ip(address: &str) -> IpAddr {
    address.parse().expect("test address")
}

pub fn subnet(cidr: &str) -> Subnet {
    cidr.parse().expect("test subnet")
}
