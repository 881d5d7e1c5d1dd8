use std::sync::Arc;

use lanscout_common::ReconError;
use lanscout_common::config::Config;
use lanscout_common::network::device::{UNKNOWN_VENDOR, VendorSource};
use lanscout_common::rules::RuleSet;
use lanscout_core::scanner::{Orchestrator, Stage};

use crate::doubles::{
    CountingLookup, FakeDiscovery, FakeHostnames, FakeProbe, ScriptedConsole, capabilities, ip,
    subnet,
};

const HOME_LAN: &str = "\
Starting Nmap 7.94 ( https://nmap.org )
Nmap scan report for router.lan (192.168.1.1)
Host is up (0.0010s latency).
MAC Address: 11:11:11:11:11:11 (Example Routers)
Nmap scan report for 192.168.1.23
Host is up (0.0040s latency).
MAC Address: 22:22:22:22:22:22 (Unknown)
Nmap scan report for 192.168.1.40
Host is up (0.0050s latency).
MAC Address: 33:33:33:33:33:33 (Unknown)
Nmap scan report for 192.168.1.77
Host is up (0.0020s latency).
Nmap done: 256 IP addresses (4 hosts up) scanned in 2.10 seconds
";

/// This test checks the smallest complete run: one report line with a vendor
/// is classified from the report alone.
#[tokio::test]
async fn reported_vendor_needs_no_lookup() {
    let report = "Discovery report for 192.168.1.10\nMAC Address: AA:BB:CC:DD:EE:FF (Example Corp)\n";
    let lookup = Arc::new(CountingLookup::default());
    let caps = capabilities(
        FakeDiscovery::report(report),
        FakeProbe::default(),
        lookup.clone(),
        Arc::new(FakeHostnames::default()),
    );
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);
    let mut console = ScriptedConsole::default();

    let summary = orchestrator
        .run(subnet("192.168.1.0/24"), &mut console)
        .await
        .expect("one device was reported");

    let devices = &summary.session.devices;
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].address, ip("192.168.1.10"));
    assert_eq!(devices[0].hardware_address.as_deref(), Some("AA:BB:CC:DD:EE:FF"));
    assert_eq!(devices[0].vendor_label(), "Example Corp");
    assert_eq!(devices[0].vendor_source, Some(VendorSource::Reported));
    assert_eq!(lookup.calls(), 0);
    assert_eq!(console.reports.len(), 1);
}

#[tokio::test]
async fn every_tier_is_reachable_in_one_run() {
    let lookup = Arc::new(
        CountingLookup::default().with_vendor("22:22:22:22:22:22", "Example Printers Inc."),
    );
    let hostnames = Arc::new(
        FakeHostnames::default()
            .with_name("192.168.1.40", "Johns-iPhone.lan.")
            .with_name("192.168.1.1", "router.lan"),
    );
    let probe = FakeProbe::default()
        .with_open("192.168.1.23", &[9100])
        .with_open("192.168.1.40", &[80, 8080])
        .with_open("192.168.1.77", &[554]);

    let caps = capabilities(FakeDiscovery::report(HOME_LAN), probe, lookup.clone(), hostnames);
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);
    let mut console = ScriptedConsole::default();

    let summary = orchestrator.run(subnet("192.168.1.0/24"), &mut console).await.unwrap();
    let labels: Vec<(&str, Option<VendorSource>)> = summary
        .session
        .devices
        .iter()
        .map(|d| (d.vendor_label(), d.vendor_source))
        .collect();

    assert_eq!(
        labels,
        vec![
            ("Example Routers", Some(VendorSource::Reported)),
            ("Example Printers Inc.", Some(VendorSource::Lookup)),
            ("Apple", Some(VendorSource::Hostname)),
            ("IP camera", Some(VendorSource::Ports)),
        ]
    );
    // The fourth device has no hardware address, so only two lookups go out.
    assert_eq!(lookup.calls(), 2);
    assert_eq!(summary.session.devices[2].hostname.as_deref(), Some("Johns-iPhone.lan"));
    assert_eq!(
        summary.session.devices[2].open_ports.iter().copied().collect::<Vec<_>>(),
        vec![80, 8080]
    );
}

#[tokio::test]
async fn failing_lookup_falls_through_to_heuristics() {
    let report = "Nmap scan report for 10.0.0.5\nMAC Address: 44:44:44:44:44:44 (Unknown)\n\
                  Nmap scan report for 10.0.0.6\nMAC Address: 55:55:55:55:55:55 (Unknown)\n";
    let lookup = Arc::new(CountingLookup::failing());
    let hostnames = Arc::new(FakeHostnames::default().with_name("10.0.0.5", "android-7f3a"));
    let probe = FakeProbe::default().with_open("10.0.0.5", &[9100]);

    let caps = capabilities(FakeDiscovery::report(report), probe, lookup.clone(), hostnames);
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);

    let summary = orchestrator
        .run(subnet("10.0.0.0/24"), &mut ScriptedConsole::default())
        .await
        .unwrap();

    assert_eq!(summary.session.devices[0].vendor_label(), "Android");
    assert_eq!(summary.session.devices[1].vendor_label(), UNKNOWN_VENDOR);
    assert_eq!(summary.session.devices[1].vendor_source, Some(VendorSource::Fallback));
    assert_eq!(lookup.calls(), 2);
}

#[tokio::test]
async fn unavailable_discovery_reports_an_empty_session() {
    let caps = capabilities(
        FakeDiscovery::unavailable("nmap not found on PATH"),
        FakeProbe::default(),
        Arc::new(CountingLookup::default()),
        Arc::new(FakeHostnames::default()),
    );
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);
    let mut console = ScriptedConsole::default();

    let result = orchestrator.run(subnet("192.168.1.0/24"), &mut console).await;

    assert_eq!(result.unwrap_err(), ReconError::NoDevicesFound);
    assert_eq!(console.reports.len(), 1);
    assert!(console.reports[0].is_empty());
    assert!(console.reports[0].notice.is_some());
    assert_eq!(console.notices.len(), 1);
    assert!(console.notices[0].contains("nmap not found on PATH"));
    assert_eq!(console.stages, vec![Stage::Discovering, Stage::Reporting, Stage::Done]);
}

#[tokio::test]
async fn single_worker_pool_still_enriches_everything_in_order() {
    let hostnames = Arc::new(FakeHostnames::default());
    let caps = capabilities(
        FakeDiscovery::report(HOME_LAN),
        FakeProbe::default(),
        Arc::new(CountingLookup::default()),
        hostnames.clone(),
    );
    let cfg = Config {
        enrichment_workers: 1,
        ..Config::default()
    };
    let mut orchestrator = Orchestrator::new(Arc::new(cfg), caps);

    let summary = orchestrator
        .run(subnet("192.168.1.0/24"), &mut ScriptedConsole::default())
        .await
        .unwrap();

    let addresses: Vec<_> = summary.session.devices.iter().map(|d| d.address).collect();
    assert_eq!(
        addresses,
        vec![ip("192.168.1.1"), ip("192.168.1.23"), ip("192.168.1.40"), ip("192.168.1.77")]
    );
    assert!(summary.session.devices.iter().all(|d| d.vendor_source.is_some()));
    assert_eq!(hostnames.calls(), 4);
}

#[tokio::test]
async fn no_dns_skips_the_resolver() {
    let hostnames = Arc::new(FakeHostnames::default().with_name("192.168.1.40", "Johns-iPhone"));
    let caps = capabilities(
        FakeDiscovery::report(HOME_LAN),
        FakeProbe::default(),
        Arc::new(CountingLookup::default()),
        hostnames.clone(),
    );
    let cfg = Config {
        no_dns: true,
        ..Config::default()
    };
    let mut orchestrator = Orchestrator::new(Arc::new(cfg), caps);

    let summary = orchestrator
        .run(subnet("192.168.1.0/24"), &mut ScriptedConsole::default())
        .await
        .unwrap();

    assert_eq!(hostnames.calls(), 0);
    assert!(summary.session.devices.iter().all(|d| d.hostname.is_none()));
}

#[tokio::test]
async fn custom_rules_replace_the_builtin_tables() {
    let rules = RuleSet::from_json(
        r#"{
            "hostname": [{ "patterns": ["NAS"], "label": "Storage" }],
            "ports": [{ "when": { "all": [80, 8080] }, "label": "Media box" }]
        }"#,
    )
    .unwrap();

    let hostnames = Arc::new(FakeHostnames::default().with_name("192.168.1.23", "office-nas"));
    let probe = FakeProbe::default().with_open("192.168.1.40", &[80, 8080]);
    let caps = capabilities(
        FakeDiscovery::report(HOME_LAN),
        probe,
        Arc::new(CountingLookup::default()),
        hostnames,
    );
    let cfg = Config {
        rules,
        ..Config::default()
    };
    let mut orchestrator = Orchestrator::new(Arc::new(cfg), caps);

    let summary = orchestrator
        .run(subnet("192.168.1.0/24"), &mut ScriptedConsole::default())
        .await
        .unwrap();

    assert_eq!(summary.session.devices[1].vendor_label(), "Storage");
    assert_eq!(summary.session.devices[2].vendor_label(), "Media box");
}

#[tokio::test]
async fn unavailable_port_probe_is_noticed_once() {
    let caps = capabilities(
        FakeDiscovery::report(HOME_LAN),
        FakeProbe::failing(ReconError::unavailable("port probe", "nmap not found on PATH")),
        Arc::new(CountingLookup::default()),
        Arc::new(FakeHostnames::default()),
    );
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);
    let mut console = ScriptedConsole::default();

    let summary = orchestrator.run(subnet("192.168.1.0/24"), &mut console).await.unwrap();

    assert_eq!(summary.session.devices.len(), 4);
    assert!(summary.session.devices.iter().all(|d| d.open_ports.is_empty()));
    assert_eq!(console.notices.len(), 1);
    assert!(console.notices[0].contains("Port probe unavailable"));
    assert!(console.notices[0].contains("nmap not found on PATH"));
}

#[tokio::test]
async fn timed_out_port_probe_stays_quiet() {
    let caps = capabilities(
        FakeDiscovery::report(HOME_LAN),
        FakeProbe::failing(ReconError::NetworkTimeout { operation: "port probe" }),
        Arc::new(CountingLookup::default()),
        Arc::new(FakeHostnames::default()),
    );
    let mut orchestrator = Orchestrator::new(Arc::new(Config::default()), caps);
    let mut console = ScriptedConsole::default();

    let summary = orchestrator.run(subnet("192.168.1.0/24"), &mut console).await.unwrap();

    assert!(summary.session.devices.iter().all(|d| d.open_ports.is_empty()));
    assert!(console.notices.is_empty());
}
