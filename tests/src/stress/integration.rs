use std::sync::Arc;
use std::time::Duration;

use lanscout_common::config::Config;
use lanscout_core::scanner::{Orchestrator, Stage};
use tokio::net::TcpListener;

use crate::doubles::{
    CountingLookup, FakeDiscovery, FakeHostnames, FakeProbe, ScriptedConsole, capabilities, subnet,
};

fn stress_config() -> Config {
    let mut cfg = Config::default();
    cfg.stress.enabled = true;
    cfg.timeouts.connect = Duration::from_millis(200);
    cfg
}

fn orchestrator(report: &str, probe: FakeProbe, cfg: Config) -> Orchestrator {
    let caps = capabilities(
        FakeDiscovery::report(report),
        probe,
        Arc::new(CountingLookup::default()),
        Arc::new(FakeHostnames::default()),
    );
    Orchestrator::new(Arc::new(cfg), caps)
}

/// Accepts and drops connections until the test ends.
async fn sink() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    port
}

#[tokio::test]
async fn stress_is_not_offered_unless_enabled() {
    let mut orchestrator = orchestrator("Nmap scan report for 127.0.0.1\n", FakeProbe::default(), Config::default());
    let mut console = ScriptedConsole::answering(&["1"]);

    let summary = orchestrator.run(subnet("127.0.0.0/24"), &mut console).await.unwrap();

    assert!(console.questions.is_empty());
    assert!(summary.stress.is_none());
    assert!(!summary.stages.contains(&Stage::AttackSelection));
}

#[tokio::test]
async fn declining_the_device_prompt_ends_the_run() {
    let mut orchestrator = orchestrator("Nmap scan report for 127.0.0.1\n", FakeProbe::default(), stress_config());
    let mut console = ScriptedConsole::answering(&["0"]);

    let summary = orchestrator.run(subnet("127.0.0.0/24"), &mut console).await.unwrap();

    assert!(summary.stress.is_none());
    assert_eq!(console.questions.len(), 1);
    assert_eq!(
        console.stages,
        vec![
            Stage::Discovering,
            Stage::Parsing,
            Stage::Enriching,
            Stage::Reporting,
            Stage::AttackSelection,
            Stage::Done
        ]
    );
}

#[tokio::test]
async fn invalid_device_answer_aborts_without_error() {
    let mut orchestrator = orchestrator("Nmap scan report for 127.0.0.1\n", FakeProbe::default(), stress_config());
    let mut console = ScriptedConsole::answering(&["first one"]);

    let summary = orchestrator.run(subnet("127.0.0.0/24"), &mut console).await.unwrap();

    assert!(summary.stress.is_none());
    assert!(console.started.is_none());
    assert!(console.notices.iter().any(|n| n.contains("aborted")));
}

#[tokio::test]
async fn unconfirmed_plan_never_starts() {
    let mut orchestrator = orchestrator("Nmap scan report for 127.0.0.1\n", FakeProbe::default(), stress_config());
    let mut console = ScriptedConsole::answering(&["1", "", "", "", "y"]);

    let summary = orchestrator.run(subnet("127.0.0.0/24"), &mut console).await.unwrap();

    assert!(summary.stress.is_none());
    assert_eq!(console.questions.len(), 5);
    assert!(!summary.stages.contains(&Stage::Attacking));
}

#[tokio::test]
async fn confirmed_plan_runs_for_the_full_duration() {
    let port = sink().await;
    let probe = FakeProbe::default().with_open("127.0.0.1", &[80]);
    let mut orchestrator = orchestrator("Nmap scan report for 127.0.0.1\n", probe, stress_config());
    let port_answer = port.to_string();
    let mut console = ScriptedConsole::answering(&["1", port_answer.as_str(), "1", "3", "yes"]);

    let summary = orchestrator.run(subnet("127.0.0.0/24"), &mut console).await.unwrap();
    let report = summary.stress.expect("the run was confirmed");

    assert_eq!(report.plan.target.port(), port);
    assert_eq!(report.plan.workers, 3);
    assert!(report.elapsed >= Duration::from_secs(1));
    assert_eq!(report.workers_joined, 3);
    assert_eq!(report.workers_failed, 0);
    assert!(report.totals.connected > 0);
    assert_eq!(console.started, Some(report.plan));
    assert_eq!(console.finished.as_ref(), Some(&report));
    assert!(console.notices.iter().any(|n| n.contains("Open ports on 127.0.0.1: 80")));
    assert_eq!(
        &summary.stages[summary.stages.len() - 3..],
        [Stage::AttackSelection, Stage::Attacking, Stage::Done]
    );
}
