//! # Load Generator
//!
//! A bounded stress run against one operator-selected target: a fixed number
//! of tokio tasks, each repeatedly opening a TCP connection and writing a
//! short HTTP probe until a shared deadline passes. Workers share nothing but
//! the immutable target and deadline; their counters are summed only after
//! every task has been joined.

use std::fmt;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use lanscout_common::ReconError;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout};
use tracing::{debug, warn};

/// What to hit, for how long, with how many workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StressPlan {
    pub target: SocketAddr,
    pub duration: Duration,
    pub workers: usize,
}

impl StressPlan {
    pub fn new(target: SocketAddr, duration: Duration, workers: usize) -> Result<Self, ReconError> {
        if workers == 0 {
            return Err(ReconError::InvalidOperatorInput(
                "a stress run needs at least one worker".to_string(),
            ));
        }
        Ok(Self {
            target,
            duration,
            workers,
        })
    }
}

impl fmt::Display for StressPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} for {}s with {} workers",
            self.target,
            self.duration.as_secs(),
            self.workers
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub attempts: u64,
    pub connected: u64,
    pub failed: u64,
}

impl WorkerStats {
    fn merge(&mut self, other: WorkerStats) {
        self.attempts += other.attempts;
        self.connected += other.connected;
        self.failed += other.failed;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StressReport {
    pub plan: StressPlan,
    pub elapsed: Duration,
    /// Workers that ran to the deadline and were joined.
    pub workers_joined: usize,
    /// Workers whose task panicked; they are joined all the same.
    pub workers_failed: usize,
    pub totals: WorkerStats,
}

pub struct LoadGenerator {
    connect_timeout: Duration,
}

impl LoadGenerator {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    /// Runs the plan and returns once every worker has stopped.
    pub async fn run(&self, plan: StressPlan) -> StressReport {
        let started = Instant::now();
        let deadline = started + plan.duration;
        let payload: Arc<[u8]> = probe_payload(plan.target).into();

        let mut workers: JoinSet<WorkerStats> = JoinSet::new();
        for id in 0..plan.workers {
            workers.spawn(worker(
                id,
                plan.target,
                deadline,
                self.connect_timeout,
                Arc::clone(&payload),
            ));
        }

        let mut totals = WorkerStats::default();
        let mut workers_joined = 0;
        let mut workers_failed = 0;

        while let Some(joined) = workers.join_next().await {
            match joined {
                Ok(stats) => {
                    totals.merge(stats);
                    workers_joined += 1;
                }
                Err(e) => {
                    warn!("Stress worker aborted: {e}");
                    workers_failed += 1;
                }
            }
        }

        StressReport {
            plan,
            elapsed: started.elapsed(),
            workers_joined,
            workers_failed,
            totals,
        }
    }
}

fn probe_payload(target: SocketAddr) -> Vec<u8> {
    format!("GET / HTTP/1.1\r\nHost: {}\r\n\r\n", target.ip()).into_bytes()
}

async fn worker(
    id: usize,
    target: SocketAddr,
    deadline: Instant,
    connect_timeout: Duration,
    payload: Arc<[u8]>,
) -> WorkerStats {
    let mut stats = WorkerStats::default();

    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if remaining.is_zero() {
            break;
        }

        stats.attempts += 1;
        match timeout(connect_timeout.min(remaining), TcpStream::connect(target)).await {
            Ok(Ok(mut stream)) => {
                stats.connected += 1;
                let remaining = deadline.saturating_duration_since(Instant::now());
                let _ = timeout(connect_timeout.min(remaining), stream.write_all(&payload)).await;
            }
            Ok(Err(_)) | Err(_) => {
                stats.failed += 1;
                tokio::task::yield_now().await;
            }
        }
    }

    debug!(worker = id, attempts = stats.attempts, "stress worker finished");
    stats
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
