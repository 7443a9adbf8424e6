//! Virtual-user scheduling: start N users, stop at the deadline, drain.
mod vu;


use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinSet;
use tokio::time::{Instant, sleep_until, timeout};
use tracing::{debug, info, warn};

use crate::args::PositiveUsize;
use crate::checks::{CheckRegistry, CheckResult};
use crate::error::AppResult;
use crate::metrics::{Metrics, MetricsSummary, setup_metrics_collector};
use crate::scenario::Scenario;
use crate::shutdown::ShutdownSender;

use vu::{VuContext, run_virtual_user};

/// Buffered metrics before virtual users start waiting on the collector.
const METRICS_CHANNEL_CAPACITY: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    pub vus: PositiveUsize,
    pub duration: Duration,
    pub graceful_stop: Duration,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub scenario: &'static str,
    pub vus: usize,
    pub planned_duration: Duration,
    pub elapsed: Duration,
    /// Iterations that ran to completion.
    pub iterations: u64,
    /// Iterations still running when the graceful stop expired.
    pub interrupted_iterations: u64,
    pub stopped_by_signal: bool,
    pub checks: Vec<CheckResult>,
    pub metrics: MetricsSummary,
}

/// Runs `scenario` with `options.vus` users until the duration ends or a
/// shutdown is broadcast. In-flight iterations get `graceful_stop` to finish.
///
/// # Errors
///
/// Returns an error when the metrics collector task fails.
pub async fn run_load(
    scenario: Arc<dyn Scenario>,
    client: Client,
    options: &LoadOptions,
    shutdown_tx: &ShutdownSender,
) -> AppResult<RunReport> {
    let checks = Arc::new(CheckRegistry::new(scenario.check_names()));
    let (metrics_tx, metrics_rx) = mpsc::channel::<Metrics>(METRICS_CHANNEL_CAPACITY);
    let collector = setup_metrics_collector(metrics_rx);
    let (stop_tx, stop_rx) = watch::channel(false);
    let iterations = Arc::new(AtomicU64::new(0));
    let in_flight = Arc::new(AtomicU64::new(0));
    let mut shutdown_rx = shutdown_tx.subscribe();

    let run_start = Instant::now();
    info!(
        "Starting '{}' with {} VU(s) for {:?}",
        scenario.name(),
        options.vus.get(),
        options.duration
    );

    let mut vus = JoinSet::new();
    for vu_id in 1..=options.vus.get() {
        let context = VuContext {
            id: vu_id,
            scenario: Arc::clone(&scenario),
            client: client.clone(),
            checks: Arc::clone(&checks),
            metrics_tx: metrics_tx.clone(),
            stop_rx: stop_rx.clone(),
            iterations: Arc::clone(&iterations),
            in_flight: Arc::clone(&in_flight),
        };
        vus.spawn(run_virtual_user(context));
    }
    drop(metrics_tx);

    let stopped_by_signal = match run_start.checked_add(options.duration) {
        Some(deadline) => {
            tokio::select! {
                () = sleep_until(deadline) => false,
                _ = shutdown_rx.recv() => true,
            }
        }
        None => {
            drop(shutdown_rx.recv().await);
            true
        }
    };
    if stopped_by_signal {
        info!("Shutdown requested; no new iterations will start.");
    } else {
        debug!("Duration elapsed; no new iterations will start.");
    }
    drop(stop_tx.send(true));

    let mut interrupted_iterations = 0u64;
    if timeout(options.graceful_stop, drain_vus(&mut vus))
        .await
        .is_err()
    {
        interrupted_iterations = in_flight.load(Ordering::Relaxed);
        warn!(
            "Graceful stop of {:?} expired; interrupting {} iteration(s).",
            options.graceful_stop, interrupted_iterations
        );
        vus.abort_all();
        drain_vus(&mut vus).await;
    }

    let metrics = collector.await?;
    let elapsed = run_start.elapsed();
    info!("Finished '{}' in {:?}", scenario.name(), elapsed);

    Ok(RunReport {
        scenario: scenario.name(),
        vus: options.vus.get(),
        planned_duration: options.duration,
        elapsed,
        iterations: iterations.load(Ordering::Relaxed),
        interrupted_iterations,
        stopped_by_signal,
        checks: checks.snapshot(),
        metrics,
    })
}

/// Waits for every VU task still in the set. Finished tasks leave the set as
/// they are joined, so draining again after an abort only sees the rest.
async fn drain_vus(vus: &mut JoinSet<()>) {
    while let Some(joined) = vus.join_next().await {
        if let Err(err) = joined
            && err.is_panic()
        {
            warn!("A VU task panicked: {}", err);
        }
    }
}
