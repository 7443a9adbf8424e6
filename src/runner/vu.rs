use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use reqwest::Client;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;
use tracing::debug;

use crate::checks::CheckRegistry;
use crate::metrics::Metrics;
use crate::scenario::{IterationContext, Scenario};

pub(super) struct VuContext {
    pub(super) id: usize,
    pub(super) scenario: Arc<dyn Scenario>,
    pub(super) client: Client,
    pub(super) checks: Arc<CheckRegistry>,
    pub(super) metrics_tx: mpsc::Sender<Metrics>,
    pub(super) stop_rx: watch::Receiver<bool>,
    pub(super) iterations: Arc<AtomicU64>,
    pub(super) in_flight: Arc<AtomicU64>,
}

/// Counts an iteration as in flight until dropped, including on abort.
struct InflightGuard<'counter> {
    counter: &'counter AtomicU64,
}

impl<'counter> InflightGuard<'counter> {
    fn acquire(counter: &'counter AtomicU64) -> Self {
        counter.fetch_add(1, Ordering::Relaxed);
        Self { counter }
    }
}

impl Drop for InflightGuard<'_> {
    fn drop(&mut self) {
        loop {
            let current = self.counter.load(Ordering::Relaxed);
            let Some(next) = current.checked_sub(1) else {
                break;
            };
            if self
                .counter
                .compare_exchange(current, next, Ordering::Relaxed, Ordering::Relaxed)
                .is_ok()
            {
                break;
            }
        }
    }
}

pub(super) async fn run_virtual_user(mut context: VuContext) {
    debug!("VU {} started", context.id);
    let mut completed: u64 = 0;

    while !*context.stop_rx.borrow() {
        let iteration_context = IterationContext {
            client: &context.client,
            checks: &context.checks,
            metrics_tx: &context.metrics_tx,
        };
        {
            let _guard = InflightGuard::acquire(&context.in_flight);
            context.scenario.iteration(&iteration_context).await;
        }
        completed = completed.saturating_add(1);
        context.iterations.fetch_add(1, Ordering::Relaxed);

        if let Some(pause) = context.scenario.pause().sample() {
            tokio::select! {
                () = sleep(pause) => {}
                changed = context.stop_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }
        }
    }

    debug!("VU {} stopped after {} iteration(s)", context.id, completed);
}
