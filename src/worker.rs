// Background poller: collect rows, publish, wait, repeat.
// Cycles never overlap; a slow cycle delays the next one instead.

use crate::aggregator::Aggregator;
use crate::docker_repo::ContainerSource;
use crate::remote_repo::CommandRunner;
use crate::state::SharedState;
use std::sync::Arc;
use tokio::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;
use tracing::Instrument;

pub struct PollerDeps<L, R> {
    pub aggregator: Arc<Aggregator<L, R>>,
    pub state: Arc<SharedState>,
    pub cancel: CancellationToken,
}

pub struct PollerConfig {
    /// Pause between the end of one cycle and the start of the next.
    pub interval: Duration,
}

/// Runs one poll cycle and publishes the result. Returns the published row count.
pub async fn poll_once<L: ContainerSource, R: CommandRunner>(
    aggregator: &Aggregator<L, R>,
    state: &SharedState,
) -> usize {
    let started = Instant::now();
    let rows = aggregator.collect().await;
    let n = rows.len();
    state.publish(rows);
    tracing::debug!(
        operation = "poll",
        rows = n,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "snapshot published"
    );
    n
}

/// Spawns the poller. The caller is expected to have run one `poll_once` already,
/// so the loop starts by waiting.
pub fn spawn<L: ContainerSource, R: CommandRunner>(
    deps: PollerDeps<L, R>,
    config: PollerConfig,
) -> tokio::task::JoinHandle<()> {
    let PollerDeps {
        aggregator,
        state,
        cancel,
    } = deps;
    let PollerConfig { interval } = config;

    let poller_span = tracing::span!(
        tracing::Level::DEBUG,
        "poller",
        interval_secs = interval.as_secs()
    );

    tokio::spawn(
        async move {
            loop {
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
                tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    _ = poll_once(&aggregator, &state) => {}
                }
            }
            tracing::debug!("Poller shutting down");
        }
        .instrument(poller_span),
    )
}
