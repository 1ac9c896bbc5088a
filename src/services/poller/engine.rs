use chrono::Utc;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

use crate::config::Config;
use crate::services::poller::{HttpClient, TickOutcome, TickReport};

/// Issues one GET to the target URL, sleeps for the interval, repeats.
/// At most one request is ever in flight.
pub struct Poller {
    client: Arc<dyn HttpClient>,
    api_url: String,
    interval: Duration,
}

impl Poller {
    pub fn new(config: &Config, client: Arc<dyn HttpClient>) -> Self {
        Self {
            client,
            api_url: config.api_url.clone(),
            interval: config.interval,
        }
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Poll forever
    pub async fn run(&self) {
        self.run_until(std::future::pending::<()>()).await;
    }

    /// Poll until `shutdown` resolves, dropping any in-flight request.
    /// Returns the number of completed ticks.
    pub async fn run_until<F>(&self, shutdown: F) -> u64
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        let mut completed = 0u64;

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    tracing::info!("Poller stopped after {} ticks", completed);
                    return completed;
                }
                _ = self.tick(completed + 1) => {
                    completed += 1;
                }
            }
        }
    }

    /// One tick: request, then sleep. The request always finishes before the sleep starts.
    async fn tick(&self, tick: u64) {
        let report = self.poll(tick).await;

        // The outcome never changes the schedule; the next tick is the only retry
        match &report.outcome {
            TickOutcome::Success { status } => {
                tracing::debug!(
                    "Tick {} at {}: {} -> {} in {:?}",
                    report.tick,
                    report.started_at.to_rfc3339(),
                    self.api_url,
                    status,
                    report.duration
                );
            }
            TickOutcome::Failure(err) => {
                tracing::debug!(
                    "Tick {} at {}: {} failed after {:?}: {}",
                    report.tick,
                    report.started_at.to_rfc3339(),
                    self.api_url,
                    report.duration,
                    err
                );
            }
        }

        tokio::time::sleep(self.interval).await;
    }

    /// Single request without the trailing sleep
    pub async fn poll_once(&self) -> TickOutcome {
        self.client.get(&self.api_url).await.into()
    }

    async fn poll(&self, tick: u64) -> TickReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let outcome = self.poll_once().await;

        TickReport {
            tick,
            started_at,
            duration: start.elapsed(),
            outcome,
        }
    }
}
