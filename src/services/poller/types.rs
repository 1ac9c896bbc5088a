use chrono::{DateTime, Utc};
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Unexpected status: {0}")]
    Status(u16),
}

impl From<reqwest::Error> for PollError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Network(err.to_string())
        }
    }
}

/// Result of a single request, success or failure
#[derive(Debug)]
pub enum TickOutcome {
    Success { status: u16 },
    Failure(PollError),
}

impl TickOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl From<Result<u16, PollError>> for TickOutcome {
    fn from(result: Result<u16, PollError>) -> Self {
        match result {
            Ok(status) => Self::Success { status },
            Err(err) => Self::Failure(err),
        }
    }
}

/// What happened during one tick's request step
#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    pub outcome: TickOutcome,
}

impl TickReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }
}
