use api_poller::config::Config;
use api_poller::services::poller::{HttpClient, PollError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

#[allow(dead_code)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    RequestStarted,
    RequestFinished,
}

/// Instrumented client: counts calls and concurrency, records a timestamped event log
#[allow(dead_code)]
pub struct RecordingClient {
    latency: Duration,
    failure: Option<fn() -> PollError>,
    fail_first: usize,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    urls: Mutex<Vec<String>>,
    events: Mutex<Vec<(Event, Instant)>>,
}

#[allow(dead_code)]
impl RecordingClient {
    pub fn ok() -> Self {
        Self {
            latency: Duration::ZERO,
            failure: None,
            fail_first: 0,
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
            events: Mutex::new(Vec::new()),
        }
    }

    /// Every call fails with `make()`
    pub fn failing(make: fn() -> PollError) -> Self {
        Self::failing_first(usize::MAX, make)
    }

    /// The first `n` calls fail with `make()`, later calls succeed
    pub fn failing_first(n: usize, make: fn() -> PollError) -> Self {
        Self {
            failure: Some(make),
            fail_first: n,
            ..Self::ok()
        }
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }

    pub fn events(&self) -> Vec<(Event, Instant)> {
        self.events.lock().unwrap().clone()
    }

    /// Instants at which each request started and finished, paired per call
    pub fn request_spans(&self) -> Vec<(Instant, Instant)> {
        let events = self.events();
        let starts = events
            .iter()
            .filter(|(e, _)| *e == Event::RequestStarted)
            .map(|(_, at)| *at);
        let ends = events
            .iter()
            .filter(|(e, _)| *e == Event::RequestFinished)
            .map(|(_, at)| *at);
        starts.zip(ends).collect()
    }

    fn record(&self, event: Event) {
        self.events.lock().unwrap().push((event, Instant::now()));
    }
}

struct InFlight<'a>(&'a AtomicUsize);

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl HttpClient for RecordingClient {
    async fn get(&self, url: &str) -> Result<u16, PollError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        let _guard = InFlight(&self.in_flight);
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        self.urls.lock().unwrap().push(url.to_string());
        self.record(Event::RequestStarted);

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        self.record(Event::RequestFinished);

        match self.failure {
            Some(make) if call < self.fail_first => Err(make()),
            _ => Ok(200),
        }
    }
}

#[allow(dead_code)]
pub fn config_with_interval(interval_ms: u64) -> Config {
    Config {
        interval: Duration::from_millis(interval_ms),
        ..Config::default()
    }
}
