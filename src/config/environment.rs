use std::collections::HashMap;
use std::env;
use std::time::Duration;

pub const API_URL_KEY: &str = "API_URL";
pub const INTERVAL_KEY: &str = "INTERVAL";
pub const REQUEST_TIMEOUT_KEY: &str = "REQUEST_TIMEOUT_MS";

pub const DEFAULT_API_URL: &str = "https://ornekapi.com/veri";
pub const DEFAULT_INTERVAL_MS: u64 = 600;

/// Key/value lookup consulted once at startup
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

/// Process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct EnvSource;

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// Poller configuration
/// Resolved once; every missing or malformed value falls back to a default
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub interval: Duration,
    pub request_timeout: Option<Duration>,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self::from_source(&EnvSource)
    }

    pub fn from_source<S: ConfigSource + ?Sized>(source: &S) -> Self {
        let api_url = match source.get(API_URL_KEY) {
            Some(url) if !url.trim().is_empty() => url,
            _ => {
                tracing::debug!("{} not set, using {}", API_URL_KEY, DEFAULT_API_URL);
                DEFAULT_API_URL.to_string()
            }
        };

        let interval = parse_millis(source.get(INTERVAL_KEY)).unwrap_or_else(|| {
            tracing::debug!(
                "{} missing or invalid, using {}ms",
                INTERVAL_KEY,
                DEFAULT_INTERVAL_MS
            );
            Duration::from_millis(DEFAULT_INTERVAL_MS)
        });

        let request_timeout = parse_millis(source.get(REQUEST_TIMEOUT_KEY));

        Self {
            api_url,
            interval,
            request_timeout,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            interval: Duration::from_millis(DEFAULT_INTERVAL_MS),
            request_timeout: None,
        }
    }
}

fn parse_millis(raw: Option<String>) -> Option<Duration> {
    raw?.trim().parse::<u64>().ok().map(Duration::from_millis)
}
