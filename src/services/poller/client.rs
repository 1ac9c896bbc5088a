use async_trait::async_trait;
use reqwest::{Client, ClientBuilder};
use std::time::Duration;

use crate::services::poller::PollError;

/// Transport used for every tick's GET.
/// Returns the status code of a 2xx response; anything else is a `PollError`.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<u16, PollError>;
}

/// Pooled reqwest client, built once and shared by every tick
pub struct ReqwestClient {
    client: Client,
}

impl ReqwestClient {
    pub fn new(timeout: Option<Duration>) -> Self {
        let mut builder =
            Client::builder().user_agent(concat!("api-poller/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Self {
            client: build_client(builder),
        }
    }
}

fn build_client(builder: ClientBuilder) -> Client {
    builder.build().unwrap_or_else(|err| {
        tracing::warn!(
            "Failed to build HTTP client ({}), falling back to defaults without timeout or user agent",
            err
        );
        Client::default()
    })
}

impl Default for ReqwestClient {
    fn default() -> Self {
        Self::new(None)
    }
}

#[async_trait]
impl HttpClient for ReqwestClient {
    async fn get(&self, url: &str) -> Result<u16, PollError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();

        // Drain the body so the connection goes back to the pool
        response.bytes().await?;

        if status.is_success() {
            Ok(status.as_u16())
        } else {
            Err(PollError::Status(status.as_u16()))
        }
    }
}
