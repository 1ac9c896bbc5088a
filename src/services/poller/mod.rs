pub mod client;
pub mod engine;
pub mod types;

pub use client::{HttpClient, ReqwestClient};
pub use engine::Poller;
pub use types::*;
