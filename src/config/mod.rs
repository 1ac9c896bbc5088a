pub mod environment;

pub use environment::{Config, ConfigSource, EnvSource};
