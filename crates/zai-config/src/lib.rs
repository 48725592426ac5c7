#![allow(clippy::must_use_candidate)]

pub mod agent;
mod duration;
mod env;
pub mod health;
pub mod image;
mod loader;
pub mod server;
pub mod telemetry;

use serde::Deserialize;

pub use agent::AgentConfig;
pub use health::HealthConfig;
pub use image::ImageConfig;
pub use server::ServerConfig;
pub use telemetry::{LogFormat, TelemetryConfig};

/// Top-level gateway configuration
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Listener and health check
    #[serde(default)]
    pub server: ServerConfig,
    /// Image generation module
    #[serde(default)]
    pub image: ImageConfig,
    /// Chat-agent module
    #[serde(default)]
    pub agent: AgentConfig,
    /// Logging
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}
