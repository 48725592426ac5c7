//! Programmatic configuration builder for integration tests

use std::net::SocketAddr;
use std::time::Duration;

use zai_config::{Config, HealthConfig, ServerConfig};

/// Builder for constructing test configurations
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Create a new builder with minimal defaults
    pub fn new() -> Self {
        Self {
            config: Config {
                server: ServerConfig {
                    listen_address: Some(SocketAddr::from(([127, 0, 0, 1], 0))),
                    health: HealthConfig::default(),
                },
                ..Config::default()
            },
        }
    }

    /// Point the image module at a mock upstream
    pub fn with_upstream(mut self, base_url: &str) -> Self {
        self.config.image.base_url = base_url.parse().expect("valid URL");
        self.config.image.generate_timeout = Duration::from_secs(5);
        self.config.image.download_timeout = Duration::from_secs(5);
        self
    }

    /// Shorten the ceiling on the generation call
    pub fn with_generate_timeout(mut self, timeout: Duration) -> Self {
        self.config.image.generate_timeout = timeout;
        self
    }

    /// Disable health endpoint
    pub fn without_health(mut self) -> Self {
        self.config.server.health.enabled = false;
        self
    }

    /// Disable the chat-agent module
    pub fn without_agent(mut self) -> Self {
        self.config.agent.enabled = false;
        self
    }

    /// Build the final config, validated like a loaded file
    pub fn build(self) -> Config {
        self.config.validate().expect("test config is valid");
        self.config
    }
}
