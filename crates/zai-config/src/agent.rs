use serde::Deserialize;

/// Chat-agent module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Prefix the module's routes are mounted under
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/chat-agent/v1".to_string()
}
