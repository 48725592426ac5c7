use std::time::Duration;

use serde::Deserialize;
use url::Url;

/// Image generation module configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImageConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Prefix the module's routes are mounted under
    #[serde(default = "default_path")]
    pub path: String,
    /// Site of the upstream image service; also sent as `Origin`/`Referer`
    #[serde(default = "default_base_url")]
    pub base_url: Url,
    /// Generation endpoint, resolved against `base_url`
    #[serde(default = "default_generate_path")]
    pub generate_path: String,
    /// Browser `User-Agent` presented to the upstream
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Ceiling for the generation call
    #[serde(default = "default_generate_timeout", deserialize_with = "crate::duration::deserialize")]
    pub generate_timeout: Duration,
    /// Ceiling for fetching the generated image
    #[serde(default = "default_download_timeout", deserialize_with = "crate::duration::deserialize")]
    pub download_timeout: Duration,
}

impl ImageConfig {
    /// Absolute URL of the generation endpoint
    ///
    /// # Errors
    ///
    /// Returns an error if `generate_path` cannot be joined onto `base_url`
    pub fn generate_url(&self) -> anyhow::Result<Url> {
        self.base_url
            .join(&self.generate_path)
            .map_err(|e| anyhow::anyhow!("invalid image.generate_path '{}': {e}", self.generate_path))
    }

    /// `scheme://host[:port]` of the upstream site, without a trailing slash
    pub fn origin(&self) -> String {
        self.base_url.origin().ascii_serialization()
    }
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: default_path(),
            base_url: default_base_url(),
            generate_path: default_generate_path(),
            user_agent: default_user_agent(),
            generate_timeout: default_generate_timeout(),
            download_timeout: default_download_timeout(),
        }
    }
}

#[allow(clippy::missing_const_for_fn)]
fn default_enabled() -> bool {
    true
}

fn default_path() -> String {
    "/image/v1".to_string()
}

fn default_base_url() -> Url {
    Url::parse("https://image.z.ai").expect("valid default URL")
}

fn default_generate_path() -> String {
    "/api/proxy/images/generate".to_string()
}

fn default_user_agent() -> String {
    "Mozilla/5.0 AppleWebKit/537.36 Chrome/143 Safari/537".to_string()
}

const fn default_generate_timeout() -> Duration {
    Duration::from_secs(120)
}

const fn default_download_timeout() -> Duration {
    Duration::from_secs(60)
}
