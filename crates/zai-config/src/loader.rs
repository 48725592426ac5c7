use std::path::Path;

use crate::Config;

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Reads the file, expands `{{ env.VAR }}` placeholders, then
    /// deserializes and validates the result.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, environment variable
    /// expansion fails, TOML parsing fails, or validation fails
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("failed to read config file {}: {e}", path.display()))?;

        Self::parse(&raw)
    }

    /// Parse and validate configuration from TOML text
    ///
    /// # Errors
    ///
    /// Returns an error if placeholder expansion, parsing, or validation fails
    pub fn parse(raw: &str) -> anyhow::Result<Self> {
        let expanded = crate::env::expand_placeholders(raw)
            .map_err(|e| anyhow::anyhow!("config variable expansion failed: {e}"))?;

        let config: Self = toml::from_str(&expanded).map_err(|e| anyhow::anyhow!("failed to parse config: {e}"))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate that the configuration is internally consistent
    ///
    /// # Errors
    ///
    /// Returns an error if no module is enabled, mount paths clash, or the
    /// image upstream settings are unusable
    pub fn validate(&self) -> anyhow::Result<()> {
        self.validate_has_modules()?;
        self.validate_paths()?;
        self.validate_image_config()?;
        Ok(())
    }

    /// Ensure at least one module will be mounted
    fn validate_has_modules(&self) -> anyhow::Result<()> {
        if !self.image.enabled && !self.agent.enabled {
            anyhow::bail!("at least one module must be enabled (image or agent)");
        }

        Ok(())
    }

    /// Mount paths must be absolute, non-root and distinct
    fn validate_paths(&self) -> anyhow::Result<()> {
        let mut mounted: Vec<(&str, &str)> = Vec::new();

        if self.image.enabled {
            mounted.push(("image.path", self.image.path.as_str()));
        }
        if self.agent.enabled {
            mounted.push(("agent.path", self.agent.path.as_str()));
        }

        for (key, path) in &mounted {
            if !path.starts_with('/') || path.len() < 2 || path.ends_with('/') {
                anyhow::bail!("{key} must start with '/', must not end with '/' and must not be the root: '{path}'");
            }
        }

        for (i, (key, path)) in mounted.iter().enumerate() {
            if let Some((other, _)) = mounted[i + 1..].iter().find(|(_, p)| p == path) {
                anyhow::bail!("{key} and {other} are both mounted at '{path}'");
            }
        }

        if self.server.health.enabled {
            let health = self.server.health.path.as_str();

            if !health.starts_with('/') {
                anyhow::bail!("server.health.path must start with '/': '{health}'");
            }

            if let Some((key, path)) = mounted.iter().find(|(_, path)| is_within(health, path)) {
                anyhow::bail!("server.health.path '{health}' collides with {key} routes under '{path}'");
            }
        }

        Ok(())
    }

    fn validate_image_config(&self) -> anyhow::Result<()> {
        if !self.image.enabled {
            return Ok(());
        }

        if !matches!(self.image.base_url.scheme(), "http" | "https") {
            anyhow::bail!("image.base_url must be an http or https URL: '{}'", self.image.base_url);
        }

        self.image.generate_url()?;

        if self.image.generate_timeout.is_zero() || self.image.download_timeout.is_zero() {
            anyhow::bail!("image timeouts must be greater than zero");
        }

        Ok(())
    }
}

/// Whether `path` is `prefix` itself or lies underneath it
fn is_within(path: &str, prefix: &str) -> bool {
    path.strip_prefix(prefix)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with('/'))
}
