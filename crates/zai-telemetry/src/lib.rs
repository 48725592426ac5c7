//! Logging for zai2api
//!
//! Installs a `tracing` subscriber according to the telemetry section of the config

use tracing_subscriber::{EnvFilter, Layer, Registry, layer::SubscriberExt, util::SubscriberInitExt};
use zai_config::{LogFormat, TelemetryConfig};

/// Filter used when neither the config nor `RUST_LOG` supplies one
pub const DEFAULT_FILTER: &str = "info";

/// Initialize the global subscriber
///
/// The filter comes from `telemetry.log_filter`, then `RUST_LOG`, then
/// [`DEFAULT_FILTER`]. An invalid directive falls back to the default rather
/// than aborting start-up.
///
/// # Errors
///
/// Returns an error if a global subscriber has already been installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = build_filter(config);

    tracing_subscriber::registry()
        .with(fmt_layer(config.format))
        .with(filter)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install tracing subscriber: {e}"))?;

    Ok(())
}

fn build_filter(config: &TelemetryConfig) -> EnvFilter {
    let directive = config
        .log_filter
        .clone()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| DEFAULT_FILTER.to_owned());

    EnvFilter::try_new(&directive).unwrap_or_else(|e| {
        eprintln!("invalid log filter '{directive}': {e}; using '{DEFAULT_FILTER}'");
        EnvFilter::new(DEFAULT_FILTER)
    })
}

fn fmt_layer(format: LogFormat) -> Box<dyn Layer<Registry> + Send + Sync> {
    let layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    match format {
        LogFormat::Text => layer.boxed(),
        LogFormat::Json => layer.json().flatten_event(true).boxed(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_wins() {
        let config = TelemetryConfig {
            log_filter: Some("zai_image=debug".to_owned()),
            format: LogFormat::Text,
        };
        assert_eq!(build_filter(&config).to_string(), "zai_image=debug");
    }
}
