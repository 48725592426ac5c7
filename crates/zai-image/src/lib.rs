#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod catalog;
mod credential;
mod error;
mod inline;
mod params;
mod prompt;
mod provider;
mod server;
mod synth;
mod types;

use std::sync::Arc;

use zai_config::ImageConfig;

pub use error::{ImageGenError, Result};
pub use inline::ImageInliner;
pub use params::{AspectRatio, GenerationParameters, Resolution};
pub use provider::GenerationProvider;
pub use server::Server;
pub use types::{GenerationRequest, GenerationResult};

use server::ImageServerBuilder;

/// Build the image module from configuration
///
/// # Errors
///
/// Returns an error if the upstream endpoint or HTTP clients cannot be set up
pub fn build_module(config: &ImageConfig) -> anyhow::Result<Arc<Server>> {
    let server = ImageServerBuilder::new(config)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to initialize image module: {e}"))?;
    Ok(Arc::new(server))
}
