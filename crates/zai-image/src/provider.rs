pub(crate) mod zai;

use async_trait::async_trait;

use crate::{
    error::Result,
    types::{GenerationRequest, GenerationResult},
};

/// Backend that turns a prompt into a hosted image
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Run one synchronous generation
    ///
    /// A non-success envelope is returned as `Ok`; only transport and
    /// decoding failures are errors here.
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult>;

    /// Get the provider name
    fn name(&self) -> &str;
}
