use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, COOKIE, ORIGIN, REFERER, USER_AGENT},
};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use url::Url;
use zai_config::ImageConfig;

use super::GenerationProvider;
use crate::{
    error::{ImageGenError, Result},
    params::{AspectRatio, Resolution},
    types::{GenerationRequest, GenerationResult},
};

/// Z.ai image service driven through its web session API
pub(crate) struct ZaiProvider {
    client: Client,
    endpoint: Url,
    origin: String,
    user_agent: String,
}

impl ZaiProvider {
    /// Create the provider from module configuration
    ///
    /// The client carries the generation timeout and keeps no idle
    /// connections, so every request dials the upstream afresh.
    pub fn new(config: &ImageConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.generate_timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build upstream HTTP client: {e}"))?;

        Ok(Self {
            client,
            endpoint: config.generate_url()?,
            origin: config.origin(),
            user_agent: config.user_agent.clone(),
        })
    }
}

/// Wire format of the generation request
#[derive(Serialize)]
struct ZaiGenerateRequest<'a> {
    prompt: &'a str,
    ratio: AspectRatio,
    resolution: Resolution,
    rm_label_watermark: bool,
}

/// Wire format of the generation response
///
/// Every field is optional on the wire; absent values decode to their
/// zero value so only a structurally broken body is a decode error.
#[derive(Debug, Default, Deserialize)]
struct ZaiEnvelope {
    #[serde(default)]
    code: i64,
    #[serde(default)]
    message: String,
    #[serde(default)]
    data: Option<ZaiData>,
}

#[derive(Debug, Default, Deserialize)]
struct ZaiData {
    #[serde(default)]
    image: Option<ZaiImage>,
}

#[derive(Debug, Default, Deserialize)]
struct ZaiImage {
    #[serde(default)]
    image_id: Option<String>,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

impl From<ZaiEnvelope> for GenerationResult {
    fn from(envelope: ZaiEnvelope) -> Self {
        Self {
            status_code: envelope.code,
            message: envelope.message,
            image_url: envelope
                .data
                .and_then(|data| data.image)
                .and_then(|image| image.image_url)
                .filter(|url| !url.is_empty()),
        }
    }
}

#[async_trait]
impl GenerationProvider for ZaiProvider {
    async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResult> {
        let wire_request = ZaiGenerateRequest {
            prompt: &request.prompt,
            ratio: request.parameters.aspect_ratio,
            resolution: request.parameters.resolution,
            rm_label_watermark: true,
        };

        tracing::debug!(
            provider = self.name(),
            parameters = %request.parameters,
            prompt_len = request.prompt.len(),
            "sending image generation request"
        );

        // The upstream advertises SSE but answers with a single JSON document,
        // so the body is read in one piece.
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCEPT, "text/event-stream")
            .header(ORIGIN, &self.origin)
            .header(REFERER, format!("{}/", self.origin))
            .header(USER_AGENT, &self.user_agent)
            .header(COOKIE, format!("session={}", request.credential.expose_secret()))
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(provider = self.name(), error = %e, timeout = e.is_timeout(), "image generation request failed");
                ImageGenError::Transport(e.to_string())
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| {
            tracing::error!(provider = self.name(), error = %e, "failed to read image generation response");
            ImageGenError::Transport(e.to_string())
        })?;

        let envelope: ZaiEnvelope = serde_json::from_slice(&body).map_err(|e| {
            tracing::error!(
                provider = self.name(),
                http_status = %status,
                error = %e,
                "failed to parse image generation response"
            );
            ImageGenError::Decode(format!("{e} (HTTP {status})"))
        })?;

        if let Some(image) = envelope.data.as_ref().and_then(|data| data.image.as_ref()) {
            tracing::debug!(
                provider = self.name(),
                code = envelope.code,
                image_id = image.image_id.as_deref().unwrap_or_default(),
                status = image.status.as_deref().unwrap_or_default(),
                "image generation response received"
            );
        }

        Ok(envelope.into())
    }

    fn name(&self) -> &str {
        "zai"
    }
}
