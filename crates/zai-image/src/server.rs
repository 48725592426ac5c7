use std::convert::Infallible;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    response::{
        IntoResponse, Response,
        sse::{Event, Sse},
    },
};
use http::{HeaderMap, HeaderValue, header::CONNECTION};
use zai_config::ImageConfig;
use zai_core::{HttpError, ModelCatalog, RouteModule, openai::ChatRequest};

use crate::{
    catalog::image_catalog,
    credential::bearer_token,
    error::{ImageGenError, Result},
    inline::ImageInliner,
    params,
    prompt::extract_prompt,
    provider::{GenerationProvider, zai::ZaiProvider},
    synth::{DONE_SENTINEL, synthesize},
    types::GenerationRequest,
};

/// Image module: turns chat completions into generated images
pub struct Server {
    mount_path: String,
    catalog: ModelCatalog,
    provider: Box<dyn GenerationProvider>,
    inliner: ImageInliner,
}

impl Server {
    pub fn new(
        mount_path: impl Into<String>,
        provider: Box<dyn GenerationProvider>,
        inliner: ImageInliner,
    ) -> Self {
        Self {
            mount_path: mount_path.into(),
            catalog: image_catalog(),
            provider,
            inliner,
        }
    }

    /// Run one request from raw body to serialized SSE frames
    ///
    /// Strictly sequential and fail-fast: the first failing step decides
    /// the response and nothing is retried.
    async fn complete(&self, headers: &HeaderMap, body: &[u8]) -> Result<Vec<String>> {
        let request: ChatRequest = serde_json::from_slice(body)
            .map_err(|e| ImageGenError::InvalidRequest(format!("Invalid request body: {e}")))?;

        let credential = bearer_token(headers)?;

        let parameters = params::decode(&request.model);

        let prompt = extract_prompt(&request.messages);
        if prompt.is_empty() {
            return Err(ImageGenError::InvalidRequest("No user message found".to_owned()));
        }

        tracing::debug!(model = %request.model, %parameters, "image generation handler called");

        let generation = GenerationRequest {
            prompt,
            parameters,
            credential,
        };
        let image_url = self.provider.generate(&generation).await?.into_image_url()?;

        let image = self.inliner.inline(&image_url).await?;

        let frames = synthesize(&request.model, &image)
            .iter()
            .map(serde_json::to_string)
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| ImageGenError::Internal(e.to_string()))?;

        tracing::debug!(model = %request.model, mime_type = %image.mime_type, "image generation complete");

        Ok(frames)
    }
}

#[async_trait]
impl RouteModule for Server {
    fn name(&self) -> &str {
        "image"
    }

    fn mount_path(&self) -> &str {
        &self.mount_path
    }

    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    async fn handle_completion(&self, headers: HeaderMap, body: Bytes) -> Response {
        match self.complete(&headers, &body).await {
            Ok(frames) => stream_response(frames),
            Err(e) => {
                if e.is_validation() || e.is_logged_at_source() {
                    tracing::debug!(
                        error = %e,
                        error_type = e.error_type(),
                        status = %e.status_code(),
                        "image generation request failed"
                    );
                } else {
                    tracing::error!(
                        error = %e,
                        error_type = e.error_type(),
                        provider = self.provider.name(),
                        "image generation request failed"
                    );
                }
                e.into_response()
            }
        }
    }
}

/// Emit the prepared chunks followed by the `[DONE]` sentinel
fn stream_response(frames: Vec<String>) -> Response {
    let events = frames
        .into_iter()
        .chain(std::iter::once(DONE_SENTINEL.to_owned()))
        .map(|data| Ok::<_, Infallible>(Event::default().data(data)));

    (
        [(CONNECTION, HeaderValue::from_static("keep-alive"))],
        Sse::new(futures_util::stream::iter(events)),
    )
        .into_response()
}

/// Builder for constructing the image module from configuration
pub(crate) struct ImageServerBuilder<'a> {
    config: &'a ImageConfig,
}

impl<'a> ImageServerBuilder<'a> {
    pub fn new(config: &'a ImageConfig) -> Self {
        Self { config }
    }

    pub fn build(self) -> anyhow::Result<Server> {
        let provider = ZaiProvider::new(self.config)?;
        let inliner = ImageInliner::new(self.config.download_timeout)?;

        tracing::debug!(
            path = %self.config.path,
            upstream = %self.config.base_url,
            "image module initialized"
        );

        Ok(Server::new(self.config.path.clone(), Box::new(provider), inliner))
    }
}
