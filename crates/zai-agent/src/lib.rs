//! Chat-agent module
//!
//! Mounted alongside the image module so clients can discover it, but it
//! offers no models yet and refuses every completion.

#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Bytes,
    response::{IntoResponse, Response},
};
use http::{HeaderMap, StatusCode};
use thiserror::Error;
use zai_config::AgentConfig;
use zai_core::{HttpError, ModelCatalog, RouteModule};

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("Chat-Agent module not implemented yet")]
    NotImplemented,
}

impl HttpError for AgentError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::NotImplemented => StatusCode::NOT_IMPLEMENTED,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::NotImplemented => "not_implemented",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for AgentError {
    fn into_response(self) -> Response {
        zai_core::error_response(&self)
    }
}

pub struct AgentModule {
    mount_path: String,
    catalog: ModelCatalog,
}

impl AgentModule {
    pub fn new(mount_path: impl Into<String>) -> Self {
        Self {
            mount_path: mount_path.into(),
            catalog: ModelCatalog::new(Vec::new()),
        }
    }
}

#[async_trait]
impl RouteModule for AgentModule {
    fn name(&self) -> &str {
        "chat-agent"
    }

    fn mount_path(&self) -> &str {
        &self.mount_path
    }

    fn catalog(&self) -> &ModelCatalog {
        &self.catalog
    }

    async fn handle_completion(&self, _headers: HeaderMap, _body: Bytes) -> Response {
        let error = AgentError::NotImplemented;
        tracing::debug!(module = self.name(), error_type = error.error_type(), "completion requested from unimplemented module");
        error.into_response()
    }
}

/// Build the chat-agent module from configuration
pub fn build_module(config: &AgentConfig) -> Arc<AgentModule> {
    Arc::new(AgentModule::new(config.path.clone()))
}
