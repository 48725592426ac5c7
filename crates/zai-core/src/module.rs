use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    Json, Router,
    body::Bytes,
    extract::{Path, State},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use http::{HeaderMap, StatusCode};

use crate::{
    catalog::{ModelCatalog, ModelEntry, ModelList},
    error::ErrorBody,
};

/// A functional module exposing the OpenAI-shaped triple of routes
///
/// Every modality (image, chat-agent, ...) implements this and is mounted
/// by the server under its own path prefix. The server never needs to know
/// which concrete modules exist.
#[async_trait]
pub trait RouteModule: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Prefix the module's routes are nested under (e.g. `/image/v1`)
    fn mount_path(&self) -> &str;

    /// Static model table served by the listing endpoints
    fn catalog(&self) -> &ModelCatalog;

    fn list_models(&self) -> &[ModelEntry] {
        self.catalog().list()
    }

    fn get_model(&self, id: &str) -> Option<&ModelEntry> {
        self.catalog().get(id)
    }

    /// Handle a raw `POST /chat/completions`
    ///
    /// The body is passed unparsed so each module owns its own validation
    /// and error mapping.
    async fn handle_completion(&self, headers: HeaderMap, body: Bytes) -> Response;
}

/// Build the `/models`, `/models/{model}` and `/chat/completions` routes
/// for a module, relative to its mount path
pub fn module_router(module: Arc<dyn RouteModule>) -> Router {
    Router::new()
        .route("/models", get(list_models))
        .route("/models/{model}", get(get_model))
        .route("/chat/completions", post(chat_completions))
        .with_state(module)
}

async fn list_models(State(module): State<Arc<dyn RouteModule>>) -> Json<ModelList> {
    Json(ModelList {
        object: "list".to_owned(),
        data: module.list_models().to_vec(),
    })
}

async fn get_model(State(module): State<Arc<dyn RouteModule>>, Path(model): Path<String>) -> Response {
    match module.get_model(&model) {
        Some(entry) => Json(entry.clone()).into_response(),
        None => {
            tracing::debug!(module = module.name(), %model, "model not found");
            (StatusCode::NOT_FOUND, Json(ErrorBody::new("Model not found"))).into_response()
        }
    }
}

async fn chat_completions(
    State(module): State<Arc<dyn RouteModule>>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    tracing::debug!(module = module.name(), "chat completion handler called");
    module.handle_completion(headers, body).await
}
