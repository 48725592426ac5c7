use axum::{
    Json,
    response::{IntoResponse, Response},
};
use http::StatusCode;

/// Trait for domain errors that can be converted to HTTP responses
///
/// Implemented by each module crate's error type. Every module answers
/// failures with the same flat `{"error": "<message>"}` body so OpenAI
/// clients see one shape regardless of which module produced it.
pub trait HttpError: std::error::Error {
    /// HTTP status code for this error
    fn status_code(&self) -> StatusCode;

    /// Machine-readable error type (e.g. `invalid_request_error`)
    fn error_type(&self) -> &str;

    /// Message safe to expose to API consumers
    fn client_message(&self) -> String;
}

/// Render any [`HttpError`] as a JSON error response
pub fn error_response<E: HttpError>(error: &E) -> Response {
    (error.status_code(), Json(ErrorBody::new(error.client_message()))).into_response()
}

/// Flat JSON error body
#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}
