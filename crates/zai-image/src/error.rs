use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;
use zai_core::HttpError;

pub type Result<T> = std::result::Result<T, ImageGenError>;

/// Failures of the image module, each terminal for its request
#[derive(Debug, Error)]
pub enum ImageGenError {
    /// Body did not parse or carried no usable prompt
    #[error("{0}")]
    InvalidRequest(String),

    /// Missing or malformed `Authorization` header
    #[error("{0}")]
    AuthenticationFailed(String),

    /// Upstream answered with a non-success envelope code
    #[error("{message} (code: {code})")]
    UpstreamStatus { code: i64, message: String },

    /// Upstream reported success but no image URL
    #[error("No image URL in response")]
    MissingImageUrl,

    /// Network failure or timeout on the generation call
    #[error("Upstream request failed: {0}")]
    Transport(String),

    /// Generation response was not the expected envelope
    #[error("Failed to decode upstream response: {0}")]
    Decode(String),

    /// Fetching the generated image failed
    #[error("Failed to download image: {0}")]
    Download(String),

    /// Unexpected internal failure; details are logged, not returned
    #[error("Internal server error")]
    Internal(String),
}

impl ImageGenError {
    /// Whether the failure happened before any upstream traffic
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::InvalidRequest(_) | Self::AuthenticationFailed(_))
    }

    /// Whether the failing HTTP call already logged this at error level
    pub const fn is_logged_at_source(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_) | Self::Download(_))
    }
}

impl HttpError for ImageGenError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            Self::UpstreamStatus { .. }
            | Self::MissingImageUrl
            | Self::Transport(_)
            | Self::Decode(_)
            | Self::Download(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &str {
        match self {
            Self::InvalidRequest(_) => "invalid_request_error",
            Self::AuthenticationFailed(_) => "authentication_error",
            Self::UpstreamStatus { .. } | Self::MissingImageUrl => "upstream_error",
            Self::Transport(_) | Self::Decode(_) | Self::Download(_) => "api_error",
            Self::Internal(_) => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        self.to_string()
    }
}

impl IntoResponse for ImageGenError {
    fn into_response(self) -> Response {
        zai_core::error_response(&self)
    }
}
