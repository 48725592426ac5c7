use secrecy::SecretString;

use crate::{
    error::{ImageGenError, Result},
    params::GenerationParameters,
};

/// Envelope code the upstream uses for success
pub const UPSTREAM_SUCCESS_CODE: i64 = 200;

/// One generation call, built fresh for each incoming request
#[derive(Debug)]
pub struct GenerationRequest {
    pub prompt: String,
    pub parameters: GenerationParameters,
    /// Caller's upstream session, forwarded as a cookie
    pub credential: SecretString,
}

/// Outcome reported by the upstream envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub status_code: i64,
    pub message: String,
    pub image_url: Option<String>,
}

impl GenerationResult {
    /// Resolve the result to the image URL, or the error the caller sees
    pub fn into_image_url(self) -> Result<String> {
        if self.status_code != UPSTREAM_SUCCESS_CODE {
            return Err(ImageGenError::UpstreamStatus {
                code: self.status_code,
                message: self.message,
            });
        }

        self.image_url
            .filter(|url| !url.is_empty())
            .ok_or(ImageGenError::MissingImageUrl)
    }
}

/// Generated image, fully buffered and base64 encoded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedImage {
    pub mime_type: String,
    pub base64_payload: String,
}

impl InlinedImage {
    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.base64_payload)
    }

    /// Markdown image element, so chat UIs render the picture inline
    pub fn markdown(&self) -> String {
        format!("![image]({})", self.data_uri())
    }
}
