use std::time::Duration;

use base64::{Engine, engine::general_purpose::STANDARD};
use reqwest::Client;

use crate::{
    error::{ImageGenError, Result},
    types::InlinedImage,
};

/// Media type used when the bytes match no known image signature
pub const FALLBACK_MIME: &str = "application/octet-stream";

/// Downloads generated images and turns them into base64 payloads
///
/// The whole image is held in memory before encoding, which is fine for
/// the few-megabyte renders the upstream produces but not for arbitrary
/// large files.
pub struct ImageInliner {
    client: Client,
}

impl ImageInliner {
    /// Create an inliner whose downloads give up after `timeout`
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| anyhow::anyhow!("failed to build image download client: {e}"))?;

        Ok(Self { client })
    }

    /// Fetch `url` and encode it
    ///
    /// The media type is sniffed from the leading bytes; whatever
    /// `Content-Type` the host sends is ignored.
    pub async fn inline(&self, url: &str) -> Result<InlinedImage> {
        tracing::debug!(%url, "downloading generated image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|e| download_error(url, &e))?;

        let bytes = response.bytes().await.map_err(|e| download_error(url, &e))?;

        if bytes.is_empty() {
            tracing::error!(%url, "generated image body is empty");
            return Err(ImageGenError::Download("empty response body".to_owned()));
        }

        let mime_type = sniff_mime(&bytes);
        tracing::debug!(%url, mime_type, size = bytes.len(), "generated image downloaded");

        Ok(InlinedImage {
            mime_type: mime_type.to_owned(),
            base64_payload: STANDARD.encode(&bytes),
        })
    }
}

fn download_error(url: &str, error: &reqwest::Error) -> ImageGenError {
    tracing::error!(%url, error = %error, timeout = error.is_timeout(), "image download failed");
    ImageGenError::Download(error.to_string())
}

/// Detect an image media type from its magic bytes
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes).map_or(FALLBACK_MIME, |format| format.to_mime_type())
}
