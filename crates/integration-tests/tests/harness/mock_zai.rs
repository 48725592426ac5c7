//! Mock z.ai upstream for integration tests
//!
//! Serves the generation endpoint and hosts the image it points at, so a
//! full request never leaves the loopback interface.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::IntoResponse;
use axum::{Router, routing};
use tokio_util::sync::CancellationToken;

/// Smallest valid PNG: a single transparent pixel
pub const PNG_PIXEL: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, 0x00, 0x00, 0x00,
    0x01, 0x00, 0x00, 0x00, 0x01, 0x08, 0x06, 0x00, 0x00, 0x00, 0x1F, 0x15, 0xC4, 0x89, 0x00, 0x00, 0x00, 0x0D, 0x49,
    0x44, 0x41, 0x54, 0x78, 0x9C, 0x63, 0x00, 0x01, 0x00, 0x00, 0x05, 0x00, 0x01, 0x0D, 0x0A, 0x2D, 0xB4, 0x00, 0x00,
    0x00, 0x00, 0x49, 0x45, 0x4E, 0x44, 0xAE, 0x42, 0x60, 0x82,
];

/// How the generation endpoint answers
#[derive(Debug, Clone)]
pub enum Reply {
    /// `code: 200` pointing at the hosted PNG
    Success,
    /// `code: 200` pointing at a path the mock does not serve
    BrokenImageLink,
    /// `code: 200` with an empty `image_url`
    EmptyUrl,
    /// Non-success envelope
    Failure { code: i64, message: String },
    /// Something that is not JSON at all
    Garbage,
    /// Success, but only after holding the request for this long
    Stall(Duration),
}

/// What the gateway sent to the generation endpoint
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub headers: HeaderMap,
    pub body: serde_json::Value,
}

pub struct MockZai {
    addr: SocketAddr,
    shutdown: CancellationToken,
    state: Arc<MockZaiState>,
}

struct MockZaiState {
    addr: SocketAddr,
    reply: Reply,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl MockZai {
    /// Start the mock upstream with a fixed reply
    pub async fn start(reply: Reply) -> anyhow::Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;

        let state = Arc::new(MockZaiState {
            addr,
            reply,
            requests: Mutex::new(Vec::new()),
        });

        let app = Router::new()
            .route("/api/proxy/images/generate", routing::post(handle_generate))
            .route("/images/pixel.png", routing::get(handle_image))
            .with_state(Arc::clone(&state));

        let shutdown = CancellationToken::new();
        let shutdown_clone = shutdown.clone();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async move {
                    shutdown_clone.cancelled().await;
                })
                .await
                .ok();
        });

        Ok(Self { addr, shutdown, state })
    }

    /// Site URL to configure as the image module's `base_url`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Generation calls received so far
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.requests.lock().unwrap().clone()
    }
}

/// Base URL of a loopback port nothing is listening on
pub async fn closed_upstream() -> anyhow::Result<String> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);
    Ok(format!("http://{addr}"))
}

impl Drop for MockZai {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

async fn handle_generate(State(state): State<Arc<MockZaiState>>, headers: HeaderMap, body: Bytes) -> impl IntoResponse {
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.requests.lock().unwrap().push(RecordedRequest { headers, body });

    if let Reply::Stall(delay) = &state.reply {
        tokio::time::sleep(*delay).await;
    }

    let image_url = |path: &str| format!("http://{}{path}", state.addr);

    let envelope = match &state.reply {
        Reply::Success | Reply::Stall(_) => success(&image_url("/images/pixel.png")),
        Reply::BrokenImageLink => success(&image_url("/images/gone.png")),
        Reply::EmptyUrl => success(""),
        Reply::Failure { code, message } => serde_json::json!({
            "code": code,
            "message": message,
            "data": null,
            "timestamp": 1_700_000_000,
        }),
        Reply::Garbage => {
            return (StatusCode::BAD_GATEWAY, [(header::CONTENT_TYPE, "text/html")], "<html>bad gateway</html>".to_owned());
        }
    };

    (StatusCode::OK, [(header::CONTENT_TYPE, "application/json")], envelope.to_string())
}

fn success(image_url: &str) -> serde_json::Value {
    serde_json::json!({
        "code": 200,
        "message": "success",
        "data": {
            "image": {
                "image_id": "img_0001",
                "prompt": "",
                "size": "1024x1024",
                "ratio": "1:1",
                "resolution": "1K",
                "image_url": image_url,
                "status": "completed",
                "created_at": "2025-01-01T00:00:00Z",
                "updated_at": "2025-01-01T00:00:00Z",
                "width": 1024,
                "height": 1024,
            }
        },
        "timestamp": 1_700_000_000,
    })
}

async fn handle_image() -> impl IntoResponse {
    // Deliberately mislabelled: the gateway sniffs the bytes instead
    ([(header::CONTENT_TYPE, "application/octet-stream")], PNG_PIXEL)
}
