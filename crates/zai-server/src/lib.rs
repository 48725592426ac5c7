#![allow(
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_const_for_fn,
    clippy::module_name_repetitions
)]

mod health;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;
use zai_config::Config;
use zai_core::{RouteModule, module_router};

/// Assembled server with all module routes and middleware
pub struct Server {
    router: Router,
    listen_address: SocketAddr,
}

impl Server {
    /// Build the server from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if an enabled module fails to initialize
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let mut modules: Vec<Arc<dyn RouteModule>> = Vec::new();

        if config.image.enabled {
            modules.push(zai_image::build_module(&config.image)?);
        }

        if config.agent.enabled {
            modules.push(zai_agent::build_module(&config.agent));
        }

        let mut app = Self::mount(modules);

        // Health check
        if config.server.health.enabled {
            app = app.route(&config.server.health.path, axum::routing::get(health::health_handler));
        }

        // Tracing
        app = app.layer(TraceLayer::new_for_http());

        Ok(Self {
            router: app,
            listen_address: config.server.listen_address(),
        })
    }

    /// Nest each module's routes under its mount path
    fn mount(modules: Vec<Arc<dyn RouteModule>>) -> Router {
        modules.into_iter().fold(Router::new(), |app, module| {
            tracing::info!(
                module = module.name(),
                path = module.mount_path(),
                models = module.list_models().len(),
                "module mounted"
            );
            let path = module.mount_path().to_owned();
            app.nest(&path, module_router(module))
        })
    }

    /// Get the configured listen address
    #[must_use]
    pub const fn listen_address(&self) -> SocketAddr {
        self.listen_address
    }

    /// Consume the server and return the inner router
    ///
    /// Useful for testing when the caller manages the listener
    pub fn into_router(self) -> Router {
        self.router
    }

    /// Start serving requests
    ///
    /// Blocks until the cancellation token is triggered. In-flight
    /// requests are allowed to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if binding the TCP listener or serving fails
    pub async fn serve(self, shutdown: tokio_util::sync::CancellationToken) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(self.listen_address).await?;
        let local_addr = listener.local_addr()?;
        tracing::info!(%local_addr, "server listening");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                shutdown.cancelled().await;
                tracing::info!("graceful shutdown initiated");
            })
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;

    fn config(toml: &str) -> Config {
        Config::parse(toml).unwrap()
    }

    async fn get(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = router
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap_or_default())
    }

    #[tokio::test]
    async fn default_layout() {
        let server = Server::new(&Config::default()).unwrap();
        assert_eq!(server.listen_address(), SocketAddr::from(([0, 0, 0, 0], 8080)));
        let router = server.into_router();

        let (status, body) = get(router.clone(), "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({"status": "ok"}));

        let (status, body) = get(router.clone(), "/image/v1/models").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 16);

        let (status, body) = get(router, "/chat-agent/v1/models").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn disabled_parts_are_not_routed() {
        let router = Server::new(&config(
            r"
            [server.health]
            enabled = false

            [agent]
            enabled = false
            ",
        ))
        .unwrap()
        .into_router();

        assert_eq!(get(router.clone(), "/health").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(router.clone(), "/chat-agent/v1/models").await.0, StatusCode::NOT_FOUND);
        assert_eq!(get(router, "/image/v1/models").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn custom_mount_paths() {
        let router = Server::new(&config(
            r#"
            [server.health]
            path = "/healthz"

            [image]
            path = "/v1"
            "#,
        ))
        .unwrap()
        .into_router();

        assert_eq!(get(router.clone(), "/healthz").await.0, StatusCode::OK);
        let (status, body) = get(router, "/v1/models/gemini-3-pro-image-2k-16-9").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["owned_by"], "zhipu");
    }
}
