//! HTTP host for the users directory: wraps module routes in the common
//! middleware stack and runs the server until cancelled.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, middleware::from_fn, routing::get, Router};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

mod config;
pub mod request_id;
mod web;

pub use config::ApiIngressConfig;

/// Owns the ingress configuration and the rendered OpenAPI document.
#[derive(Clone)]
pub struct ApiIngress {
    config: ApiIngressConfig,
    openapi: Option<Arc<serde_json::Value>>,
}

impl ApiIngress {
    pub fn new(config: ApiIngressConfig) -> Self {
        Self {
            config,
            openapi: None,
        }
    }

    /// Attach the OpenAPI document; it is rendered once and served as static JSON.
    pub fn with_openapi(mut self, doc: &utoipa::openapi::OpenApi) -> Result<Self> {
        let value = serde_json::to_value(doc).context("failed to render OpenAPI document")?;
        self.openapi = Some(Arc::new(value));
        Ok(self)
    }

    pub fn config(&self) -> &ApiIngressConfig {
        &self.config
    }

    /// Build the final router from the module routes.
    ///
    /// Request flow (outermost first):
    /// SetRequestId -> PropagateRequestId -> Trace -> CORS -> BodyLimit -> push_req_id -> Timeout
    pub fn build_router(&self, routes: Router) -> Router {
        let mut router = routes.route("/health", get(web::health_check));

        if self.config.enable_docs {
            if let Some(doc) = self.openapi.clone() {
                router = router
                    .route(
                        "/openapi.json",
                        get(move || {
                            let doc = doc.clone();
                            async move {
                                use axum::{http::header, response::IntoResponse};
                                (
                                    [(header::CACHE_CONTROL, "no-store")],
                                    axum::Json((*doc).clone()),
                                )
                                    .into_response()
                            }
                        }),
                    )
                    .route("/docs", get(web::serve_docs));
            } else {
                tracing::warn!("docs enabled but no OpenAPI document attached");
            }
        }

        router = router
            .layer(TimeoutLayer::new(Duration::from_secs(
                self.config.request_timeout_sec.max(1),
            )))
            .layer(from_fn(request_id::push_req_id_to_extensions))
            // extractors otherwise cap bodies at axum's own 2 MiB default
            .layer(DefaultBodyLimit::max(self.config.body_limit_bytes))
            .layer(RequestBodyLimitLayer::new(self.config.body_limit_bytes));

        if self.config.cors_enabled {
            router = router.layer(CorsLayer::permissive());
        }

        let x_request_id = request_id::header();
        router
            .layer(request_id::create_trace_layer())
            .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
            .layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId))
    }

    /// Bind the listening socket.
    pub async fn bind(host: &str, port: u16) -> Result<TcpListener> {
        let addr: SocketAddr = format!("{host}:{port}")
            .parse()
            .with_context(|| format!("invalid bind address '{host}:{port}'"))?;
        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;
        tracing::info!("HTTP server bound on {}", addr);
        Ok(listener)
    }

    /// Serve until `cancel` fires, then drain in-flight requests.
    pub async fn serve(
        listener: TcpListener,
        router: Router,
        cancel: CancellationToken,
    ) -> Result<()> {
        let shutdown = async move {
            cancel.cancelled().await;
            tracing::info!("HTTP server shutting down gracefully (cancellation)");
        };

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown)
            .await
            .context("HTTP server failed")
    }
}
