//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (whitelist gate, timeout, request ID, tracing)
//! - Bind server to listener
//! - Stop on shutdown signal

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::http::handlers;
use crate::http::middleware::whitelist_middleware;
use crate::http::request::UuidRequestId;
use crate::render::Renderer;
use crate::security::Whitelist;

pub const HEALTH_PATH: &str = "/healthz";
pub const RENDER_PATH: &str = "/render";
pub const WHITELIST_PATH: &str = "/whitelist";

/// Application state injected into handlers and middleware.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub whitelist: Arc<Whitelist>,
    pub renderer: Arc<Renderer>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        Self::from_shared(Arc::new(settings))
    }

    pub fn from_shared(settings: Arc<Settings>) -> Self {
        let whitelist = Arc::new(Whitelist::new(settings.whitelist_patterns.clone()));
        let renderer = Arc::new(Renderer::from_settings(&settings));
        Self {
            settings,
            whitelist,
            renderer,
        }
    }
}

/// HTTP server for the renderer service.
pub struct HttpServer {
    router: Router,
    settings: Arc<Settings>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(settings: Settings) -> Self {
        let settings = Arc::new(settings);
        let state = AppState::from_shared(settings.clone());
        let router = Self::build_router(&settings, state);
        Self { router, settings }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(settings: &Settings, state: AppState) -> Router {
        Router::new()
            .route(HEALTH_PATH, get(handlers::healthz))
            .route(RENDER_PATH, post(handlers::render))
            .route(WHITELIST_PATH, get(handlers::whitelist))
            .layer(middleware::from_fn_with_state(
                state.clone(),
                whitelist_middleware,
            ))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(UuidRequestId))
                    .layer(TraceLayer::new_for_http())
                    .layer(PropagateRequestIdLayer::x_request_id())
                    .layer(TimeoutLayer::new(Duration::from_secs(
                        settings.request_timeout_secs,
                    ))),
            )
    }

    /// The fully layered router, for serving or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
