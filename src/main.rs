//! ArgoCD Renderer service.
//!
//! ```text
//!     Client Request
//!     ─────────────▶ request id ─▶ trace ─▶ timeout ─▶ whitelist gate ─▶ handlers
//!                                                       (POST /render)    /healthz
//!                                                            │           /render
//!                                                            ▼           /whitelist
//!                                                     403 not allowed
//! ```

use tokio::net::TcpListener;

use argocd_renderer::config::load_settings;
use argocd_renderer::lifecycle::{wait_for_signal, Shutdown};
use argocd_renderer::observability::{init_logging, DEFAULT_FILTER};
use argocd_renderer::HttpServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging(DEFAULT_FILTER);

    tracing::info!("argocd-renderer v{} starting", env!("CARGO_PKG_VERSION"));

    let settings = match load_settings() {
        Ok(s) => s,
        Err(e) => {
            tracing::error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    tracing::info!(
        bind_address = %settings.bind_address,
        mock_mode = settings.mock_mode,
        whitelist_patterns = settings.whitelist_patterns.len(),
        upstream_url = %settings.upstream_url,
        request_timeout_secs = settings.request_timeout_secs,
        "Configuration loaded"
    );
    if settings.whitelist_patterns.is_empty() {
        tracing::warn!("Whitelist is empty, every render request will be rejected");
    }

    let listener = TcpListener::bind(&settings.bind_address).await?;
    let local_addr = listener.local_addr()?;
    tracing::info!(address = %local_addr, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(settings);
    let mut server_task = tokio::spawn(server.run(listener, shutdown.subscribe()));

    tokio::select! {
        result = &mut server_task => {
            result??;
        }
        _ = wait_for_signal() => {
            shutdown.trigger();
            server_task.await??;
        }
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
