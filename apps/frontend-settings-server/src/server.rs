use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use frontend_settings::FrontendSettingsModule;
use tokio::net::TcpListener;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info};

use crate::config::{AppConfig, ServerConfig};

/// Build the settings module, seeding it when configured.
///
/// # Errors
/// Returns an error if a seed file is unreadable or malformed.
pub async fn build_module(config: &AppConfig) -> Result<FrontendSettingsModule> {
    FrontendSettingsModule::new(config.frontend_settings.clone())
        .await
        .context("failed to initialize frontend settings")
}

/// Settings routes wrapped in the HTTP middleware stack.
pub fn build_router(module: &FrontendSettingsModule, config: &ServerConfig) -> Router {
    let x_request_id = axum::http::HeaderName::from_static("x-request-id");
    module
        .register_rest(Router::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            config.request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::new(x_request_id.clone()))
        .layer(SetRequestIdLayer::new(x_request_id, MakeRequestUuid))
}

/// Serve until Ctrl+C or SIGTERM.
///
/// # Errors
/// Returns an error if the module cannot be built or the address is taken.
pub async fn run(config: AppConfig) -> Result<()> {
    info!("Frontend settings server starting");
    let module = build_module(&config).await?;
    let app = build_router(&module, &config.server);

    let addr: SocketAddr = format!("{}:{}", config.server.bind_addr, config.server.port)
        .parse()
        .with_context(|| format!("invalid bind address '{}'", config.server.bind_addr))?;
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    info!(address = %addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Frontend settings server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "Error handling Ctrl+C signal");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    info!("Shutdown signal received, initiating graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt as _;

    #[tokio::test]
    async fn router_serves_settings_and_tags_requests() {
        let config = AppConfig::default();
        let module = build_module(&config).await.unwrap();
        let app = build_router(&module, &config.server);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/frontend-settings/channelSwitches")
                    .header("x-user-email", "alice@example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }
}
