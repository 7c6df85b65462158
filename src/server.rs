use std::future::Future;
use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use axum::{routing::post, Router};
use tower_http::cors::CorsLayer;

use crate::api_handlers::handle_line_notify;
use crate::config::ServerConfig;
use crate::defs::NOTIFY_ROUTE;
use crate::logging::{log_error, log_info, log_warning};
use crate::relay::Relay;

pub struct AppState {
    pub relay: Relay,
    pub config: ServerConfig,
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    Router::new()
        .route(NOTIFY_ROUTE, post(handle_line_notify))
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}

fn bind_addr(config: &ServerConfig) -> SocketAddr {
    let ip = config.host.parse::<IpAddr>().unwrap_or_else(|_| {
        log_warning(&format!("Invalid host '{}', binding to 127.0.0.1", config.host));
        IpAddr::from([127, 0, 0, 1])
    });
    SocketAddr::from((ip, config.port))
}

/// Bind the listener and serve the relay in a background task until
/// `shutdown` resolves. Returns the task handle and the bound address.
pub async fn start_server<F>(
    config: ServerConfig,
    relay: Relay,
    shutdown: F,
) -> std::io::Result<(tokio::task::JoinHandle<()>, SocketAddr)>
where
    F: Future<Output = ()> + Send + 'static,
{
    let listener = tokio::net::TcpListener::bind(bind_addr(&config)).await?;
    let local_addr = listener.local_addr()?;

    let app = build_router(Arc::new(AppState { relay, config }));

    let handle = tokio::spawn(async move {
        log_info(&format!("Server starting on {local_addr}"));

        if let Err(err) = axum::serve(listener, app).with_graceful_shutdown(shutdown).await {
            log_error(&format!("Server error: {err:?}"));
        }

        log_info("Server shutdown complete");
    });

    Ok((handle, local_addr))
}
