use axum::{Extension, Router, routing::get};
use std::{net::SocketAddr, str::FromStr, sync::Arc};

use crate::{CurateError, Res, api, config::Settings, info};

pub fn router(settings: Arc<Settings>) -> Router {
    Router::new()
        .route("/", get(api::curate))
        .route("/health", get(api::health))
        .layer(Extension(settings))
}

/// Serves the trigger endpoints on `settings.server_address` until the
/// process is stopped.
pub async fn start_api_server(settings: Arc<Settings>) -> Res<()> {
    let addr = SocketAddr::from_str(&settings.server_address).map_err(|e| {
        CurateError::Config(format!(
            "invalid server address {}: {}",
            settings.server_address, e
        ))
    })?;

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CurateError::Config(format!("cannot bind {addr}: {e}")))?;
    info!("Listening on {}", addr);

    axum::serve(listener, router(settings))
        .await
        .map_err(|e| CurateError::Config(format!("server stopped: {e}")))
}
