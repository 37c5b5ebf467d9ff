//! Math Robo Tutor · question generation backend
//!
//! - Axum HTTP API (`POST /api/generate-questions`, `GET /api/catalog`, `GET /api/health`)
//! - Gemini structured-output generation with sequential API-key fallback
//! - Offline question bank when every attempt fails (unless OFFLINE_FALLBACK=false)
//!
//! Configuration is read from the environment, see `math_tutor::config`.
//!   LOG_LEVEL    : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT   : "pretty" (default) or "json"

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use math_tutor::config::AppConfig;
use math_tutor::routes::build_router;
use math_tutor::state::AppState;
use math_tutor::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing(telemetry::SERVER_FILTER);

  let config = AppConfig::from_env();
  let addr = SocketAddr::from(([0, 0, 0, 0], config.port));

  // Shared, immutable application state (config + question model).
  let state = Arc::new(AppState::new(config)?);
  let app = build_router(state);

  let listener = TcpListener::bind(addr).await?;
  info!(target: "math_tutor", %addr, "HTTP server listening");
  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await?;
  info!(target: "math_tutor", "HTTP server stopped");
  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::error!(target: "math_tutor", error = %e, "Failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
}
