//! Leerdash · Learning-Analytics Dashboard Backend
//!
//! - Axum HTTP API serving the synthetic-data/derived-metrics engine
//! - Static dashboard bundle fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                  : u16 (default 3000)
//!   DASHBOARD_CONFIG_PATH : path to TOML config (roster, subjects, defaults)
//!   SIMULATE_LATENCY      : "1"/"true" enables the cosmetic network delay
//!   LOG_LEVEL             : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT            : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod catalog;
mod config;
mod seeded;
mod activities;
mod competencies;
mod distribution;
mod settings;
mod risk;
mod metrics;
mod corpus;
mod state;
mod protocol;
mod routes;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::{info, instrument};

use crate::routes::build_router;
use crate::state::AppState;

#[instrument(level = "info", skip_all)]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
  telemetry::init_tracing();

  // Build shared application state (config, corpus, settings store).
  let state = Arc::new(AppState::new());

  // Build the HTTP router with routes, CORS and tracing layers.
  let app = build_router(state.clone());

  // Read port from env or default to 3000.
  let addr: SocketAddr = std::env::var("PORT")
    .ok()
    .and_then(|p| p.parse::<u16>().ok())
    .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
    .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

  let listener = TcpListener::bind(addr).await?;
  info!(target: "dashboard", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
