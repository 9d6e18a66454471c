//! Glosa · Quiz Paper Engine Backend
//!
//! - Axum HTTP API over the pure paper engine (numbering, option shuffling,
//!   answer storage, grading)
//! - In-memory paper store with optimistic-concurrency saves
//!
//! Important env variables:
//!   PORT            : u16 (default 3000)
//!   PAPER_BANK_PATH : path to TOML paper bank (optional)
//!   LOG_LEVEL       : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT      : "pretty" (default) or "json"

mod telemetry;
mod util;
mod domain;
mod scanner;
mod shuffle;
mod strategy;
mod numbering;
mod answers;
mod scoring;
mod config;
mod seeds;
mod state;
mod protocol;
mod logic;
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

  // Build shared application state (paper store, versions, answer sheets).
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
  info!(target: "glosa_backend", %addr, "HTTP server listening");
  axum::serve(listener, app).await?;
  Ok(())
}
