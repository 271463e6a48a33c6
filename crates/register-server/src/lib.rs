//! HTTP surface of the public office register.
//!
//! Composes the health endpoint with the JSON API from `register-api` and
//! wraps everything in request tracing.

use std::{path::PathBuf, sync::Arc};

use axum::{Json, Router, routing::get};
use register_core::store::RegistryStore;
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;

/// Name reported by the health endpoint.
pub const SERVICE_NAME: &str = "OGA Public Office Register";

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `REGISTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8000 }

fn default_store_path() -> PathBuf { PathBuf::from("register.db") }

// ─── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct Health {
  pub status:  &'static str,
  pub service: &'static str,
}

/// `GET /health/`
pub async fn health() -> Json<Health> {
  Json(Health { status: "ok", service: SERVICE_NAME })
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router for `store`.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: RegistryStore + 'static,
{
  Router::new()
    .route("/health/", get(health))
    .nest("/api", register_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
