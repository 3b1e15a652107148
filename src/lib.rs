//! Agentic Finance decision service
//!
//! Explainable decision agents with an append-only audit trail.
//!
//! # Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────┐
//! │                       AGENTIC FINANCE                         │
//! ├───────────────────────────────────────────────────────────────┤
//! │  request ──▶ contract check ──▶ scoring model                 │
//! │                                     │                         │
//! │                                     ▼                         │
//! │                          (score, features, seed)              │
//! │                                     │                         │
//! │                                     ▼                         │
//! │                          attribution normalizer               │
//! │                                     │                         │
//! │                                     ▼                         │
//! │   ┌──────────────── decision recorder (one tx) ─────────────┐ │
//! │   │  explanations  ◀── explanation_id ──  decision_logs     │ │
//! │   └─────────────────────────────────────────────────────────┘ │
//! └───────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod explain;
pub mod scoring;
pub mod policy;
pub mod store;
pub mod recorder;
pub mod agents;
pub mod handlers;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};

pub use error::{AppError, AppResult};

use config::Config;
use recorder::DecisionRecorder;
use store::DecisionStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub recorder: DecisionRecorder,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, store: Arc<dyn DecisionStore>) -> Self {
        Self {
            recorder: DecisionRecorder::new(store),
            config,
        }
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    let agent_routes = Router::new()
        .route("/api/v1/agents/allocation/run", post(handlers::agents::run_allocation))
        .route("/api/v1/agents/risk/run", post(handlers::agents::run_risk))
        .route("/api/v1/agents/sentiment/run", post(handlers::agents::run_sentiment));

    let audit_routes = Router::new()
        .route("/api/v1/decisions/:decision_id", get(handlers::decisions::get));

    Router::new()
        .route("/health", get(handlers::health::check))
        .merge(agent_routes)
        .merge(audit_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
