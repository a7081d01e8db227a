//! NAC API /v1: REST endpoints over the comparison engine
//!
//! ```text
//! POST /v1/calculate   {config, vendors?, granularity?} → result set
//! POST /v1/sensitivity {config, vendor, parameter, rangePercent?, steps?}
//! GET  /v1/vendors     catalog summary
//! GET  /v1/frameworks  compliance catalog summary
//! GET  /v1/health
//! GET  /metrics        prometheus text
//! ```
pub mod config;
pub mod handlers;
pub mod metrics;
pub mod middleware;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use nac_engine::ComparisonEngine;
use nac_ranking::RankingProfile;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::metrics::ApiMetrics;

/// Shared, read-only state of the server
pub struct AppState {
    pub engine: ComparisonEngine,
    pub metrics: ApiMetrics,
}

impl AppState {
    pub fn new(engine: ComparisonEngine) -> anyhow::Result<Self> {
        Ok(Self {
            engine,
            metrics: ApiMetrics::new().context("registering metrics")?,
        })
    }

    /// Load catalogs and ranking profile named by `config`
    pub fn from_config(config: &ServerConfig) -> anyhow::Result<Self> {
        let engine = ComparisonEngine::load_dir(&config.data_dir)
            .with_context(|| format!("loading catalogs from {}", config.data_dir.display()))?
            .with_ranking_profile(RankingProfile::for_name(&config.ranking_profile));
        Self::new(engine)
    }
}

pub fn create_app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/v1/calculate", post(handlers::calculate))
        .route("/v1/sensitivity", post(handlers::sensitivity))
        .route("/v1/vendors", get(handlers::list_vendors))
        .route("/v1/frameworks", get(handlers::list_frameworks))
        .route("/v1/health", get(handlers::health))
        .route("/metrics", get(handlers::metrics))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(middleware::cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run(config: ServerConfig) -> anyhow::Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    tracing::info!(
        vendors = state.engine.registry().vendors.len(),
        frameworks = state.engine.registry().frameworks.len(),
        ranking_profile = %state.engine.ranking_profile().name,
        "catalogs loaded"
    );

    let app = create_app(state);
    let listener = tokio::net::TcpListener::bind(config.addr)
        .await
        .with_context(|| format!("binding {}", config.addr))?;

    tracing::info!("NAC API listening on {}", config.addr);
    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
