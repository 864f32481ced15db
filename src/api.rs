//! HTTP API for the billing engine.
//!
//! This module exposes a minimal REST API around the cost engine
//! using the [`axum`](https://crates.io/crates/axum) framework, so a
//! dashboard can submit request records and receive computed costs as
//! JSON. The handlers are thin: all billing semantics live in the
//! pure library modules, and the API owns only the shared pricing
//! state and the wire shapes.

use crate::aggregate::{self, MonthlyCosts};
use crate::classify;
use crate::engine::compute_costs;
use crate::models::{CostResult, PricingConfig, Request, UrgencyTier};
use anyhow::Result;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::info;

/// Application state shared across requests.
pub struct AppState {
    pub pricing: RwLock<PricingConfig>,
}

/// Body for `POST /api/costs`.
#[derive(Debug, Deserialize)]
pub struct CostsBody {
    pub requests: Vec<Request>,
    /// Billing period as `YYYY-MM`; omit for gross-only totals over
    /// an unscoped request list.
    #[serde(default)]
    pub period_month: Option<String>,
}

/// Body for `POST /api/classify`.
#[derive(Debug, Deserialize)]
pub struct ClassifyBody {
    pub description: String,
}

/// Response for `POST /api/classify`.
#[derive(Debug, Serialize)]
pub struct ClassifyReply {
    pub category: &'static str,
    pub urgency: UrgencyTier,
}

/// Build the API router, loading pricing from the given file when one
/// is supplied and falling back to the built-in rate card otherwise.
/// Returns the router and a handle to the state.
pub async fn build_router(pricing_file: Option<PathBuf>) -> Result<(Router, Arc<AppState>)> {
    let pricing = match pricing_file {
        Some(path) => {
            let config = PricingConfig::load(&path)?;
            info!(path = %path.display(), "loaded pricing configuration");
            config
        }
        None => {
            info!("no pricing file configured, using built-in rate card");
            PricingConfig::default()
        }
    };

    let state = Arc::new(AppState {
        pricing: RwLock::new(pricing),
    });
    let router = Router::new()
        .route("/api/costs", post(costs_handler))
        .route("/api/rollup", post(rollup_handler))
        .route("/api/classify", post(classify_handler))
        .route("/api/pricing", get(get_pricing_handler).put(put_pricing_handler))
        .with_state(state.clone());
    Ok((router, state))
}

/// Handler for POST /api/costs
async fn costs_handler(
    State(state): State<Arc<AppState>>,
    Json(body): Json<CostsBody>,
) -> Json<CostResult> {
    let pricing = state.pricing.read().await;
    Json(compute_costs(
        &body.requests,
        body.period_month.as_deref(),
        &pricing,
    ))
}

/// Handler for POST /api/rollup
async fn rollup_handler(
    State(state): State<Arc<AppState>>,
    Json(requests): Json<Vec<Request>>,
) -> Json<Vec<MonthlyCosts>> {
    let pricing = state.pricing.read().await;
    Json(aggregate::rollup_by_month(&requests, &pricing))
}

/// Handler for POST /api/classify
async fn classify_handler(Json(body): Json<ClassifyBody>) -> Json<ClassifyReply> {
    Json(ClassifyReply {
        category: classify::categorize(&body.description),
        urgency: classify::infer_urgency(&body.description),
    })
}

/// Handler for GET /api/pricing
async fn get_pricing_handler(State(state): State<Arc<AppState>>) -> Json<PricingConfig> {
    Json(state.pricing.read().await.clone())
}

/// Handler for PUT /api/pricing. The new rate card is validated
/// before it replaces the active one.
async fn put_pricing_handler(
    State(state): State<Arc<AppState>>,
    Json(config): Json<PricingConfig>,
) -> impl IntoResponse {
    if let Err(err) = config.validate() {
        let body = Json(serde_json::json!({"error": err.to_string()}));
        return (StatusCode::UNPROCESSABLE_ENTITY, body).into_response();
    }
    *state.pricing.write().await = config.clone();
    info!("pricing configuration replaced");
    (StatusCode::OK, Json(config)).into_response()
}

/// Launch the API server. Builds the router, binds to the supplied
/// address and blocks until the server terminates.
pub async fn serve(addr: &str, pricing_file: Option<PathBuf>) -> Result<()> {
    let (router, _state) = build_router(pricing_file).await?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, router).await?;
    Ok(())
}
