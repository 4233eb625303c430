//! # Advisor API
//!
//! REST surface for credit price suggestions:
//! - `GET /health`: liveness probe
//! - `GET /version`: build and market-factor scheme
//! - `POST /suggest-price`: price suggestion for an amount and region

pub mod config;
pub mod error;

use std::sync::Arc;

use advisor_pricing::{
    PriceSuggester, PriceSuggestionRequest, PriceSuggestionResponse, MARKET_FACTOR_SCHEME,
};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, Method},
    response::Json,
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

pub use config::AdvisorConfig;
pub use error::{ApiError, FieldError};

/// Shared, immutable router state
#[derive(Clone, Default)]
pub struct AppState {
    suggester: Arc<PriceSuggester>,
}

impl AppState {
    pub fn new(suggester: PriceSuggester) -> Self {
        Self {
            suggester: Arc::new(suggester),
        }
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn version() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "service": "advisor-api",
        "version": env!("CARGO_PKG_VERSION"),
        "market_factor_scheme": MARKET_FACTOR_SCHEME,
    }))
}

async fn suggest_price(
    State(state): State<AppState>,
    payload: Result<Json<PriceSuggestionRequest>, JsonRejection>,
) -> Result<Json<PriceSuggestionResponse>, ApiError> {
    let Json(request) = payload?;
    let suggestion = state.suggester.suggest_request(&request)?;
    let response = suggestion.to_response();

    info!(
        amount = request.amount,
        region = %request.region,
        tier = %suggestion.tier,
        price = response.suggested_price_per_credit,
        total = response.estimated_total,
        "suggested price"
    );
    Ok(Json(response))
}

/// Build the HTTP router
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(health_check))
        .route("/version", get(version))
        .route("/suggest-price", post(suggest_price))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
