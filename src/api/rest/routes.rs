//! # Routes
//!
//! Router assembly for the REST API.

use super::handlers::{
    AppState, get_benchmarks, get_compliance_summary, get_deal_investor_limit,
    get_investor_matches, get_recommendations, health, post_dilution, post_equity_split,
    post_ltv_cac, post_retention, post_runway, post_sensitivity, post_valuation, post_what_if,
    put_preferences,
};
use axum::Router;
use axum::routing::{get, post, put};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router with every endpoint under `/api/v1`.
pub fn create_router(state: AppState) -> Router {
    let calculator = Router::new()
        .route("/runway", post(post_runway))
        .route("/what-if", post(post_what_if))
        .route("/ltv-cac", post(post_ltv_cac))
        .route("/sensitivity", post(post_sensitivity))
        .route("/retention", post(post_retention))
        .route("/equity-split", post(post_equity_split))
        .route("/dilution", post(post_dilution))
        .route("/valuation", post(post_valuation))
        .route("/benchmarks/{industry}", get(get_benchmarks));

    let api = Router::new()
        .route("/health", get(health))
        .route("/matching/recommendations", get(get_recommendations))
        .route("/matching/investors", get(get_investor_matches))
        .route("/investors/{id}/preferences", put(put_preferences))
        .route("/deals/{id}/investor-limit", get(get_deal_investor_limit))
        .route("/compliance/summary", get(get_compliance_summary))
        .nest("/calculator", calculator);

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
