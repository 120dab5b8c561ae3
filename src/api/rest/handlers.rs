//! # REST Handlers
//!
//! Request handlers and response types for the REST API.

// Calculator handlers are synchronous work behind axum's async signature.
#![allow(clippy::unused_async)]

use super::error::ApiError;
use crate::application::services::{
    ComplianceService, MatchingService, StartupInvestorMatches, StartupRecommendations,
};
use crate::domain::entities::PreferencesRecord;
use crate::domain::services::calculator::{
    self, CacInputs, CoFounder, DilutionInputs, DilutionOutputs, EquitySplitOutputs,
    IndustryBenchmarks, LtvCacOutputs, LtvInputs, RetentionInputs, RetentionOutputs, RunwayInputs,
    RunwayOutputs, SensitivityMatrix, ValuationInputs, ValuationOutputs, WhatIfResults,
    WhatIfScenario,
};
use crate::domain::services::{ComplianceSummary, InvestorLimitReport};
use crate::domain::value_objects::{DealId, Industry, InvestorId, StartupId};
use axum::Json;
use axum::extract::{Path, Query, State};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Shared state for every handler.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Matching service.
    pub matching: Arc<MatchingService>,
    /// Compliance service.
    pub compliance: Arc<ComplianceService>,
}

/// Success envelope that flattens the payload next to `success`.
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse<T> {
    /// Always true.
    pub success: bool,
    /// Payload fields.
    #[serde(flatten)]
    pub body: T,
}

impl<T> SuccessResponse<T> {
    fn ok(body: T) -> Json<Self> {
        Json(Self {
            success: true,
            body,
        })
    }
}

/// Calculator envelope: `{success: true, result}`.
#[derive(Debug, Clone, Serialize)]
pub struct CalculationResponse<T> {
    /// Always true.
    pub success: bool,
    /// Calculator output.
    pub result: T,
}

type Calculated<T> = Result<Json<CalculationResponse<T>>, ApiError>;

fn calculated<T>(result: T) -> Calculated<T> {
    Ok(Json(CalculationResponse {
        success: true,
        result,
    }))
}

/// Health check response.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// `"ok"` while the process is serving.
    pub status: &'static str,
    /// Crate version.
    pub version: &'static str,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        timestamp: Utc::now(),
    })
}

/// Query for investor recommendations.
#[derive(Debug, Clone, Deserialize)]
pub struct InvestorQuery {
    /// Investor to recommend startups to.
    pub investor_id: InvestorId,
}

/// `GET /matching/recommendations?investor_id=`
///
/// # Errors
///
/// Returns 404 for an unknown investor and 400 when preferences are unset.
pub async fn get_recommendations(
    State(state): State<AppState>,
    Query(query): Query<InvestorQuery>,
) -> Result<Json<SuccessResponse<StartupRecommendations>>, ApiError> {
    let out = state
        .matching
        .recommendations_for_investor(query.investor_id)
        .await?;
    Ok(SuccessResponse::ok(out))
}

/// Query for startup-side matching.
#[derive(Debug, Clone, Deserialize)]
pub struct StartupQuery {
    /// Startup to match investors against.
    pub startup_id: StartupId,
}

/// `GET /matching/investors?startup_id=`
///
/// # Errors
///
/// Returns 404 for an unknown startup and 422 for an incomplete profile.
pub async fn get_investor_matches(
    State(state): State<AppState>,
    Query(query): Query<StartupQuery>,
) -> Result<Json<SuccessResponse<StartupInvestorMatches>>, ApiError> {
    let out = state.matching.investors_for_startup(query.startup_id).await?;
    Ok(SuccessResponse::ok(out))
}

/// Body of a successful preferences update.
#[derive(Debug, Clone, Serialize)]
pub struct PreferencesUpdated {
    /// Stored preferences in normalised form.
    pub preferences: PreferencesRecord,
}

/// `PUT /investors/{id}/preferences`
///
/// # Errors
///
/// Returns 422 for an invalid record and 404 for an unknown investor.
pub async fn put_preferences(
    State(state): State<AppState>,
    Path(investor_id): Path<InvestorId>,
    Json(record): Json<PreferencesRecord>,
) -> Result<Json<SuccessResponse<PreferencesUpdated>>, ApiError> {
    let prefs = state
        .matching
        .update_preferences(investor_id, record)
        .await?;
    Ok(SuccessResponse::ok(PreferencesUpdated {
        preferences: PreferencesRecord::from(&prefs),
    }))
}

/// `GET /deals/{id}/investor-limit`
///
/// # Errors
///
/// Returns 404 for an unknown deal.
pub async fn get_deal_investor_limit(
    State(state): State<AppState>,
    Path(deal_id): Path<DealId>,
) -> Result<Json<InvestorLimitReport>, ApiError> {
    Ok(Json(state.compliance.deal_limit(deal_id).await?))
}

/// `GET /compliance/summary`
///
/// # Errors
///
/// Returns 500 if deals cannot be loaded.
pub async fn get_compliance_summary(
    State(state): State<AppState>,
) -> Result<Json<ComplianceSummary>, ApiError> {
    Ok(Json(state.compliance.summary().await?))
}

/// Body for `POST /calculator/what-if`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct WhatIfRequest {
    /// Current situation.
    pub base: RunwayInputs,
    /// Change to apply.
    pub scenario: WhatIfScenario,
}

/// Body for `POST /calculator/ltv-cac`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct LtvCacRequest {
    /// Lifetime value inputs.
    pub ltv: LtvInputs,
    /// Acquisition cost inputs.
    pub cac: CacInputs,
}

/// Body for `POST /calculator/sensitivity`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SensitivityRequest {
    /// Lifetime value inputs.
    pub ltv: LtvInputs,
    /// Acquisition cost inputs.
    pub cac: CacInputs,
    /// CAC changes in percent; defaults to ±10/±20.
    #[serde(default)]
    pub cac_changes: Option<Vec<Decimal>>,
    /// Churn changes in percent; defaults to ±2.5/±5.
    #[serde(default)]
    pub churn_changes: Option<Vec<Decimal>>,
}

/// Body for `POST /calculator/equity-split`.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct EquitySplitRequest {
    /// Founders to split between.
    pub co_founders: Vec<CoFounder>,
}

/// `POST /calculator/runway`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_runway(Json(inputs): Json<RunwayInputs>) -> Calculated<RunwayOutputs> {
    calculated(calculator::calculate_runway(&inputs)?)
}

/// `POST /calculator/what-if`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_what_if(Json(req): Json<WhatIfRequest>) -> Calculated<WhatIfResults> {
    calculated(calculator::calculate_what_if(&req.base, &req.scenario)?)
}

/// `POST /calculator/ltv-cac`
///
/// # Errors
///
/// Returns 422 for invalid inputs, including zero customers.
pub async fn post_ltv_cac(Json(req): Json<LtvCacRequest>) -> Calculated<LtvCacOutputs> {
    calculated(calculator::calculate_ltv_cac(&req.ltv, &req.cac)?)
}

/// `POST /calculator/sensitivity`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_sensitivity(Json(req): Json<SensitivityRequest>) -> Calculated<SensitivityMatrix> {
    let cac_changes = req.cac_changes.unwrap_or_else(calculator::default_cac_changes);
    let churn_changes = req
        .churn_changes
        .unwrap_or_else(calculator::default_churn_changes);
    calculated(calculator::generate_sensitivity_matrix(
        &req.ltv,
        &req.cac,
        &cac_changes,
        &churn_changes,
    )?)
}

/// `POST /calculator/retention`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_retention(Json(inputs): Json<RetentionInputs>) -> Calculated<RetentionOutputs> {
    calculated(calculator::calculate_retention(&inputs)?)
}

/// `POST /calculator/equity-split`
///
/// # Errors
///
/// Returns 422 for an empty list or out-of-range contributions.
pub async fn post_equity_split(
    Json(req): Json<EquitySplitRequest>,
) -> Calculated<EquitySplitOutputs> {
    calculated(calculator::calculate_equity_split(&req.co_founders)?)
}

/// `POST /calculator/dilution`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_dilution(Json(inputs): Json<DilutionInputs>) -> Calculated<DilutionOutputs> {
    calculated(calculator::calculate_dilution(&inputs)?)
}

/// `POST /calculator/valuation`
///
/// # Errors
///
/// Returns 422 for invalid inputs.
pub async fn post_valuation(Json(inputs): Json<ValuationInputs>) -> Calculated<ValuationOutputs> {
    calculated(calculator::calculate_valuation(&inputs)?)
}

/// `GET /calculator/benchmarks/{industry}`
///
/// # Errors
///
/// Returns 422 if the industry is not recognised.
pub async fn get_benchmarks(Path(industry): Path<String>) -> Calculated<IndustryBenchmarks> {
    let industry: Industry = industry
        .parse()
        .map_err(|e: crate::domain::value_objects::ParseEnumError| {
            ApiError::Validation(e.to_string())
        })?;
    calculated(calculator::industry_benchmarks(industry))
}
