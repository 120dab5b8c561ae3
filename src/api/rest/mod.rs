//! # REST API
//!
//! JSON endpoints for matching, compliance and the calculators.
//!
//! # Endpoints
//!
//! ## Matching
//! - `GET /api/v1/matching/recommendations?investor_id=` - Startups for an investor
//! - `GET /api/v1/matching/investors?startup_id=` - Investors for a startup
//! - `PUT /api/v1/investors/{id}/preferences` - Save investor preferences
//!
//! ## Compliance
//! - `GET /api/v1/deals/{id}/investor-limit` - Section 42 status of one deal
//! - `GET /api/v1/compliance/summary` - Platform-wide compliance summary
//!
//! ## Calculators
//! - `POST /api/v1/calculator/runway`
//! - `POST /api/v1/calculator/what-if`
//! - `POST /api/v1/calculator/ltv-cac`
//! - `POST /api/v1/calculator/sensitivity`
//! - `POST /api/v1/calculator/retention`
//! - `POST /api/v1/calculator/equity-split`
//! - `POST /api/v1/calculator/dilution`
//! - `POST /api/v1/calculator/valuation`
//! - `GET /api/v1/calculator/benchmarks/{industry}`
//!
//! ## Health
//! - `GET /api/v1/health`
//!
//! # Usage
//!
//! ```ignore
//! use venture_match::api::rest::{create_router, AppState};
//! use std::sync::Arc;
//!
//! let state = AppState {
//!     matching: Arc::new(matching_service),
//!     compliance: Arc::new(compliance_service),
//! };
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, create_router(state)).await?;
//! ```

pub mod error;
pub mod handlers;
pub mod routes;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{
    AppState, CalculationResponse, EquitySplitRequest, HealthResponse, LtvCacRequest,
    SensitivityRequest, SuccessResponse, WhatIfRequest,
};
pub use routes::create_router;
