//! # venture-match
//!
//! Investor-startup matching, Section 42 investor-limit compliance and
//! venture financial calculators for a private-placement platform.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │  api::rest        axum router and handlers    │
//! ├──────────────────────────────────────────────┤
//! │  application      MatchingService            │
//! │                   ComplianceService          │
//! │                   RecommendationFilter       │
//! │                   ScoreCache, AppConfig      │
//! ├──────────────────────────────────────────────┤
//! │  domain           MatchScorer                │
//! │                   ComplianceMonitor          │
//! │                   calculator::*              │
//! ├──────────────────────────────────────────────┤
//! │  infrastructure   repository ports,          │
//! │                   in-memory adapters         │
//! └──────────────────────────────────────────────┘
//! ```
//!
//! The domain layer is synchronous and deterministic: scoring the same
//! pair twice gives the same result, and every calculator returns a
//! [`DomainResult`](domain::errors::DomainResult) instead of NaN or
//! infinity. Persistence is reached only through the async traits in
//! [`infrastructure::persistence`].
//!
//! # Example
//!
//! ```
//! use venture_match::domain::services::calculator::{calculate_runway, RunwayInputs, MonthlyExpenses};
//! use rust_decimal::Decimal;
//!
//! let inputs = RunwayInputs {
//!     cash_in_bank: Decimal::new(1_000_000, 0),
//!     monthly_revenue: Decimal::ZERO,
//!     monthly_expenses: MonthlyExpenses {
//!         salaries: Decimal::new(100_000, 0),
//!         ..MonthlyExpenses::default()
//!     },
//! };
//! let out = calculate_runway(&inputs).unwrap();
//! assert_eq!(out.runway.months(), Some(Decimal::TEN));
//! ```

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
