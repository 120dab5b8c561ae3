//! # Domain Services
//!
//! Pure business logic that doesn't naturally belong to a single entity
//! or value object.
//!
//! ## Services
//!
//! - [`scoring::MatchScorer`]: Weighted investor-startup compatibility
//! - [`investor_limit::LimitPolicy`]: Section 42 investor-cap classification
//! - [`investor_limit::ComplianceMonitor`]: Portfolio-wide cap summary
//! - [`calculator`]: Runway, unit economics, equity and valuation

pub mod calculator;
pub mod investor_limit;
pub mod scoring;

pub use investor_limit::{
    ComplianceMonitor, ComplianceRating, ComplianceSummary, DealCompliance, InvestorLimitReport,
    InvestorLimitState, LimitPolicy, LimitStatus, SECTION_42_INVESTOR_LIMIT,
};
pub use scoring::{InvestorMatch, InvestorMatches, MatchScorer, MatchWeights};
