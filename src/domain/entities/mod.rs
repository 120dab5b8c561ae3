//! # Domain Entities
//!
//! Profiles and results the matching and compliance engines work on.
//!
//! ## Profiles
//!
//! - [`StartupCandidate`]: Founder profile as seen by the scorer
//! - [`InvestorProfile`]: Investor with optional [`InvestorPreferences`]
//! - [`PreferencesRecord`]: Versioned wire form of investor preferences
//!
//! ## Deals and Results
//!
//! - [`DealListing`]: Deal with its current investor count
//! - [`MatchResult`]: Score, breakdown and reasons for one pair

pub mod deal;
pub mod investor;
pub mod match_result;
pub mod startup;

pub use deal::DealListing;
pub use investor::{
    InvestorPreferences, InvestorProfile, PREFERENCES_SCHEMA_VERSION, PreferencesRecord,
};
pub use match_result::{MatchQuality, MatchResult, ScoreBreakdown};
pub use startup::StartupCandidate;
