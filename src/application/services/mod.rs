//! # Application Services
//!
//! Services that orchestrate domain logic and infrastructure.
//!
//! - [`MatchingService`]: Scores stored profiles and applies the matching policy
//! - [`ComplianceService`]: Investor-limit reports for stored deals
//! - [`RecommendationFilter`]: Threshold, stable sort and truncation
//! - [`ScoreCache`]: Memo of match results per startup/investor pair

pub mod compliance;
pub mod matching;
pub mod recommendation;
pub mod score_cache;

pub use compliance::ComplianceService;
pub use matching::{
    MatchingService, StartupInvestorMatches, StartupRecommendations, StartupSummary,
};
pub use recommendation::{Recommendations, RecommendationFilter, Scored, get_recommended_startups};
pub use score_cache::{CacheStats, ScoreCache};
