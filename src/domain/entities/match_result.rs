//! # Match Result
//!
//! Output of the scoring engine for one startup/investor pair.
//!
//! Results are recomputed on demand and never persisted. The total score and
//! every subscore are integers on a 0-100 scale.

use crate::domain::value_objects::{InvestorId, StartupId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Per-criterion subscores, each 0-100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// Sector fit.
    pub sector: u8,
    /// Stage fit.
    pub stage: u8,
    /// Budget fit; `None` when the startup has no fundraising goal and the
    /// criterion was left out of the total.
    pub budget: Option<u8>,
    /// Risk appetite fit.
    pub risk: u8,
    /// Location fit.
    pub location: u8,
}

/// Coarse label for a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchQuality {
    /// Below 40.
    Poor,
    /// 40 to 59.
    Fair,
    /// 60 to 79.
    Good,
    /// 80 and above.
    Excellent,
}

impl MatchQuality {
    /// Classifies a total score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

impl fmt::Display for MatchQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Poor => write!(f, "poor"),
            Self::Fair => write!(f, "fair"),
            Self::Good => write!(f, "good"),
            Self::Excellent => write!(f, "excellent"),
        }
    }
}

/// Compatibility between one startup and one investor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Startup being scored.
    pub startup_id: StartupId,
    /// Startup display name.
    pub startup_name: String,
    /// Investor whose preferences were used, when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub investor_id: Option<InvestorId>,
    /// Weighted total, 0-100.
    pub total_score: u8,
    /// Per-criterion subscores.
    pub breakdown: ScoreBreakdown,
    /// Human-readable reasons, in criterion order.
    pub match_reasons: Vec<String>,
}

impl MatchResult {
    /// Returns the quality category for the total score.
    #[must_use]
    pub const fn quality(&self) -> MatchQuality {
        MatchQuality::from_score(self.total_score)
    }

    /// Attaches the investor the result was computed for.
    #[must_use]
    pub fn for_investor(mut self, investor_id: InvestorId) -> Self {
        self.investor_id = Some(investor_id);
        self
    }
}
