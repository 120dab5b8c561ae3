//! # Recommendation Filter
//!
//! Threshold, order and truncate scored candidates.
//!
//! The three steps always run in that order: entries below the threshold
//! are dropped, the rest are stable-sorted by score (highest first, equal
//! scores keep their input order), and only then is the list cut to the
//! limit. Counting happens before truncation so callers can report how many
//! candidates qualified in total.

use crate::domain::entities::MatchResult;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::services::InvestorMatch;
use serde::{Deserialize, Serialize};

/// Anything carrying a 0-100 compatibility score.
pub trait Scored {
    /// Returns the score.
    fn score(&self) -> u8;
}

impl Scored for MatchResult {
    fn score(&self) -> u8 {
        self.total_score
    }
}

impl Scored for InvestorMatch {
    fn score(&self) -> u8 {
        self.total_score()
    }
}

/// Keeps matches scoring at least `threshold`, best first.
///
/// Equal scores keep their relative input order.
#[must_use]
pub fn get_recommended_startups(matches: &[MatchResult], threshold: u8) -> Vec<MatchResult> {
    let mut kept: Vec<MatchResult> = matches
        .iter()
        .filter(|m| m.total_score >= threshold)
        .cloned()
        .collect();
    kept.sort_by(|a, b| b.total_score.cmp(&a.total_score));
    kept
}

/// Output of [`RecommendationFilter::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recommendations<T> {
    /// Candidates at or above the threshold, before truncation.
    pub qualified: usize,
    /// At most `limit` candidates, best first.
    pub items: Vec<T>,
}

/// Threshold and page size for one recommendation surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationFilter {
    /// Minimum score to be included.
    pub threshold: u8,
    /// Maximum entries returned.
    pub limit: usize,
}

impl RecommendationFilter {
    /// Creates a filter.
    #[must_use]
    pub const fn new(threshold: u8, limit: usize) -> Self {
        Self { threshold, limit }
    }

    /// Checks that the threshold is a valid score and the limit is non-zero.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` naming `field` on violation.
    pub fn validate(&self, field: &'static str) -> DomainResult<()> {
        if self.threshold > 100 {
            return Err(DomainError::invalid_input(
                field,
                format!("threshold must be at most 100, got {}", self.threshold),
            ));
        }
        if self.limit == 0 {
            return Err(DomainError::invalid_input(field, "limit must be at least 1"));
        }
        Ok(())
    }

    /// Filters, stable-sorts and truncates `items`.
    #[must_use]
    pub fn apply<T: Scored>(&self, items: Vec<T>) -> Recommendations<T> {
        let mut kept: Vec<T> = items
            .into_iter()
            .filter(|item| item.score() >= self.threshold)
            .collect();
        kept.sort_by(|a, b| b.score().cmp(&a.score()));
        let qualified = kept.len();
        kept.truncate(self.limit);
        Recommendations {
            qualified,
            items: kept,
        }
    }
}
