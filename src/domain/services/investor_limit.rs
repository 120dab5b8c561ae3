//! # Investor Limit Compliance
//!
//! Section 42 private placements allow at most 200 investors per offer.
//! This module classifies a deal's investor count against that ceiling and
//! summarises compliance across every deal.
//!
//! # Tiers
//!
//! | Status | Utilisation |
//! |--------|-------------|
//! | [`LimitStatus::Available`] | below 70% |
//! | [`LimitStatus::Approaching`] | 70% up to 90% |
//! | [`LimitStatus::NearLimit`] | 90% up to 100% |
//! | [`LimitStatus::LimitReached`] | 100% and above |
//!
//! From 80% up to the ceiling the report also carries a recommendation to
//! prepare a new deal. The report says whether admission should be blocked
//! but never enforces it; the write path owns the atomic increment.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::services::investor_limit::{evaluate, LimitStatus};
//!
//! let report = evaluate(190, 200).unwrap();
//! assert_eq!(report.status, LimitStatus::NearLimit);
//! assert_eq!(report.remaining_slots, 10);
//! assert!(report.recommendation.is_some());
//! ```

use crate::domain::entities::DealListing;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::DealId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum investors per Section 42 offer.
pub const SECTION_42_INVESTOR_LIMIT: u32 = 200;

/// Utilisation tier of a deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LimitStatus {
    /// Plenty of slots left.
    Available,
    /// Filling up.
    Approaching,
    /// Only a few slots left.
    NearLimit,
    /// No slots left.
    LimitReached,
}

impl LimitStatus {
    /// Short label for dashboards.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Approaching => "Getting Full",
            Self::NearLimit => "Near Limit",
            Self::LimitReached => "Limit Reached",
        }
    }

    /// One-sentence explanation of the tier.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Available => "Plenty of slots available for investors.",
            Self::Approaching => {
                "This deal is filling up. Consider creating a new deal if you need more capacity."
            }
            Self::NearLimit => {
                "This deal is approaching the 200-investor limit. Only a few slots remaining."
            }
            Self::LimitReached => {
                "This deal has reached the maximum 200-investor limit as per Section 42 compliance."
            }
        }
    }
}

impl fmt::Display for LimitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Available => write!(f, "available"),
            Self::Approaching => write!(f, "approaching"),
            Self::NearLimit => write!(f, "near_limit"),
            Self::LimitReached => write!(f, "limit_reached"),
        }
    }
}

/// Percentage boundaries for the tiers and the new-deal recommendation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitPolicy {
    /// Start of [`LimitStatus::Approaching`].
    pub approaching_pct: f64,
    /// Start of [`LimitStatus::NearLimit`].
    pub near_limit_pct: f64,
    /// Utilisation from which a new deal is recommended.
    pub recommendation_pct: f64,
}

impl Default for LimitPolicy {
    fn default() -> Self {
        Self {
            approaching_pct: 70.0,
            near_limit_pct: 90.0,
            recommendation_pct: 80.0,
        }
    }
}

impl LimitPolicy {
    /// Checks that `0 < approaching < near_limit < 100` and the
    /// recommendation threshold lies in `(0, 100)`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` describing the violated ordering.
    pub fn validate(&self) -> DomainResult<()> {
        let ordered = 0.0 < self.approaching_pct
            && self.approaching_pct < self.near_limit_pct
            && self.near_limit_pct < 100.0;
        if !ordered {
            return Err(DomainError::invalid_input(
                "compliance",
                format!(
                    "tier boundaries must satisfy 0 < {} < {} < 100",
                    self.approaching_pct, self.near_limit_pct
                ),
            ));
        }
        if !(self.recommendation_pct > 0.0 && self.recommendation_pct < 100.0) {
            return Err(DomainError::invalid_input(
                "compliance.recommendation_pct",
                "must lie strictly between 0 and 100",
            ));
        }
        Ok(())
    }

    /// Classifies an unrounded utilisation percentage.
    #[must_use]
    pub fn classify(&self, percentage: f64) -> LimitStatus {
        if percentage >= 100.0 {
            LimitStatus::LimitReached
        } else if percentage >= self.near_limit_pct {
            LimitStatus::NearLimit
        } else if percentage >= self.approaching_pct {
            LimitStatus::Approaching
        } else {
            LimitStatus::Available
        }
    }

    /// Evaluates a count against a limit under this policy.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if `limit` is zero.
    pub fn evaluate(&self, current_count: u32, limit: u32) -> DomainResult<InvestorLimitReport> {
        if limit == 0 {
            return Err(DomainError::invalid_input(
                "limit",
                "investor limit must be greater than zero",
            ));
        }

        let raw = utilisation(current_count, limit);
        let status = self.classify(raw);
        let recommendation = (raw >= self.recommendation_pct && raw < 100.0).then(|| {
            "Consider preparing for a new fundraising round or deal to accommodate \
             additional investors beyond this limit."
                .to_string()
        });

        Ok(InvestorLimitReport {
            current_count,
            limit,
            remaining_slots: limit.saturating_sub(current_count),
            percentage: round_one_dp(raw.min(100.0)),
            status,
            label: status.label(),
            description: status.description(),
            recommendation,
            admission_blocked: current_count >= limit,
        })
    }
}

fn utilisation(count: u32, limit: u32) -> f64 {
    f64::from(count) * 100.0 / f64::from(limit)
}

fn round_one_dp(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Result of evaluating one deal's investor count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InvestorLimitReport {
    /// Investors admitted so far.
    pub current_count: u32,
    /// Ceiling for the deal.
    pub limit: u32,
    /// `max(limit - count, 0)`.
    pub remaining_slots: u32,
    /// Utilisation rounded to one decimal and capped at 100.
    pub percentage: f64,
    /// Tier.
    pub status: LimitStatus,
    /// Short tier label.
    pub label: &'static str,
    /// Tier explanation.
    pub description: &'static str,
    /// New-deal advice when utilisation is between the recommendation
    /// threshold and the ceiling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommendation: Option<String>,
    /// True when no further investor should be admitted.
    pub admission_blocked: bool,
}

/// Evaluates a count against a limit with the default tier table.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` if `limit` is zero.
pub fn evaluate(current_count: u32, limit: u32) -> DomainResult<InvestorLimitReport> {
    LimitPolicy::default().evaluate(current_count, limit)
}

/// A deal's count and limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorLimitState {
    /// Deal identifier.
    pub deal_id: DealId,
    /// Investors admitted so far.
    pub current_count: u32,
    /// Ceiling for the deal.
    pub limit: u32,
}

impl InvestorLimitState {
    /// Creates a state with the Section 42 ceiling.
    #[must_use]
    pub const fn new(deal_id: DealId, current_count: u32) -> Self {
        Self {
            deal_id,
            current_count,
            limit: SECTION_42_INVESTOR_LIMIT,
        }
    }

    /// Evaluates this state under `policy`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if the limit is zero.
    pub fn report(&self, policy: &LimitPolicy) -> DomainResult<InvestorLimitReport> {
        policy.evaluate(self.current_count, self.limit)
    }
}

impl From<&DealListing> for InvestorLimitState {
    fn from(deal: &DealListing) -> Self {
        Self {
            deal_id: deal.id(),
            current_count: deal.investor_count(),
            limit: deal.investor_limit(),
        }
    }
}

/// Per-deal line of a [`ComplianceSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DealCompliance {
    /// Deal identifier.
    pub deal_id: DealId,
    /// Deal title.
    pub title: String,
    /// Investors admitted so far.
    pub investor_count: u32,
    /// Ceiling for the deal.
    pub investor_limit: u32,
    /// Utilisation rounded to one decimal and capped at 100.
    pub percentage: f64,
    /// Tier.
    pub status: LimitStatus,
}

/// Overall health derived from the compliance score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceRating {
    /// Score 90 and above.
    Excellent,
    /// Score 70 to 89.
    Good,
    /// Score 50 to 69.
    Warning,
    /// Below 50.
    Critical,
}

impl ComplianceRating {
    /// Rates a 0-100 compliance score.
    #[must_use]
    pub const fn from_score(score: u8) -> Self {
        match score {
            90.. => Self::Excellent,
            70..=89 => Self::Good,
            50..=69 => Self::Warning,
            _ => Self::Critical,
        }
    }
}

/// Portfolio-wide view of investor-limit compliance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplianceSummary {
    /// Number of deals examined.
    pub total_deals: usize,
    /// Investors across every deal.
    pub total_investors: u64,
    /// Deals in [`LimitStatus::Available`].
    pub available_deals: usize,
    /// Deals in [`LimitStatus::Approaching`].
    pub approaching_deals: usize,
    /// Deals in [`LimitStatus::NearLimit`].
    pub near_limit_deals: usize,
    /// Deals in [`LimitStatus::LimitReached`].
    pub at_limit_deals: usize,
    /// Mean utilisation, one decimal; zero with no deals.
    pub average_utilisation: f64,
    /// `100 - 5 × (deals past the recommendation threshold) - 20 × (deals
    /// at the limit)`, floored at zero.
    pub compliance_score: u8,
    /// Rating of `compliance_score`.
    pub compliance_rating: ComplianceRating,
    /// Deals, highest utilisation first.
    pub deals: Vec<DealCompliance>,
}

/// Summarises compliance across deals.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ComplianceMonitor {
    policy: LimitPolicy,
}

impl ComplianceMonitor {
    /// Creates a monitor using `policy`.
    #[must_use]
    pub const fn new(policy: LimitPolicy) -> Self {
        Self { policy }
    }

    /// Returns the policy in use.
    #[inline]
    #[must_use]
    pub const fn policy(&self) -> &LimitPolicy {
        &self.policy
    }

    /// Builds a summary over `deals`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if any deal has a zero limit.
    pub fn summarize(&self, deals: &[DealListing]) -> DomainResult<ComplianceSummary> {
        let mut lines = Vec::with_capacity(deals.len());
        let mut total_investors = 0_u64;
        let mut utilisation_sum = 0.0_f64;
        let mut past_recommendation = 0_u32;
        let mut at_limit = 0_u32;

        for deal in deals {
            let report = self
                .policy
                .evaluate(deal.investor_count(), deal.investor_limit())?;
            let raw = utilisation(deal.investor_count(), deal.investor_limit());

            if deal.investor_count() > deal.investor_limit() {
                tracing::warn!(
                    deal_id = %deal.id(),
                    count = deal.investor_count(),
                    limit = deal.investor_limit(),
                    "deal exceeds investor limit"
                );
            }
            if raw >= self.policy.recommendation_pct {
                past_recommendation += 1;
            }
            if report.admission_blocked {
                at_limit += 1;
            }

            total_investors += u64::from(deal.investor_count());
            utilisation_sum += report.percentage;
            lines.push(DealCompliance {
                deal_id: deal.id(),
                title: deal.title().to_string(),
                investor_count: deal.investor_count(),
                investor_limit: deal.investor_limit(),
                percentage: report.percentage,
                status: report.status,
            });
        }

        let count_status = |s: LimitStatus| lines.iter().filter(|l| l.status == s).count();
        let average_utilisation = if lines.is_empty() {
            0.0
        } else {
            round_one_dp(utilisation_sum / lines.len() as f64)
        };
        let penalty = past_recommendation
            .saturating_mul(5)
            .saturating_add(at_limit.saturating_mul(20));
        let compliance_score = u8::try_from(100_u32.saturating_sub(penalty)).unwrap_or(0);

        let mut summary = ComplianceSummary {
            total_deals: lines.len(),
            total_investors,
            available_deals: count_status(LimitStatus::Available),
            approaching_deals: count_status(LimitStatus::Approaching),
            near_limit_deals: count_status(LimitStatus::NearLimit),
            at_limit_deals: count_status(LimitStatus::LimitReached),
            average_utilisation,
            compliance_score,
            compliance_rating: ComplianceRating::from_score(compliance_score),
            deals: Vec::new(),
        };
        lines.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        summary.deals = lines;
        Ok(summary)
    }
}
