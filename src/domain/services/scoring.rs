//! # Match Scoring
//!
//! Deterministic compatibility scoring between a startup and an investor's
//! preferences.
//!
//! Each criterion yields a subscore in `[0, 1]` and, when it counts as a
//! match, a human-readable reason. The total is the weighted mean of the
//! included criteria scaled to 0-100:
//!
//! ```text
//! total = round(100 × Σ(wᵢ × sᵢ) / Σ(wᵢ))
//! ```
//!
//! | Criterion | Weight | Rule |
//! |-----------|--------|------|
//! | sector | 0.35 | exact 1.0, related family 0.6, else 0.2; no preference 0.5 |
//! | stage | 0.25 | exact 1.0, adjacent 0.6, else 0.2; no preference 0.5 |
//! | budget | 0.20 | in range 1.0, typical-check fit 0.8, ≤ 2× max 0.5, else 0.2 |
//! | risk | 0.10 | equal 1.0, adjacent 0.6, else 0.3; unset 0.5 |
//! | location | 0.10 | no preference 1.0, national 0.8, local 0.5 |
//!
//! A startup without a fundraising goal has the budget criterion left out
//! and the remaining weights renormalised, so a missing goal neither helps
//! nor hurts.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::entities::{InvestorPreferences, StartupCandidate};
//! use venture_match::domain::services::scoring::MatchScorer;
//! use venture_match::domain::value_objects::{ApprovalStatus, Sector, Stage, StartupId};
//! use rust_decimal::Decimal;
//!
//! let startup = StartupCandidate::new(StartupId::new_v4(), "PayLoop")
//!     .with_sector(Sector::FinTech)
//!     .with_stage(Stage::Mvp)
//!     .with_fundraising_goal(Decimal::new(5_000_000, 0))
//!     .with_approval_status(ApprovalStatus::Approved);
//!
//! let prefs = InvestorPreferences::new()
//!     .with_sectors([Sector::FinTech])
//!     .with_stages([Stage::Mvp])
//!     .with_investment_range(Some(Decimal::new(1_000_000, 0)), Some(Decimal::new(10_000_000, 0)))
//!     .unwrap();
//!
//! let result = MatchScorer::default().score(&startup, &prefs).unwrap();
//! assert!(result.total_score >= 80);
//! ```

use crate::domain::entities::{
    InvestorPreferences, InvestorProfile, MatchResult, ScoreBreakdown, StartupCandidate,
};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::amount::format_inr;
use crate::domain::value_objects::{GeographicPreference, InvestorId, Sector, Stage};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Relative importance of each criterion.
///
/// Weights need not sum to one; the total is normalised by the sum of the
/// weights that were actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchWeights {
    /// Sector weight.
    pub sector: f64,
    /// Stage weight.
    pub stage: f64,
    /// Budget weight.
    pub budget: f64,
    /// Risk appetite weight.
    pub risk: f64,
    /// Location weight.
    pub location: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            sector: 0.35,
            stage: 0.25,
            budget: 0.20,
            risk: 0.10,
            location: 0.10,
        }
    }
}

impl MatchWeights {
    /// Checks that every weight is finite and strictly positive.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` naming the first bad weight.
    pub fn validate(&self) -> DomainResult<()> {
        for (field, w) in [
            ("weights.sector", self.sector),
            ("weights.stage", self.stage),
            ("weights.budget", self.budget),
            ("weights.risk", self.risk),
            ("weights.location", self.location),
        ] {
            if !w.is_finite() || w <= 0.0 {
                return Err(DomainError::invalid_input(
                    field,
                    format!("must be a positive number, got {w}"),
                ));
            }
        }
        Ok(())
    }
}

/// One criterion's subscore and optional reason.
#[derive(Debug, Clone, PartialEq)]
struct Criterion {
    score: f64,
    reason: Option<String>,
}

impl Criterion {
    fn neutral(score: f64) -> Self {
        Self {
            score,
            reason: None,
        }
    }

    fn matched(score: f64, reason: impl Into<String>) -> Self {
        Self {
            score,
            reason: Some(reason.into()),
        }
    }
}

fn sector_criterion(sector: Sector, preferred: &std::collections::BTreeSet<Sector>) -> Criterion {
    if preferred.is_empty() {
        return Criterion::neutral(0.5);
    }
    if preferred.contains(&sector) {
        return Criterion::matched(1.0, format!("Matches your preferred sector: {sector}"));
    }
    if preferred.iter().any(|p| p.is_related_to(sector)) {
        return Criterion::matched(0.6, "Related to your preferred sectors");
    }
    Criterion::neutral(0.2)
}

fn stage_criterion(stage: Stage, preferred: &std::collections::BTreeSet<Stage>) -> Criterion {
    if preferred.is_empty() {
        return Criterion::neutral(0.5);
    }
    if preferred.contains(&stage) {
        return Criterion::matched(1.0, format!("At your preferred stage: {stage}"));
    }
    if preferred.iter().any(|p| p.is_adjacent_to(stage)) {
        return Criterion::matched(0.6, "Close to your preferred stage");
    }
    Criterion::neutral(0.2)
}

/// Scores the budget criterion for a known fundraising goal.
///
/// Missing bounds are open-ended: an investor with only a maximum accepts
/// any goal up to it.
fn budget_criterion(goal: Decimal, prefs: &InvestorPreferences) -> Criterion {
    let min = prefs.min_investment_amount();
    let max = prefs.max_investment_amount();
    if min.is_none() && max.is_none() {
        return Criterion::neutral(0.5);
    }

    let above_min = min.is_none_or(|lo| goal >= lo);
    let below_max = max.is_none_or(|hi| goal <= hi);
    if above_min && below_max {
        return Criterion::matched(
            1.0,
            format!(
                "Fundraising goal ({}) matches your investment range",
                format_inr(goal)
            ),
        );
    }

    if let Some(typical) = prefs.typical_check_size().filter(|t| !t.is_zero()) {
        let lower = typical.checked_mul(Decimal::TWO);
        let upper = typical.checked_mul(Decimal::from(20));
        if let (Some(lower), Some(upper)) = (lower, upper) {
            if goal >= lower && goal <= upper {
                return Criterion::matched(0.8, "Your typical check size fits this deal");
            }
        }
    }

    if let Some(hi) = max {
        if hi.checked_mul(Decimal::TWO).is_none_or(|cap| goal <= cap) {
            return Criterion::matched(0.5, "Within your investment capacity");
        }
    }

    Criterion::neutral(0.2)
}

fn risk_criterion(stage: Stage, prefs: &InvestorPreferences) -> Criterion {
    let Some(appetite) = prefs.risk_appetite() else {
        return Criterion::neutral(0.5);
    };
    let startup_risk = stage.risk_level();
    if startup_risk == appetite {
        Criterion::matched(1.0, "Risk level matches your appetite")
    } else if startup_risk.is_adjacent_to(appetite) {
        Criterion::matched(0.6, "Risk level is acceptable")
    } else {
        Criterion::neutral(0.3)
    }
}

fn location_criterion(prefs: &InvestorPreferences) -> Criterion {
    match prefs.geographic_preference() {
        GeographicPreference::NoPreference => Criterion::neutral(1.0),
        GeographicPreference::National => Criterion::matched(0.8, "Located in India"),
        GeographicPreference::Local => Criterion::neutral(0.5),
    }
}

/// Converts a `[0, 1]` subscore to a 0-100 integer.
fn to_percent(score: f64) -> u8 {
    (score * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Pure scorer for startup/investor pairs.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    /// Creates a scorer with the given weights.
    #[must_use]
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    /// Returns the weights in use.
    #[inline]
    #[must_use]
    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Scores one startup against one set of preferences.
    ///
    /// Approval status is not checked here; callers building candidate sets
    /// filter on [`StartupCandidate::is_matchable`].
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteProfile` if the startup has no
    /// sector or no stage.
    pub fn score(
        &self,
        startup: &StartupCandidate,
        prefs: &InvestorPreferences,
    ) -> DomainResult<MatchResult> {
        let (Some(sector), Some(stage)) = (startup.sector(), startup.stage()) else {
            return Err(DomainError::IncompleteProfile(startup.id()));
        };

        let sector_c = sector_criterion(sector, prefs.preferred_sectors());
        let stage_c = stage_criterion(stage, prefs.preferred_stages());
        let budget_c = startup
            .fundraising_goal()
            .map(|goal| budget_criterion(goal, prefs));
        let risk_c = risk_criterion(stage, prefs);
        let location_c = location_criterion(prefs);

        let w = &self.weights;
        let mut weighted = [
            (w.sector, &sector_c),
            (w.stage, &stage_c),
            (w.risk, &risk_c),
            (w.location, &location_c),
        ]
        .iter()
        .fold((0.0_f64, 0.0_f64), |(num, den), (wi, c)| {
            (num + wi * c.score, den + wi)
        });
        if let Some(b) = &budget_c {
            weighted.0 += w.budget * b.score;
            weighted.1 += w.budget;
        }
        let (numerator, denominator) = weighted;
        let total = if denominator > 0.0 {
            to_percent(numerator / denominator)
        } else {
            0
        };

        let match_reasons = [
            Some(&sector_c),
            Some(&stage_c),
            budget_c.as_ref(),
            Some(&risk_c),
            Some(&location_c),
        ]
        .into_iter()
        .flatten()
        .filter_map(|c| c.reason.clone())
        .collect();

        Ok(MatchResult {
            startup_id: startup.id(),
            startup_name: startup.name().to_string(),
            investor_id: None,
            total_score: total,
            breakdown: ScoreBreakdown {
                sector: to_percent(sector_c.score),
                stage: to_percent(stage_c.score),
                budget: budget_c.as_ref().map(|c| to_percent(c.score)),
                risk: to_percent(risk_c.score),
                location: to_percent(location_c.score),
            },
            match_reasons,
        })
    }

    /// Scores every matchable startup for one investor.
    ///
    /// Unapproved and incomplete startups are skipped. The result is sorted
    /// by total score descending; ties keep input order.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingPreferences` if `prefs` is `None`.
    pub fn match_startups_for_investor(
        &self,
        investor_id: InvestorId,
        startups: &[StartupCandidate],
        prefs: Option<&InvestorPreferences>,
    ) -> DomainResult<Vec<MatchResult>> {
        let prefs = prefs.ok_or(DomainError::MissingPreferences(investor_id))?;

        let mut results = Vec::with_capacity(startups.len());
        for startup in startups {
            if !startup.is_matchable() {
                tracing::debug!(
                    startup_id = %startup.id(),
                    approval = %startup.approval_status(),
                    complete = startup.is_complete(),
                    "skipping startup not eligible for matching"
                );
                continue;
            }
            results.push(self.score(startup, prefs)?.for_investor(investor_id));
        }

        results.sort_by(|a, b| b.total_score.cmp(&a.total_score));
        Ok(results)
    }

    /// Scores one startup against every investor that has preferences.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteProfile` if the startup has no
    /// sector or no stage.
    pub fn match_investors_for_startup(
        &self,
        startup: &StartupCandidate,
        investors: &[InvestorProfile],
    ) -> DomainResult<InvestorMatches> {
        if !startup.is_complete() {
            return Err(DomainError::IncompleteProfile(startup.id()));
        }

        let mut matches = Vec::with_capacity(investors.len());
        let mut skipped_without_preferences = 0;
        for investor in investors {
            let Some(prefs) = investor.preferences() else {
                skipped_without_preferences += 1;
                tracing::debug!(
                    investor_id = %investor.id(),
                    "skipping investor without preferences"
                );
                continue;
            };
            matches.push(InvestorMatch {
                investor_id: investor.id(),
                investor_name: investor.display_name().to_string(),
                investor_type: investor.investor_type().to_string(),
                result: self.score(startup, prefs)?,
            });
        }

        matches.sort_by(|a, b| b.result.total_score.cmp(&a.result.total_score));
        Ok(InvestorMatches {
            matches,
            skipped_without_preferences,
        })
    }
}

/// One investor scored against a startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvestorMatch {
    /// Investor identifier.
    pub investor_id: InvestorId,
    /// Investor display name.
    pub investor_name: String,
    /// Investor type.
    pub investor_type: String,
    /// Score against the startup; its `investor_id` is left unset.
    #[serde(flatten)]
    pub result: MatchResult,
}

impl InvestorMatch {
    /// Returns the total score.
    #[inline]
    #[must_use]
    pub fn total_score(&self) -> u8 {
        self.result.total_score
    }
}

/// Output of [`MatchScorer::match_investors_for_startup`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InvestorMatches {
    /// Scored investors, best first.
    pub matches: Vec<InvestorMatch>,
    /// Investors left out because they have no preferences.
    pub skipped_without_preferences: usize,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{ApprovalStatus, RiskAppetite, StartupId};

    fn rupees(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn startup(sector: Sector, stage: Stage, goal: Option<i64>) -> StartupCandidate {
        let s = StartupCandidate::new(StartupId::new_v4(), "Acme")
            .with_sector(sector)
            .with_stage(stage)
            .with_approval_status(ApprovalStatus::Approved);
        match goal {
            Some(g) => s.with_fundraising_goal(rupees(g)),
            None => s,
        }
    }

    fn fintech_mvp_prefs() -> InvestorPreferences {
        InvestorPreferences::new()
            .with_sectors([Sector::FinTech])
            .with_stages([Stage::Mvp])
            .with_investment_range(Some(rupees(1_000_000)), Some(rupees(10_000_000)))
            .unwrap()
    }

    mod criteria {
        use super::*;
        use std::collections::BTreeSet;

        #[test]
        fn sector_rules() {
            let empty = BTreeSet::new();
            assert_eq!(sector_criterion(Sector::Saas, &empty).score, 0.5);

            let tech: BTreeSet<_> = [Sector::Saas].into_iter().collect();
            assert_eq!(sector_criterion(Sector::Saas, &tech).score, 1.0);
            assert_eq!(sector_criterion(Sector::AiMl, &tech).score, 0.6);
            assert_eq!(sector_criterion(Sector::Healthcare, &tech).score, 0.2);
        }

        #[test]
        fn stage_rules() {
            let prefs: BTreeSet<_> = [Stage::Mvp].into_iter().collect();
            assert_eq!(stage_criterion(Stage::Mvp, &prefs).score, 1.0);
            assert_eq!(stage_criterion(Stage::Idea, &prefs).score, 0.6);
            assert_eq!(stage_criterion(Stage::Growth, &prefs).score, 0.2);
            assert_eq!(stage_criterion(Stage::Growth, &BTreeSet::new()).score, 0.5);
        }

        #[test]
        fn budget_rules() {
            let prefs = fintech_mvp_prefs().with_typical_check_size(rupees(2_000_000));
            assert_eq!(budget_criterion(rupees(5_000_000), &prefs).score, 1.0);
            // above max, within 2x..20x of typical check
            assert_eq!(budget_criterion(rupees(15_000_000), &prefs).score, 0.8);
            // above 20x typical but within 2x max
            let no_typical = fintech_mvp_prefs();
            assert_eq!(budget_criterion(rupees(15_000_000), &no_typical).score, 0.5);
            assert_eq!(budget_criterion(rupees(50_000_000), &no_typical).score, 0.2);
        }

        #[test]
        fn budget_without_bounds_is_neutral() {
            let prefs = InvestorPreferences::new();
            assert_eq!(budget_criterion(rupees(5_000_000), &prefs).score, 0.5);
        }

        #[test]
        fn budget_reason_uses_shorthand() {
            let c = budget_criterion(rupees(5_000_000), &fintech_mvp_prefs());
            assert_eq!(
                c.reason.as_deref(),
                Some("Fundraising goal (₹50L) matches your investment range")
            );
        }

        #[test]
        fn risk_rules() {
            let prefs = InvestorPreferences::new().with_risk_appetite(RiskAppetite::Aggressive);
            assert_eq!(risk_criterion(Stage::Idea, &prefs).score, 1.0);
            assert_eq!(risk_criterion(Stage::Mvp, &prefs).score, 0.6);
            assert_eq!(risk_criterion(Stage::Growth, &prefs).score, 0.3);
            assert_eq!(risk_criterion(Stage::Growth, &InvestorPreferences::new()).score, 0.5);
        }

        #[test]
        fn location_rules() {
            let national =
                InvestorPreferences::new().with_geographic_preference(GeographicPreference::National);
            let c = location_criterion(&national);
            assert_eq!(c.score, 0.8);
            assert_eq!(c.reason.as_deref(), Some("Located in India"));
            assert_eq!(location_criterion(&InvestorPreferences::new()).score, 1.0);
        }
    }

    mod totals {
        use super::*;

        #[test]
        fn strong_fintech_match_scores_high() {
            let result = MatchScorer::default()
                .score(
                    &startup(Sector::FinTech, Stage::Mvp, Some(5_000_000)),
                    &fintech_mvp_prefs(),
                )
                .unwrap();
            // 0.35 + 0.25 + 0.20 + 0.10 × 0.5 + 0.10 × 1.0
            assert_eq!(result.total_score, 95);
            assert_eq!(result.breakdown.budget, Some(100));
            assert_eq!(result.match_reasons.len(), 3);
            assert!(result.match_reasons[0].contains("FinTech"));
        }

        #[test]
        fn missing_goal_renormalises() {
            let result = MatchScorer::default()
                .score(&startup(Sector::FinTech, Stage::Idea, None), &fintech_mvp_prefs())
                .unwrap();
            assert_eq!(result.breakdown.budget, None);
            // (0.35×1.0 + 0.25×0.6 + 0.10×0.5 + 0.10×1.0) / 0.80 = 0.8125
            assert_eq!(result.total_score, 81);
        }

        #[test]
        fn empty_preferences_are_neutral() {
            let result = MatchScorer::default()
                .score(&startup(Sector::EdTech, Stage::Growth, Some(1)), &InvestorPreferences::new())
                .unwrap();
            // 0.35×0.5 + 0.25×0.5 + 0.20×0.5 + 0.10×0.5 + 0.10×1.0 = 0.55
            assert_eq!(result.total_score, 55);
            assert!(result.match_reasons.is_empty());
        }

        #[test]
        fn incomplete_startup_is_rejected() {
            let s = StartupCandidate::new(StartupId::new_v4(), "NoStage").with_sector(Sector::Saas);
            let err = MatchScorer::default()
                .score(&s, &InvestorPreferences::new())
                .unwrap_err();
            assert_eq!(err, DomainError::IncompleteProfile(s.id()));
        }

        #[test]
        fn scoring_is_deterministic() {
            let s = startup(Sector::AiMl, Stage::EarlyRevenue, Some(30_000_000));
            let p = fintech_mvp_prefs().with_risk_appetite(RiskAppetite::Moderate);
            let scorer = MatchScorer::default();
            let a = scorer.score(&s, &p).unwrap();
            let b = scorer.score(&s, &p).unwrap();
            assert_eq!(a, b);
        }

        #[test]
        fn invalid_weights_rejected() {
            let weights = MatchWeights {
                risk: 0.0,
                ..MatchWeights::default()
            };
            assert!(weights.validate().is_err());
            assert!(MatchWeights::default().validate().is_ok());
        }
    }

    mod batch {
        use super::*;

        #[test]
        fn missing_preferences_short_circuits() {
            let investor = InvestorId::new_v4();
            let err = MatchScorer::default()
                .match_startups_for_investor(investor, &[], None)
                .unwrap_err();
            assert_eq!(err, DomainError::MissingPreferences(investor));
        }

        #[test]
        fn skips_unapproved_and_incomplete() {
            let approved = startup(Sector::FinTech, Stage::Mvp, Some(5_000_000));
            let pending = StartupCandidate::new(StartupId::new_v4(), "Pending")
                .with_sector(Sector::FinTech)
                .with_stage(Stage::Mvp);
            let incomplete = StartupCandidate::new(StartupId::new_v4(), "Half")
                .with_sector(Sector::FinTech)
                .with_approval_status(ApprovalStatus::Approved);
            let prefs = fintech_mvp_prefs();

            let results = MatchScorer::default()
                .match_startups_for_investor(
                    InvestorId::new_v4(),
                    &[pending, approved.clone(), incomplete],
                    Some(&prefs),
                )
                .unwrap();
            assert_eq!(results.len(), 1);
            assert_eq!(results[0].startup_id, approved.id());
        }

        #[test]
        fn results_sorted_descending() {
            let prefs = fintech_mvp_prefs();
            let weak = startup(Sector::Healthcare, Stage::Growth, Some(90_000_000));
            let strong = startup(Sector::FinTech, Stage::Mvp, Some(5_000_000));
            let results = MatchScorer::default()
                .match_startups_for_investor(InvestorId::new_v4(), &[weak, strong], Some(&prefs))
                .unwrap();
            assert!(results[0].total_score >= results[1].total_score);
        }

        #[test]
        fn investors_without_preferences_are_counted() {
            let s = startup(Sector::FinTech, Stage::Mvp, Some(5_000_000));
            let with_prefs = InvestorProfile::new(InvestorId::new_v4(), "A", "angel")
                .with_preferences(fintech_mvp_prefs());
            let without = InvestorProfile::new(InvestorId::new_v4(), "B", "vc");

            let out = MatchScorer::default()
                .match_investors_for_startup(&s, &[with_prefs.clone(), without])
                .unwrap();
            assert_eq!(out.skipped_without_preferences, 1);
            assert_eq!(out.matches.len(), 1);
            assert_eq!(out.matches[0].investor_id, with_prefs.id());
            assert_eq!(out.matches[0].total_score(), 95);
        }
    }
}
