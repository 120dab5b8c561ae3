//! # Equity and Dilution
//!
//! ## Co-founder split
//!
//! Each founder earns up to 100 points, 25 per factor:
//!
//! | Factor | Points |
//! |--------|--------|
//! | capital | share of total capital × 25 |
//! | time | commitment% / 100 × 25 |
//! | role | importance / 10 × 25 |
//! | IP | contribution / 10 × 25 |
//!
//! Equity is each founder's share of the total points, rounded to two
//! decimals. Rounding drift is added to the largest share (ties go to the
//! lexicographically smallest name) so the split sums to exactly 100.
//!
//! ## Dilution
//!
//! ```text
//! post-money      = pre-money + investment
//! investor%       = investment / post-money × 100
//! founder% after  = current% × (1 - investor%/100) × (1 - pool%/100)
//! ```
//!
//! Future rounds replay a list of [`RoundAssumption`]s; each dilutes the
//! running ownership by `raise / (valuation + raise)`.

use super::{ensure_non_negative, ensure_within};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{CheckedArithmetic, pct_to_fraction, percent_of};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

const FACTOR_POINTS: Decimal = Decimal::from_parts(25, 0, 0, false, 0);
const TEN: Decimal = Decimal::TEN;

/// A co-founder's contributions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CoFounder {
    /// Display name; also the rounding tie-break key.
    pub name: String,
    /// Capital put into the company.
    #[serde(default)]
    pub capital_invested: Decimal,
    /// Share of full-time, 0-100.
    pub time_commitment: Decimal,
    /// Importance of the role, 0-10.
    pub role_importance: Decimal,
    /// Intellectual property contributed, 0-10.
    pub ip_contribution: Decimal,
}

impl CoFounder {
    fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_input("name", "co-founder name is required"));
        }
        ensure_non_negative("capital_invested", self.capital_invested)?;
        ensure_within(
            "time_commitment",
            self.time_commitment,
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
        )?;
        ensure_within("role_importance", self.role_importance, Decimal::ZERO, TEN)?;
        ensure_within("ip_contribution", self.ip_contribution, Decimal::ZERO, TEN)
    }
}

/// Points per factor for one founder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FounderScoreBreakdown {
    /// Capital points.
    pub capital_score: Decimal,
    /// Time points.
    pub time_score: Decimal,
    /// Role points.
    pub role_score: Decimal,
    /// IP points.
    pub ip_score: Decimal,
}

/// One founder's allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FounderEquity {
    /// Founder name.
    pub name: String,
    /// Allocated equity, percent, two decimals.
    pub equity_percentage: Decimal,
    /// Total points, two decimals.
    pub score: Decimal,
    /// Points per factor, two decimals.
    pub breakdown: FounderScoreBreakdown,
}

/// Result of [`calculate_equity_split`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EquitySplitOutputs {
    /// Founders in input order.
    pub founders: Vec<FounderEquity>,
    /// Sum of every founder's points.
    pub total_score: Decimal,
    /// `"Name: 40.0%, ..."`.
    pub recommendation: String,
    /// How the split was derived.
    pub rationale: String,
}

const RATIONALE: &str = "This split is based on a weighted scoring system:\n\
    - Capital Invested (25%)\n\
    - Time Commitment (25%)\n\
    - Role Importance (25%)\n\
    - IP Contribution (25%)\n\n\
    A transparent, data-driven allocation helps prevent future co-founder disputes.";

/// Index of the share that absorbs rounding drift: largest share, then
/// smallest name, then earliest position.
fn residual_target(founders: &[FounderEquity]) -> Option<usize> {
    founders
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| {
            b.equity_percentage
                .cmp(&a.equity_percentage)
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| ia.cmp(ib))
        })
        .map(|(i, _)| i)
}

/// Splits equity between co-founders by contribution points.
///
/// When every founder scores zero the split is equal.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for an empty list or a founder with
/// out-of-range inputs.
pub fn calculate_equity_split(co_founders: &[CoFounder]) -> DomainResult<EquitySplitOutputs> {
    if co_founders.is_empty() {
        return Err(DomainError::invalid_input(
            "co_founders",
            "add at least one co-founder to calculate an equity split",
        ));
    }
    for founder in co_founders {
        founder.validate()?;
    }

    let total_capital = co_founders
        .iter()
        .try_fold(Decimal::ZERO, |acc, f| acc.safe_add(f.capital_invested))?;

    let mut scored = Vec::with_capacity(co_founders.len());
    for founder in co_founders {
        let capital_score = if total_capital.is_zero() {
            Decimal::ZERO
        } else {
            founder
                .capital_invested
                .safe_div(total_capital)?
                .safe_mul(FACTOR_POINTS)?
        };
        let time_score = pct_to_fraction(founder.time_commitment).safe_mul(FACTOR_POINTS)?;
        let role_score = founder.role_importance.safe_div(TEN)?.safe_mul(FACTOR_POINTS)?;
        let ip_score = founder.ip_contribution.safe_div(TEN)?.safe_mul(FACTOR_POINTS)?;
        let score = capital_score
            .safe_add(time_score)?
            .safe_add(role_score)?
            .safe_add(ip_score)?;
        scored.push((
            founder,
            score,
            FounderScoreBreakdown {
                capital_score: capital_score.round_dp(2),
                time_score: time_score.round_dp(2),
                role_score: role_score.round_dp(2),
                ip_score: ip_score.round_dp(2),
            },
        ));
    }

    let total_score = scored
        .iter()
        .try_fold(Decimal::ZERO, |acc, (_, s, _)| acc.safe_add(*s))?;
    let count = Decimal::from(co_founders.len());

    let mut founders = scored
        .into_iter()
        .map(|(founder, score, breakdown)| {
            let share = if total_score.is_zero() {
                Decimal::ONE_HUNDRED.safe_div(count)?
            } else {
                percent_of(score, total_score)?
            };
            Ok(FounderEquity {
                name: founder.name.clone(),
                equity_percentage: share.round_dp(2),
                score: score.round_dp(2),
                breakdown,
            })
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let allocated = founders
        .iter()
        .try_fold(Decimal::ZERO, |acc, f| acc.safe_add(f.equity_percentage))?;
    let residual = Decimal::ONE_HUNDRED.safe_sub(allocated)?;
    if !residual.is_zero() {
        if let Some(target) = residual_target(&founders).and_then(|i| founders.get_mut(i)) {
            target.equity_percentage = target.equity_percentage.safe_add(residual)?;
        }
    }

    let recommendation = founders
        .iter()
        .map(|f| format!("{}: {:.1}%", f.name, f.equity_percentage.round_dp(1)))
        .collect::<Vec<_>>()
        .join(", ");

    Ok(EquitySplitOutputs {
        founders,
        total_score: total_score.round_dp(2),
        recommendation,
        rationale: RATIONALE.to_string(),
    })
}

/// Raise and valuation multiples for one hypothetical future round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RoundAssumption {
    /// Round name, e.g. `"Series A"`.
    pub name: String,
    /// Raise as a multiple of the current investment.
    pub raise_multiple: Decimal,
    /// Pre-money as a multiple of the previous post-money.
    pub valuation_multiple: Decimal,
}

impl RoundAssumption {
    fn new(name: &str, raise_multiple: Decimal, valuation_multiple: Decimal) -> Self {
        Self {
            name: name.to_string(),
            raise_multiple,
            valuation_multiple,
        }
    }
}

/// Series A ×3/×3, Series B ×4/×3, Series C ×5/×2.5.
#[must_use]
pub fn default_round_assumptions() -> Vec<RoundAssumption> {
    vec![
        RoundAssumption::new("Series A", Decimal::from(3), Decimal::from(3)),
        RoundAssumption::new("Series B", Decimal::from(4), Decimal::from(3)),
        RoundAssumption::new("Series C", Decimal::from(5), Decimal::new(25, 1)),
    ]
}

/// Inputs to [`calculate_dilution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DilutionInputs {
    /// Founder ownership before the round, percent.
    pub current_ownership: Decimal,
    /// Pre-money valuation.
    pub pre_money_valuation: Decimal,
    /// Amount raised this round.
    pub investment_amount: Decimal,
    /// New option pool created in the round, percent.
    #[serde(default)]
    pub option_pool_size: Decimal,
    /// Future rounds to project; defaults to [`default_round_assumptions`].
    #[serde(default = "default_round_assumptions")]
    pub future_rounds: Vec<RoundAssumption>,
}

/// Ownership after one projected future round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FutureRoundProjection {
    /// Round name.
    pub round: String,
    /// Amount assumed raised.
    pub assumed_raise: Decimal,
    /// Pre-money assumed for the round.
    pub assumed_valuation: Decimal,
    /// Founder ownership after the round, percent.
    pub projected_ownership: Decimal,
    /// Ownership lost since before the current round, percentage points.
    pub cumulative_dilution: Decimal,
}

/// Result of [`calculate_dilution`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DilutionOutputs {
    /// Pre-money plus investment.
    pub post_money_valuation: Decimal,
    /// Founder ownership after this round, percent.
    pub new_ownership: Decimal,
    /// Ownership lost this round, percentage points.
    pub dilution_percentage: Decimal,
    /// Option pool created, percent.
    pub option_pool_impact: Decimal,
    /// New investor stake, percent.
    pub investor_ownership: Decimal,
    /// Projections for each assumed future round, in order.
    pub future_rounds: Vec<FutureRoundProjection>,
}

/// Computes dilution from this round and projects future rounds.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for out-of-range percentages,
/// negative amounts or a non-positive valuation multiple, and
/// `DomainError::DivisionByZero` when the post-money valuation is zero.
pub fn calculate_dilution(inputs: &DilutionInputs) -> DomainResult<DilutionOutputs> {
    ensure_within(
        "current_ownership",
        inputs.current_ownership,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
    )?;
    ensure_non_negative("pre_money_valuation", inputs.pre_money_valuation)?;
    ensure_non_negative("investment_amount", inputs.investment_amount)?;
    ensure_within(
        "option_pool_size",
        inputs.option_pool_size,
        Decimal::ZERO,
        Decimal::ONE_HUNDRED,
    )?;
    for round in &inputs.future_rounds {
        ensure_non_negative("future_rounds.raise_multiple", round.raise_multiple)?;
        if round.valuation_multiple <= Decimal::ZERO {
            return Err(DomainError::invalid_input(
                "future_rounds.valuation_multiple",
                format!("must be positive for {}", round.name),
            ));
        }
    }

    let post_money = inputs
        .pre_money_valuation
        .safe_add(inputs.investment_amount)?;
    if post_money.is_zero() {
        return Err(DomainError::division_by_zero(
            "post-money valuation must be non-zero",
        ));
    }
    let investor_ownership = percent_of(inputs.investment_amount, post_money)?;
    let new_ownership = inputs
        .current_ownership
        .safe_mul(Decimal::ONE.safe_sub(pct_to_fraction(investor_ownership))?)?
        .safe_mul(Decimal::ONE.safe_sub(pct_to_fraction(inputs.option_pool_size))?)?;

    let mut ownership = new_ownership;
    let mut valuation = post_money;
    let mut future_rounds = Vec::with_capacity(inputs.future_rounds.len());
    for round in &inputs.future_rounds {
        let raise = inputs.investment_amount.safe_mul(round.raise_multiple)?;
        let pre_money = valuation.safe_mul(round.valuation_multiple)?;
        let round_post = pre_money.safe_add(raise)?;

        // ownership × (1 - raise/post), kept exact as ownership × pre/post
        ownership = ownership.safe_mul(pre_money)?.safe_div(round_post)?;
        valuation = round_post;
        future_rounds.push(FutureRoundProjection {
            round: round.name.clone(),
            assumed_raise: raise,
            assumed_valuation: pre_money,
            projected_ownership: ownership,
            cumulative_dilution: inputs.current_ownership.safe_sub(ownership)?,
        });
    }

    Ok(DilutionOutputs {
        post_money_valuation: post_money,
        new_ownership,
        dilution_percentage: inputs.current_ownership.safe_sub(new_ownership)?,
        option_pool_impact: inputs.option_pool_size,
        investor_ownership,
        future_rounds,
    })
}
