//! # Valuation
//!
//! Two estimates are computed side by side and blended into a range:
//!
//! - **Berkus**: five qualitative factors, each worth up to a stage-dependent
//!   cap (400k at Pre-Seed, 500k otherwise).
//! - **Revenue multiple**: ARR × the midpoint of the industry's multiple
//!   range for the stage, adjusted for growth.
//!
//! The recommended range runs from 80% of the lower estimate to 120% of the
//! higher one, with the midpoint as the target.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::services::calculator::{ValuationInputs, calculate_valuation};
//! use venture_match::domain::value_objects::{FundingStage, Industry};
//! use rust_decimal::Decimal;
//!
//! let out = calculate_valuation(&ValuationInputs {
//!     arr: Decimal::from(1_200_000),
//!     mrr: Decimal::from(100_000),
//!     growth_rate: Decimal::from(60),
//!     industry: Industry::Saas,
//!     funding_stage: FundingStage::Seed,
//! })
//! .unwrap();
//! assert!(out.recommended_range.low <= out.recommended_range.high);
//! ```

use super::ensure_non_negative;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::arithmetic::CheckedArithmetic;
use crate::domain::value_objects::{FundingStage, Industry};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

const BERKUS_EXPLANATION: &str =
    "The Berkus Method evaluates pre-revenue companies across 5 key success factors.";

/// Excellent, good and acceptable thresholds for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BenchmarkTiers {
    /// Excellent threshold.
    pub excellent: Decimal,
    /// Good threshold.
    pub good: Decimal,
    /// Acceptable threshold.
    pub acceptable: Decimal,
}

/// Low and high ARR multiple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MultipleRange {
    /// Low end.
    pub low: Decimal,
    /// High end.
    pub high: Decimal,
}

impl MultipleRange {
    /// Midpoint of the range.
    ///
    /// # Errors
    ///
    /// Returns an arithmetic error on overflow.
    pub fn midpoint(self) -> DomainResult<Decimal> {
        Ok(self.low.safe_add(self.high)?.safe_div(Decimal::TWO)?)
    }
}

/// ARR multiples by stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RevenueMultipleBenchmarks {
    /// Pre-Seed range.
    pub pre_seed: MultipleRange,
    /// Seed range.
    pub seed: MultipleRange,
    /// Series A range, also used for later rounds.
    pub series_a: MultipleRange,
}

impl RevenueMultipleBenchmarks {
    /// Range that applies to a funding stage.
    #[must_use]
    pub const fn for_stage(&self, stage: FundingStage) -> MultipleRange {
        match stage {
            FundingStage::PreSeed => self.pre_seed,
            FundingStage::Seed => self.seed,
            FundingStage::SeriesA | FundingStage::SeriesB | FundingStage::SeriesCPlus => {
                self.series_a
            }
        }
    }
}

/// Reference metrics for one industry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IndustryBenchmarks {
    /// Industry these numbers describe.
    pub industry: Industry,
    /// LTV:CAC ratio tiers.
    pub ltv_cac_ratio: BenchmarkTiers,
    /// Net revenue retention tiers, percent.
    pub nrr: BenchmarkTiers,
    /// ARR multiples by stage.
    pub revenue_multiple: RevenueMultipleBenchmarks,
}

const fn d(n: u32) -> Decimal {
    Decimal::from_parts(n, 0, 0, false, 0)
}

const fn tiers(excellent: u32, good: u32, acceptable: u32) -> BenchmarkTiers {
    BenchmarkTiers {
        excellent: d(excellent),
        good: d(good),
        acceptable: d(acceptable),
    }
}

const fn range(low: u32, high: u32) -> MultipleRange {
    MultipleRange {
        low: d(low),
        high: d(high),
    }
}

const fn multiples(
    pre_seed: (u32, u32),
    seed: (u32, u32),
    series_a: (u32, u32),
) -> RevenueMultipleBenchmarks {
    RevenueMultipleBenchmarks {
        pre_seed: range(pre_seed.0, pre_seed.1),
        seed: range(seed.0, seed.1),
        series_a: range(series_a.0, series_a.1),
    }
}

/// Benchmarks for an industry.
#[must_use]
pub fn industry_benchmarks(industry: Industry) -> IndustryBenchmarks {
    let (ltv_cac_ratio, nrr, revenue_multiple) = match industry {
        Industry::Saas => (tiers(5, 3, 2), tiers(120, 100, 85), multiples((3, 8), (5, 12), (8, 15))),
        Industry::ECommerce => (tiers(4, 3, 2), tiers(110, 95, 80), multiples((2, 5), (3, 7), (4, 10))),
        Industry::B2bServices => {
            (tiers(4, 3, 2), tiers(115, 100, 85), multiples((2, 6), (4, 8), (6, 12)))
        }
        Industry::FinTech => (tiers(5, 3, 2), tiers(125, 105, 90), multiples((4, 10), (6, 15), (10, 20))),
        Industry::HealthTech => {
            (tiers(5, 3, 2), tiers(120, 100, 85), multiples((3, 8), (5, 12), (8, 16)))
        }
        Industry::EdTech => (tiers(4, 3, 2), tiers(115, 100, 85), multiples((3, 7), (4, 10), (6, 14))),
        Industry::Marketplace => {
            (tiers(4, 3, 2), tiers(110, 95, 80), multiples((3, 8), (5, 12), (8, 18)))
        }
        Industry::DeepTech => (tiers(5, 3, 2), tiers(120, 100, 85), multiples((4, 12), (6, 18), (10, 25))),
        Industry::ConsumerApp => (
            BenchmarkTiers {
                excellent: d(3),
                good: d(2),
                acceptable: Decimal::new(15, 1),
            },
            tiers(105, 90, 75),
            multiples((2, 6), (3, 10), (5, 15)),
        ),
        Industry::EnterpriseSoftware => {
            (tiers(6, 4, 3), tiers(125, 110, 95), multiples((4, 10), (6, 15), (10, 20)))
        }
        Industry::Other => (tiers(4, 3, 2), tiers(110, 100, 85), multiples((2, 6), (4, 10), (6, 15))),
    };
    IndustryBenchmarks {
        industry,
        ltv_cac_ratio,
        nrr,
        revenue_multiple,
    }
}

/// Inputs to [`calculate_valuation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ValuationInputs {
    /// Annual recurring revenue.
    pub arr: Decimal,
    /// Monthly recurring revenue.
    pub mrr: Decimal,
    /// Year-over-year growth, percent.
    pub growth_rate: Decimal,
    /// Industry for benchmark lookup.
    pub industry: Industry,
    /// Round being raised.
    pub funding_stage: FundingStage,
}

/// Berkus factor values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BerkusValuation {
    /// Cap per factor.
    pub base_value: Decimal,
    /// Sound idea.
    pub sound_idea: Decimal,
    /// Prototype.
    pub prototype: Decimal,
    /// Quality management team.
    pub quality_team: Decimal,
    /// Strategic relationships.
    pub strategic_relationships: Decimal,
    /// Product rollout.
    pub product_rollout: Decimal,
    /// Sum of the five factors.
    pub total_value: Decimal,
    /// Method summary.
    pub explanation: String,
}

/// ARR multiple estimate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevenueMultipleValuation {
    /// ARR used.
    pub arr: Decimal,
    /// Multiple after growth adjustment.
    pub multiple: Decimal,
    /// ARR × multiple.
    pub valuation: Decimal,
    /// How the multiple was chosen.
    pub multiple_rationale: String,
}

/// Recommended valuation range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ValuationRange {
    /// Lower bound.
    pub low: Decimal,
    /// Target.
    pub mid: Decimal,
    /// Upper bound.
    pub high: Decimal,
}

/// Result of [`calculate_valuation`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValuationOutputs {
    /// Berkus estimate.
    pub berkus_method: BerkusValuation,
    /// Revenue multiple estimate.
    pub revenue_multiple: RevenueMultipleValuation,
    /// Blended range.
    pub recommended_range: ValuationRange,
    /// Investor-facing summary.
    pub narrative: String,
}

fn berkus(inputs: &ValuationInputs) -> DomainResult<BerkusValuation> {
    let cap = if inputs.funding_stage == FundingStage::PreSeed {
        Decimal::from(400_000)
    } else {
        Decimal::from(500_000)
    };
    let share = |pct: i64| cap.safe_mul(Decimal::new(pct, 1));

    let sound_idea = share(8)?;
    let prototype = if inputs.mrr > Decimal::ZERO { cap } else { share(5)? };
    let quality_team = share(7)?;
    let strategic_relationships = if inputs.arr > Decimal::ZERO {
        share(6)?
    } else {
        share(3)?
    };
    let product_rollout = cap.min(inputs.arr.safe_mul(Decimal::new(1, 1))?);
    let total_value = sound_idea
        .safe_add(prototype)?
        .safe_add(quality_team)?
        .safe_add(strategic_relationships)?
        .safe_add(product_rollout)?;

    Ok(BerkusValuation {
        base_value: cap,
        sound_idea,
        prototype,
        quality_team,
        strategic_relationships,
        product_rollout,
        total_value,
        explanation: BERKUS_EXPLANATION.to_string(),
    })
}

fn growth_adjustment(growth_rate: Decimal) -> Decimal {
    if growth_rate > Decimal::ONE_HUNDRED {
        Decimal::new(15, 1)
    } else if growth_rate > Decimal::from(50) {
        Decimal::new(125, 2)
    } else if growth_rate < Decimal::from(20) {
        Decimal::new(8, 1)
    } else {
        Decimal::ONE
    }
}

fn revenue_multiple(inputs: &ValuationInputs) -> DomainResult<RevenueMultipleValuation> {
    let base = industry_benchmarks(inputs.industry)
        .revenue_multiple
        .for_stage(inputs.funding_stage)
        .midpoint()?;
    let adjustment = growth_adjustment(inputs.growth_rate);
    let multiple = base.safe_mul(adjustment)?;
    let valuation = inputs.arr.safe_mul(multiple)?;

    let mut multiple_rationale = format!(
        "Applied {:.1}x ARR multiple based on {} industry benchmarks and {}% growth rate.",
        multiple.round_dp(1),
        inputs.industry,
        inputs.growth_rate.normalize(),
    );
    if adjustment > Decimal::ONE {
        multiple_rationale.push_str(" Premium applied for high growth.");
    } else if adjustment < Decimal::ONE {
        multiple_rationale.push_str(" Discount applied for slower growth.");
    }

    Ok(RevenueMultipleValuation {
        arr: inputs.arr,
        multiple,
        valuation,
        multiple_rationale,
    })
}

/// Whole units with comma thousands separators.
fn grouped(value: Decimal) -> String {
    let whole = value.round_dp(0).normalize().to_string();
    let (sign, digits) = match whole.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", whole.as_str()),
    };
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("{sign}{out}")
}

fn narrative(
    inputs: &ValuationInputs,
    berkus: &BerkusValuation,
    revenue: &RevenueMultipleValuation,
    range: &ValuationRange,
) -> DomainResult<String> {
    let growth = inputs.growth_rate.normalize();
    let mut text = format!(
        "Based on comprehensive analysis, your company's estimated valuation ranges from {} to {}, \
         with a target valuation of {}.\n\n**Valuation Rationale:**\n\n",
        grouped(range.low),
        grouped(range.high),
        grouped(range.mid),
    );

    if inputs.arr.is_zero() || inputs.funding_stage == FundingStage::PreSeed {
        let strength = if berkus.prototype >= berkus.base_value.safe_mul(Decimal::new(8, 1))? {
            "product development"
        } else {
            "team and idea validation"
        };
        let _ = write!(
            text,
            "**Berkus Method ({}):** As a {} company, the Berkus Method evaluates your \
             qualitative factors. Strong scores in {strength} support this valuation.\n\n",
            grouped(berkus.total_value),
            inputs.funding_stage,
        );
    }

    if inputs.arr > Decimal::ZERO {
        let reflects = if inputs.growth_rate > Decimal::ONE_HUNDRED {
            "exceptional hyper-growth that justifies a premium valuation.".to_string()
        } else if inputs.growth_rate > Decimal::from(50) {
            "strong growth that warrants an above-market multiple.".to_string()
        } else {
            format!("steady growth consistent with {} industry standards.", inputs.industry)
        };
        let _ = write!(
            text,
            "**Revenue Multiple ({}):** With {} in ARR and {growth}% annual growth, \
             the {:.1}x multiple reflects {reflects}\n\n",
            grouped(revenue.valuation),
            grouped(inputs.arr),
            revenue.multiple.round_dp(1),
        );
    }

    let _ = write!(text, "**Key Value Drivers:**\n• {} market positioning\n", inputs.industry);
    if inputs.growth_rate > Decimal::from(50) {
        let _ = writeln!(text, "• High-growth trajectory ({growth}% YoY)");
    }
    if inputs.mrr > Decimal::ZERO {
        let _ = writeln!(
            text,
            "• Recurring revenue model ({} ARR)",
            grouped(inputs.mrr.safe_mul(Decimal::from(12))?)
        );
    }
    let _ = write!(
        text,
        "• {} stage with clear path to next milestone\n\n\
         This valuation positions you competitively for fundraising conversations \
         with investors in the {} sector.",
        inputs.funding_stage, inputs.industry,
    );
    Ok(text)
}

/// Computes Berkus and revenue-multiple valuations and a recommended range.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for negative ARR or MRR and an
/// arithmetic error on overflow.
pub fn calculate_valuation(inputs: &ValuationInputs) -> DomainResult<ValuationOutputs> {
    ensure_non_negative("arr", inputs.arr)?;
    ensure_non_negative("mrr", inputs.mrr)?;

    let berkus_method = berkus(inputs)?;
    let revenue_multiple = revenue_multiple(inputs)?;

    let low_factor = Decimal::new(8, 1);
    let high_factor = Decimal::new(12, 1);
    let low = berkus_method
        .total_value
        .safe_mul(low_factor)?
        .min(revenue_multiple.valuation.safe_mul(low_factor)?);
    let high = berkus_method
        .total_value
        .safe_mul(high_factor)?
        .max(revenue_multiple.valuation.safe_mul(high_factor)?);
    let mid = low.safe_add(high)?.safe_div(Decimal::TWO)?;
    let recommended_range = ValuationRange { low, mid, high };

    let narrative = narrative(inputs, &berkus_method, &revenue_multiple, &recommended_range)?;
    tracing::debug!(
        industry = %inputs.industry,
        stage = %inputs.funding_stage,
        low = %low,
        high = %high,
        "valuation computed"
    );

    Ok(ValuationOutputs {
        berkus_method,
        revenue_multiple,
        recommended_range,
        narrative,
    })
}
