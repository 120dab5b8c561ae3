//! # Unit Economics
//!
//! ```text
//! LTV   = ARPU × gross margin% × average lifespan (months)
//! CAC   = sales & marketing spend / new customers
//! ratio = LTV / CAC
//! NRR   = end MRR / start MRR × 100
//! GRR   = (start MRR - contraction - churn) / start MRR × 100
//! ```
//!
//! Zero customers or zero CAC are errors, not a zero ratio.

use super::{ensure_change_above_minus_100, ensure_non_negative, ensure_within};
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{
    CheckedArithmetic, apply_pct_change, pct_to_fraction, percent_of,
};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Inputs to [`calculate_ltv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct LtvInputs {
    /// Average monthly revenue per customer.
    pub arpu: Decimal,
    /// Gross margin, 0-100.
    pub gross_margin: Decimal,
    /// Average customer lifetime in months.
    pub avg_customer_lifespan: Decimal,
}

impl LtvInputs {
    fn validate(&self) -> DomainResult<()> {
        ensure_non_negative("arpu", self.arpu)?;
        ensure_within(
            "gross_margin",
            self.gross_margin,
            Decimal::ZERO,
            Decimal::ONE_HUNDRED,
        )?;
        ensure_non_negative("avg_customer_lifespan", self.avg_customer_lifespan)
    }
}

/// Inputs to [`calculate_cac`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CacInputs {
    /// Total sales and marketing spend for the period.
    pub total_sales_marketing_spend: Decimal,
    /// Customers won in the same period.
    pub new_customers_acquired: u32,
}

/// Strength of the LTV:CAC ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LtvCacRating {
    /// 3 or above.
    Strong,
    /// 2 up to 3.
    Good,
    /// 1 up to 2.
    NeedsImprovement,
    /// Below 1.
    Critical,
}

impl LtvCacRating {
    /// Rates a ratio.
    #[must_use]
    pub fn from_ratio(ratio: Decimal) -> Self {
        if ratio >= Decimal::from(3) {
            Self::Strong
        } else if ratio >= Decimal::TWO {
            Self::Good
        } else if ratio >= Decimal::ONE {
            Self::NeedsImprovement
        } else {
            Self::Critical
        }
    }

    /// Advice for this rating.
    #[must_use]
    pub const fn recommendation(self) -> &'static str {
        match self {
            Self::Strong => {
                "Excellent! Your unit economics are strong. You have a scalable business model."
            }
            Self::Good => {
                "Good ratio. Focus on improving either LTV (reduce churn, increase ARPU) or reducing CAC."
            }
            Self::NeedsImprovement => {
                "Your CAC is too high relative to LTV. Optimize marketing efficiency or increase customer lifetime value."
            }
            Self::Critical => {
                "Critical: you are spending more to acquire customers than they generate in value. Immediate action required."
            }
        }
    }
}

/// Result of [`calculate_ltv_cac`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LtvCacOutputs {
    /// Customer lifetime value.
    pub ltv: Decimal,
    /// Customer acquisition cost.
    pub cac: Decimal,
    /// LTV / CAC, two decimals.
    pub ratio: Decimal,
    /// Rating of the unrounded ratio.
    pub rating: LtvCacRating,
    /// Advice for the rating.
    pub recommendation: String,
}

/// Computes customer lifetime value.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for negative inputs or a margin
/// above 100.
pub fn calculate_ltv(inputs: &LtvInputs) -> DomainResult<Decimal> {
    inputs.validate()?;
    Ok(inputs
        .arpu
        .safe_mul(pct_to_fraction(inputs.gross_margin))?
        .safe_mul(inputs.avg_customer_lifespan)?)
}

/// Computes customer acquisition cost.
///
/// # Errors
///
/// Returns `DomainError::DivisionByZero` when no customers were acquired
/// and `DomainError::InvalidInput` for negative spend.
pub fn calculate_cac(inputs: &CacInputs) -> DomainResult<Decimal> {
    ensure_non_negative(
        "total_sales_marketing_spend",
        inputs.total_sales_marketing_spend,
    )?;
    if inputs.new_customers_acquired == 0 {
        return Err(DomainError::division_by_zero(
            "CAC requires at least one new customer",
        ));
    }
    Ok(inputs
        .total_sales_marketing_spend
        .safe_div(Decimal::from(inputs.new_customers_acquired))?)
}

/// Computes LTV, CAC, their ratio and a rating.
///
/// # Errors
///
/// Returns `DomainError::DivisionByZero` when CAC is zero or no customers
/// were acquired.
pub fn calculate_ltv_cac(ltv_inputs: &LtvInputs, cac_inputs: &CacInputs) -> DomainResult<LtvCacOutputs> {
    let ltv = calculate_ltv(ltv_inputs)?;
    let cac = calculate_cac(cac_inputs)?;
    if cac.is_zero() {
        return Err(DomainError::division_by_zero(
            "LTV:CAC ratio requires a non-zero acquisition cost",
        ));
    }
    let ratio = ltv.safe_div(cac)?;
    let rating = LtvCacRating::from_ratio(ratio);
    Ok(LtvCacOutputs {
        ltv: ltv.round_dp(2),
        cac: cac.round_dp(2),
        ratio: ratio.round_dp(2),
        rating,
        recommendation: rating.recommendation().to_string(),
    })
}

/// Default CAC changes (%) for the sensitivity matrix columns.
#[must_use]
pub fn default_cac_changes() -> Vec<Decimal> {
    [-20, -10, 0, 10, 20].into_iter().map(Decimal::from).collect()
}

/// Default churn changes (%) for the sensitivity matrix rows.
#[must_use]
pub fn default_churn_changes() -> Vec<Decimal> {
    vec![
        Decimal::from(-5),
        Decimal::new(-25, 1),
        Decimal::ZERO,
        Decimal::new(25, 1),
        Decimal::from(5),
    ]
}

/// One cell of the sensitivity matrix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitivityCell {
    /// CAC change applied, in percent.
    pub cac_change: Decimal,
    /// Churn change applied, in percent.
    pub churn_change: Decimal,
    /// Resulting LTV.
    pub ltv: Decimal,
    /// Resulting CAC.
    pub cac: Decimal,
    /// Resulting ratio.
    pub ratio: Decimal,
    /// Rating of the ratio.
    pub rating: LtvCacRating,
}

/// LTV:CAC across a grid of CAC and churn changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitivityMatrix {
    /// Column axis.
    pub cac_changes: Vec<Decimal>,
    /// Row axis.
    pub churn_changes: Vec<Decimal>,
    /// `results[row][col]` for `churn_changes[row]`, `cac_changes[col]`.
    pub results: Vec<Vec<SensitivityCell>>,
}

/// Recomputes LTV:CAC for every combination of CAC and churn change.
///
/// A churn increase of `c`% shortens lifespan to `lifespan / (1 + c/100)`;
/// a CAC change of `k`% scales spend by `1 + k/100`.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for empty axes or any change at or
/// below -100%, and whatever [`calculate_ltv_cac`] returns for a cell.
pub fn generate_sensitivity_matrix(
    ltv_inputs: &LtvInputs,
    cac_inputs: &CacInputs,
    cac_changes: &[Decimal],
    churn_changes: &[Decimal],
) -> DomainResult<SensitivityMatrix> {
    if cac_changes.is_empty() || churn_changes.is_empty() {
        return Err(DomainError::invalid_input(
            "sensitivity",
            "both change axes need at least one value",
        ));
    }
    for &c in cac_changes {
        ensure_change_above_minus_100("cac_changes", c)?;
    }
    for &c in churn_changes {
        ensure_change_above_minus_100("churn_changes", c)?;
    }

    let mut results = Vec::with_capacity(churn_changes.len());
    for &churn_change in churn_changes {
        let churn_factor = Decimal::ONE.safe_add(pct_to_fraction(churn_change))?;
        let adjusted_ltv = LtvInputs {
            avg_customer_lifespan: ltv_inputs.avg_customer_lifespan.safe_div(churn_factor)?,
            ..*ltv_inputs
        };

        let row = cac_changes
            .iter()
            .map(|&cac_change| {
                let adjusted_cac = CacInputs {
                    total_sales_marketing_spend: apply_pct_change(
                        cac_inputs.total_sales_marketing_spend,
                        cac_change,
                    )?,
                    ..*cac_inputs
                };
                let out = calculate_ltv_cac(&adjusted_ltv, &adjusted_cac)?;
                Ok(SensitivityCell {
                    cac_change,
                    churn_change,
                    ltv: out.ltv,
                    cac: out.cac,
                    ratio: out.ratio,
                    rating: out.rating,
                })
            })
            .collect::<DomainResult<Vec<_>>>()?;
        results.push(row);
    }

    Ok(SensitivityMatrix {
        cac_changes: cac_changes.to_vec(),
        churn_changes: churn_changes.to_vec(),
        results,
    })
}

/// Inputs to [`calculate_retention`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RetentionInputs {
    /// MRR at the start of the period.
    pub start_mrr: Decimal,
    /// MRR at the end of the period, from the same cohort.
    pub end_mrr: Decimal,
    /// Upsell revenue gained.
    #[serde(default)]
    pub expansion: Decimal,
    /// Downgrade revenue lost.
    #[serde(default)]
    pub contraction: Decimal,
    /// Revenue lost to cancellations.
    #[serde(default)]
    pub churn: Decimal,
}

/// Health of net revenue retention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetentionStatus {
    /// NRR of 120% or more.
    Excellent,
    /// 100% up to 120%.
    Good,
    /// 85% up to 100%.
    NeedsImprovement,
    /// Below 85%.
    Critical,
}

impl RetentionStatus {
    fn from_nrr(nrr: Decimal) -> Self {
        if nrr >= Decimal::from(120) {
            Self::Excellent
        } else if nrr >= Decimal::ONE_HUNDRED {
            Self::Good
        } else if nrr >= Decimal::from(85) {
            Self::NeedsImprovement
        } else {
            Self::Critical
        }
    }

    const fn benchmark(self) -> &'static str {
        match self {
            Self::Excellent => {
                "World-class! NRR above 120% indicates strong expansion revenue and minimal churn."
            }
            Self::Good => "Solid retention. Focus on expansion to push NRR above 120%.",
            Self::NeedsImprovement => {
                "Below 100% NRR means you are losing revenue. Address churn immediately."
            }
            Self::Critical => "Critical churn levels. Your revenue base is eroding rapidly.",
        }
    }
}

/// Result of [`calculate_retention`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RetentionOutputs {
    /// Net revenue retention, percent, two decimals.
    pub nrr: Decimal,
    /// Gross revenue retention, percent, two decimals, floored at zero.
    pub grr: Decimal,
    /// Expansion MRR as a percent of starting MRR, two decimals.
    pub expansion_rate: Decimal,
    /// NRR rebuilt from its movements,
    /// `(start + expansion - contraction - churn) / start`, floored at zero.
    pub component_nrr: Decimal,
    /// Status from NRR.
    pub status: RetentionStatus,
    /// Benchmark commentary.
    pub benchmark: String,
}

/// Computes net and gross revenue retention.
///
/// # Errors
///
/// Returns `DomainError::DivisionByZero` when `start_mrr` is zero and
/// `DomainError::InvalidInput` for negative amounts.
pub fn calculate_retention(inputs: &RetentionInputs) -> DomainResult<RetentionOutputs> {
    ensure_non_negative("start_mrr", inputs.start_mrr)?;
    ensure_non_negative("end_mrr", inputs.end_mrr)?;
    ensure_non_negative("expansion", inputs.expansion)?;
    ensure_non_negative("contraction", inputs.contraction)?;
    ensure_non_negative("churn", inputs.churn)?;
    if inputs.start_mrr.is_zero() {
        return Err(DomainError::division_by_zero(
            "retention requires a non-zero starting MRR",
        ));
    }

    let nrr = percent_of(inputs.end_mrr, inputs.start_mrr)?;
    let retained = inputs
        .start_mrr
        .safe_sub(inputs.contraction)?
        .safe_sub(inputs.churn)?
        .max(Decimal::ZERO);
    let grr = percent_of(retained, inputs.start_mrr)?;
    let expansion_rate = percent_of(inputs.expansion, inputs.start_mrr)?;
    let movements = inputs
        .start_mrr
        .safe_add(inputs.expansion)?
        .safe_sub(inputs.contraction)?
        .safe_sub(inputs.churn)?
        .max(Decimal::ZERO);
    let component_nrr = percent_of(movements, inputs.start_mrr)?;
    let status = RetentionStatus::from_nrr(nrr);

    Ok(RetentionOutputs {
        nrr: nrr.round_dp(2),
        grr: grr.round_dp(2),
        expansion_rate: expansion_rate.round_dp(2),
        component_nrr: component_nrr.round_dp(2),
        status,
        benchmark: status.benchmark().to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn ltv_inputs() -> LtvInputs {
        LtvInputs {
            arpu: Decimal::from(100),
            gross_margin: Decimal::from(80),
            avg_customer_lifespan: Decimal::from(24),
        }
    }

    fn cac_inputs(spend: i64, customers: u32) -> CacInputs {
        CacInputs {
            total_sales_marketing_spend: Decimal::from(spend),
            new_customers_acquired: customers,
        }
    }

    mod ltv_cac {
        use super::*;

        #[test]
        fn ltv_formula() {
            assert_eq!(calculate_ltv(&ltv_inputs()).unwrap(), Decimal::from(1920));
        }

        #[test]
        fn strong_ratio() {
            let out = calculate_ltv_cac(&ltv_inputs(), &cac_inputs(32_000, 50)).unwrap();
            assert_eq!(out.cac, Decimal::from(640));
            assert_eq!(out.ratio, Decimal::from(3));
            assert_eq!(out.rating, LtvCacRating::Strong);
        }

        #[test]
        fn rating_boundaries() {
            assert_eq!(LtvCacRating::from_ratio(Decimal::TWO), LtvCacRating::Good);
            assert_eq!(
                LtvCacRating::from_ratio(Decimal::ONE),
                LtvCacRating::NeedsImprovement
            );
            assert_eq!(
                LtvCacRating::from_ratio(Decimal::new(99, 2)),
                LtvCacRating::Critical
            );
        }

        #[test]
        fn zero_customers_is_an_error() {
            let err = calculate_ltv_cac(&ltv_inputs(), &cac_inputs(10_000, 0)).unwrap_err();
            assert!(matches!(err, DomainError::DivisionByZero { .. }));
        }

        #[test]
        fn zero_spend_is_an_error() {
            let err = calculate_ltv_cac(&ltv_inputs(), &cac_inputs(0, 10)).unwrap_err();
            assert!(matches!(err, DomainError::DivisionByZero { .. }));
        }

        #[test]
        fn margin_above_100_rejected() {
            let inputs = LtvInputs {
                gross_margin: Decimal::from(120),
                ..ltv_inputs()
            };
            assert!(calculate_ltv(&inputs).unwrap_err().is_validation());
        }
    }

    mod sensitivity {
        use super::*;

        #[test]
        fn default_grid_is_five_by_five() {
            let m = generate_sensitivity_matrix(
                &ltv_inputs(),
                &cac_inputs(32_000, 50),
                &default_cac_changes(),
                &default_churn_changes(),
            )
            .unwrap();
            assert_eq!(m.results.len(), 5);
            assert!(m.results.iter().all(|row| row.len() == 5));
            let centre = &m.results[2][2];
            assert_eq!(centre.ratio, Decimal::from(3));
        }

        #[test]
        fn higher_cac_lowers_ratio_along_a_row() {
            let m = generate_sensitivity_matrix(
                &ltv_inputs(),
                &cac_inputs(32_000, 50),
                &default_cac_changes(),
                &[Decimal::ZERO],
            )
            .unwrap();
            let ratios: Vec<_> = m.results[0].iter().map(|c| c.ratio).collect();
            assert!(ratios.windows(2).all(|w| w[0] >= w[1]));
        }

        #[test]
        fn minus_100_change_rejected() {
            let err = generate_sensitivity_matrix(
                &ltv_inputs(),
                &cac_inputs(32_000, 50),
                &[Decimal::from(-100)],
                &[Decimal::ZERO],
            )
            .unwrap_err();
            assert!(err.is_validation());
        }

        #[test]
        fn empty_axis_rejected() {
            assert!(
                generate_sensitivity_matrix(&ltv_inputs(), &cac_inputs(1, 1), &[], &[Decimal::ZERO])
                    .is_err()
            );
        }
    }

    mod retention {
        use super::*;

        fn inputs(start: i64, end: i64, contraction: i64, churn: i64) -> RetentionInputs {
            RetentionInputs {
                start_mrr: Decimal::from(start),
                end_mrr: Decimal::from(end),
                expansion: Decimal::ZERO,
                contraction: Decimal::from(contraction),
                churn: Decimal::from(churn),
            }
        }

        #[test]
        fn nrr_and_grr() {
            let out = calculate_retention(&inputs(100_000, 125_000, 5_000, 5_000)).unwrap();
            assert_eq!(out.nrr, Decimal::from(125));
            assert_eq!(out.grr, Decimal::from(90));
            assert_eq!(out.status, RetentionStatus::Excellent);
        }

        #[test]
        fn status_boundaries() {
            assert_eq!(
                calculate_retention(&inputs(100, 100, 0, 0)).unwrap().status,
                RetentionStatus::Good
            );
            assert_eq!(
                calculate_retention(&inputs(100, 85, 0, 0)).unwrap().status,
                RetentionStatus::NeedsImprovement
            );
            assert_eq!(
                calculate_retention(&inputs(100, 84, 0, 0)).unwrap().status,
                RetentionStatus::Critical
            );
        }

        #[test]
        fn expansion_feeds_component_nrr_but_not_grr() {
            let mut with_expansion = inputs(100_000, 118_000, 2_000, 5_000);
            with_expansion.expansion = Decimal::from(25_000);
            let out = calculate_retention(&with_expansion).unwrap();

            assert_eq!(out.expansion_rate, Decimal::from(25));
            assert_eq!(out.component_nrr, Decimal::from(118));
            assert_eq!(out.grr, Decimal::from(93));
            assert_eq!(out.nrr, Decimal::from(118));

            let flat = calculate_retention(&inputs(100_000, 118_000, 2_000, 5_000)).unwrap();
            assert_eq!(flat.expansion_rate, Decimal::ZERO);
            assert_eq!(flat.component_nrr, Decimal::from(93));
        }

        #[test]
        fn grr_floors_at_zero() {
            let out = calculate_retention(&inputs(100, 0, 80, 80)).unwrap();
            assert_eq!(out.grr, Decimal::ZERO);
        }

        #[test]
        fn zero_start_is_an_error() {
            assert!(calculate_retention(&inputs(0, 10, 0, 0)).is_err());
        }
    }
}
