//! # Runway and What-If Scenarios
//!
//! ```text
//! total expenses = salaries + rent + software + marketing + cogs + other
//! net burn       = total expenses - monthly revenue
//! runway         = cash / net burn            (net burn > 0)
//!                = indefinite                 (net burn <= 0)
//! ```
//!
//! A company that is not burning cash has no finite runway. That case is
//! reported as [`Runway::Indefinite`] and serialised as
//! `{"runway_months": null, "indefinite": true}` instead of a sentinel
//! number.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::services::calculator::runway::{
//!     calculate_runway, MonthlyExpenses, Runway, RunwayInputs, RunwayStatus,
//! };
//! use rust_decimal::Decimal;
//!
//! let inputs = RunwayInputs {
//!     cash_in_bank: Decimal::from(1_200_000),
//!     monthly_revenue: Decimal::from(50_000),
//!     monthly_expenses: MonthlyExpenses {
//!         salaries: Decimal::from(150_000),
//!         ..MonthlyExpenses::default()
//!     },
//! };
//!
//! let out = calculate_runway(&inputs).unwrap();
//! assert_eq!(out.runway, Runway::Months(Decimal::from(12)));
//! assert_eq!(out.runway_status, RunwayStatus::Healthy);
//! ```

use super::ensure_non_negative;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::arithmetic::{CheckedArithmetic, apply_pct_change, pct_to_fraction};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

/// Last month included in the cash projection (month 0 is today).
pub const PROJECTION_HORIZON_MONTHS: u32 = 18;

/// Monthly operating expenses by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct MonthlyExpenses {
    /// Payroll.
    pub salaries: Decimal,
    /// Office and facilities.
    pub rent: Decimal,
    /// Tools and subscriptions.
    pub software: Decimal,
    /// Marketing spend.
    pub marketing: Decimal,
    /// Cost of goods sold.
    pub cogs: Decimal,
    /// Everything else.
    pub other: Decimal,
}

impl MonthlyExpenses {
    fn categories(&self) -> [(&'static str, Decimal); 6] {
        [
            ("monthly_expenses.salaries", self.salaries),
            ("monthly_expenses.rent", self.rent),
            ("monthly_expenses.software", self.software),
            ("monthly_expenses.marketing", self.marketing),
            ("monthly_expenses.cogs", self.cogs),
            ("monthly_expenses.other", self.other),
        ]
    }

    /// Sums every category.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Arithmetic` on overflow.
    pub fn total(&self) -> DomainResult<Decimal> {
        self.categories()
            .iter()
            .try_fold(Decimal::ZERO, |acc, (_, v)| acc.safe_add(*v))
            .map_err(DomainError::from)
    }

    /// Multiplies every category by `factor`.
    fn scaled(&self, factor: Decimal) -> DomainResult<Self> {
        Ok(Self {
            salaries: self.salaries.safe_mul(factor)?,
            rent: self.rent.safe_mul(factor)?,
            software: self.software.safe_mul(factor)?,
            marketing: self.marketing.safe_mul(factor)?,
            cogs: self.cogs.safe_mul(factor)?,
            other: self.other.safe_mul(factor)?,
        })
    }

    fn validate(&self) -> DomainResult<()> {
        for (field, value) in self.categories() {
            ensure_non_negative(field, value)?;
        }
        Ok(())
    }
}

/// Inputs to [`calculate_runway`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunwayInputs {
    /// Cash available today.
    pub cash_in_bank: Decimal,
    /// Revenue collected per month.
    #[serde(default)]
    pub monthly_revenue: Decimal,
    /// Expenses per month.
    #[serde(default)]
    pub monthly_expenses: MonthlyExpenses,
}

impl RunwayInputs {
    fn validate(&self) -> DomainResult<()> {
        ensure_non_negative("cash_in_bank", self.cash_in_bank)?;
        ensure_non_negative("monthly_revenue", self.monthly_revenue)?;
        self.monthly_expenses.validate()
    }
}

/// Months of runway left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Runway {
    /// Cash lasts this many months at the current burn.
    Months(Decimal),
    /// Not burning cash; runway is unbounded.
    Indefinite,
}

impl Runway {
    /// Returns the month count, or `None` when indefinite.
    #[must_use]
    pub const fn months(&self) -> Option<Decimal> {
        match self {
            Self::Months(m) => Some(*m),
            Self::Indefinite => None,
        }
    }

    /// Returns true if runway is unbounded.
    #[must_use]
    pub const fn is_indefinite(&self) -> bool {
        matches!(self, Self::Indefinite)
    }
}

#[derive(Serialize)]
struct RunwayRepr {
    runway_months: Option<Decimal>,
    indefinite: bool,
}

impl Serialize for Runway {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RunwayRepr {
            runway_months: self.months(),
            indefinite: self.is_indefinite(),
        }
        .serialize(serializer)
    }
}

/// Urgency of the runway.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunwayStatus {
    /// Under three months.
    Critical,
    /// Three to six months.
    Warning,
    /// Six months or more, or indefinite.
    Healthy,
}

impl RunwayStatus {
    fn from_runway(runway: Runway) -> Self {
        match runway {
            Runway::Months(m) if m < Decimal::from(3) => Self::Critical,
            Runway::Months(m) if m < Decimal::from(6) => Self::Warning,
            _ => Self::Healthy,
        }
    }
}

/// One month of the cash projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MonthlyProjection {
    /// Months from today.
    pub month: u32,
    /// Cash at the start of the month, floored at zero.
    pub cash: Decimal,
    /// Revenue for the month.
    pub revenue: Decimal,
    /// Expenses for the month.
    pub expenses: Decimal,
    /// Net burn for the month.
    pub net_burn: Decimal,
}

/// Result of [`calculate_runway`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunwayOutputs {
    /// Sum of expense categories.
    pub total_monthly_expenses: Decimal,
    /// Expenses minus revenue; negative when profitable.
    pub net_burn_rate: Decimal,
    /// Runway, rounded to two decimals when finite.
    #[serde(flatten)]
    pub runway: Runway,
    /// Urgency classification.
    pub runway_status: RunwayStatus,
    /// Month-by-month cash, stopping once cash is gone.
    pub projection_data: Vec<MonthlyProjection>,
}

/// Computes burn, runway and the 18-month cash projection.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for negative cash, revenue or
/// expenses, and `DomainError::Arithmetic` on overflow.
pub fn calculate_runway(inputs: &RunwayInputs) -> DomainResult<RunwayOutputs> {
    inputs.validate()?;

    let total = inputs.monthly_expenses.total()?;
    let net_burn = total.safe_sub(inputs.monthly_revenue)?;

    let exact = if net_burn > Decimal::ZERO {
        Runway::Months(inputs.cash_in_bank.safe_div(net_burn)?)
    } else {
        Runway::Indefinite
    };
    let runway = match exact {
        Runway::Months(m) => Runway::Months(m.round_dp(2)),
        Runway::Indefinite => Runway::Indefinite,
    };

    let mut projection = Vec::with_capacity(PROJECTION_HORIZON_MONTHS as usize + 1);
    let mut cash = inputs.cash_in_bank;
    for month in 0..=PROJECTION_HORIZON_MONTHS {
        projection.push(MonthlyProjection {
            month,
            cash: cash.max(Decimal::ZERO),
            revenue: inputs.monthly_revenue,
            expenses: total,
            net_burn,
        });
        cash = cash.safe_sub(net_burn)?;
        if cash <= Decimal::ZERO && month > 0 {
            break;
        }
    }

    Ok(RunwayOutputs {
        total_monthly_expenses: total,
        net_burn_rate: net_burn,
        runway,
        runway_status: RunwayStatus::from_runway(exact),
        projection_data: projection,
    })
}

/// Kind of change a what-if scenario applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// Raise or lower monthly revenue.
    RevenueChange,
    /// Raise or lower expenses; percentages scale every category, absolute
    /// amounts land in `other`.
    ExpenseChange,
    /// Add a salary.
    NewHire,
    /// Cut expenses proportionally across categories.
    CostReduction,
}

/// A single hypothetical change to the runway inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct WhatIfScenario {
    /// What the scenario changes.
    #[serde(rename = "type")]
    pub kind: ScenarioKind,
    /// Free-text label.
    #[serde(default)]
    pub description: String,
    /// Amount per month, or a percentage when `is_percentage` is set.
    pub impact: Decimal,
    /// Interpret `impact` as a percentage.
    #[serde(default)]
    pub is_percentage: bool,
}

/// Baseline and scenario runway side by side.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WhatIfResults {
    /// Runway with the inputs as given.
    pub baseline: RunwayOutputs,
    /// Runway with the scenario applied.
    pub scenario: RunwayOutputs,
    /// Scenario minus baseline months; `None` if either side is indefinite.
    pub difference_months: Option<Decimal>,
    /// Advice on whether to go ahead.
    pub recommendation: String,
}

fn apply_scenario(base: &RunwayInputs, scenario: &WhatIfScenario) -> DomainResult<RunwayInputs> {
    let mut modified = *base;
    let impact = scenario.impact;

    match scenario.kind {
        ScenarioKind::RevenueChange => {
            modified.monthly_revenue = if scenario.is_percentage {
                apply_pct_change(base.monthly_revenue, impact)?
            } else {
                base.monthly_revenue.safe_add(impact)?
            };
        }
        ScenarioKind::ExpenseChange => {
            if scenario.is_percentage {
                let factor = Decimal::ONE.safe_add(pct_to_fraction(impact))?;
                modified.monthly_expenses = base.monthly_expenses.scaled(factor)?;
            } else {
                modified.monthly_expenses.other = base.monthly_expenses.other.safe_add(impact)?;
            }
        }
        ScenarioKind::NewHire => {
            ensure_non_negative("impact", impact)?;
            modified.monthly_expenses.salaries = base.monthly_expenses.salaries.safe_add(impact)?;
        }
        ScenarioKind::CostReduction => {
            let total = base.monthly_expenses.total()?;
            if total.is_zero() {
                return Err(DomainError::invalid_input(
                    "impact",
                    "there are no expenses to reduce",
                ));
            }
            let reduction = if scenario.is_percentage {
                total.safe_mul(pct_to_fraction(impact))?
            } else {
                impact
            };
            let factor = Decimal::ONE.safe_sub(reduction.safe_div(total)?)?;
            if factor.is_sign_negative() && !factor.is_zero() {
                return Err(DomainError::invalid_input(
                    "impact",
                    "reduction exceeds total monthly expenses",
                ));
            }
            modified.monthly_expenses = base.monthly_expenses.scaled(factor)?;
        }
    }

    modified.validate().map_err(|_| {
        DomainError::invalid_input("impact", "scenario would make revenue or expenses negative")
    })?;
    Ok(modified)
}

fn what_if_recommendation(baseline: Runway, scenario: Runway, diff: Option<Decimal>) -> String {
    let months = |m: Decimal| format!("{:.1}", m.abs().round_dp(1));
    match (baseline, scenario, diff) {
        (_, _, Some(d)) if d > Decimal::from(3) => format!(
            "Strong improvement: extends runway by {} months. Highly recommended.",
            months(d)
        ),
        (_, _, Some(d)) if d > Decimal::ZERO => format!(
            "Positive impact: adds {} months to runway. Consider implementing.",
            months(d)
        ),
        (_, _, Some(d)) if d > Decimal::from(-3) => format!(
            "Minor negative impact: reduces runway by {} months. Proceed with caution.",
            months(d)
        ),
        (_, _, Some(d)) => format!(
            "Significant risk: reduces runway by {} months. \
             Not recommended without additional funding.",
            months(d)
        ),
        (Runway::Months(_), Runway::Indefinite, None) => {
            "Strong improvement: the company stops burning cash. Highly recommended.".to_string()
        }
        (Runway::Indefinite, Runway::Months(m), None) => format!(
            "Significant risk: the company starts burning cash with {} months of runway. \
             Not recommended without additional funding.",
            months(m)
        ),
        _ => "No runway impact: the company remains cash-flow positive.".to_string(),
    }
}

/// Compares runway before and after a hypothetical change.
///
/// # Errors
///
/// Returns `DomainError::InvalidInput` for invalid base inputs or a
/// scenario that would push revenue or expenses below zero.
pub fn calculate_what_if(
    base: &RunwayInputs,
    scenario: &WhatIfScenario,
) -> DomainResult<WhatIfResults> {
    let baseline = calculate_runway(base)?;
    let modified = apply_scenario(base, scenario)?;
    let scenario_out = calculate_runway(&modified)?;

    let difference_months = match (baseline.runway, scenario_out.runway) {
        (Runway::Months(b), Runway::Months(s)) => Some(s.safe_sub(b)?),
        _ => None,
    };
    let recommendation =
        what_if_recommendation(baseline.runway, scenario_out.runway, difference_months);

    Ok(WhatIfResults {
        baseline,
        scenario: scenario_out,
        difference_months,
        recommendation,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn d(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn inputs(cash: i64, revenue: i64, salaries: i64) -> RunwayInputs {
        RunwayInputs {
            cash_in_bank: d(cash),
            monthly_revenue: d(revenue),
            monthly_expenses: MonthlyExpenses {
                salaries: d(salaries),
                ..MonthlyExpenses::default()
            },
        }
    }

    mod runway {
        use super::*;

        #[test]
        fn finite_runway() {
            let out = calculate_runway(&inputs(100_000, 10_000, 30_000)).unwrap();
            assert_eq!(out.net_burn_rate, d(20_000));
            assert_eq!(out.runway, Runway::Months(d(5)));
            assert_eq!(out.runway_status, RunwayStatus::Warning);
        }

        #[test]
        fn zero_burn_is_indefinite() {
            let out = calculate_runway(&inputs(100_000, 30_000, 30_000)).unwrap();
            assert!(out.runway.is_indefinite());
            assert_eq!(out.runway_status, RunwayStatus::Healthy);
            assert_eq!(out.projection_data.len(), 19);
        }

        #[test]
        fn indefinite_serialises_as_null_and_flag() {
            let out = calculate_runway(&inputs(100_000, 40_000, 30_000)).unwrap();
            let json = serde_json::to_value(&out).unwrap();
            assert!(json["runway_months"].is_null());
            assert_eq!(json["indefinite"], true);
        }

        #[test]
        fn critical_below_three_months() {
            let out = calculate_runway(&inputs(50_000, 0, 20_000)).unwrap();
            assert_eq!(out.runway_status, RunwayStatus::Critical);
        }

        #[test]
        fn projection_stops_after_depletion() {
            let out = calculate_runway(&inputs(50_000, 0, 20_000)).unwrap();
            let cash: Vec<_> = out.projection_data.iter().map(|p| p.cash).collect();
            assert_eq!(cash, [d(50_000), d(30_000), d(10_000)]);
        }

        #[test]
        fn negative_inputs_rejected() {
            let err = calculate_runway(&inputs(-1, 0, 0)).unwrap_err();
            assert!(err.is_validation());
            let mut bad = inputs(1, 0, 0);
            bad.monthly_expenses.rent = d(-5);
            assert!(calculate_runway(&bad).is_err());
        }

        #[test]
        fn runway_rounds_to_two_decimals() {
            let out = calculate_runway(&inputs(100_000, 0, 30_000)).unwrap();
            assert_eq!(out.runway, Runway::Months(Decimal::new(333, 2)));
        }
    }

    mod what_if {
        use super::*;

        fn scenario(kind: ScenarioKind, impact: i64, pct: bool) -> WhatIfScenario {
            WhatIfScenario {
                kind,
                description: String::new(),
                impact: d(impact),
                is_percentage: pct,
            }
        }

        #[test]
        fn new_hire_shortens_runway() {
            let base = inputs(120_000, 0, 20_000);
            let r = calculate_what_if(&base, &scenario(ScenarioKind::NewHire, 10_000, false))
                .unwrap();
            assert_eq!(r.difference_months, Some(d(-2)));
            assert_eq!(
                r.recommendation,
                "Minor negative impact: reduces runway by 2.0 months. Proceed with caution."
            );
        }

        #[test]
        fn cost_reduction_percentage() {
            let base = inputs(120_000, 0, 20_000);
            let r = calculate_what_if(&base, &scenario(ScenarioKind::CostReduction, 50, true))
                .unwrap();
            assert_eq!(r.scenario.total_monthly_expenses, d(10_000));
            assert_eq!(r.difference_months, Some(d(6)));
            assert!(r.recommendation.starts_with("Strong improvement"));
        }

        #[test]
        fn absolute_expense_change_goes_to_other() {
            let base = inputs(120_000, 0, 20_000);
            let r = calculate_what_if(&base, &scenario(ScenarioKind::ExpenseChange, 4_000, false))
                .unwrap();
            assert_eq!(r.scenario.total_monthly_expenses, d(24_000));
        }

        #[test]
        fn revenue_reaching_breakeven_is_indefinite() {
            let base = inputs(120_000, 10_000, 20_000);
            let r = calculate_what_if(&base, &scenario(ScenarioKind::RevenueChange, 100, true))
                .unwrap();
            assert!(r.scenario.runway.is_indefinite());
            assert_eq!(r.difference_months, None);
            assert!(r.recommendation.contains("stops burning cash"));
        }

        #[test]
        fn over_reduction_rejected() {
            let base = inputs(120_000, 0, 20_000);
            let err =
                calculate_what_if(&base, &scenario(ScenarioKind::CostReduction, 30_000, false))
                    .unwrap_err();
            assert!(err.is_validation());
        }

        #[test]
        fn revenue_cannot_go_negative() {
            let base = inputs(120_000, 10_000, 20_000);
            assert!(
                calculate_what_if(&base, &scenario(ScenarioKind::RevenueChange, -20_000, false))
                    .is_err()
            );
        }
    }
}
