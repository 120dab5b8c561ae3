//! # Venture Calculators
//!
//! Pure financial functions behind the founder calculators.
//!
//! | Module | Calculations |
//! |--------|--------------|
//! | [`runway`] | burn rate, runway, 18-month cash projection, what-if scenarios |
//! | [`unit_economics`] | LTV, CAC, LTV:CAC rating, sensitivity matrix, revenue retention |
//! | [`equity`] | co-founder equity split, dilution across funding rounds |
//! | [`valuation`] | Berkus method, revenue multiple, recommended range, industry benchmarks |
//!
//! Every function validates its inputs and returns [`DomainResult`]. All
//! money is [`Decimal`] in whatever single unit the caller uses; nothing
//! here converts currencies. Because `Decimal` has no NaN or infinity, a
//! bad denominator always comes back as an error rather than a poisoned
//! number.
//!
//! [`DomainResult`]: crate::domain::errors::DomainResult

pub mod equity;
pub mod runway;
pub mod unit_economics;
pub mod valuation;

pub use equity::{
    CoFounder, DilutionInputs, DilutionOutputs, EquitySplitOutputs, FounderEquity,
    FounderScoreBreakdown, FutureRoundProjection, RoundAssumption, calculate_dilution,
    calculate_equity_split, default_round_assumptions,
};
pub use runway::{
    MonthlyExpenses, MonthlyProjection, PROJECTION_HORIZON_MONTHS, Runway, RunwayInputs,
    RunwayOutputs, RunwayStatus, ScenarioKind, WhatIfResults, WhatIfScenario, calculate_runway,
    calculate_what_if,
};
pub use unit_economics::{
    CacInputs, LtvCacOutputs, LtvCacRating, LtvInputs, RetentionInputs, RetentionOutputs,
    RetentionStatus, SensitivityCell, SensitivityMatrix, calculate_cac, calculate_ltv,
    calculate_ltv_cac, calculate_retention, default_cac_changes, default_churn_changes,
    generate_sensitivity_matrix,
};
pub use valuation::{
    BenchmarkTiers, BerkusValuation, IndustryBenchmarks, MultipleRange, RevenueMultipleBenchmarks,
    RevenueMultipleValuation, ValuationInputs, ValuationOutputs, ValuationRange,
    calculate_valuation, industry_benchmarks,
};

use crate::domain::errors::{DomainError, DomainResult};
use rust_decimal::Decimal;

/// Rejects negative values.
pub(crate) fn ensure_non_negative(field: &'static str, value: Decimal) -> DomainResult<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(DomainError::invalid_input(
            field,
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects values outside `[min, max]`.
pub(crate) fn ensure_within(
    field: &'static str,
    value: Decimal,
    min: Decimal,
    max: Decimal,
) -> DomainResult<()> {
    if value < min || value > max {
        return Err(DomainError::invalid_input(
            field,
            format!("must be between {min} and {max}, got {value}"),
        ));
    }
    Ok(())
}

/// Rejects percentage changes at or below -100, which would zero or flip
/// the quantity they scale.
pub(crate) fn ensure_change_above_minus_100(
    field: &'static str,
    change_pct: Decimal,
) -> DomainResult<()> {
    if change_pct <= -Decimal::ONE_HUNDRED {
        return Err(DomainError::invalid_input(
            field,
            format!("changes must be greater than -100%, got {change_pct}%"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_negative_accepts_zero() {
        assert!(ensure_non_negative("x", Decimal::ZERO).is_ok());
        assert!(ensure_non_negative("x", Decimal::NEGATIVE_ONE).is_err());
    }

    #[test]
    fn within_is_inclusive() {
        let hundred = Decimal::ONE_HUNDRED;
        assert!(ensure_within("pct", hundred, Decimal::ZERO, hundred).is_ok());
        assert!(ensure_within("pct", hundred + Decimal::ONE, Decimal::ZERO, hundred).is_err());
    }

    #[test]
    fn change_of_minus_100_rejected() {
        assert!(ensure_change_above_minus_100("c", -Decimal::ONE_HUNDRED).is_err());
        assert!(ensure_change_above_minus_100("c", Decimal::new(-99, 0)).is_ok());
    }
}
