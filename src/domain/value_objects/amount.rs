//! # Investment Amounts
//!
//! Parsing and display of rupee amounts entered on profile forms.
//!
//! Forms accept Indian shorthand: `₹5Cr`, `50 lakh`, `2.5L`, `750k`,
//! `1,00,000`. Everything is normalised to rupees; a bare number is
//! already rupees.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::value_objects::amount::{parse_amount, format_inr};
//! use rust_decimal::Decimal;
//!
//! assert_eq!(parse_amount("₹5Cr").unwrap(), Decimal::new(50_000_000, 0));
//! assert_eq!(parse_amount("50 lakh").unwrap(), Decimal::new(5_000_000, 0));
//! assert_eq!(format_inr(Decimal::new(5_000_000, 0)), "₹50L");
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// One lakh in rupees.
pub const LAKH: Decimal = Decimal::from_parts(100_000, 0, 0, false, 0);

/// One crore in rupees.
pub const CRORE: Decimal = Decimal::from_parts(10_000_000, 0, 0, false, 0);

/// Error returned for amount strings that cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    /// Nothing numeric was found.
    #[error("empty amount")]
    Empty,

    /// The numeric part is malformed.
    #[error("invalid amount: '{0}'")]
    Invalid(String),

    /// Amounts must not be negative.
    #[error("negative amount: '{0}'")]
    Negative(String),
}

/// Parses a rupee amount with an optional crore/lakh/thousand suffix.
///
/// # Errors
///
/// Returns [`AmountParseError`] if the string is empty, malformed or negative.
pub fn parse_amount(raw: &str) -> Result<Decimal, AmountParseError> {
    let cleaned: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '₹' | ',' | '_') && !c.is_whitespace())
        .collect();
    let cleaned = cleaned.strip_prefix("rs.").unwrap_or(&cleaned);
    let cleaned = cleaned.strip_prefix("inr").unwrap_or(cleaned);

    if cleaned.is_empty() {
        return Err(AmountParseError::Empty);
    }

    let split_at = cleaned
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '-'))
        .unwrap_or(cleaned.len());
    let (number, unit) = cleaned.split_at(split_at);

    let multiplier = match unit {
        "" => Decimal::ONE,
        "cr" | "crore" | "crores" => CRORE,
        "l" | "lakh" | "lakhs" | "lac" | "lacs" => LAKH,
        "k" | "thousand" => Decimal::ONE_THOUSAND,
        _ => return Err(AmountParseError::Invalid(raw.to_string())),
    };

    let value =
        Decimal::from_str(number).map_err(|_| AmountParseError::Invalid(raw.to_string()))?;
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AmountParseError::Negative(raw.to_string()));
    }

    value
        .checked_mul(multiplier)
        .ok_or_else(|| AmountParseError::Invalid(raw.to_string()))
}

/// Formats a rupee amount in crore/lakh shorthand for match reasons.
#[must_use]
pub fn format_inr(amount: Decimal) -> String {
    if amount >= CRORE {
        format!("₹{}Cr", (amount / CRORE).round_dp(2).normalize())
    } else if amount >= LAKH {
        format!("₹{}L", (amount / LAKH).round_dp(2).normalize())
    } else {
        format!("₹{}", amount.round_dp(0).normalize())
    }
}
