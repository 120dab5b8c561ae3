//! # Checked Arithmetic
//!
//! Traits and helpers for safe decimal arithmetic in financial calculations.
//!
//! This module provides:
//! - [`ArithmeticError`] - Error type for arithmetic failures
//! - [`CheckedArithmetic`] - Trait for safe arithmetic operations
//! - [`percent_of`] - `part / whole × 100` with a zero guard
//! - [`apply_pct_change`] - Scales a value by a signed percentage change
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::value_objects::arithmetic::{CheckedArithmetic, percent_of};
//! use rust_decimal::Decimal;
//!
//! let a = Decimal::new(100, 0);
//! let b = Decimal::new(3, 0);
//! assert!(a.safe_div(b).is_ok());
//! assert_eq!(percent_of(Decimal::new(50, 0), Decimal::new(200, 0)).unwrap(), Decimal::new(25, 0));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;

/// Failure of a checked money or percentage computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ArithmeticError {
    /// Result exceeds the `Decimal` range.
    #[error("arithmetic overflow")]
    Overflow,

    /// Result is below the `Decimal` range.
    #[error("arithmetic underflow")]
    Underflow,

    /// Zero denominator.
    #[error("division by zero")]
    DivisionByZero,
}

/// Result of a checked computation.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// Overflow-aware operators used by every calculator.
///
/// Calculators chain these with `?`; [`ArithmeticError`] converts into
/// `DomainError::Arithmetic`.
pub trait CheckedArithmetic: Sized {
    /// `self + rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::Overflow` when out of range.
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self - rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::Underflow` when out of range.
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self × rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::Overflow` when out of range.
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self>;

    /// `self / rhs`.
    ///
    /// # Errors
    ///
    /// `ArithmeticError::DivisionByZero` for a zero divisor, `Overflow`
    /// when the quotient is out of range.
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self>;
}

impl CheckedArithmetic for Decimal {
    #[inline]
    fn safe_add(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_add(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_sub(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_sub(rhs).ok_or(ArithmeticError::Underflow)
    }

    #[inline]
    fn safe_mul(self, rhs: Self) -> ArithmeticResult<Self> {
        self.checked_mul(rhs).ok_or(ArithmeticError::Overflow)
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> ArithmeticResult<Self> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        self.checked_div(rhs).ok_or(ArithmeticError::Overflow)
    }
}

/// Computes `part / whole × 100`.
///
/// # Errors
///
/// Returns `ArithmeticError::DivisionByZero` if `whole` is zero.
#[inline]
pub fn percent_of(part: Decimal, whole: Decimal) -> ArithmeticResult<Decimal> {
    part.safe_div(whole)?.safe_mul(Decimal::ONE_HUNDRED)
}

/// Converts a percentage (e.g. `25`) into a fraction (`0.25`).
#[inline]
#[must_use]
pub fn pct_to_fraction(pct: Decimal) -> Decimal {
    pct / Decimal::ONE_HUNDRED
}

/// Scales `value` by `(1 + change_pct / 100)`.
///
/// # Errors
///
/// Returns `ArithmeticError::Overflow` if the product overflows.
#[inline]
pub fn apply_pct_change(value: Decimal, change_pct: Decimal) -> ArithmeticResult<Decimal> {
    let factor = Decimal::ONE.safe_add(pct_to_fraction(change_pct))?;
    value.safe_mul(factor)
}
