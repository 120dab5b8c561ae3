//! # Domain Errors
//!
//! Error types raised by the scoring, compliance and calculator engines.
//!
//! Calculator functions never surface NaN or infinity: any input that
//! would produce one is reported as [`DomainError::InvalidInput`] or
//! [`DomainError::DivisionByZero`] so the caller can render it as a
//! validation message.

use crate::domain::value_objects::arithmetic::ArithmeticError;
use crate::domain::value_objects::{InvestorId, StartupId};
use thiserror::Error;

/// Error type for domain operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A numeric or structural input is out of range.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field.
        field: &'static str,
        /// Human-readable reason.
        reason: String,
    },

    /// A ratio would divide by zero.
    #[error("division by zero: {context}")]
    DivisionByZero {
        /// What was being divided.
        context: &'static str,
    },

    /// The investor has not configured matching preferences.
    #[error("investment preferences not set for investor {0}")]
    MissingPreferences(InvestorId),

    /// The startup lacks the sector or stage needed for matching.
    #[error("startup {0} is missing sector or stage")]
    IncompleteProfile(StartupId),

    /// A preferences record carries a schema version this build cannot read.
    #[error("unsupported preferences version: {0}")]
    UnsupportedVersion(u32),

    /// Checked arithmetic failed.
    #[error("arithmetic error: {0}")]
    Arithmetic(#[from] ArithmeticError),
}

impl DomainError {
    /// Creates an invalid input error.
    #[must_use]
    pub fn invalid_input(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }

    /// Creates a division by zero error.
    #[must_use]
    pub const fn division_by_zero(context: &'static str) -> Self {
        Self::DivisionByZero { context }
    }

    /// Returns true if this error should be shown to the user as a
    /// form validation message.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::InvalidInput { .. }
                | Self::DivisionByZero { .. }
                | Self::Arithmetic(_)
                | Self::UnsupportedVersion(_)
        )
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
