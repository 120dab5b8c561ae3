//! # Application Errors
//!
//! Error types for the application layer.
//!
//! These errors represent failures that can occur while serving a matching,
//! compliance or calculator request, including validation failures,
//! missing records and infrastructure errors.
//!
//! # Error Hierarchy
//!
//! ```text
//! ApplicationError
//! ├── Domain(DomainError)         - Scoring and calculator rule violations
//! ├── Repository(RepositoryError) - Persistence failures
//! ├── Validation(String)          - Request validation failures
//! ├── NotFound                    - Startup, investor or deal not found
//! ├── PreferencesNotSet           - Investor has no matching preferences
//! ├── Configuration(String)       - Invalid or unreadable configuration
//! └── Internal(String)            - Anything else
//! ```
//!
//! # Examples
//!
//! ```
//! use venture_match::application::error::ApplicationError;
//!
//! let err = ApplicationError::validation("threshold must be at most 100");
//! assert!(err.is_validation());
//!
//! let err = ApplicationError::not_found("Deal", "deal-123");
//! assert!(err.is_not_found());
//! ```

use crate::domain::errors::DomainError;
use crate::domain::value_objects::InvestorId;
use crate::infrastructure::persistence::RepositoryError;
use thiserror::Error;

/// Application layer error.
///
/// Wraps domain and repository errors with application-specific context.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain error from business logic.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// Repository error from persistence.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Request validation failed.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("not found: {resource_type} with id {id}")]
    NotFound {
        /// Type of resource.
        resource_type: String,
        /// Resource identifier.
        id: String,
    },

    /// The investor has not saved matching preferences.
    #[error("preferences not set for investor {0}")]
    PreferencesNotSet(InvestorId),

    /// Configuration could not be loaded or is invalid.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Creates a validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a not found error.
    #[must_use]
    pub fn not_found(resource_type: impl Into<String>, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
            id: id.to_string(),
        }
    }

    /// Creates a configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Returns true if this is a not found error, including one raised by a
    /// repository.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::NotFound { .. } => true,
            Self::Repository(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the caller supplied bad input, either at the request
    /// level or as a calculator/domain validation failure.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        match self {
            Self::Validation(_) => true,
            Self::Domain(e) => e.is_validation(),
            _ => false,
        }
    }

    /// Returns true if the investor must set preferences first.
    #[must_use]
    pub fn is_preferences_not_set(&self) -> bool {
        matches!(
            self,
            Self::PreferencesNotSet(_) | Self::Domain(DomainError::MissingPreferences(_))
        )
    }
}

/// Result type for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
