//! # API Errors
//!
//! Maps [`ApplicationError`] onto HTTP responses.
//!
//! Every error body has the shape `{"success": false, "error": ..., "message": ...}`.
//!
//! | Cause | Status |
//! |-------|--------|
//! | Calculator or record validation | 422 |
//! | Startup missing sector or stage | 422 |
//! | Investor preferences not set | 400 |
//! | Unknown startup, investor or deal | 404 |
//! | Anything else | 500 |

use crate::application::error::ApplicationError;
use crate::domain::errors::DomainError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// Error body returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorResponse {
    /// Always false.
    pub success: bool,
    /// Short error title.
    pub error: String,
    /// Human-readable detail.
    pub message: String,
}

/// Error returned by REST handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Input failed validation.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The investor must save preferences before matching.
    #[error("preferences not set")]
    PreferencesNotSet,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Unexpected failure; details are logged, not returned.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::PreferencesNotSet => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_preferences_not_set() {
            return Self::PreferencesNotSet;
        }
        if err.is_not_found() {
            return Self::NotFound(err.to_string());
        }
        match err {
            ApplicationError::Validation(msg) => Self::Validation(msg),
            ApplicationError::Domain(e) => Self::from(e),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MissingPreferences(_) => Self::PreferencesNotSet,
            e if e.is_validation() => Self::Validation(e.to_string()),
            e @ DomainError::IncompleteProfile(_) => Self::Validation(e.to_string()),
            e => Self::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match &self {
            Self::Validation(msg) => ("Validation failed", msg.clone()),
            Self::PreferencesNotSet => (
                "Preferences not set",
                "Please complete your investment preferences first".to_string(),
            ),
            Self::NotFound(msg) => ("Not found", msg.clone()),
            Self::Internal(detail) => {
                tracing::error!(error = %detail, "request failed");
                ("Internal server error", "An unexpected error occurred".to_string())
            }
        };
        let body = ErrorResponse {
            success: false,
            error: error.to_string(),
            message,
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::{InvestorId, StartupId};
    use crate::infrastructure::persistence::RepositoryError;

    #[test]
    fn domain_validation_is_422() {
        let err: ApiError = DomainError::invalid_input("arr", "must not be negative").into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn incomplete_profile_is_422() {
        let err: ApiError =
            ApplicationError::from(DomainError::IncompleteProfile(StartupId::new_v4())).into();
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn preferences_not_set_is_400() {
        let err: ApiError = ApplicationError::PreferencesNotSet(InvestorId::new_v4()).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn repository_not_found_is_404() {
        let err: ApiError =
            ApplicationError::from(RepositoryError::not_found("Investor", "x")).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn connection_failure_is_500() {
        let err: ApiError =
            ApplicationError::from(RepositoryError::connection("refused")).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
