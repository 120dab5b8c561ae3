//! # Repository Traits
//!
//! Port definitions for persistence abstraction.
//!
//! The matching and compliance services read profiles and deals through
//! these traits; the profile store itself lives elsewhere. In-memory
//! adapters back the tests and the demo server.
//!
//! # Available Repositories
//!
//! - [`StartupRepository`]: Startup profiles as scoring candidates
//! - [`InvestorRepository`]: Investor profiles and their preferences
//! - [`DealRepository`]: Deals and their investor counts
//!
//! # Examples
//!
//! ```ignore
//! use venture_match::infrastructure::persistence::traits::StartupRepository;
//!
//! async fn count_candidates(repo: &impl StartupRepository) {
//!     let matchable = repo.find_matchable().await.unwrap();
//!     println!("{} startups eligible for matching", matchable.len());
//! }
//! ```

use crate::domain::entities::{DealListing, InvestorPreferences, InvestorProfile, StartupCandidate};
use crate::domain::value_objects::{DealId, InvestorId, StartupId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Entity not found.
    #[error("Entity not found: {entity_type} with id {id}")]
    NotFound {
        /// Type of entity.
        entity_type: &'static str,
        /// Entity identifier.
        id: String,
    },

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a not found error.
    #[must_use]
    pub fn not_found(entity_type: &'static str, id: impl fmt::Display) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Returns true if this is a not found error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Repository for startup profiles.
#[async_trait]
pub trait StartupRepository: Send + Sync + fmt::Debug {
    /// Saves a startup, replacing any existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn save(&self, startup: &StartupCandidate) -> RepositoryResult<()>;

    /// Gets a startup by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get(&self, id: StartupId) -> RepositoryResult<Option<StartupCandidate>>;

    /// Returns every startup regardless of approval.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get_all(&self) -> RepositoryResult<Vec<StartupCandidate>>;

    /// Returns approved startups with sector and stage set.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn find_matchable(&self) -> RepositoryResult<Vec<StartupCandidate>>;

    /// Counts stored startups.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn count(&self) -> RepositoryResult<u64>;
}

/// Repository for investor profiles.
#[async_trait]
pub trait InvestorRepository: Send + Sync + fmt::Debug {
    /// Saves an investor, replacing any existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn save(&self, investor: &InvestorProfile) -> RepositoryResult<()>;

    /// Gets an investor by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get(&self, id: InvestorId) -> RepositoryResult<Option<InvestorProfile>>;

    /// Returns every investor, with or without preferences.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get_all(&self) -> RepositoryResult<Vec<InvestorProfile>>;

    /// Replaces an investor's preferences.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the investor does not exist.
    async fn update_preferences(
        &self,
        id: InvestorId,
        preferences: InvestorPreferences,
    ) -> RepositoryResult<()>;
}

/// Repository for deals.
#[async_trait]
pub trait DealRepository: Send + Sync + fmt::Debug {
    /// Saves a deal, replacing any existing entry with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn save(&self, deal: &DealListing) -> RepositoryResult<()>;

    /// Gets a deal by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get(&self, id: DealId) -> RepositoryResult<Option<DealListing>>;

    /// Returns every deal.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the backend fails.
    async fn get_all(&self) -> RepositoryResult<Vec<DealListing>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let id = StartupId::new_v4();
        let err = RepositoryError::not_found("Startup", id);
        assert!(err.to_string().contains(&id.to_string()));
        assert!(err.is_not_found());
    }

    #[test]
    fn other_errors_are_not_not_found() {
        assert!(!RepositoryError::connection("refused").is_not_found());
        assert!(!RepositoryError::serialization("bad json").is_not_found());
        assert!(
            RepositoryError::internal("poisoned")
                .to_string()
                .contains("poisoned")
        );
    }
}
