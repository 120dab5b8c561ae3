//! # In-Memory Investor Repository
//!
//! In-memory implementation of [`InvestorRepository`] for testing and the
//! demo server.

use crate::domain::entities::{InvestorPreferences, InvestorProfile};
use crate::domain::value_objects::InvestorId;
use crate::infrastructure::persistence::traits::{
    InvestorRepository, RepositoryError, RepositoryResult,
};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`InvestorRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryInvestorRepository {
    storage: Arc<RwLock<HashMap<InvestorId, InvestorProfile>>>,
}

impl InMemoryInvestorRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of investors in the repository.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InvestorRepository for InMemoryInvestorRepository {
    async fn save(&self, investor: &InvestorProfile) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(investor.id(), investor.clone());
        Ok(())
    }

    async fn get(&self, id: InvestorId) -> RepositoryResult<Option<InvestorProfile>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<InvestorProfile>> {
        let storage = self.storage.read().await;
        let mut out: Vec<InvestorProfile> = storage.values().cloned().collect();
        out.sort_by(|a, b| {
            a.display_name()
                .cmp(b.display_name())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(out)
    }

    async fn update_preferences(
        &self,
        id: InvestorId,
        preferences: InvestorPreferences,
    ) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        let investor = storage
            .get_mut(&id)
            .ok_or_else(|| RepositoryError::not_found("Investor", id))?;
        investor.set_preferences(preferences);
        Ok(())
    }
}
