//! # In-Memory Deal Repository
//!
//! In-memory implementation of [`DealRepository`] for testing and the demo
//! server.

use crate::domain::entities::DealListing;
use crate::domain::value_objects::DealId;
use crate::infrastructure::persistence::traits::{DealRepository, RepositoryResult};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`DealRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryDealRepository {
    storage: Arc<RwLock<HashMap<DealId, DealListing>>>,
}

impl InMemoryDealRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears all deals from the repository.
    pub async fn clear(&self) {
        let mut storage = self.storage.write().await;
        storage.clear();
    }
}

#[async_trait]
impl DealRepository for InMemoryDealRepository {
    async fn save(&self, deal: &DealListing) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(deal.id(), deal.clone());
        Ok(())
    }

    async fn get(&self, id: DealId) -> RepositoryResult<Option<DealListing>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<DealListing>> {
        let storage = self.storage.read().await;
        let mut out: Vec<DealListing> = storage.values().cloned().collect();
        out.sort_by(|a, b| a.title().cmp(b.title()).then_with(|| a.id().cmp(&b.id())));
        Ok(out)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::value_objects::StartupId;

    fn deal(title: &str, count: u32) -> DealListing {
        DealListing::new(DealId::new_v4(), title, StartupId::new_v4(), count, 200)
    }

    #[tokio::test]
    async fn save_get_and_overwrite() {
        let repo = InMemoryDealRepository::new();
        let mut d = deal("Seed round", 10);
        repo.save(&d).await.unwrap();

        d.record_investor();
        repo.save(&d).await.unwrap();

        let stored = repo.get(d.id()).await.unwrap().unwrap();
        assert_eq!(stored.investor_count(), 11);
        assert_eq!(repo.get_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn clear() {
        let repo = InMemoryDealRepository::new();
        repo.save(&deal("A", 1)).await.unwrap();
        repo.save(&deal("B", 2)).await.unwrap();
        repo.clear().await;
        assert!(repo.get_all().await.unwrap().is_empty());
    }
}
