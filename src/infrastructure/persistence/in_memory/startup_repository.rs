//! # In-Memory Startup Repository
//!
//! In-memory implementation of [`StartupRepository`] for testing and the
//! demo server.

use crate::domain::entities::StartupCandidate;
use crate::domain::value_objects::StartupId;
use crate::infrastructure::persistence::traits::{RepositoryResult, StartupRepository};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`StartupRepository`].
///
/// Results of `get_all` and `find_matchable` are ordered by name so that
/// equal scores rank the same way on every call.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStartupRepository {
    storage: Arc<RwLock<HashMap<StartupId, StartupCandidate>>>,
}

impl InMemoryStartupRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of startups in the repository.
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

    async fn sorted(&self, filter: impl Fn(&StartupCandidate) -> bool) -> Vec<StartupCandidate> {
        let storage = self.storage.read().await;
        let mut out: Vec<StartupCandidate> =
            storage.values().filter(|s| filter(*s)).cloned().collect();
        out.sort_by(|a, b| a.name().cmp(b.name()).then_with(|| a.id().cmp(&b.id())));
        out
    }
}

#[async_trait]
impl StartupRepository for InMemoryStartupRepository {
    async fn save(&self, startup: &StartupCandidate) -> RepositoryResult<()> {
        let mut storage = self.storage.write().await;
        storage.insert(startup.id(), startup.clone());
        Ok(())
    }

    async fn get(&self, id: StartupId) -> RepositoryResult<Option<StartupCandidate>> {
        let storage = self.storage.read().await;
        Ok(storage.get(&id).cloned())
    }

    async fn get_all(&self) -> RepositoryResult<Vec<StartupCandidate>> {
        Ok(self.sorted(|_| true).await)
    }

    async fn find_matchable(&self) -> RepositoryResult<Vec<StartupCandidate>> {
        Ok(self.sorted(StartupCandidate::is_matchable).await)
    }

    async fn count(&self) -> RepositoryResult<u64> {
        let storage = self.storage.read().await;
        Ok(storage.len() as u64)
    }
}
