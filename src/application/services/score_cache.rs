//! # Score Cache
//!
//! Memo of computed match results keyed by `(StartupId, InvestorId)`.
//!
//! Scoring is pure, so a cached entry stays valid until one of its inputs
//! changes. The owning service calls [`ScoreCache::invalidate_investor`]
//! when preferences are saved and [`ScoreCache::invalidate_startup`] when a
//! profile changes. The cache is an explicit value held by the service,
//! never process-global.
//!
//! Every invalidation bumps a generation counter. Callers take a
//! [`ScoreCache::generation`] before loading the inputs they score, and a
//! result computed under an older generation is returned but not stored, so
//! a read racing an update can never leave a stale entry behind.

use crate::domain::entities::MatchResult;
use crate::domain::errors::DomainResult;
use crate::domain::value_objects::{InvestorId, StartupId};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicU64, Ordering};

/// Hit and miss counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}

/// Concurrent memo of match results.
#[derive(Debug, Default)]
pub struct ScoreCache {
    entries: DashMap<(StartupId, InvestorId), MatchResult>,
    generation: AtomicU64,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ScoreCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation. Take it before loading the inputs to score.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Returns the cached result, computing it on a miss.
    ///
    /// The computed result is stored only if no invalidation happened since
    /// `generation` was taken. Errors from `compute` are returned and nothing
    /// is stored.
    ///
    /// # Errors
    ///
    /// Propagates the error returned by `compute`.
    pub fn get_or_compute<F>(
        &self,
        generation: u64,
        startup_id: StartupId,
        investor_id: InvestorId,
        compute: F,
    ) -> DomainResult<MatchResult>
    where
        F: FnOnce() -> DomainResult<MatchResult>,
    {
        let key = (startup_id, investor_id);
        if let Some(hit) = self.entries.get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Ok(hit.value().clone());
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        let result = compute()?;

        // The shard lock is held across the check, so an invalidation either
        // bumps first and we skip, or its retain runs after our insert.
        match self.entries.entry(key) {
            Entry::Occupied(_) => {}
            Entry::Vacant(slot) => {
                if self.generation() == generation {
                    slot.insert(result.clone());
                } else {
                    tracing::debug!(
                        %startup_id,
                        %investor_id,
                        "discarded score computed before an invalidation"
                    );
                }
            }
        }
        Ok(result)
    }

    fn bump_generation(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }

    /// Drops every entry for an investor. Returns how many were removed.
    pub fn invalidate_investor(&self, investor_id: InvestorId) -> usize {
        self.bump_generation();
        let before = self.entries.len();
        self.entries.retain(|(_, inv), _| *inv != investor_id);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::warn!(%investor_id, removed, "invalidated cached scores for investor");
        }
        removed
    }

    /// Drops every entry for a startup. Returns how many were removed.
    pub fn invalidate_startup(&self, startup_id: StartupId) -> usize {
        self.bump_generation();
        let before = self.entries.len();
        self.entries.retain(|(st, _), _| *st != startup_id);
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            tracing::warn!(%startup_id, removed, "invalidated cached scores for startup");
        }
        removed
    }

    /// Removes everything.
    pub fn clear(&self) {
        self.bump_generation();
        self.entries.clear();
    }

    /// Number of cached pairs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Current hit/miss counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}
