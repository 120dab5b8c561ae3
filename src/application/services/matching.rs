//! # Matching Service
//!
//! Orchestrates scoring between stored profiles.
//!
//! This module provides the [`MatchingService`], which loads startups and
//! investors through the repository ports, scores them with
//! [`MatchScorer`], and applies the configured [`MatchingPolicy`] filters.
//! Scores are memoised in a [`ScoreCache`] when the policy enables it.

use crate::application::config::MatchingPolicy;
use crate::application::error::{ApplicationError, ApplicationResult};
use crate::application::services::score_cache::ScoreCache;
use crate::domain::entities::{
    InvestorPreferences, MatchResult, PreferencesRecord, StartupCandidate,
};
use crate::domain::services::{InvestorMatch, MatchScorer};
use crate::domain::value_objects::{InvestorId, Sector, Stage, StartupId};
use crate::infrastructure::persistence::{InvestorRepository, StartupRepository};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Startups recommended to one investor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupRecommendations {
    /// Approved startups considered.
    pub total_startups: usize,
    /// Startups that could be scored.
    pub matched_startups: usize,
    /// Startups at or above the recommendation threshold.
    pub recommended_startups: usize,
    /// Best recommendations, at most the configured page size.
    pub recommendations: Vec<MatchResult>,
    /// The preferences the scores were computed against.
    pub preferences: PreferencesRecord,
}

/// Identity of the startup investors were matched against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupSummary {
    /// Identifier.
    pub id: StartupId,
    /// Display name.
    pub name: String,
    /// Sector.
    pub sector: Option<Sector>,
    /// Stage.
    pub stage: Option<Stage>,
}

impl From<&StartupCandidate> for StartupSummary {
    fn from(startup: &StartupCandidate) -> Self {
        Self {
            id: startup.id(),
            name: startup.name().to_string(),
            sector: startup.sector(),
            stage: startup.stage(),
        }
    }
}

/// Investors matched to one startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StartupInvestorMatches {
    /// The startup.
    pub startup: StartupSummary,
    /// Investors with preferences set.
    pub total_investors: usize,
    /// Investors at or above the match threshold.
    pub matched_count: usize,
    /// Best matches, at most the configured page size.
    pub matches: Vec<InvestorMatch>,
}

/// Application service for investor/startup matching.
pub struct MatchingService {
    startups: Arc<dyn StartupRepository>,
    investors: Arc<dyn InvestorRepository>,
    scorer: MatchScorer,
    policy: MatchingPolicy,
    cache: Option<ScoreCache>,
}

impl fmt::Debug for MatchingService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MatchingService")
            .field("policy", &self.policy)
            .field("cached_scores", &self.cache.as_ref().map(ScoreCache::len))
            .finish_non_exhaustive()
    }
}

impl MatchingService {
    /// Creates a service with the given repositories and policy.
    #[must_use]
    pub fn new(
        startups: Arc<dyn StartupRepository>,
        investors: Arc<dyn InvestorRepository>,
        policy: MatchingPolicy,
    ) -> Self {
        Self {
            startups,
            investors,
            scorer: MatchScorer::new(policy.weights),
            cache: policy.cache_scores.then(ScoreCache::new),
            policy,
        }
    }

    /// Creates a service with the default policy.
    #[must_use]
    pub fn with_defaults(
        startups: Arc<dyn StartupRepository>,
        investors: Arc<dyn InvestorRepository>,
    ) -> Self {
        Self::new(startups, investors, MatchingPolicy::default())
    }

    /// Returns the policy in use.
    #[must_use]
    pub fn policy(&self) -> &MatchingPolicy {
        &self.policy
    }

    /// Returns the score cache, if enabled.
    #[must_use]
    pub fn cache(&self) -> Option<&ScoreCache> {
        self.cache.as_ref()
    }

    /// Recommends startups to an investor.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the investor does not exist
    /// - `ApplicationError::PreferencesNotSet` if the investor has no
    ///   preferences
    /// - `ApplicationError::Repository` if loading fails
    pub async fn recommendations_for_investor(
        &self,
        investor_id: InvestorId,
    ) -> ApplicationResult<StartupRecommendations> {
        // Taken before any load so scores from superseded inputs are not cached.
        let generation = self.cache.as_ref().map(ScoreCache::generation);
        let investor = self
            .investors
            .get(investor_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Investor", investor_id))?;
        let prefs = investor
            .preferences()
            .ok_or(ApplicationError::PreferencesNotSet(investor_id))?;

        let startups = self.startups.get_all().await?;
        let total_startups = startups.iter().filter(|s| s.approval_status().is_approved()).count();

        let scored = match (&self.cache, generation) {
            (Some(cache), Some(generation)) => Self::score_cached(
                &self.scorer,
                cache,
                generation,
                investor_id,
                &startups,
                prefs,
            )?,
            _ => self
                .scorer
                .match_startups_for_investor(investor_id, &startups, Some(prefs))?,
        };
        let matched_startups = scored.len();
        let filtered = self.policy.startup_recommendations.apply(scored);

        tracing::info!(
            %investor_id,
            total_startups,
            matched_startups,
            recommended = filtered.qualified,
            returned = filtered.items.len(),
            "computed startup recommendations"
        );

        Ok(StartupRecommendations {
            total_startups,
            matched_startups,
            recommended_startups: filtered.qualified,
            recommendations: filtered.items,
            preferences: PreferencesRecord::from(prefs),
        })
    }

    fn score_cached(
        scorer: &MatchScorer,
        cache: &ScoreCache,
        generation: u64,
        investor_id: InvestorId,
        startups: &[StartupCandidate],
        prefs: &InvestorPreferences,
    ) -> ApplicationResult<Vec<MatchResult>> {
        let mut out = Vec::with_capacity(startups.len());
        for startup in startups.iter().filter(|s| s.is_matchable()) {
            let result = cache.get_or_compute(generation, startup.id(), investor_id, || {
                scorer.score(startup, prefs)
            })?;
            out.push(result.for_investor(investor_id));
        }
        Ok(out)
    }

    /// Matches investors to a startup.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the startup does not exist
    /// - `ApplicationError::Domain` with `IncompleteProfile` if the startup
    ///   has no sector or stage
    /// - `ApplicationError::Repository` if loading fails
    pub async fn investors_for_startup(
        &self,
        startup_id: StartupId,
    ) -> ApplicationResult<StartupInvestorMatches> {
        let startup = self
            .startups
            .get(startup_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Startup", startup_id))?;
        let investors = self.investors.get_all().await?;

        let outcome = self.scorer.match_investors_for_startup(&startup, &investors)?;
        let total_investors = outcome.matches.len();
        let filtered = self.policy.investor_matches.apply(outcome.matches);

        tracing::info!(
            %startup_id,
            total_investors,
            skipped_without_preferences = outcome.skipped_without_preferences,
            matched = filtered.qualified,
            "computed investor matches"
        );

        Ok(StartupInvestorMatches {
            startup: StartupSummary::from(&startup),
            total_investors,
            matched_count: filtered.qualified,
            matches: filtered.items,
        })
    }

    /// Validates and stores an investor's preferences, dropping any cached
    /// scores computed against the old ones.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::Domain` if the record is invalid
    /// - `ApplicationError::Repository` with `NotFound` if the investor does
    ///   not exist
    pub async fn update_preferences(
        &self,
        investor_id: InvestorId,
        record: PreferencesRecord,
    ) -> ApplicationResult<InvestorPreferences> {
        let prefs = InvestorPreferences::try_from(record)?;
        self.investors
            .update_preferences(investor_id, prefs.clone())
            .await?;
        if let Some(cache) = &self.cache {
            cache.invalidate_investor(investor_id);
        }
        tracing::info!(%investor_id, "investment preferences updated");
        Ok(prefs)
    }

    /// Stores a startup profile, dropping any cached scores for it.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Repository` if saving fails.
    pub async fn upsert_startup(&self, startup: &StartupCandidate) -> ApplicationResult<()> {
        self.startups.save(startup).await?;
        if let Some(cache) = &self.cache {
            cache.invalidate_startup(startup.id());
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::domain::entities::{InvestorProfile, PREFERENCES_SCHEMA_VERSION};
    use crate::domain::value_objects::ApprovalStatus;
    use crate::infrastructure::persistence::in_memory::{
        InMemoryInvestorRepository, InMemoryStartupRepository,
    };
    use rust_decimal::Decimal;

    struct Fixture {
        service: MatchingService,
        startups: Arc<InMemoryStartupRepository>,
        investors: Arc<InMemoryInvestorRepository>,
    }

    fn fixture(policy: MatchingPolicy) -> Fixture {
        let startups = Arc::new(InMemoryStartupRepository::new());
        let investors = Arc::new(InMemoryInvestorRepository::new());
        let service = MatchingService::new(startups.clone(), investors.clone(), policy);
        Fixture {
            service,
            startups,
            investors,
        }
    }

    fn startup(name: &str, sector: Sector, stage: Stage, approved: bool) -> StartupCandidate {
        let status = if approved {
            ApprovalStatus::Approved
        } else {
            ApprovalStatus::Pending
        };
        StartupCandidate::new(StartupId::new_v4(), name)
            .with_sector(sector)
            .with_stage(stage)
            .with_fundraising_goal(Decimal::from(5_000_000))
            .with_approval_status(status)
    }

    fn fintech_prefs() -> InvestorPreferences {
        InvestorPreferences::new()
            .with_sectors([Sector::FinTech])
            .with_stages([Stage::Mvp])
            .with_investment_range(Some(Decimal::from(1_000_000)), Some(Decimal::from(10_000_000)))
            .unwrap()
    }

    async fn seed(f: &Fixture) -> InvestorId {
        for s in [
            startup("PayLoop", Sector::FinTech, Stage::Mvp, true),
            startup("FarmOS", Sector::AgriTech, Stage::Growth, true),
            startup("Hidden", Sector::FinTech, Stage::Mvp, false),
        ] {
            f.startups.save(&s).await.unwrap();
        }
        let investor = InvestorProfile::new(InvestorId::new_v4(), "Priya", "Angel")
            .with_preferences(fintech_prefs());
        f.investors.save(&investor).await.unwrap();
        investor.id()
    }

    mod recommendations {
        use super::*;

        #[tokio::test]
        async fn counts_and_filters() {
            let f = fixture(MatchingPolicy::default());
            let investor_id = seed(&f).await;

            let out = f
                .service
                .recommendations_for_investor(investor_id)
                .await
                .unwrap();

            assert_eq!(out.total_startups, 2);
            assert_eq!(out.matched_startups, 2);
            assert_eq!(out.recommended_startups, 1);
            assert_eq!(out.recommendations[0].startup_name, "PayLoop");
            assert_eq!(out.recommendations[0].investor_id, Some(investor_id));
            assert_eq!(out.preferences.version, PREFERENCES_SCHEMA_VERSION);
        }

        #[tokio::test]
        async fn cached_and_uncached_agree() {
            let cached = fixture(MatchingPolicy::default());
            let id = seed(&cached).await;
            let first = cached.service.recommendations_for_investor(id).await.unwrap();
            let second = cached.service.recommendations_for_investor(id).await.unwrap();
            assert_eq!(first, second);
            let stats = cached.service.cache().unwrap().stats();
            assert_eq!((stats.hits, stats.misses), (2, 2));

            let uncached = fixture(MatchingPolicy {
                cache_scores: false,
                ..MatchingPolicy::default()
            });
            let id = seed(&uncached).await;
            let out = uncached.service.recommendations_for_investor(id).await.unwrap();
            assert!(uncached.service.cache().is_none());
            assert_eq!(
                out.recommendations[0].total_score,
                first.recommendations[0].total_score
            );
        }

        #[tokio::test]
        async fn preferences_not_set() {
            let f = fixture(MatchingPolicy::default());
            let investor = InvestorProfile::new(InvestorId::new_v4(), "New", "VC");
            f.investors.save(&investor).await.unwrap();

            let err = f
                .service
                .recommendations_for_investor(investor.id())
                .await
                .unwrap_err();
            assert!(err.is_preferences_not_set());
        }

        #[tokio::test]
        async fn unknown_investor() {
            let f = fixture(MatchingPolicy::default());
            let err = f
                .service
                .recommendations_for_investor(InvestorId::new_v4())
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        }
    }

    mod investor_matches {
        use super::*;

        #[tokio::test]
        async fn skips_investors_without_preferences() {
            let f = fixture(MatchingPolicy::default());
            seed(&f).await;
            f.investors
                .save(&InvestorProfile::new(InvestorId::new_v4(), "Blank", "VC"))
                .await
                .unwrap();
            let target = startup("Ledger", Sector::FinTech, Stage::Mvp, true);
            f.startups.save(&target).await.unwrap();

            let out = f.service.investors_for_startup(target.id()).await.unwrap();
            assert_eq!(out.total_investors, 1);
            assert_eq!(out.matched_count, 1);
            assert_eq!(out.matches[0].investor_name, "Priya");
            assert_eq!(out.startup.name, "Ledger");
        }

        #[tokio::test]
        async fn incomplete_startup_is_rejected() {
            let f = fixture(MatchingPolicy::default());
            let target = StartupCandidate::new(StartupId::new_v4(), "Draft");
            f.startups.save(&target).await.unwrap();

            let err = f.service.investors_for_startup(target.id()).await.unwrap_err();
            assert!(matches!(err, ApplicationError::Domain(_)));
        }
    }

    mod preferences {
        use super::*;

        fn record(sectors: &[&str]) -> PreferencesRecord {
            PreferencesRecord {
                version: PREFERENCES_SCHEMA_VERSION,
                preferred_sectors: sectors.iter().map(|s| (*s).to_string()).collect(),
                preferred_stages: vec!["MVP".to_string()],
                min_investment_amount: Some("10L".to_string()),
                max_investment_amount: Some("1Cr".to_string()),
                typical_check_size: None,
                risk_appetite: None,
                geographic_preference: None,
            }
        }

        #[tokio::test]
        async fn update_invalidates_cached_scores() {
            let f = fixture(MatchingPolicy::default());
            let id = seed(&f).await;
            let before = f.service.recommendations_for_investor(id).await.unwrap();
            assert!(!f.service.cache().unwrap().is_empty());
            let generation = f.service.cache().unwrap().generation();

            f.service
                .update_preferences(id, record(&["AgriTech"]))
                .await
                .unwrap();
            assert!(f.service.cache().unwrap().is_empty());
            assert!(f.service.cache().unwrap().generation() > generation);

            let after = f.service.recommendations_for_investor(id).await.unwrap();
            assert_ne!(before.recommendations, after.recommendations);
        }

        #[tokio::test]
        async fn invalid_record_is_a_validation_error() {
            let f = fixture(MatchingPolicy::default());
            let id = seed(&f).await;
            let mut bad = record(&["FinTech"]);
            bad.version = 99;
            let err = f.service.update_preferences(id, bad).await.unwrap_err();
            assert!(err.is_validation());
        }

        #[tokio::test]
        async fn unknown_investor() {
            let f = fixture(MatchingPolicy::default());
            let err = f
                .service
                .update_preferences(InvestorId::new_v4(), record(&["FinTech"]))
                .await
                .unwrap_err();
            assert!(err.is_not_found());
        }
    }
}
