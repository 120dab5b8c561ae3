//! # Startup Candidate
//!
//! Read-only view of a founder profile as consumed by the scoring engine.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::entities::StartupCandidate;
//! use venture_match::domain::value_objects::{ApprovalStatus, Sector, Stage, StartupId};
//! use rust_decimal::Decimal;
//!
//! let startup = StartupCandidate::new(StartupId::new_v4(), "PayLoop")
//!     .with_sector(Sector::FinTech)
//!     .with_stage(Stage::Mvp)
//!     .with_fundraising_goal(Decimal::new(5_000_000, 0))
//!     .with_approval_status(ApprovalStatus::Approved);
//!
//! assert!(startup.is_matchable());
//! ```

use crate::domain::value_objects::{ApprovalStatus, Sector, Stage, StartupId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A startup as seen by the matching engine.
///
/// Sector and stage are optional here because the profile store allows
/// incomplete profiles; such startups are excluded from candidate sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartupCandidate {
    id: StartupId,
    name: String,
    sector: Option<Sector>,
    stage: Option<Stage>,
    fundraising_goal: Option<Decimal>,
    location: Option<String>,
    approval_status: ApprovalStatus,
}

impl StartupCandidate {
    /// Creates a pending startup with only an id and a name.
    #[must_use]
    pub fn new(id: StartupId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            sector: None,
            stage: None,
            fundraising_goal: None,
            location: None,
            approval_status: ApprovalStatus::Pending,
        }
    }

    /// Sets the sector.
    #[must_use]
    pub fn with_sector(mut self, sector: Sector) -> Self {
        self.sector = Some(sector);
        self
    }

    /// Sets the stage.
    #[must_use]
    pub fn with_stage(mut self, stage: Stage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Sets the fundraising goal in rupees.
    #[must_use]
    pub fn with_fundraising_goal(mut self, goal: Decimal) -> Self {
        self.fundraising_goal = Some(goal);
        self
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Sets the admin approval status.
    #[must_use]
    pub fn with_approval_status(mut self, status: ApprovalStatus) -> Self {
        self.approval_status = status;
        self
    }

    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> StartupId {
        self.id
    }

    /// Returns the startup name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the sector, if set.
    #[inline]
    #[must_use]
    pub fn sector(&self) -> Option<Sector> {
        self.sector
    }

    /// Returns the stage, if set.
    #[inline]
    #[must_use]
    pub fn stage(&self) -> Option<Stage> {
        self.stage
    }

    /// Returns the fundraising goal, if set.
    #[inline]
    #[must_use]
    pub fn fundraising_goal(&self) -> Option<Decimal> {
        self.fundraising_goal
    }

    /// Returns the location, if set.
    #[inline]
    #[must_use]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// Returns the approval status.
    #[inline]
    #[must_use]
    pub fn approval_status(&self) -> ApprovalStatus {
        self.approval_status
    }

    /// Returns true if the profile carries both sector and stage.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.sector.is_some() && self.stage.is_some()
    }

    /// Returns true if the startup may appear in candidate sets.
    #[must_use]
    pub fn is_matchable(&self) -> bool {
        self.approval_status.is_approved() && self.is_complete()
    }
}
