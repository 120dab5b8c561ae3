//! # Deal Listing
//!
//! Snapshot of a deal's investor count as read by the compliance monitor.
//! The count itself is maintained by the write path; this type only
//! carries it.

use crate::domain::value_objects::{DealId, StartupId};
use serde::{Deserialize, Serialize};

/// A deal and its current investor count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DealListing {
    id: DealId,
    title: String,
    startup_id: StartupId,
    investor_count: u32,
    investor_limit: u32,
}

impl DealListing {
    /// Creates a listing.
    #[must_use]
    pub fn new(
        id: DealId,
        title: impl Into<String>,
        startup_id: StartupId,
        investor_count: u32,
        investor_limit: u32,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            startup_id,
            investor_count,
            investor_limit,
        }
    }

    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> DealId {
        self.id
    }

    /// Returns the deal title.
    #[inline]
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the startup raising on this deal.
    #[inline]
    #[must_use]
    pub fn startup_id(&self) -> StartupId {
        self.startup_id
    }

    /// Returns the number of investors admitted so far.
    #[inline]
    #[must_use]
    pub fn investor_count(&self) -> u32 {
        self.investor_count
    }

    /// Returns the investor ceiling for this deal.
    #[inline]
    #[must_use]
    pub fn investor_limit(&self) -> u32 {
        self.investor_limit
    }

    /// Records one more investor.
    ///
    /// Saturates rather than overflowing; the ceiling is not enforced here.
    pub fn record_investor(&mut self) {
        self.investor_count = self.investor_count.saturating_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_investor_increments() {
        let mut deal = DealListing::new(DealId::new_v4(), "Seed", StartupId::new_v4(), 199, 200);
        deal.record_investor();
        assert_eq!(deal.investor_count(), 200);
        deal.record_investor();
        assert_eq!(deal.investor_count(), 201);
    }

    #[test]
    fn record_investor_saturates() {
        let mut deal =
            DealListing::new(DealId::new_v4(), "Seed", StartupId::new_v4(), u32::MAX, 200);
        deal.record_investor();
        assert_eq!(deal.investor_count(), u32::MAX);
    }
}
