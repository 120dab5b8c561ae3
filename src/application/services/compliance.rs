//! # Compliance Service
//!
//! Reads deals through [`DealRepository`] and reports their Section 42
//! investor-limit status.

use crate::application::error::{ApplicationError, ApplicationResult};
use crate::domain::services::{
    ComplianceMonitor, ComplianceSummary, InvestorLimitReport, InvestorLimitState, LimitPolicy,
};
use crate::domain::value_objects::DealId;
use crate::infrastructure::persistence::DealRepository;
use std::fmt;
use std::sync::Arc;

/// Application service for investor-limit reporting.
pub struct ComplianceService {
    deals: Arc<dyn DealRepository>,
    monitor: ComplianceMonitor,
}

impl fmt::Debug for ComplianceService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComplianceService")
            .field("policy", self.monitor.policy())
            .finish_non_exhaustive()
    }
}

impl ComplianceService {
    /// Creates a service using `policy`.
    #[must_use]
    pub fn new(deals: Arc<dyn DealRepository>, policy: LimitPolicy) -> Self {
        Self {
            deals,
            monitor: ComplianceMonitor::new(policy),
        }
    }

    /// Returns the policy in use.
    #[must_use]
    pub fn policy(&self) -> &LimitPolicy {
        self.monitor.policy()
    }

    /// Reports one deal's investor-limit status.
    ///
    /// # Errors
    ///
    /// - `ApplicationError::NotFound` if the deal does not exist
    /// - `ApplicationError::Domain` if the deal carries a zero limit
    pub async fn deal_limit(&self, deal_id: DealId) -> ApplicationResult<InvestorLimitReport> {
        let deal = self
            .deals
            .get(deal_id)
            .await?
            .ok_or_else(|| ApplicationError::not_found("Deal", deal_id))?;
        let report = InvestorLimitState::from(&deal).report(self.monitor.policy())?;
        tracing::debug!(
            %deal_id,
            count = report.current_count,
            status = %report.status,
            "evaluated investor limit"
        );
        Ok(report)
    }

    /// Summarises every stored deal.
    ///
    /// # Errors
    ///
    /// Returns `ApplicationError::Domain` if any deal carries a zero limit.
    pub async fn summary(&self) -> ApplicationResult<ComplianceSummary> {
        let deals = self.deals.get_all().await?;
        let summary = self.monitor.summarize(&deals)?;
        tracing::info!(
            total_deals = summary.total_deals,
            at_limit = summary.at_limit_deals,
            score = summary.compliance_score,
            "compliance summary computed"
        );
        Ok(summary)
    }
}
