//! # Investor Profile and Preferences
//!
//! Typed investor matching preferences and the versioned wire record they
//! are stored as.
//!
//! [`PreferencesRecord`] is what the profile store and the REST layer
//! exchange. It rejects unknown fields and unknown versions, and parses
//! free-form amount strings (`"50L"`, `"₹1Cr"`) into rupees.
//! [`InvestorPreferences`] is the validated form the scoring engine reads.
//!
//! # Examples
//!
//! ```
//! use venture_match::domain::entities::{InvestorPreferences, PreferencesRecord};
//! use venture_match::domain::value_objects::Sector;
//!
//! let record: PreferencesRecord = serde_json::from_str(r#"{
//!     "version": 1,
//!     "preferred_sectors": ["FinTech"],
//!     "preferred_stages": ["mvp"],
//!     "min_investment_amount": "10L",
//!     "max_investment_amount": "1Cr"
//! }"#).unwrap();
//!
//! let prefs = InvestorPreferences::try_from(record).unwrap();
//! assert!(prefs.preferred_sectors().contains(&Sector::FinTech));
//! ```

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::value_objects::amount::parse_amount;
use crate::domain::value_objects::{GeographicPreference, InvestorId, RiskAppetite, Sector, Stage};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Schema version written by this build.
pub const PREFERENCES_SCHEMA_VERSION: u32 = 1;

/// Validated investor matching preferences.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InvestorPreferences {
    preferred_sectors: BTreeSet<Sector>,
    preferred_stages: BTreeSet<Stage>,
    min_investment_amount: Option<Decimal>,
    max_investment_amount: Option<Decimal>,
    typical_check_size: Option<Decimal>,
    risk_appetite: Option<RiskAppetite>,
    geographic_preference: GeographicPreference,
}

impl InvestorPreferences {
    /// Creates empty preferences (every criterion neutral).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the preferred sectors.
    #[must_use]
    pub fn with_sectors(mut self, sectors: impl IntoIterator<Item = Sector>) -> Self {
        self.preferred_sectors = sectors.into_iter().collect();
        self
    }

    /// Sets the preferred stages.
    #[must_use]
    pub fn with_stages(mut self, stages: impl IntoIterator<Item = Stage>) -> Self {
        self.preferred_stages = stages.into_iter().collect();
        self
    }

    /// Sets the investment range in rupees.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidInput` if either bound is negative or
    /// `min` exceeds `max`.
    pub fn with_investment_range(
        mut self,
        min: Option<Decimal>,
        max: Option<Decimal>,
    ) -> DomainResult<Self> {
        for (field, value) in [
            ("min_investment_amount", min),
            ("max_investment_amount", max),
        ] {
            if value.is_some_and(|v| v.is_sign_negative() && !v.is_zero()) {
                return Err(DomainError::invalid_input(field, "must not be negative"));
            }
        }
        if let (Some(lo), Some(hi)) = (min, max) {
            if lo > hi {
                return Err(DomainError::invalid_input(
                    "min_investment_amount",
                    "must not exceed max_investment_amount",
                ));
            }
        }
        self.min_investment_amount = min;
        self.max_investment_amount = max;
        Ok(self)
    }

    /// Sets the typical check size in rupees.
    #[must_use]
    pub fn with_typical_check_size(mut self, size: Decimal) -> Self {
        self.typical_check_size = Some(size);
        self
    }

    /// Sets the risk appetite.
    #[must_use]
    pub fn with_risk_appetite(mut self, appetite: RiskAppetite) -> Self {
        self.risk_appetite = Some(appetite);
        self
    }

    /// Sets the geographic preference.
    #[must_use]
    pub fn with_geographic_preference(mut self, preference: GeographicPreference) -> Self {
        self.geographic_preference = preference;
        self
    }

    /// Returns the preferred sectors.
    #[inline]
    #[must_use]
    pub fn preferred_sectors(&self) -> &BTreeSet<Sector> {
        &self.preferred_sectors
    }

    /// Returns the preferred stages.
    #[inline]
    #[must_use]
    pub fn preferred_stages(&self) -> &BTreeSet<Stage> {
        &self.preferred_stages
    }

    /// Returns the minimum investment amount.
    #[inline]
    #[must_use]
    pub fn min_investment_amount(&self) -> Option<Decimal> {
        self.min_investment_amount
    }

    /// Returns the maximum investment amount.
    #[inline]
    #[must_use]
    pub fn max_investment_amount(&self) -> Option<Decimal> {
        self.max_investment_amount
    }

    /// Returns the typical check size.
    #[inline]
    #[must_use]
    pub fn typical_check_size(&self) -> Option<Decimal> {
        self.typical_check_size
    }

    /// Returns the risk appetite.
    #[inline]
    #[must_use]
    pub fn risk_appetite(&self) -> Option<RiskAppetite> {
        self.risk_appetite
    }

    /// Returns the geographic preference.
    #[inline]
    #[must_use]
    pub fn geographic_preference(&self) -> GeographicPreference {
        self.geographic_preference
    }
}

/// Versioned wire form of investor preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(deny_unknown_fields)]
pub struct PreferencesRecord {
    /// Schema version; only [`PREFERENCES_SCHEMA_VERSION`] is accepted.
    pub version: u32,
    /// Sector labels, e.g. `"FinTech"`, `"AI/ML"`.
    #[serde(default)]
    pub preferred_sectors: Vec<String>,
    /// Stage labels, e.g. `"mvp"`, `"Early Revenue"`.
    #[serde(default)]
    pub preferred_stages: Vec<String>,
    /// Minimum ticket, e.g. `"10L"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_investment_amount: Option<String>,
    /// Maximum ticket, e.g. `"1Cr"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_investment_amount: Option<String>,
    /// Typical cheque, e.g. `"25L"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub typical_check_size: Option<String>,
    /// `conservative`, `moderate` or `aggressive`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_appetite: Option<String>,
    /// `no-preference`, `national` or `local`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub geographic_preference: Option<String>,
}

fn parse_optional_amount(
    field: &'static str,
    raw: Option<&str>,
) -> DomainResult<Option<Decimal>> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| parse_amount(s).map_err(|e| DomainError::invalid_input(field, e.to_string())))
        .transpose()
}

impl TryFrom<PreferencesRecord> for InvestorPreferences {
    type Error = DomainError;

    fn try_from(record: PreferencesRecord) -> Result<Self, Self::Error> {
        if record.version != PREFERENCES_SCHEMA_VERSION {
            return Err(DomainError::UnsupportedVersion(record.version));
        }

        let sectors = record
            .preferred_sectors
            .iter()
            .map(|s| s.parse::<Sector>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::invalid_input("preferred_sectors", e.to_string()))?;
        let stages = record
            .preferred_stages
            .iter()
            .map(|s| s.parse::<Stage>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| DomainError::invalid_input("preferred_stages", e.to_string()))?;

        let min = parse_optional_amount(
            "min_investment_amount",
            record.min_investment_amount.as_deref(),
        )?;
        let max = parse_optional_amount(
            "max_investment_amount",
            record.max_investment_amount.as_deref(),
        )?;
        let typical =
            parse_optional_amount("typical_check_size", record.typical_check_size.as_deref())?;

        let mut prefs = Self::new()
            .with_sectors(sectors)
            .with_stages(stages)
            .with_investment_range(min, max)?;
        if let Some(size) = typical {
            prefs = prefs.with_typical_check_size(size);
        }
        if let Some(raw) = record.risk_appetite.as_deref().filter(|s| !s.is_empty()) {
            let appetite = raw
                .parse::<RiskAppetite>()
                .map_err(|e| DomainError::invalid_input("risk_appetite", e.to_string()))?;
            prefs = prefs.with_risk_appetite(appetite);
        }
        if let Some(raw) = record.geographic_preference.as_deref() {
            let geo = raw
                .parse::<GeographicPreference>()
                .map_err(|e| DomainError::invalid_input("geographic_preference", e.to_string()))?;
            prefs = prefs.with_geographic_preference(geo);
        }
        Ok(prefs)
    }
}

// Plain rupees so the record parses back to the same amount.
fn exact_rupees(amount: Decimal) -> String {
    amount.normalize().to_string()
}

impl From<&InvestorPreferences> for PreferencesRecord {
    fn from(prefs: &InvestorPreferences) -> Self {
        Self {
            version: PREFERENCES_SCHEMA_VERSION,
            preferred_sectors: prefs
                .preferred_sectors
                .iter()
                .map(|s| s.label().to_string())
                .collect(),
            preferred_stages: prefs
                .preferred_stages
                .iter()
                .map(|s| s.label().to_string())
                .collect(),
            min_investment_amount: prefs.min_investment_amount.map(exact_rupees),
            max_investment_amount: prefs.max_investment_amount.map(exact_rupees),
            typical_check_size: prefs.typical_check_size.map(exact_rupees),
            risk_appetite: prefs.risk_appetite.map(|r| r.to_string()),
            geographic_preference: Some(prefs.geographic_preference.to_string()),
        }
    }
}

/// An investor profile together with its (possibly unset) preferences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvestorProfile {
    id: InvestorId,
    display_name: String,
    investor_type: String,
    preferences: Option<InvestorPreferences>,
}

impl InvestorProfile {
    /// Creates a profile without preferences.
    #[must_use]
    pub fn new(
        id: InvestorId,
        display_name: impl Into<String>,
        investor_type: impl Into<String>,
    ) -> Self {
        Self {
            id,
            display_name: display_name.into(),
            investor_type: investor_type.into(),
            preferences: None,
        }
    }

    /// Attaches preferences.
    #[must_use]
    pub fn with_preferences(mut self, preferences: InvestorPreferences) -> Self {
        self.preferences = Some(preferences);
        self
    }

    /// Replaces the stored preferences.
    pub fn set_preferences(&mut self, preferences: InvestorPreferences) {
        self.preferences = Some(preferences);
    }

    /// Returns the identifier.
    #[inline]
    #[must_use]
    pub fn id(&self) -> InvestorId {
        self.id
    }

    /// Returns the display name.
    #[inline]
    #[must_use]
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    /// Returns the investor type (angel, VC, family office…).
    #[inline]
    #[must_use]
    pub fn investor_type(&self) -> &str {
        &self.investor_type
    }

    /// Returns the preferences, if configured.
    #[inline]
    #[must_use]
    pub fn preferences(&self) -> Option<&InvestorPreferences> {
        self.preferences.as_ref()
    }
}
