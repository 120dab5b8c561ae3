//! # Domain Enums
//!
//! Enumeration types for profile and calculator concepts.
//!
//! - [`Sector`] - Industry sector a startup operates in
//! - [`Stage`] - Startup maturity stage
//! - [`ApprovalStatus`] - Admin review state of a profile
//! - [`RiskAppetite`] - Investor risk tolerance
//! - [`GeographicPreference`] - Investor location preference
//! - [`Industry`] - Industry used for calculator benchmarks
//! - [`FundingStage`] - Round a company is raising
//!
//! All enums implement `Debug`, `Clone`, `Copy`, `PartialEq`, `Eq`, `Hash`,
//! `Display`, `FromStr`, and Serde traits. Parsing is lenient about case,
//! spacing and punctuation so labels coming from forms ("MVP Stage",
//! "Fintech", "AI/ML") map onto the same variant.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error returned when a string does not name a known enum variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseEnumError {
    /// The value is not recognised for the given enum.
    #[error("invalid {0} value: '{1}'")]
    InvalidValue(&'static str, String),
}

/// Lowercases and strips everything but ASCII alphanumerics and `+`.
fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '+')
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

/// Groups of sectors considered related for partial sector matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectorFamily {
    /// Software and computing.
    Tech,
    /// Health, climate and agriculture.
    Health,
    /// Financial services.
    Finance,
}

/// Industry sector of a startup.
///
/// # Examples
///
/// ```
/// use venture_match::domain::value_objects::enums::Sector;
///
/// let sector: Sector = "Fintech".parse().unwrap();
/// assert_eq!(sector, Sector::FinTech);
/// assert_eq!(sector.to_string(), "FinTech");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum Sector {
    /// General technology.
    #[serde(rename = "Technology")]
    Technology,
    /// Software as a service.
    #[serde(rename = "SaaS")]
    Saas,
    /// Artificial intelligence and machine learning.
    #[serde(rename = "AI/ML")]
    AiMl,
    /// Blockchain and web3.
    #[serde(rename = "Blockchain")]
    Blockchain,
    /// Financial technology.
    #[serde(rename = "FinTech")]
    FinTech,
    /// Healthcare and health technology.
    #[serde(rename = "Healthcare")]
    Healthcare,
    /// Clean energy and climate.
    #[serde(rename = "CleanTech")]
    CleanTech,
    /// Agriculture technology.
    #[serde(rename = "AgriTech")]
    AgriTech,
    /// Education technology.
    #[serde(rename = "EdTech")]
    EdTech,
    /// Online retail.
    #[serde(rename = "E-commerce")]
    ECommerce,
    /// Deep technology (hardware, science).
    #[serde(rename = "DeepTech")]
    DeepTech,
    /// Anything else.
    #[serde(rename = "Other")]
    Other,
}

impl Sector {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Technology => "Technology",
            Self::Saas => "SaaS",
            Self::AiMl => "AI/ML",
            Self::Blockchain => "Blockchain",
            Self::FinTech => "FinTech",
            Self::Healthcare => "Healthcare",
            Self::CleanTech => "CleanTech",
            Self::AgriTech => "AgriTech",
            Self::EdTech => "EdTech",
            Self::ECommerce => "E-commerce",
            Self::DeepTech => "DeepTech",
            Self::Other => "Other",
        }
    }

    /// Returns the families this sector belongs to.
    ///
    /// Blockchain sits in both the tech and finance families.
    #[must_use]
    pub const fn families(self) -> &'static [SectorFamily] {
        match self {
            Self::Technology | Self::Saas | Self::AiMl => &[SectorFamily::Tech],
            Self::Blockchain => &[SectorFamily::Tech, SectorFamily::Finance],
            Self::FinTech => &[SectorFamily::Finance],
            Self::Healthcare | Self::CleanTech | Self::AgriTech => &[SectorFamily::Health],
            Self::EdTech | Self::ECommerce | Self::DeepTech | Self::Other => &[],
        }
    }

    /// Returns true if the two sectors share a family.
    #[must_use]
    pub fn is_related_to(self, other: Self) -> bool {
        self.families()
            .iter()
            .any(|family| other.families().contains(family))
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Sector {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "technology" | "tech" => Ok(Self::Technology),
            "saas" => Ok(Self::Saas),
            "aiml" | "ai" | "ml" => Ok(Self::AiMl),
            "blockchain" | "web3" | "crypto" => Ok(Self::Blockchain),
            "fintech" => Ok(Self::FinTech),
            "healthcare" | "healthtech" => Ok(Self::Healthcare),
            "cleantech" | "climatetech" => Ok(Self::CleanTech),
            "agritech" | "agtech" => Ok(Self::AgriTech),
            "edtech" => Ok(Self::EdTech),
            "ecommerce" => Ok(Self::ECommerce),
            "deeptech" => Ok(Self::DeepTech),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::InvalidValue("Sector", s.to_string())),
        }
    }
}

/// Startup maturity stage, ordered from earliest to latest.
///
/// # Examples
///
/// ```
/// use venture_match::domain::value_objects::enums::Stage;
///
/// let stage: Stage = "MVP Stage".parse().unwrap();
/// assert_eq!(stage, Stage::Mvp);
/// assert!(stage.is_adjacent_to(Stage::Idea));
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Stage {
    /// Idea stage.
    Idea = 0,
    /// Minimum viable product.
    Mvp = 1,
    /// First revenue.
    EarlyRevenue = 2,
    /// Scaling revenue.
    Growth = 3,
    /// Series A and later.
    SeriesAPlus = 4,
}

impl Stage {
    /// Position in the stage ladder.
    #[inline]
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns true if the stages are exactly one step apart.
    #[must_use]
    pub const fn is_adjacent_to(self, other: Self) -> bool {
        self.ordinal().abs_diff(other.ordinal()) == 1
    }

    /// Risk level implied by investing at this stage.
    #[must_use]
    pub const fn risk_level(self) -> RiskAppetite {
        match self {
            Self::Idea => RiskAppetite::Aggressive,
            Self::Mvp | Self::EarlyRevenue => RiskAppetite::Moderate,
            Self::Growth | Self::SeriesAPlus => RiskAppetite::Conservative,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idea => "Idea Stage",
            Self::Mvp => "MVP Stage",
            Self::EarlyRevenue => "Early Revenue",
            Self::Growth => "Growth Stage",
            Self::SeriesAPlus => "Series A+",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Stage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "idea" | "ideastage" => Ok(Self::Idea),
            "mvp" | "mvpstage" => Ok(Self::Mvp),
            "earlyrevenue" => Ok(Self::EarlyRevenue),
            "growth" | "growthstage" => Ok(Self::Growth),
            "seriesa+" | "seriesaplus" | "seriesa" => Ok(Self::SeriesAPlus),
            _ => Err(ParseEnumError::InvalidValue("Stage", s.to_string())),
        }
    }
}

/// Admin review state of a founder profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    /// Awaiting review.
    #[default]
    Pending,
    /// Approved and visible to investors.
    Approved,
    /// Rejected by an admin.
    Rejected,
}

impl ApprovalStatus {
    /// Returns true if the profile is approved.
    #[inline]
    #[must_use]
    pub const fn is_approved(self) -> bool {
        matches!(self, Self::Approved)
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

impl FromStr for ApprovalStatus {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseEnumError::InvalidValue("ApprovalStatus", s.to_string())),
        }
    }
}

/// Investor risk tolerance, ordered from least to most risk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum RiskAppetite {
    /// Prefers later, de-risked companies.
    Conservative = 0,
    /// Balanced.
    Moderate = 1,
    /// Comfortable with idea-stage risk.
    Aggressive = 2,
}

impl RiskAppetite {
    /// Returns true if the levels are exactly one step apart.
    #[must_use]
    pub const fn is_adjacent_to(self, other: Self) -> bool {
        (self as u8).abs_diff(other as u8) == 1
    }
}

impl fmt::Display for RiskAppetite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Conservative => write!(f, "conservative"),
            Self::Moderate => write!(f, "moderate"),
            Self::Aggressive => write!(f, "aggressive"),
        }
    }
}

impl FromStr for RiskAppetite {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "conservative" | "low" => Ok(Self::Conservative),
            "moderate" | "medium" => Ok(Self::Moderate),
            "aggressive" | "high" => Ok(Self::Aggressive),
            _ => Err(ParseEnumError::InvalidValue("RiskAppetite", s.to_string())),
        }
    }
}

/// Where an investor prefers its startups to be located.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum GeographicPreference {
    /// Any location.
    #[default]
    NoPreference,
    /// Anywhere in India.
    National,
    /// Same city or region as the investor.
    Local,
}

impl fmt::Display for GeographicPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoPreference => write!(f, "no-preference"),
            Self::National => write!(f, "national"),
            Self::Local => write!(f, "local"),
        }
    }
}

impl FromStr for GeographicPreference {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "nopreference" | "any" | "" => Ok(Self::NoPreference),
            "national" => Ok(Self::National),
            "local" => Ok(Self::Local),
            _ => Err(ParseEnumError::InvalidValue(
                "GeographicPreference",
                s.to_string(),
            )),
        }
    }
}

/// Industry used to pick calculator benchmarks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Industry {
    /// Software as a service.
    #[serde(rename = "SaaS")]
    Saas,
    /// Online retail.
    #[serde(rename = "E-commerce")]
    ECommerce,
    /// Business services.
    #[serde(rename = "B2B Services")]
    B2bServices,
    /// Financial technology.
    #[serde(rename = "FinTech")]
    FinTech,
    /// Health technology.
    #[serde(rename = "HealthTech")]
    HealthTech,
    /// Education technology.
    #[serde(rename = "EdTech")]
    EdTech,
    /// Two-sided marketplace.
    #[serde(rename = "Marketplace")]
    Marketplace,
    /// Deep technology.
    #[serde(rename = "DeepTech")]
    DeepTech,
    /// Consumer application.
    #[serde(rename = "Consumer App")]
    ConsumerApp,
    /// Enterprise software.
    #[serde(rename = "Enterprise Software")]
    EnterpriseSoftware,
    /// Anything else.
    #[default]
    #[serde(rename = "Other")]
    Other,
}

impl Industry {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Saas => "SaaS",
            Self::ECommerce => "E-commerce",
            Self::B2bServices => "B2B Services",
            Self::FinTech => "FinTech",
            Self::HealthTech => "HealthTech",
            Self::EdTech => "EdTech",
            Self::Marketplace => "Marketplace",
            Self::DeepTech => "DeepTech",
            Self::ConsumerApp => "Consumer App",
            Self::EnterpriseSoftware => "Enterprise Software",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for Industry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Industry {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "saas" => Ok(Self::Saas),
            "ecommerce" => Ok(Self::ECommerce),
            "b2bservices" | "b2b" => Ok(Self::B2bServices),
            "fintech" => Ok(Self::FinTech),
            "healthtech" => Ok(Self::HealthTech),
            "edtech" => Ok(Self::EdTech),
            "marketplace" => Ok(Self::Marketplace),
            "deeptech" => Ok(Self::DeepTech),
            "consumerapp" | "consumer" => Ok(Self::ConsumerApp),
            "enterprisesoftware" | "enterprise" => Ok(Self::EnterpriseSoftware),
            "other" => Ok(Self::Other),
            _ => Err(ParseEnumError::InvalidValue("Industry", s.to_string())),
        }
    }
}

/// Funding round a company is raising.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
pub enum FundingStage {
    /// Pre-seed.
    #[serde(rename = "Pre-Seed")]
    PreSeed,
    /// Seed.
    #[serde(rename = "Seed")]
    Seed,
    /// Series A.
    #[serde(rename = "Series A")]
    SeriesA,
    /// Series B.
    #[serde(rename = "Series B")]
    SeriesB,
    /// Series C and later.
    #[serde(rename = "Series C+")]
    SeriesCPlus,
}

impl FundingStage {
    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PreSeed => "Pre-Seed",
            Self::Seed => "Seed",
            Self::SeriesA => "Series A",
            Self::SeriesB => "Series B",
            Self::SeriesCPlus => "Series C+",
        }
    }
}

impl fmt::Display for FundingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FundingStage {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "preseed" => Ok(Self::PreSeed),
            "seed" => Ok(Self::Seed),
            "seriesa" => Ok(Self::SeriesA),
            "seriesb" => Ok(Self::SeriesB),
            "seriesc" | "seriesc+" => Ok(Self::SeriesCPlus),
            _ => Err(ParseEnumError::InvalidValue("FundingStage", s.to_string())),
        }
    }
}
