//! # Value Objects
//!
//! Immutable types with validation and domain semantics.
//!
//! ## Identity Types
//!
//! - [`StartupId`], [`InvestorId`], [`DealId`]: UUID-based identifiers
//!
//! ## Numeric Types
//!
//! - [`amount`]: Rupee amount parsing (`₹5Cr`, `50L`) and display
//! - [`ArithmeticError`], [`CheckedArithmetic`]: Checked decimal arithmetic
//!
//! ## Domain Enums
//!
//! - [`Sector`], [`Stage`], [`ApprovalStatus`]: Startup profile attributes
//! - [`RiskAppetite`], [`GeographicPreference`]: Investor preference attributes
//! - [`Industry`], [`FundingStage`]: Calculator inputs

pub mod amount;
pub mod arithmetic;
pub mod enums;
pub mod ids;

pub use amount::{AmountParseError, format_inr, parse_amount};
pub use arithmetic::{ArithmeticError, ArithmeticResult, CheckedArithmetic};
pub use enums::{
    ApprovalStatus, FundingStage, GeographicPreference, Industry, ParseEnumError, RiskAppetite,
    Sector, SectorFamily, Stage,
};
pub use ids::{DealId, InvestorId, StartupId};
