//! # Persistence Layer
//!
//! Repository ports and adapters.
//!
//! ## Repository Traits (Ports)
//!
//! - [`StartupRepository`]: Startup profiles
//! - [`InvestorRepository`]: Investor profiles and preferences
//! - [`DealRepository`]: Deals and investor counts
//!
//! ## Implementations
//!
//! - `in_memory`: In-memory implementations for testing and the demo server

pub mod in_memory;
pub mod traits;

pub use traits::{
    DealRepository, InvestorRepository, RepositoryError, RepositoryResult, StartupRepository,
};
