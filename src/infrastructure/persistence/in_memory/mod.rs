//! # In-Memory Repositories
//!
//! In-memory implementations for testing without database dependencies.
//!
//! ## Available Repositories
//!
//! - [`InMemoryStartupRepository`]: Startup profiles
//! - [`InMemoryInvestorRepository`]: Investor profiles and preferences
//! - [`InMemoryDealRepository`]: Deals and investor counts
//!
//! ## Thread Safety
//!
//! All implementations use `Arc<RwLock<HashMap>>` for thread-safe access.

pub mod deal_repository;
pub mod investor_repository;
pub mod startup_repository;

pub use deal_repository::InMemoryDealRepository;
pub use investor_repository::InMemoryInvestorRepository;
pub use startup_repository::InMemoryStartupRepository;
