//! # Domain Layer
//!
//! Pure business rules with no I/O.
//!
//! - [`value_objects`]: identifiers, enums, amounts and checked arithmetic
//! - [`entities`]: startup, investor and deal records plus match results
//! - [`services`]: scoring, the Section 42 counter and the calculators
//! - [`errors`]: [`DomainError`](errors::DomainError)

pub mod entities;
pub mod errors;
pub mod services;
pub mod value_objects;
