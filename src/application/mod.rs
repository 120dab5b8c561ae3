//! # Application Layer
//!
//! Configuration, errors and the services the REST layer calls.

pub mod config;
pub mod error;
pub mod services;
