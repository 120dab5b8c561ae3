//! # Infrastructure Layer
//!
//! Adapters behind the application's ports.

pub mod persistence;
