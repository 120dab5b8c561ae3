//! # API Layer
//!
//! External interfaces. Only REST is exposed.

pub mod rest;
