//! # Scribe Core
//!
//! The domain layer of the scribe blog backend.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod workflow;

pub use error::StoreError;
