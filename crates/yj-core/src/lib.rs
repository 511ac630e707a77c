//! Core types for yjnorm
//!
//! Shared error type and parameter bundles used by the yjnorm crates.

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::YeoJohnsonParams;
