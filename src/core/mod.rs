//! # Core Module
//!
//! Configuration, error taxonomy, currency normalization and reply helpers
//! for the treasury bot.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add currency module with Decimal normalization
//! - 1.0.0: Initial creation with config and errors

pub mod config;
pub mod currency;
pub mod errors;
pub mod reply;

// Re-export commonly used items
pub use config::Config;
pub use currency::{format_euros, parse_amount};
pub use errors::{AuthorizationError, LoadError, ParseError, ServiceError};
pub use reply::{bold, italic};
