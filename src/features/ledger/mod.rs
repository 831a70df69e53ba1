//! # Feature: Ledger
//!
//! Loads the club's finances from the published spreadsheet CSV and turns
//! rows into typed `Person` records, classified by balance sign.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Decimal balances, per-row parse errors surfaced to callers
//! - 1.1.0: Deterministic footer-row drop
//! - 1.0.0: Initial CSV loader and sign classifier

pub mod loader;
pub mod person;

pub use loader::{load_people, parse_people, LedgerSource, SheetLedger, FOOTER_ROWS};
pub use person::{classify, lookup, Person};
