//! Per-command handler implementations
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.4.0
//!
//! ## Changelog
//! - 1.1.0: Add PingHandler (ping, ping_add, ping_remove, ping_adjust_time)
//! - 1.0.0: Initial extraction into OweHandler, BreakdownHandler, UtilityHandler

pub mod breakdown;
pub mod owe;
pub mod ping;
pub mod utility;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
///
/// Returns a vector of handlers ready to be registered with CommandRegistry.
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![
        Arc::new(owe::OweHandler),
        Arc::new(breakdown::BreakdownHandler),
        Arc::new(utility::UtilityHandler),
        Arc::new(ping::PingHandler),
    ]
}
