//! Per-command handler implementations
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

pub mod spark;

use std::sync::Arc;

use super::handler::SlashCommandHandler;

/// Create all registered command handlers
pub fn create_all_handlers() -> Vec<Arc<dyn SlashCommandHandler>> {
    vec![Arc::new(spark::SparkHandler)]
}
