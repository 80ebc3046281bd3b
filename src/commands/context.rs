//! Shared context for command handlers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use crate::core::Config;
use crate::features::replies::ReplyOptions;
use crate::features::spark_engine::SparkEngine;

/// Services every command handler needs.
///
/// Immutable after startup; handlers share it through an `Arc`.
#[derive(Clone, Debug)]
pub struct CommandContext {
    pub engine: SparkEngine,
    pub reply_options: ReplyOptions,
}

impl CommandContext {
    pub fn new(engine: SparkEngine, reply_options: ReplyOptions) -> Self {
        Self {
            engine,
            reply_options,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            SparkEngine::from_config(config),
            ReplyOptions {
                use_embed: config.use_embed,
            },
        )
    }
}
