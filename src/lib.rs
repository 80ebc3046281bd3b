// Core layer - configuration, Discord limits, embed model
pub mod core;

// Features layer - completion client and reply formatting
pub mod features;

// Application layer
pub mod commands;

// Re-export core config for convenience
pub use core::Config;

// Re-export feature items
pub use features::{
    ask_question, format_reply, CommandType, CompletionResult, ReplyOptions, ReplyPayload,
    SparkEngine,
};
