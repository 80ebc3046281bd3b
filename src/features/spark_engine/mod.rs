//! # Spark Engine Feature
//!
//! Completion client for the Spark Engine API: token gate, request shaping
//! and normalization of the engine's response shapes.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod client;
pub mod tokens;
pub mod wire;

pub use client::{ask_question, CompletionResult, SparkEngine};
pub use tokens::count_tokens;
pub use wire::{EngineReply, OutputItem};
