//! # Features Layer
//!
//! - `spark_engine`: completion client
//! - `replies`: Discord reply formatting and delivery helpers

pub mod replies;
pub mod spark_engine;

pub use replies::{format_reply, CommandType, ReplyOptions, ReplyPayload};
pub use spark_engine::{ask_question, CompletionResult, SparkEngine};
