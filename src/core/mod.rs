//! # Core Module
//!
//! Configuration, Discord limits and the embed model shared by every feature.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false

pub mod config;
pub mod embeds;
pub mod response;

// Re-export commonly used items
pub use config::Config;
pub use embeds::{EmbedSpec, EMBED_COLOR};
pub use response::{
    char_len, chunk_chars, split_at_char, truncate_chars, EMBED_DESCRIPTION_LIMIT,
    EMBED_FIELD_LIMIT, EMBED_MAX_FIELDS, EMBED_TITLE_LIMIT, MAX_RESPONSE_CHUNK_LENGTH,
};
