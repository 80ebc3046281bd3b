//! # Replies Feature
//!
//! Turns engine text into Discord replies: embeds with media, plain text or
//! file fallbacks, image sets, and chunked direct messages.
//!
//! - **Version**: 1.1.0
//! - **Since**: 1.0.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Add remix embeds and DM chunk sender
//! - 1.0.0: Initial release with embed/plain formatter and image sets

pub mod command_type;
pub mod direct;
pub mod formatter;
pub mod image_set;

pub use command_type::CommandType;
pub use direct::{split_and_send, DirectMessenger, UserDirectMessenger};
pub use formatter::{extract_url, format_reply, ReplyFile, ReplyOptions, ReplyPayload};
pub use image_set::{image_set_reply, remix_reply};
