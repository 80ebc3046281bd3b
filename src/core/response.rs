//! Discord length limits and character-safe slicing
//!
//! Discord counts characters, not bytes, so every limit here is measured in
//! Unicode scalar values and no split ever lands inside a character.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Fixed-size chunking and truncation helpers for replies

/// Discord embed description limit
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
/// Discord embed field value limit
pub const EMBED_FIELD_LIMIT: usize = 1024;
/// Extra fields appended after the description before the rest is dropped
pub const EMBED_MAX_FIELDS: usize = 10;
/// Discord embed title limit
pub const EMBED_TITLE_LIMIT: usize = 256;
/// Chunk size for direct messages, and the inline/file cutoff in plain mode
pub const MAX_RESPONSE_CHUNK_LENGTH: usize = 1500;

/// Length of `text` in characters
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Split `text` after `n` characters (or at the end if it is shorter)
pub fn split_at_char(text: &str, n: usize) -> (&str, &str) {
    match text.char_indices().nth(n) {
        Some((idx, _)) => text.split_at(idx),
        None => (text, ""),
    }
}

/// First `n` characters of `text`
pub fn truncate_chars(text: &str, n: usize) -> &str {
    split_at_char(text, n).0
}

/// Split text into consecutive pieces of at most `size` characters.
///
/// Unlike line-aware chunking this keeps every piece full except the last,
/// so the pieces concatenate back to the input exactly.
pub fn chunk_chars(text: &str, size: usize) -> Vec<&str> {
    let mut chunks = Vec::new();
    if size == 0 {
        return chunks;
    }
    let mut rest = text;
    while !rest.is_empty() {
        let (head, tail) = split_at_char(rest, size);
        chunks.push(head);
        rest = tail;
    }
    chunks
}
