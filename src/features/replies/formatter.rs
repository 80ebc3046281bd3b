//! Reply formatter for slash command answers
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Media embeds for image/video, field-split text embeds, plain/file fallback

use log::debug;
use regex::Regex;
use std::sync::OnceLock;

use super::command_type::CommandType;
use crate::core::embeds::EmbedSpec;
use crate::core::response::{
    char_len, chunk_chars, split_at_char, truncate_chars, EMBED_DESCRIPTION_LIMIT,
    EMBED_FIELD_LIMIT, EMBED_MAX_FIELDS, EMBED_TITLE_LIMIT, MAX_RESPONSE_CHUNK_LENGTH,
};

pub const IMAGE_PLACEHOLDER: &str = "Image generated";
pub const VIDEO_PLACEHOLDER: &str = "Video generated";
pub const EMPTY_RESPONSE_PLACEHOLDER: &str = "No valid response received.";
pub const RESPONSE_FILENAME: &str = "response.txt";

/// Discord's cap on the combined text of one embed
const EMBED_TOTAL_LIMIT: usize = 6000;

static URL_PATTERN: OnceLock<Option<Regex>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyOptions {
    pub use_embed: bool,
}

impl Default for ReplyOptions {
    fn default() -> Self {
        Self { use_embed: true }
    }
}

/// An in-memory attachment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplyFile {
    pub filename: String,
    pub data: Vec<u8>,
}

/// Transport-ready reply, built once per command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyPayload {
    /// Embeds plus the attachments they reference via `attachment://`
    Embeds {
        embeds: Vec<EmbedSpec>,
        files: Vec<ReplyFile>,
    },
    Text(String),
    File(ReplyFile),
}

impl ReplyPayload {
    pub fn embed(embed: EmbedSpec) -> Self {
        ReplyPayload::Embeds {
            embeds: vec![embed],
            files: Vec::new(),
        }
    }
}

/// First `http(s)://` URL in `text`
pub fn extract_url(text: &str) -> Option<&str> {
    let pattern = URL_PATTERN
        .get_or_init(|| Regex::new(r"https?://\S+").ok())
        .as_ref()?;
    pattern.find(text).map(|m| m.as_str())
}

/// Format the engine's answer for the interaction reply
pub fn format_reply(
    options: ReplyOptions,
    author: &str,
    question: &str,
    command: CommandType,
    text: &str,
) -> ReplyPayload {
    if !options.use_embed {
        return plain_reply(text);
    }

    let title = truncate_chars(question, EMBED_TITLE_LIMIT);
    let embed = match command {
        CommandType::Image => {
            media_embed(author, title, text, IMAGE_PLACEHOLDER, |e, url| e.image(url))
        }
        CommandType::Video => {
            media_embed(author, title, text, VIDEO_PLACEHOLDER, |e, url| e.url(url))
        }
        CommandType::Chat | CommandType::Search | CommandType::Docs | CommandType::Music => {
            text_embed(author, title, text)
        }
    };

    let total = embed.text_len();
    if total > EMBED_TOTAL_LIMIT {
        debug!("Embed text is {total} characters, above Discord's {EMBED_TOTAL_LIMIT} total");
    }
    ReplyPayload::embed(embed)
}

/// Inline text, or a text file once the answer reaches the chunk threshold
fn plain_reply(text: &str) -> ReplyPayload {
    if char_len(text) >= MAX_RESPONSE_CHUNK_LENGTH {
        ReplyPayload::File(ReplyFile {
            filename: RESPONSE_FILENAME.to_string(),
            data: text.as_bytes().to_vec(),
        })
    } else {
        ReplyPayload::Text(text.to_string())
    }
}

/// Embed whose media is the first URL in the answer; the rest is the description
fn media_embed(
    author: &str,
    title: &str,
    text: &str,
    placeholder: &str,
    attach: fn(EmbedSpec, &str) -> EmbedSpec,
) -> EmbedSpec {
    let url = extract_url(text);
    let stripped = match url {
        Some(url) => text.replacen(url, "", 1),
        None => text.to_string(),
    };
    let description = match stripped.trim() {
        "" => placeholder,
        rest => truncate_chars(rest, EMBED_DESCRIPTION_LIMIT),
    };

    let embed = EmbedSpec::styled(author, title).description(description);
    match url {
        Some(url) => attach(embed, url),
        None => embed,
    }
}

/// Description holds the first 4096 characters, then up to ten 1024-character
/// fields. Anything past that is dropped.
fn text_embed(author: &str, title: &str, text: &str) -> EmbedSpec {
    if text.is_empty() {
        return EmbedSpec::styled(author, title).description(EMPTY_RESPONSE_PLACEHOLDER);
    }

    let (head, rest) = split_at_char(text, EMBED_DESCRIPTION_LIMIT);
    let mut embed = EmbedSpec::styled(author, title).description(head);
    embed.fields = chunk_chars(rest, EMBED_FIELD_LIMIT)
        .into_iter()
        .take(EMBED_MAX_FIELDS)
        .map(str::to_string)
        .collect();

    let kept = char_len(head) + embed.fields.iter().map(|f| char_len(f)).sum::<usize>();
    let dropped = char_len(text) - kept;
    if dropped > 0 {
        debug!("Answer exceeds embed capacity, {dropped} characters not shown");
    }
    embed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn embed_of(payload: ReplyPayload) -> EmbedSpec {
        match payload {
            ReplyPayload::Embeds { mut embeds, files } => {
                assert_eq!(embeds.len(), 1);
                assert!(files.is_empty());
                embeds.remove(0)
            }
            other => panic!("expected an embed, got {other:?}"),
        }
    }

    fn format_embed(command: CommandType, text: &str) -> EmbedSpec {
        embed_of(format_reply(ReplyOptions::default(), "alice", "question", command, text))
    }

    #[test]
    fn test_extract_url() {
        assert_eq!(
            extract_url("here: https://x.com/a generated"),
            Some("https://x.com/a")
        );
        assert_eq!(extract_url("see http://a.b/c?d=1\nnext"), Some("http://a.b/c?d=1"));
        assert_eq!(extract_url("no links here"), None);
    }

    #[test]
    fn test_image_embed_uses_url_as_image() {
        let embed = format_embed(CommandType::Image, "here: https://x.com/a generated");
        assert_eq!(embed.description.as_deref(), Some("here:  generated"));
        assert_eq!(embed.image.as_deref(), Some("https://x.com/a"));
        assert!(embed.url.is_none());
    }

    #[test]
    fn test_video_embed_uses_url_as_link() {
        let embed = format_embed(CommandType::Video, "https://cdn.example/v.mp4");
        assert_eq!(embed.description.as_deref(), Some(VIDEO_PLACEHOLDER));
        assert_eq!(embed.url.as_deref(), Some("https://cdn.example/v.mp4"));
        assert!(embed.image.is_none());
    }

    #[test]
    fn test_image_embed_without_url() {
        let embed = format_embed(CommandType::Image, "   ");
        assert_eq!(embed.description.as_deref(), Some(IMAGE_PLACEHOLDER));
        assert!(embed.image.is_none());
    }

    #[test]
    fn test_chat_embed_short() {
        let embed = format_embed(CommandType::Chat, "Hello there");
        assert_eq!(embed.author.as_deref(), Some("alice"));
        assert_eq!(embed.title.as_deref(), Some("question"));
        assert_eq!(embed.description.as_deref(), Some("Hello there"));
        assert!(embed.fields.is_empty());
    }

    #[test]
    fn test_chat_embed_5000_chars() {
        let text = "a".repeat(5000);
        let embed = format_embed(CommandType::Chat, &text);
        assert_eq!(char_len(embed.description.as_deref().unwrap()), 4096);
        assert_eq!(embed.fields.len(), 1);
        assert_eq!(char_len(&embed.fields[0]), 904);
    }

    #[test]
    fn test_chat_embed_12000_chars_fits_in_eight_fields() {
        let text: String = (0..12000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let embed = format_embed(CommandType::Search, &text);
        assert_eq!(char_len(embed.description.as_deref().unwrap()), 4096);
        assert_eq!(embed.fields.len(), 8);
        assert!(embed.fields[..7].iter().all(|f| char_len(f) == 1024));
        assert_eq!(char_len(&embed.fields[7]), 736);

        let shown: String = std::iter::once(embed.description.clone().unwrap())
            .chain(embed.fields.iter().cloned())
            .collect();
        assert_eq!(shown, text);
    }

    #[test]
    fn test_chat_embed_drops_beyond_capacity() {
        let text: String = (0..16000).map(|i| char::from(b'a' + (i % 26) as u8)).collect();
        let embed = format_embed(CommandType::Docs, &text);
        assert_eq!(char_len(embed.description.as_deref().unwrap()), 4096);
        assert_eq!(embed.fields.len(), EMBED_MAX_FIELDS);
        assert!(embed.fields.iter().all(|f| char_len(f) == 1024));

        let shown: String = std::iter::once(embed.description.clone().unwrap())
            .chain(embed.fields.iter().cloned())
            .collect();
        assert_eq!(shown.len(), 14336);
        assert_eq!(shown, text[..14336]);
        assert_eq!(text.len() - shown.len(), 1664);
    }

    #[test]
    fn test_empty_chat_embed_placeholder() {
        let embed = format_embed(CommandType::Chat, "");
        assert_eq!(embed.description.as_deref(), Some(EMPTY_RESPONSE_PLACEHOLDER));
    }

    #[test]
    fn test_music_uses_text_embed() {
        let embed = format_embed(CommandType::Music, "https://x.com/song.mp3");
        assert_eq!(embed.description.as_deref(), Some("https://x.com/song.mp3"));
        assert!(embed.image.is_none());
    }

    #[test]
    fn test_long_title_truncated() {
        let question = "q".repeat(300);
        let embed = embed_of(format_reply(
            ReplyOptions::default(),
            "alice",
            &question,
            CommandType::Chat,
            "ok",
        ));
        assert_eq!(char_len(embed.title.as_deref().unwrap()), EMBED_TITLE_LIMIT);
    }

    #[test]
    fn test_plain_mode_inline() {
        let options = ReplyOptions { use_embed: false };
        let payload = format_reply(options, "alice", "q", CommandType::Chat, "short answer");
        assert_eq!(payload, ReplyPayload::Text("short answer".to_string()));
    }

    #[test]
    fn test_plain_mode_file_at_threshold() {
        let options = ReplyOptions { use_embed: false };
        let text = "x".repeat(MAX_RESPONSE_CHUNK_LENGTH);
        match format_reply(options, "alice", "q", CommandType::Image, &text) {
            ReplyPayload::File(file) => {
                assert_eq!(file.filename, RESPONSE_FILENAME);
                assert_eq!(file.data, text.as_bytes());
            }
            other => panic!("expected a file, got {other:?}"),
        }
    }

    #[test]
    fn test_plain_mode_just_below_threshold() {
        let options = ReplyOptions { use_embed: false };
        let text = "x".repeat(MAX_RESPONSE_CHUNK_LENGTH - 1);
        assert!(matches!(
            format_reply(options, "alice", "q", CommandType::Chat, &text),
            ReplyPayload::Text(_)
        ));
    }
}
