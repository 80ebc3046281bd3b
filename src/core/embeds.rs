//! Embed model for Discord replies
//!
//! Formatters produce plain [`EmbedSpec`] values so the output can be
//! inspected; serenity's `CreateEmbed` is only built at the delivery edge.
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0
//!
//! ## Changelog
//! - 1.0.0: Initial embed model with serenity conversion

use serenity::builder::CreateEmbed;

/// Accent colour for every bot embed
pub const EMBED_COLOR: u32 = 0x0099FF;

/// Discord rejects empty field names, so supplementary fields use this
pub const BLANK_FIELD_NAME: &str = "\u{200b}";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EmbedSpec {
    pub color: Option<u32>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Values of unnamed, non-inline fields in display order
    pub fields: Vec<String>,
    pub image: Option<String>,
    pub url: Option<String>,
}

impl EmbedSpec {
    /// Styled embed: accent colour, author and title
    pub fn styled(author: &str, title: &str) -> Self {
        Self {
            color: Some(EMBED_COLOR),
            author: Some(author.to_string()),
            title: Some(title.to_string()),
            ..Self::default()
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn image(mut self, url: impl Into<String>) -> Self {
        self.image = Some(url.into());
        self
    }

    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Total characters of text content, as Discord measures it
    pub fn text_len(&self) -> usize {
        let len = |s: &Option<String>| s.as_deref().map_or(0, |s| s.chars().count());
        len(&self.title)
            + len(&self.description)
            + len(&self.author)
            + self.fields.iter().map(|f| f.chars().count()).sum::<usize>()
    }

    /// Build the serenity embed
    pub fn to_create_embed(&self) -> CreateEmbed {
        let mut embed = CreateEmbed::default();
        if let Some(color) = self.color {
            embed.color(color);
        }
        if let Some(author) = &self.author {
            embed.author(|a| a.name(author));
        }
        if let Some(title) = &self.title {
            embed.title(title);
        }
        if let Some(description) = &self.description {
            embed.description(description);
        }
        for value in &self.fields {
            embed.field(BLANK_FIELD_NAME, value, false);
        }
        if let Some(image) = &self.image {
            embed.image(image);
        }
        if let Some(url) = &self.url {
            embed.url(url);
        }
        embed
    }
}
