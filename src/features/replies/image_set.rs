//! Embeds for generated image sets
//!
//! Images arrive as data URIs (`data:image/jpeg;base64,<payload>`). Each one
//! becomes an attachment plus an embed pointing at it.

use anyhow::{anyhow, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine as _;
use log::warn;

use super::formatter::{ReplyFile, ReplyPayload};
use crate::core::embeds::{EmbedSpec, EMBED_COLOR};
use crate::core::response::{truncate_chars, EMBED_TITLE_LIMIT};

/// Shared link so Discord groups the embeds into one gallery
pub const GALLERY_URL: &str = "https://sparkengine.ai";

pub const NO_IMAGE_PLACEHOLDER: &str = "Image didn't generate for this prompt 😔";
pub const INVALID_IMAGE_PLACEHOLDER: &str = "Invalid image format, skipping this image.";

/// Standard alphabet; trailing `=` padding is optional
const DATA_URI_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Decode the payload part of a `"<meta>,<base64>"` data URI
fn decode_data_uri(image: &str) -> Option<Vec<u8>> {
    let payload = image.split(',').nth(1)?;
    DATA_URI_ENGINE.decode(payload.trim()).ok()
}

fn attachment_name(index: usize) -> String {
    format!("result{index}.jpg")
}

/// One embed and attachment per image; malformed entries get a placeholder embed.
pub fn image_set_reply(author: &str, prompt: &str, images: &[String]) -> ReplyPayload {
    let title = truncate_chars(prompt, EMBED_TITLE_LIMIT);
    if images.is_empty() {
        return ReplyPayload::embed(
            EmbedSpec::styled(author, title).description(NO_IMAGE_PLACEHOLDER),
        );
    }

    let mut embeds = Vec::with_capacity(images.len());
    let mut files = Vec::new();

    for (i, image) in images.iter().enumerate() {
        let Some(data) = decode_data_uri(image) else {
            warn!("Skipping malformed image #{i} for prompt '{title}'");
            embeds.push(EmbedSpec::styled(author, title).description(INVALID_IMAGE_PLACEHOLDER));
            continue;
        };

        let filename = attachment_name(i);
        let mut embed = EmbedSpec::default().url(GALLERY_URL);
        if i == 0 {
            embed.color = Some(EMBED_COLOR);
            embed.author = Some(author.to_string());
            embed.title = Some(title.to_string());
        }
        embeds.push(embed.image(format!("attachment://{filename}")));
        files.push(ReplyFile { filename, data });
    }

    ReplyPayload::Embeds { embeds, files }
}

/// Embed for an image remixed from another user's generation
pub fn remix_reply(author: &str, remixed_from: &str, prompt: &str, image: &str) -> Result<ReplyPayload> {
    let data = decode_data_uri(image).ok_or_else(|| anyhow!("Remix image is not a base64 data URI"))?;
    let filename = attachment_name(0);

    let embed = EmbedSpec::styled(
        &format!("{author} remixed {remixed_from}"),
        truncate_chars(prompt, EMBED_TITLE_LIMIT),
    )
    .image(format!("attachment://{filename}"));

    Ok(ReplyPayload::Embeds {
        embeds: vec![embed],
        files: vec![ReplyFile { filename, data }],
    })
}
