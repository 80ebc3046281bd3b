//! Spark Engine command handler
//!
//! Handles: chat, video, search, image, music, docs
//!
//! - **Version**: 1.0.0
//! - **Since**: 1.0.0

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use serenity::http::Http;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::channel::AttachmentType;
use serenity::prelude::Context;
use std::borrow::Cow;
use std::sync::Arc;
use std::time::Instant;
use uuid::Uuid;

use crate::commands::context::CommandContext;
use crate::commands::handler::SlashCommandHandler;
use crate::commands::slash::get_string_option;
use crate::features::replies::{format_reply, CommandType, ReplyFile, ReplyPayload};
use crate::features::spark_engine::ask_question;

/// Handler for every Spark Engine backed command
pub struct SparkHandler;

#[async_trait]
impl SlashCommandHandler for SparkHandler {
    fn command_names(&self) -> &'static [&'static str] {
        &["chat", "video", "search", "image", "music", "docs"]
    }

    async fn handle(
        &self,
        ctx: Arc<CommandContext>,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let command_type = CommandType::parse(&command.data.name)
            .ok_or_else(|| anyhow!("Unsupported command: {}", command.data.name))?;
        self.handle_question(&ctx, serenity_ctx, command, command_type, request_id)
            .await
    }
}

impl SparkHandler {
    /// Defer, ask the engine, then edit the deferred reply with the formatted answer
    async fn handle_question(
        &self,
        ctx: &CommandContext,
        serenity_ctx: &Context,
        command: &ApplicationCommandInteraction,
        command_type: CommandType,
        request_id: Uuid,
    ) -> Result<()> {
        let start_time = Instant::now();

        let option = command_type.option_name();
        let question = get_string_option(&command.data.options, option)
            .ok_or_else(|| anyhow!("Missing {option} argument"))?;

        info!(
            "[{request_id}] /{command_type} command | User: {} | Prompt length: {}",
            command.user.id,
            question.len()
        );

        command
            .create_interaction_response(&serenity_ctx.http, |r| {
                r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
            })
            .await
            .map_err(|e| {
                error!("[{request_id}] Failed to defer interaction: {e}");
                anyhow!("Failed to defer interaction: {e}")
            })?;

        let answer = ask_question(&ctx.engine, &question, command_type).await;
        debug!(
            "[{request_id}] Answer received | Time: {:?} | Length: {}",
            start_time.elapsed(),
            answer.len()
        );

        let payload = format_reply(
            ctx.reply_options,
            &command.user.name,
            &question,
            command_type,
            &answer,
        );

        // Delivery failures end here: the user already sees the deferred reply.
        match deliver(&serenity_ctx.http, command, payload).await {
            Ok(()) => info!(
                "[{request_id}] /{command_type} response sent | Total time: {:?}",
                start_time.elapsed()
            ),
            Err(e) => warn!("[{request_id}] Failed to deliver /{command_type} response: {e}"),
        }

        Ok(())
    }
}

fn attachment(file: ReplyFile) -> AttachmentType<'static> {
    AttachmentType::Bytes {
        data: Cow::Owned(file.data),
        filename: file.filename,
    }
}

/// Send a formatted reply for a deferred interaction.
///
/// Payloads with attachments go out as a follow-up, which Discord uses to
/// replace the deferred "thinking" message.
async fn deliver(
    http: &Arc<Http>,
    command: &ApplicationCommandInteraction,
    payload: ReplyPayload,
) -> Result<()> {
    match payload {
        ReplyPayload::Embeds { embeds, files } if files.is_empty() => {
            command
                .edit_original_interaction_response(http, |r| {
                    for embed in &embeds {
                        r.add_embed(embed.to_create_embed());
                    }
                    r
                })
                .await?;
        }
        ReplyPayload::Embeds { embeds, files } => {
            command
                .create_followup_message(http, |m| {
                    for embed in &embeds {
                        m.add_embed(embed.to_create_embed());
                    }
                    for file in files {
                        m.add_file(attachment(file));
                    }
                    m
                })
                .await?;
        }
        ReplyPayload::Text(content) => {
            command
                .edit_original_interaction_response(http, |r| r.content(content))
                .await?;
        }
        ReplyPayload::File(file) => {
            command
                .create_followup_message(http, |m| m.add_file(attachment(file)))
                .await?;
        }
    }
    Ok(())
}
