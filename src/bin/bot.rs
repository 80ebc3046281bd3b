use anyhow::Result;
use dotenvy::dotenv;
use log::{error, info, warn};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use spark_bot::commands::{
    register_global_commands, register_guild_commands, CommandContext, CommandRegistry,
};
use spark_bot::core::Config;

struct Handler {
    registry: CommandRegistry,
    context: Arc<CommandContext>,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(registry: CommandRegistry, context: CommandContext, guild_id: Option<GuildId>) -> Self {
        Handler {
            registry,
            context: Arc::new(context),
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Register slash commands - use guild commands for development (instant), global for production
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands for guild {guild_id}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            } else {
                info!("✅ Successfully registered slash commands globally (may take up to 1 hour to propagate)");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        let Interaction::ApplicationCommand(command) = interaction else {
            return;
        };

        if let Err(e) = self
            .registry
            .dispatch(Arc::clone(&self.context), &ctx, &command)
            .await
        {
            error!(
                "Error handling slash command '{}': {:#}",
                command.data.name, e
            );

            let error_message =
                "❌ Sorry, I encountered an error processing your command. Please try again.";

            // Try to edit the deferred response, fallback to new response if that fails
            if command
                .edit_original_interaction_response(&ctx.http, |response| {
                    response.content(error_message)
                })
                .await
                .is_err()
            {
                if let Err(why) = command
                    .create_interaction_response(&ctx.http, |response| {
                        response
                            .kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|message| message.content(error_message))
                    })
                    .await
                {
                    warn!("Failed to report command error to user: {why}");
                }
            }
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    let config = Config::from_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    info!("Starting Spark Engine Discord Bot...");
    info!(
        "Settings | MAX_TOKEN: {} | USE_EMBED: {} | Custom system prompt: {}",
        config.max_token,
        config.use_embed,
        config.conversation_start_prompt.is_some()
    );

    let context = CommandContext::from_config(&config);
    let registry = CommandRegistry::with_default_handlers();
    let handler = Handler::new(registry, context, config.discord_guild_id.map(GuildId));

    // Slash commands arrive as interactions; no privileged intents are needed
    let intents = GatewayIntents::GUILDS | GatewayIntents::DIRECT_MESSAGES;

    let mut builder = Client::builder(&config.discord_token, intents).event_handler(handler);
    if let Some(application_id) = config.discord_client_id {
        builder = builder.application_id(application_id);
    }

    let mut client = builder.await.map_err(|e| {
        error!("Failed to create Discord client: {e}");
        error!("This could indicate:");
        error!("  - Invalid bot token format");
        error!("  - Network issues reaching Discord API");
        anyhow::anyhow!("Client creation failed: {}", e)
    })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
