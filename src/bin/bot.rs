use anyhow::Result;
use dotenvy::dotenv;
use log::{debug, error, info};
use serenity::async_trait;
use serenity::model::application::interaction::{Interaction, InteractionResponseType};
use serenity::model::channel::Message;
use serenity::model::gateway::Ready;
use serenity::model::id::GuildId;
use serenity::prelude::*;
use std::sync::Arc;

use passph::commands::{register_global_commands, register_guild_commands};
use passph::conversation::{replies, ConversationController};
use passph::core::Config;
use passph::features::{UserConfigStore, WordlistRegistry};
use passph::message_components::MessageComponentHandler;
use passph::storage;

struct Handler {
    component_handler: Arc<MessageComponentHandler>,
    guild_id: Option<GuildId>,
}

impl Handler {
    fn new(component_handler: MessageComponentHandler, guild_id: Option<GuildId>) -> Self {
        Handler {
            component_handler: Arc::new(component_handler),
            guild_id,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn message(&self, ctx: Context, msg: Message) {
        if msg.author.bot {
            return;
        }

        // Free text only makes sense in a private conversation
        if msg.guild_id.is_some() {
            return;
        }

        // Attachments, stickers and embeds arrive with empty content
        if msg.content.is_empty() {
            debug!("Ignoring non-text direct message from {}", msg.author.id);
            return;
        }

        if let Err(e) = self
            .component_handler
            .handle_direct_message(&ctx, msg.channel_id, msg.author.id.0, &msg.content)
            .await
        {
            error!("Error handling direct message: {e}");
            if let Err(why) = msg.channel_id.say(&ctx.http, replies::SERVER_ERROR).await {
                error!("Failed to send error message: {why}");
            }
        }
    }

    async fn ready(&self, ctx: Context, ready: Ready) {
        info!("🎉 {} is connected and ready!", ready.user.name);
        info!("📡 Connected to {} guilds", ready.guilds.len());
        info!("🤖 Bot ID: {}", ready.user.id);

        // Guild commands update instantly, global ones can take an hour
        if let Some(guild_id) = self.guild_id {
            info!("🔧 Development mode: Registering commands for guild {guild_id}");
            if let Err(e) = register_guild_commands(&ctx, guild_id).await {
                error!("❌ Failed to register guild slash commands: {e}");
            }
        } else {
            info!("🌍 Production mode: Registering commands globally");
            if let Err(e) = register_global_commands(&ctx).await {
                error!("❌ Failed to register global slash commands: {e}");
            }
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::ApplicationCommand(command) => {
                if let Err(e) = self
                    .component_handler
                    .handle_command_interaction(&ctx, &command)
                    .await
                {
                    error!("Error handling slash command '{}': {}", command.data.name, e);

                    let _ = command
                        .create_interaction_response(&ctx.http, |response| {
                            response
                                .kind(InteractionResponseType::ChannelMessageWithSource)
                                .interaction_response_data(|message| {
                                    message.content(replies::SERVER_ERROR).ephemeral(true)
                                })
                        })
                        .await;
                }
            }
            Interaction::MessageComponent(component) => {
                if let Err(e) = self
                    .component_handler
                    .handle_component_interaction(&ctx, &component)
                    .await
                {
                    error!(
                        "Error handling component interaction '{}': {}",
                        component.data.custom_id, e
                    );

                    let _ = component
                        .create_followup_message(&ctx.http, |message| {
                            message.content(replies::SERVER_ERROR).ephemeral(true)
                        })
                        .await;
                }
            }
            _ => {}
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

    info!("Starting passph Discord bot...");
    debug!("{config:?}");

    // Every wordlist must load before we accept a single event
    let registry = WordlistRegistry::load(&config.wordlist_base_url, config.wordlist_timeout)
        .await
        .map_err(|e| {
            error!("❌ Wordlists failed to load: {e}");
            anyhow::anyhow!("Wordlist loading failed: {}", e)
        })?;
    info!("📚 {} wordlists ready", registry.len());

    let backend = storage::connect(
        &config.redis_url,
        config.redis_pool_size,
        config.redis_timeout,
    )
    .await
    .map_err(|e| {
        error!(
            "❌ Can't reach key-value backend at {}: {e}",
            config.redis_url_redacted()
        );
        anyhow::anyhow!("Key-value backend unavailable: {}", e)
    })?;

    let controller = Arc::new(ConversationController::new(
        Arc::new(registry),
        UserConfigStore::new(backend),
    ));
    let component_handler = MessageComponentHandler::new(controller);

    let guild_id = config.discord_guild_id.map(GuildId);
    let handler = Handler::new(component_handler, guild_id);

    let intents = GatewayIntents::DIRECT_MESSAGES | GatewayIntents::MESSAGE_CONTENT;

    let mut client = Client::builder(&config.discord_token, intents)
        .event_handler(handler)
        .await
        .map_err(|e| {
            error!("Failed to create Discord client: {e}");
            anyhow::anyhow!("Client creation failed: {}", e)
        })?;

    info!("Bot configured successfully. Connecting to Discord gateway...");
    info!("Gateway intents: {intents:?}");

    if let Err(why) = client.start().await {
        error!("Gateway connection failed: {why:?}");
        return Err(anyhow::anyhow!(
            "Failed to establish gateway connection: {}",
            why
        ));
    }

    Ok(())
}
