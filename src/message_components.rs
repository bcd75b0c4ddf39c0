//! Discord rendering of conversation responses
//!
//! Buttons carry the conversation payload as their custom id, so a click is
//! fed straight back to the controller as a [`ButtonAction`].
//!
//! [`ButtonAction`]: crate::conversation::ButtonAction

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, error, info};
use serenity::builder::CreateComponents;
use serenity::model::application::component::ButtonStyle;
use serenity::model::application::interaction::application_command::ApplicationCommandInteraction;
use serenity::model::application::interaction::message_component::MessageComponentInteraction;
use serenity::model::application::interaction::InteractionResponseType;
use serenity::model::id::ChannelId;
use serenity::prelude::Context;
use std::sync::Arc;
use uuid::Uuid;

use crate::conversation::{Command, ConversationController, InboundEvent};
use crate::core::{chunk_text, ChoiceMenu, ChoiceStyle, Format, Outbound, Response, MESSAGE_LIMIT};

const CODE_FENCE: &str = "```";
/// Fence lines wrapped around each code chunk: "```\n" + "\n```"
const CODE_FENCE_OVERHEAD: usize = 8;

fn button_style(style: ChoiceStyle) -> ButtonStyle {
    match style {
        ChoiceStyle::Primary => ButtonStyle::Primary,
        ChoiceStyle::Secondary => ButtonStyle::Secondary,
        ChoiceStyle::Danger => ButtonStyle::Danger,
    }
}

/// One action row per menu row, one button per choice
pub fn create_components(menu: &ChoiceMenu) -> CreateComponents {
    let mut components = CreateComponents::default();
    for row in &menu.rows {
        components.create_action_row(|action_row| {
            for choice in row {
                action_row.create_button(|button| {
                    button
                        .custom_id(&choice.payload)
                        .label(&choice.label)
                        .style(button_style(choice.style))
                });
            }
            action_row
        });
    }
    components
}

/// Break a code fence inside literal text so it can't close the block early
pub fn escape_code_fence(text: &str) -> String {
    text.replace(CODE_FENCE, "`\u{200b}`\u{200b}`")
}

/// Message bodies for a response, each within Discord's content limit
pub fn render_chunks(response: &Response) -> Vec<String> {
    match response.format {
        Format::Plain | Format::Markdown => chunk_text(&response.text, MESSAGE_LIMIT),
        Format::Code => chunk_text(
            &escape_code_fence(&response.text),
            MESSAGE_LIMIT - CODE_FENCE_OVERHEAD,
        )
        .into_iter()
        .map(|chunk| format!("{CODE_FENCE}\n{chunk}\n{CODE_FENCE}"))
        .collect(),
    }
}

/// Message bodies paired with their buttons; only the last body carries any
pub fn message_parts(response: &Response) -> Vec<(String, Option<CreateComponents>)> {
    let chunks = render_chunks(response);
    let last = chunks.len().saturating_sub(1);
    chunks
        .into_iter()
        .enumerate()
        .map(|(index, chunk)| {
            let components = (index == last)
                .then(|| response.menu.as_ref().map(create_components))
                .flatten();
            (chunk, components)
        })
        .collect()
}

/// The two calls a chunked reply needs, shared by slash commands and buttons
#[async_trait]
trait InteractionReply {
    async fn reply(
        &self,
        ctx: &Context,
        content: &str,
        components: Option<CreateComponents>,
        ephemeral: bool,
    ) -> serenity::Result<()>;

    async fn follow_up(
        &self,
        ctx: &Context,
        content: &str,
        components: Option<CreateComponents>,
        ephemeral: bool,
    ) -> serenity::Result<()>;
}

macro_rules! impl_interaction_reply {
    ($interaction:ty) => {
        #[async_trait]
        impl InteractionReply for $interaction {
            async fn reply(
                &self,
                ctx: &Context,
                content: &str,
                components: Option<CreateComponents>,
                ephemeral: bool,
            ) -> serenity::Result<()> {
                self.create_interaction_response(&ctx.http, |r| {
                    r.kind(InteractionResponseType::ChannelMessageWithSource)
                        .interaction_response_data(|m| {
                            m.content(content).ephemeral(ephemeral);
                            if let Some(components) = components {
                                m.set_components(components);
                            }
                            m
                        })
                })
                .await
            }

            async fn follow_up(
                &self,
                ctx: &Context,
                content: &str,
                components: Option<CreateComponents>,
                ephemeral: bool,
            ) -> serenity::Result<()> {
                self.create_followup_message(&ctx.http, |m| {
                    m.content(content).ephemeral(ephemeral);
                    if let Some(components) = components {
                        m.set_components(components);
                    }
                    m
                })
                .await
                .map(|_| ())
            }
        }
    };
}

impl_interaction_reply!(ApplicationCommandInteraction);
impl_interaction_reply!(MessageComponentInteraction);

/// Answer an interaction with `response`, overflow going out as follow-ups
async fn reply_in_chunks<I>(
    ctx: &Context,
    interaction: &I,
    response: &Response,
    ephemeral: bool,
) -> Result<()>
where
    I: InteractionReply + Sync,
{
    for (index, (chunk, components)) in message_parts(response).into_iter().enumerate() {
        if index == 0 {
            interaction.reply(ctx, &chunk, components, ephemeral).await?;
        } else {
            interaction.follow_up(ctx, &chunk, components, ephemeral).await?;
        }
    }
    Ok(())
}

/// Handler for slash commands and button clicks
pub struct MessageComponentHandler {
    controller: Arc<ConversationController>,
}

impl MessageComponentHandler {
    pub fn new(controller: Arc<ConversationController>) -> Self {
        Self { controller }
    }

    /// Handle a direct message and post the reply in the same channel
    pub async fn handle_direct_message(
        &self,
        ctx: &Context,
        channel_id: ChannelId,
        user_id: u64,
        content: &str,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let event = InboundEvent::from_message(user_id, content);
        let outbound = self.controller.handle_with_id(&event, request_id).await;

        match outbound {
            Outbound::Send(response) | Outbound::Update { response, .. } => {
                send_response(ctx, channel_id, &response).await?
            }
            Outbound::Notice(text) | Outbound::Dismiss { notice: Some(text) } => {
                channel_id.say(&ctx.http, text).await?;
            }
            Outbound::Dismiss { notice: None } | Outbound::Nothing => {
                debug!("[{request_id}] Nothing to send");
            }
        }
        Ok(())
    }

    /// Handle a slash command; replies in guilds are only visible to the caller
    pub async fn handle_command_interaction(
        &self,
        ctx: &Context,
        command: &ApplicationCommandInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let ephemeral = command.guild_id.is_some();
        let user_id = command.user.id.0;
        let name = Command::from_name(&command.data.name);
        let outbound = if ephemeral {
            self.controller.handle_guild_command(user_id, &name, request_id).await
        } else {
            let event = InboundEvent::command(user_id, name);
            self.controller.handle_with_id(&event, request_id).await
        };

        let response = match outbound {
            Outbound::Send(response) | Outbound::Update { response, .. } => response,
            Outbound::Notice(text) | Outbound::Dismiss { notice: Some(text) } => Response::plain(text),
            Outbound::Dismiss { notice: None } | Outbound::Nothing => {
                command
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::DeferredChannelMessageWithSource)
                            .interaction_response_data(|m| m.ephemeral(ephemeral))
                    })
                    .await?;
                command.delete_original_interaction_response(&ctx.http).await?;
                return Ok(());
            }
        };

        reply_in_chunks(ctx, command, &response, ephemeral).await?;

        info!("[{request_id}] /{} response sent", command.data.name);
        Ok(())
    }

    /// Handle a button click on one of our messages
    ///
    /// In guilds our messages are ephemeral, so new messages go out as
    /// ephemeral replies and dismissing clears the message instead of
    /// deleting it.
    pub async fn handle_component_interaction(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
    ) -> Result<()> {
        let request_id = Uuid::new_v4();
        let in_guild = interaction.guild_id.is_some();
        let event = InboundEvent::button(interaction.user.id.0, &interaction.data.custom_id);
        let outbound = self.controller.handle_with_id(&event, request_id).await;

        match outbound {
            Outbound::Send(response) if in_guild => {
                reply_in_chunks(ctx, interaction, &response, true).await?;
            }
            Outbound::Send(response) => {
                // Acknowledge the click, then post a new message below
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::DeferredUpdateMessage)
                    })
                    .await?;
                send_response(ctx, interaction.channel_id, &response).await?;
            }
            Outbound::Update { response, notice } => {
                let chunks = render_chunks(&response);
                let content = chunks.first().cloned().unwrap_or_default();
                let components = response.menu.as_ref().map(create_components).unwrap_or_default();
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::UpdateMessage)
                            .interaction_response_data(|m| m.content(content).set_components(components))
                    })
                    .await?;
                for chunk in chunks.iter().skip(1) {
                    interaction.follow_up(ctx, chunk, None, in_guild).await?;
                }
                if let Some(notice) = notice {
                    self.notify(ctx, interaction, &notice).await?;
                }
            }
            Outbound::Dismiss { notice } if in_guild => {
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::UpdateMessage)
                            .interaction_response_data(|m| {
                                m.content("✖️ Closed").components(|c| c) // Clear components
                            })
                    })
                    .await?;
                if let Some(notice) = notice {
                    self.notify(ctx, interaction, &notice).await?;
                }
            }
            Outbound::Dismiss { notice } => {
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::DeferredUpdateMessage)
                    })
                    .await?;
                if let Err(e) = interaction.message.delete(ctx).await {
                    error!("[{request_id}] ❌ Can't delete message {}: {e}", interaction.message.id);
                }
                if let Some(notice) = notice {
                    self.notify(ctx, interaction, &notice).await?;
                }
            }
            Outbound::Notice(text) => {
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::ChannelMessageWithSource)
                            .interaction_response_data(|m| m.content(text).ephemeral(true))
                    })
                    .await?;
            }
            Outbound::Nothing => {
                interaction
                    .create_interaction_response(&ctx.http, |r| {
                        r.kind(InteractionResponseType::DeferredUpdateMessage)
                    })
                    .await?;
            }
        }

        Ok(())
    }

    /// Short message visible only to the clicking user
    async fn notify(
        &self,
        ctx: &Context,
        interaction: &MessageComponentInteraction,
        text: &str,
    ) -> Result<()> {
        interaction
            .create_followup_message(&ctx.http, |m| m.content(text).ephemeral(true))
            .await?;
        Ok(())
    }
}

/// Post a response as one or more messages; buttons go on the last one
pub async fn send_response(ctx: &Context, channel_id: ChannelId, response: &Response) -> Result<()> {
    for (chunk, components) in message_parts(response) {
        channel_id
            .send_message(&ctx.http, |m| {
                m.content(chunk);
                if let Some(components) = components {
                    m.set_components(components);
                }
                m
            })
            .await?;
    }
    Ok(())
}
