//! # Slash Commands (/)
//!
//! Discord slash command definitions, one per conversation command. None of
//! them take options: prompts are answered by direct message.
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Commands derived from the conversation command list
//! - 2.0.0: Guild registration for faster testing
//! - 1.0.0: Initial implementation

use anyhow::Result;
use log::info;
use serenity::builder::CreateApplicationCommand;
use serenity::model::application::command::Command as DiscordCommand;
use serenity::model::id::GuildId;
use serenity::prelude::Context;

use crate::conversation::Command;

/// Creates all slash command definitions
pub fn create_slash_commands() -> Vec<CreateApplicationCommand> {
    Command::ALL.iter().map(create_command).collect()
}

fn create_command(command: &Command) -> CreateApplicationCommand {
    let mut definition = CreateApplicationCommand::default();
    definition
        .name(command.name())
        .description(command.description())
        .dm_permission(true);
    definition
}

/// Registers all slash commands globally (may take up to an hour to show up)
pub async fn register_global_commands(ctx: &Context) -> Result<()> {
    let commands = create_slash_commands();
    let count = commands.len();

    DiscordCommand::set_global_application_commands(&ctx.http, |builder| {
        for command in commands {
            builder.add_application_command(command);
        }
        builder
    })
    .await?;

    info!("Global slash commands registered successfully ({count} commands)");
    Ok(())
}

/// Registers all slash commands for a specific guild (instant, for testing)
pub async fn register_guild_commands(ctx: &Context, guild_id: GuildId) -> Result<()> {
    let commands = create_slash_commands();
    let count = commands.len();

    guild_id
        .set_application_commands(&ctx.http, |builder| {
            for command in commands {
                builder.add_application_command(command);
            }
            builder
        })
        .await?;

    info!("Guild slash commands registered for guild {guild_id} ({count} commands)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_slash_commands() {
        let commands = create_slash_commands();
        assert_eq!(commands.len(), Command::ALL.len());

        let command_names: Vec<String> = commands
            .iter()
            .map(|cmd| cmd.0.get("name").unwrap().as_str().unwrap().to_string())
            .collect();

        for expected in ["start", "help", "generate", "number", "sep", "list", "settings"] {
            assert!(
                command_names.contains(&expected.to_string()),
                "Missing command: {expected}"
            );
        }
    }

    #[test]
    fn test_commands_allowed_in_dms() {
        for command in create_slash_commands() {
            assert_eq!(command.0.get("dm_permission").and_then(|v| v.as_bool()), Some(true));
        }
    }
}
