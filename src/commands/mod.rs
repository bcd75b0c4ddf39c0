//! # Command System
//!
//! Registration of the conversation commands as Discord slash commands.
//! Command semantics live in [`crate::conversation`].
//!
//! - **Version**: 3.0.0
//! - **Since**: 0.2.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 3.0.0: Slash commands map one-to-one onto conversation commands
//! - 2.0.0: Slash-only command system
//! - 1.0.0: Initial reorganization with modular command structure

pub mod slash;

pub use slash::{create_slash_commands, register_global_commands, register_guild_commands};
