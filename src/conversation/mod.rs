//! # Conversation
//!
//! Turns inbound chat events (commands, free text, button clicks) into
//! outbound actions. The user's state is the pending action stored in the
//! key-value backend:
//!
//! ```text
//! Idle --/number--> AwaitingWordCount --valid count--> Idle
//! Idle --/sep-----> AwaitingSeparator --valid sep----> Idle
//! AwaitingEncryptionPassword --any text--> Idle
//! any --Cancel--> Idle
//! ```
//!
//! Invalid replies keep the pending action so the user can resend.
//!
//! - **Version**: 1.3.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.3.0: Guild prompts for free-text answers point to direct messages
//! - 1.2.0: `/settings` command and Generate button
//! - 1.1.0: Transport-neutral `InboundEvent` / `Outbound`
//! - 1.0.0: Initial release

pub mod command;
pub mod controller;
pub mod event;
pub mod input;
pub mod menus;
pub mod replies;
pub mod state;

pub use command::Command;
pub use controller::ConversationController;
pub use event::{ButtonAction, EventKind, InboundEvent};
pub use input::{parse_separator, parse_word_count, InputError};
pub use state::ConversationState;
