//! Conversation controller: one inbound event in, one outbound action out
//!
//! The controller keeps no per-user memory. Every event reads the user's
//! pending action and preferences from [`UserConfigStore`], so any number of
//! handlers can run it concurrently.

use log::{debug, error, info, warn};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::{Outbound, Response};
use crate::features::generator::{GenerateError, PassphraseGenerator};
use crate::features::preferences::{PendingAction, UserConfigStore};
use crate::features::wordlists::{WordlistId, WordlistRegistry};
use crate::storage::StoreError;

use super::command::Command;
use super::event::{ButtonAction, EventKind, InboundEvent};
use super::input::{parse_separator, parse_word_count};
use super::menus;
use super::replies;
use super::state::ConversationState;

pub struct ConversationController {
    registry: Arc<WordlistRegistry>,
    store: UserConfigStore,
    generator: PassphraseGenerator,
}

/// A freshly generated passphrase and the list it came from
struct Generated {
    passphrase: String,
    wordlist: WordlistId,
}

impl ConversationController {
    pub fn new(registry: Arc<WordlistRegistry>, store: UserConfigStore) -> Self {
        let generator = PassphraseGenerator::new(Arc::clone(&registry));
        Self {
            registry,
            store,
            generator,
        }
    }

    pub fn store(&self) -> &UserConfigStore {
        &self.store
    }

    /// Current state of `user_id` as recorded in the store
    pub async fn state(&self, user_id: u64) -> Result<ConversationState, StoreError> {
        Ok(self.store.get_pending_action(user_id).await?.into())
    }

    pub async fn handle(&self, event: &InboundEvent) -> Outbound {
        self.handle_with_id(event, Uuid::new_v4()).await
    }

    pub async fn handle_with_id(&self, event: &InboundEvent, request_id: Uuid) -> Outbound {
        let user_id = event.user_id;
        match &event.kind {
            EventKind::Command(command) => {
                info!("[{request_id}] 🎯 Command /{} | User: {user_id}", command.name());
                self.handle_command(user_id, command, false, request_id).await
            }
            EventKind::Text(text) => {
                debug!("[{request_id}] 💬 Text reply | User: {user_id} | Length: {}", text.len());
                self.handle_text(user_id, text, request_id).await
            }
            EventKind::Button(action) => {
                info!("[{request_id}] 🔘 Button {} | User: {user_id}", action.payload());
                self.handle_button(user_id, action, request_id).await
            }
        }
    }

    /// Handle a command issued in a guild channel
    ///
    /// Free-text answers are only read from direct messages, so prompts that
    /// wait for one say where to send it.
    pub async fn handle_guild_command(
        &self,
        user_id: u64,
        command: &Command,
        request_id: Uuid,
    ) -> Outbound {
        info!("[{request_id}] 🎯 Guild command /{} | User: {user_id}", command.name());
        self.handle_command(user_id, command, true, request_id).await
    }

    async fn handle_command(
        &self,
        user_id: u64,
        command: &Command,
        from_guild: bool,
        request_id: Uuid,
    ) -> Outbound {
        let prompt = |text: &str| {
            if from_guild {
                replies::answer_in_dm(text)
            } else {
                text.to_string()
            }
        };
        match command {
            Command::Start => Outbound::Send(
                Response::plain(replies::START).with_menu(menus::generate_menu()),
            ),
            Command::Help => Outbound::Send(
                Response::markdown(replies::HELP).with_menu(menus::generate_menu()),
            ),
            Command::Generate => self.send_passphrase(user_id, request_id).await,
            Command::SetWordCount => {
                self.begin_pending(
                    user_id,
                    PendingAction::AwaitingWordCount,
                    Response::plain(prompt(replies::ASK_WORD_COUNT)),
                    request_id,
                )
                .await
            }
            Command::SetSeparator => {
                self.begin_pending(
                    user_id,
                    PendingAction::AwaitingSeparator,
                    Response::markdown(prompt(replies::ASK_SEPARATOR)),
                    request_id,
                )
                .await
            }
            Command::List => {
                let usable: Vec<WordlistId> = self.registry.usable_ids().collect();
                Outbound::Send(
                    Response::markdown(replies::wordlist_list(usable.iter().copied()))
                        .with_menu(menus::wordlist_menu(usable)),
                )
            }
            Command::Settings => {
                let prefs = self.store.preferences(user_id).await;
                Outbound::Send(
                    Response::markdown(replies::settings(&prefs)).with_menu(menus::generate_menu()),
                )
            }
            Command::AddList => in_development(replies::ADD_LIST),
            Command::Vault => in_development(replies::VAULT),
            Command::Encryption => in_development(replies::ENCRYPTION),
            Command::Search => in_development(replies::SEARCH),
            Command::Unknown(name) => {
                warn!("[{request_id}] ❓ Unknown command /{name} | User: {user_id}");
                Outbound::Send(
                    Response::plain(replies::UNKNOWN_COMMAND).with_menu(menus::generate_menu()),
                )
            }
        }
    }

    async fn begin_pending(
        &self,
        user_id: u64,
        action: PendingAction,
        prompt: Response,
        request_id: Uuid,
    ) -> Outbound {
        match self.store.set_pending_action(user_id, action).await {
            Ok(()) => {
                debug!("[{request_id}] ⏳ Pending action {action} | User: {user_id}");
                Outbound::Send(prompt.with_menu(menus::cancel_action_menu()))
            }
            Err(e) => {
                error!("[{request_id}] ❌ Can't set pending action {action} for user {user_id}: {e}");
                server_error()
            }
        }
    }

    async fn handle_text(&self, user_id: u64, text: &str, request_id: Uuid) -> Outbound {
        let state = match self.state(user_id).await {
            Ok(state) => state,
            Err(e @ StoreError::Malformed { .. }) => {
                warn!("[{request_id}] ⚠️ Dropping unreadable pending action of user {user_id}: {e}");
                if let Err(e) = self.store.clear_pending_action(user_id).await {
                    error!("[{request_id}] ❌ Can't clear pending action of user {user_id}: {e}");
                }
                ConversationState::Idle
            }
            Err(e) => {
                error!("[{request_id}] ❌ Can't read pending action of user {user_id}: {e}");
                return server_error();
            }
        };

        self.apply_reply(user_id, state, text, request_id).await
    }

    /// Interpret `text` as the answer to whatever `state` is waiting for
    pub async fn apply_reply(
        &self,
        user_id: u64,
        state: ConversationState,
        text: &str,
        request_id: Uuid,
    ) -> Outbound {
        match state {
            ConversationState::Idle => unrecognized(),
            ConversationState::AwaitingWordCount => {
                let count = match parse_word_count(text) {
                    Ok(count) => count,
                    Err(e) => {
                        info!("[{request_id}] ✋ Rejected word count | User: {user_id} | {e}");
                        return retry(e.to_string());
                    }
                };
                if let Err(e) = self.store.set_word_count(user_id, count).await {
                    error!("[{request_id}] ❌ Can't set word count of user {user_id}: {e}");
                    return retry(replies::SERVER_ERROR);
                }
                info!("[{request_id}] ✅ Word count changed | User: {user_id} | Words: {count}");
                self.finish_pending(user_id, replies::WORD_COUNT_CHANGED, request_id)
                    .await
            }
            ConversationState::AwaitingSeparator => {
                let separator = match parse_separator(text) {
                    Ok(separator) => separator,
                    Err(e) => {
                        info!("[{request_id}] ✋ Rejected separator | User: {user_id} | {e}");
                        return retry(e.to_string());
                    }
                };
                if let Err(e) = self.store.set_separator(user_id, &separator).await {
                    error!("[{request_id}] ❌ Can't set separator of user {user_id}: {e}");
                    return retry(replies::SERVER_ERROR);
                }
                info!(
                    "[{request_id}] ✅ Separator changed | User: {user_id} | Bytes: {}",
                    separator.len()
                );
                self.finish_pending(user_id, replies::SEPARATOR_CHANGED, request_id)
                    .await
            }
            ConversationState::AwaitingEncryptionPassword => {
                if let Err(e) = self.store.clear_pending_action(user_id).await {
                    error!("[{request_id}] ❌ Can't clear pending action of user {user_id}: {e}");
                }
                Outbound::Nothing
            }
        }
    }

    async fn finish_pending(&self, user_id: u64, message: &str, request_id: Uuid) -> Outbound {
        if let Err(e) = self.store.clear_pending_action(user_id).await {
            // The setting is saved; the marker still expires on its own
            warn!("[{request_id}] ⚠️ Can't clear pending action of user {user_id}: {e}");
        }
        Outbound::Send(Response::plain(message).with_menu(menus::generate_menu()))
    }

    async fn handle_button(&self, user_id: u64, action: &ButtonAction, request_id: Uuid) -> Outbound {
        match action {
            ButtonAction::Generate => self.send_passphrase(user_id, request_id).await,
            ButtonAction::Regenerate => match self.generate(user_id, request_id).await {
                Ok(generated) => Outbound::Update {
                    response: passphrase_response(generated.passphrase),
                    notice: Some(replies::wordlist_in_use(generated.wordlist)),
                },
                Err(_) => Outbound::Notice(replies::GENERATION_UNAVAILABLE.to_string()),
            },
            ButtonAction::Delete | ButtonAction::Cancel => Outbound::Dismiss { notice: None },
            ButtonAction::Save => Outbound::Notice(replies::NOT_SAVED.to_string()),
            ButtonAction::SelectWordlist(id) => self.select_wordlist(user_id, *id, request_id).await,
            ButtonAction::CancelAction => match self.store.clear_pending_action(user_id).await {
                Ok(()) => {
                    info!("[{request_id}] 🚫 Pending action cancelled | User: {user_id}");
                    Outbound::Dismiss {
                        notice: Some(replies::ACTION_CANCELLED.to_string()),
                    }
                }
                Err(e) => {
                    error!("[{request_id}] ❌ Can't clear pending action of user {user_id}: {e}");
                    Outbound::Notice(replies::SERVER_ERROR.to_string())
                }
            },
            ButtonAction::Unknown(payload) => {
                warn!("[{request_id}] ❓ Unknown button payload '{payload}' | User: {user_id}");
                Outbound::Nothing
            }
        }
    }

    async fn select_wordlist(&self, user_id: u64, id: i64, request_id: Uuid) -> Outbound {
        if !self.registry.is_usable(id) {
            warn!("[{request_id}] ⚠️ User {user_id} picked unusable wordlist {id}");
            return Outbound::Notice(replies::INVALID_WORDLIST.to_string());
        }

        match self.store.set_wordlist(user_id, id).await {
            Ok(wordlist) => {
                info!("[{request_id}] 📚 Wordlist changed | User: {user_id} | Wordlist: {wordlist}");
                Outbound::Notice(replies::wordlist_selected(wordlist))
            }
            Err(StoreError::InvalidArgument(reason)) => {
                warn!("[{request_id}] ⚠️ Wordlist {id} rejected for user {user_id}: {reason}");
                Outbound::Notice(replies::INVALID_WORDLIST.to_string())
            }
            Err(e) => {
                error!("[{request_id}] ❌ Can't set wordlist of user {user_id}: {e}");
                Outbound::Notice(replies::SERVER_ERROR.to_string())
            }
        }
    }

    async fn send_passphrase(&self, user_id: u64, request_id: Uuid) -> Outbound {
        match self.generate(user_id, request_id).await {
            Ok(generated) => Outbound::Send(passphrase_response(generated.passphrase)),
            Err(_) => Outbound::Send(
                Response::plain(replies::GENERATION_UNAVAILABLE).with_menu(menus::generate_menu()),
            ),
        }
    }

    async fn generate(&self, user_id: u64, request_id: Uuid) -> Result<Generated, GenerateError> {
        let prefs = self.store.preferences(user_id).await;
        let config = prefs.passphrase_config();

        match self.generator.generate(&config) {
            Ok(passphrase) => {
                info!(
                    "[{request_id}] 🎲 Passphrase generated | User: {user_id} | Wordlist: {} | Words: {}",
                    config.wordlist, config.length
                );
                Ok(Generated {
                    passphrase,
                    wordlist: config.wordlist,
                })
            }
            Err(e) => {
                error!("[{request_id}] ❌ Can't generate passphrase for user {user_id}: {e}");
                Err(e)
            }
        }
    }
}

fn passphrase_response(passphrase: String) -> Response {
    Response::code(passphrase).with_menu(menus::passphrase_menu())
}

fn in_development(text: &str) -> Outbound {
    Outbound::Send(Response::plain(text).with_menu(menus::generate_menu()))
}

fn unrecognized() -> Outbound {
    Outbound::Send(Response::plain(replies::UNRECOGNIZED).with_menu(menus::generate_menu()))
}

fn server_error() -> Outbound {
    Outbound::Send(Response::plain(replies::SERVER_ERROR))
}

/// Corrective message; the pending action stays so the user can resend
fn retry(message: impl Into<String>) -> Outbound {
    Outbound::Send(Response::plain(message).with_menu(menus::cancel_action_menu()))
}
