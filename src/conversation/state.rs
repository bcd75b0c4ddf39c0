//! Per-user conversation state, derived from the stored pending action

use crate::features::preferences::PendingAction;

/// There is no stored "idle" marker; a missing pending action means `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingWordCount,
    AwaitingSeparator,
    AwaitingEncryptionPassword,
}

impl ConversationState {
    pub fn pending_action(self) -> Option<PendingAction> {
        match self {
            ConversationState::Idle => None,
            ConversationState::AwaitingWordCount => Some(PendingAction::AwaitingWordCount),
            ConversationState::AwaitingSeparator => Some(PendingAction::AwaitingSeparator),
            ConversationState::AwaitingEncryptionPassword => {
                Some(PendingAction::AwaitingEncryptionPassword)
            }
        }
    }
}

impl From<Option<PendingAction>> for ConversationState {
    fn from(action: Option<PendingAction>) -> Self {
        match action {
            None => ConversationState::Idle,
            Some(PendingAction::AwaitingWordCount) => ConversationState::AwaitingWordCount,
            Some(PendingAction::AwaitingSeparator) => ConversationState::AwaitingSeparator,
            Some(PendingAction::AwaitingEncryptionPassword) => {
                ConversationState::AwaitingEncryptionPassword
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_mirrors_pending_action() {
        for state in [
            ConversationState::Idle,
            ConversationState::AwaitingWordCount,
            ConversationState::AwaitingSeparator,
            ConversationState::AwaitingEncryptionPassword,
        ] {
            assert_eq!(ConversationState::from(state.pending_action()), state);
        }
        assert_eq!(ConversationState::default(), ConversationState::Idle);
    }
}
