//! Pending-action markers: what the next free-text message is an answer to

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PendingAction {
    AwaitingWordCount,
    AwaitingSeparator,
    /// Reserved; a reply only clears the marker
    AwaitingEncryptionPassword,
}

impl PendingAction {
    /// Tag persisted under `lastact:<user>`
    pub fn tag(self) -> &'static str {
        match self {
            PendingAction::AwaitingWordCount => "setnumberofwords",
            PendingAction::AwaitingSeparator => "setseparator",
            PendingAction::AwaitingEncryptionPassword => "setencryptionpass",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "setnumberofwords" => Some(PendingAction::AwaitingWordCount),
            "setseparator" => Some(PendingAction::AwaitingSeparator),
            "setencryptionpass" => Some(PendingAction::AwaitingEncryptionPassword),
            _ => None,
        }
    }
}

impl fmt::Display for PendingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
