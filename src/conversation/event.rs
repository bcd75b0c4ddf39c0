//! Inbound events as the controller sees them, independent of the chat transport

use super::command::Command;

/// Separator between action and argument in a button payload
pub const PAYLOAD_SEPARATOR: &str = "$$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub user_id: u64,
    pub kind: EventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Command(Command),
    /// Free text that is neither a command nor a generate shortcut
    Text(String),
    Button(ButtonAction),
}

impl InboundEvent {
    pub fn command(user_id: u64, command: Command) -> Self {
        Self {
            user_id,
            kind: EventKind::Command(command),
        }
    }

    pub fn text(user_id: u64, text: impl Into<String>) -> Self {
        Self {
            user_id,
            kind: EventKind::Text(text.into()),
        }
    }

    pub fn button(user_id: u64, payload: &str) -> Self {
        Self {
            user_id,
            kind: EventKind::Button(ButtonAction::parse(payload)),
        }
    }

    /// Classify a direct message
    ///
    /// `Generate`, `generate` and `gen` are generate shortcuts, `/name ...`
    /// is a command, everything else is free text kept verbatim.
    pub fn from_message(user_id: u64, content: &str) -> Self {
        if matches!(content, "Generate" | "generate" | "gen") {
            return Self::command(user_id, Command::Generate);
        }

        if let Some(rest) = content.strip_prefix('/') {
            let name = rest.split_whitespace().next().unwrap_or_default();
            if !name.is_empty() {
                return Self::command(user_id, Command::from_name(name));
            }
        }

        Self::text(user_id, content)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Generate,
    Regenerate,
    Delete,
    Save,
    /// Raw wordlist id as carried by the button, validated by the controller
    SelectWordlist(i64),
    /// Close a menu message
    Cancel,
    /// Abandon the pending action and close its prompt
    CancelAction,
    Unknown(String),
}

impl ButtonAction {
    pub fn parse(payload: &str) -> Self {
        if let Some((action, argument)) = payload.split_once(PAYLOAD_SEPARATOR) {
            return match (action, argument) {
                ("system", "cancel") => ButtonAction::Cancel,
                ("system", "cancelaction") => ButtonAction::CancelAction,
                ("setwl", id) => id
                    .parse()
                    .map(ButtonAction::SelectWordlist)
                    .unwrap_or_else(|_| ButtonAction::Unknown(payload.to_string())),
                _ => ButtonAction::Unknown(payload.to_string()),
            };
        }

        match payload {
            "generate" => ButtonAction::Generate,
            "regenerate" => ButtonAction::Regenerate,
            "delete" => ButtonAction::Delete,
            "save" => ButtonAction::Save,
            _ => ButtonAction::Unknown(payload.to_string()),
        }
    }

    pub fn payload(&self) -> String {
        match self {
            ButtonAction::Generate => "generate".to_string(),
            ButtonAction::Regenerate => "regenerate".to_string(),
            ButtonAction::Delete => "delete".to_string(),
            ButtonAction::Save => "save".to_string(),
            ButtonAction::SelectWordlist(id) => format!("setwl{PAYLOAD_SEPARATOR}{id}"),
            ButtonAction::Cancel => format!("system{PAYLOAD_SEPARATOR}cancel"),
            ButtonAction::CancelAction => format!("system{PAYLOAD_SEPARATOR}cancelaction"),
            ButtonAction::Unknown(raw) => raw.clone(),
        }
    }
}
