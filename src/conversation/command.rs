//! Commands a user can invoke, by slash command or `/name` text

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Generate,
    SetWordCount,
    SetSeparator,
    List,
    Settings,
    AddList,
    Vault,
    Encryption,
    Search,
    Unknown(String),
}

impl Command {
    /// Every known command, in the order they are registered
    pub const ALL: [Command; 11] = [
        Command::Start,
        Command::Help,
        Command::Generate,
        Command::SetWordCount,
        Command::SetSeparator,
        Command::List,
        Command::Settings,
        Command::AddList,
        Command::Vault,
        Command::Encryption,
        Command::Search,
    ];

    /// Parse a command name; matching ignores case and any `@botname` suffix
    pub fn from_name(name: &str) -> Self {
        let name = name.split('@').next().unwrap_or_default().trim();
        match name.to_ascii_lowercase().as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "generate" | "gen" => Command::Generate,
            "number" => Command::SetWordCount,
            "sep" => Command::SetSeparator,
            "list" => Command::List,
            "settings" => Command::Settings,
            "addlist" => Command::AddList,
            "vault" => Command::Vault,
            "encryption" => Command::Encryption,
            "search" => Command::Search,
            _ => Command::Unknown(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Command::Start => "start",
            Command::Help => "help",
            Command::Generate => "generate",
            Command::SetWordCount => "number",
            Command::SetSeparator => "sep",
            Command::List => "list",
            Command::Settings => "settings",
            Command::AddList => "addlist",
            Command::Vault => "vault",
            Command::Encryption => "encryption",
            Command::Search => "search",
            Command::Unknown(name) => name,
        }
    }

    /// Short description shown in Discord's command picker
    pub fn description(&self) -> &'static str {
        match self {
            Command::Start => "Say hello and get a Generate button",
            Command::Help => "How to use the passphrase generator",
            Command::Generate => "Generate a passphrase with your settings",
            Command::SetWordCount => "Set the number of words in your passphrases",
            Command::SetSeparator => "Set the separator placed between words",
            Command::List => "Choose the wordlist passphrases are drawn from",
            Command::Settings => "Show your current settings",
            Command::AddList => "Add a custom wordlist (in development)",
            Command::Vault => "Open your password vault (in development)",
            Command::Encryption => "Encryption settings (in development)",
            Command::Search => "Search stored passphrases (in development)",
            Command::Unknown(_) => "Unknown command",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_round_trip() {
        for command in Command::ALL {
            assert_eq!(Command::from_name(command.name()), command);
        }
    }

    #[test]
    fn test_from_name_is_lenient() {
        assert_eq!(Command::from_name("HELP"), Command::Help);
        assert_eq!(Command::from_name("number@passph_bot"), Command::SetWordCount);
        assert_eq!(Command::from_name("gen"), Command::Generate);
    }

    #[test]
    fn test_unknown_keeps_name() {
        assert_eq!(
            Command::from_name("frobnicate"),
            Command::Unknown("frobnicate".to_string())
        );
    }

    #[test]
    fn test_discord_name_constraints() {
        for command in Command::ALL {
            let name = command.name();
            assert!(!name.is_empty() && name.len() <= 32);
            assert!(name.chars().all(|c| c.is_ascii_lowercase()));
            assert!(command.description().len() <= 100);
        }
    }
}
