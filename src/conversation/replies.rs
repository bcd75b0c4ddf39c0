//! User-facing texts

use crate::features::preferences::UserPreferences;
use crate::features::wordlists::WordlistId;

pub const START: &str = "Hello. Use this bot to generate strong mnemonic passwords which are, \
however, easy to memorise!\nClick the Generate button or type \"gen\".";

pub const HELP: &str = "This bot creates mnemonic passwords with a single click.\n\n\
Set the number of words in generated passphrases with `/number`.\n\n\
To change the separator between words, use `/sep`.\n\n\
You can even change the list of words used for generation. Try `/list`!\n\n\
`/settings` shows what you are currently using.";

pub const ASK_WORD_COUNT: &str = "Choose the number of words in the passphrases that will be \
generated. The value has to contain only digits and nothing more.";

pub const ASK_SEPARATOR: &str = "Type the separator placed between words. It can be `-` or `_` \
or even a newline, for instance. The separator has to be less than 8 bytes long.\n\
To use a space, type `\\` (just a backslash). For a newline, type `\\n`. The first backslash \
is removed from any reply, so for a single backslash send two.";

pub const ANSWER_IN_DM: &str = "Send your answer to me in a direct message.";

pub const ADD_LIST: &str = "In development. Later it will be possible to add custom lists.";
pub const VAULT: &str =
    "In development. Later you'll have access to your vault, where passwords are stored.";
pub const ENCRYPTION: &str = "In development. Set up your encryption settings: enable or disable \
encryption and change the encryption password.";
pub const SEARCH: &str = "In development. Search your stored passphrases.";

pub const UNKNOWN_COMMAND: &str = "Unknown command, sorry. Type /help to get help.";
pub const UNRECOGNIZED: &str = "Sorry, I don't understand. Send me /help to get help.";
pub const SERVER_ERROR: &str = "Error on the server side. Sorry. Please try again.";
pub const GENERATION_UNAVAILABLE: &str =
    "Your wordlist is not available right now. Pick another one with /list.";

pub const WORD_COUNT_CHANGED: &str = "Number of words successfully changed!";
pub const SEPARATOR_CHANGED: &str = "Separator successfully changed!";

pub const ACTION_CANCELLED: &str = "Last action successfully removed!";
pub const NOT_SAVED: &str = "Your password wasn't saved. This functionality is under maintenance.";
pub const INVALID_WORDLIST: &str = "This wordlist is not available.";

/// A prompt asked outside direct messages, pointing at where to answer
pub fn answer_in_dm(prompt: &str) -> String {
    format!("{prompt}\n\n{ANSWER_IN_DM}")
}

pub fn wordlist_selected(id: WordlistId) -> String {
    format!("{} is your new wordlist", id.name())
}

pub fn wordlist_in_use(id: WordlistId) -> String {
    format!("You use {} wordlist", id.name())
}

/// Wordlist chooser text with a sample passphrase per list
pub fn wordlist_list(wordlists: impl IntoIterator<Item = WordlistId>) -> String {
    let mut text = String::from("**Select desired wordlist**\n\nHere are some examples of generated passphrases:\n");
    for id in wordlists {
        text.push_str(&format!(
            "\n**{}**\n{}\n`{}`\n",
            id.name(),
            id.description(),
            id.example()
        ));
    }
    text
}

/// Human-readable form of a separator
pub fn describe_separator(separator: &str) -> String {
    match separator {
        "" => "nothing".to_string(),
        " " => "space".to_string(),
        "\n" => "newline".to_string(),
        other => format!("`{}`", other.replace('`', "ˋ")),
    }
}

pub fn settings(prefs: &UserPreferences) -> String {
    format!(
        "**Your settings**\nWordlist: {}\nNumber of words: {}\nSeparator: {}",
        prefs.wordlist.name(),
        prefs.word_count,
        describe_separator(&prefs.separator)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_mentions_every_wordlist() {
        let text = wordlist_list(WordlistId::ALL);
        for id in WordlistId::ALL {
            assert!(text.contains(id.name()));
            assert!(text.contains(id.example()));
        }
    }

    #[test]
    fn test_describe_separator() {
        assert_eq!(describe_separator(" "), "space");
        assert_eq!(describe_separator("\n"), "newline");
        assert_eq!(describe_separator("-"), "`-`");
        assert_eq!(describe_separator(""), "nothing");
    }

    #[test]
    fn test_settings_text() {
        let text = settings(&UserPreferences::defaults(1));
        assert!(text.contains("BIP39"));
        assert!(text.contains("Number of words: 3"));
        assert!(text.contains("`-`"));
    }

    #[test]
    fn test_notices() {
        assert_eq!(wordlist_selected(WordlistId::Wordle), "Wordle is your new wordlist");
        assert_eq!(wordlist_in_use(WordlistId::DiceLong), "You use Dice Long wordlist");
    }
}
