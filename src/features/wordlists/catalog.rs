//! The fixed wordlist catalog
//!
//! Ids are the decimal values persisted per user, so the order of variants
//! must never change. New lists go at the end.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WordlistId {
    /// English BIP39 list, the human-readable form of crypto wallet keys
    Bip39,
    /// English 5-letter words from Wordle
    Wordle,
    /// EFF list for use with five dice (6^5 = 7776 words)
    DiceLong,
    /// EFF list of short words for use with four dice (6^4 = 1296 words)
    DiceShort1,
    /// EFF list for four dice with longer, more memorable words
    DiceShort2,
}

impl WordlistId {
    pub const ALL: [WordlistId; 5] = [
        WordlistId::Bip39,
        WordlistId::Wordle,
        WordlistId::DiceLong,
        WordlistId::DiceShort1,
        WordlistId::DiceShort2,
    ];

    /// First catalog entry, used when a user never chose a list
    pub const DEFAULT: WordlistId = WordlistId::Bip39;

    /// Resolve a persisted or user-supplied id; `None` outside the catalog
    pub fn from_index(index: i64) -> Option<Self> {
        usize::try_from(index)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            WordlistId::Bip39 => "BIP39",
            WordlistId::Wordle => "Wordle",
            WordlistId::DiceLong => "Dice Long",
            WordlistId::DiceShort1 => "Dice Short 1",
            WordlistId::DiceShort2 => "Dice Short 2",
        }
    }

    /// Declared number of words, only used to pre-size the word vector
    pub fn expected_size(self) -> usize {
        match self {
            WordlistId::Bip39 => 2048,
            WordlistId::Wordle => 12972,
            WordlistId::DiceLong => 7776,
            WordlistId::DiceShort1 | WordlistId::DiceShort2 => 1296,
        }
    }

    /// JSON file name under the wordlist base URL
    pub fn file_name(self) -> &'static str {
        match self {
            WordlistId::Bip39 => "bip39_dictionary.json",
            WordlistId::Wordle => "wordle-powerlanguage.json",
            WordlistId::DiceLong => "eff_large_wordlist.json",
            WordlistId::DiceShort1 => "eff_short_wordlist_1.json",
            WordlistId::DiceShort2 => "eff_short_wordlist_2_0.json",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            WordlistId::Bip39 => "The English BIP39 list used for crypto wallet mnemonics",
            WordlistId::Wordle => "Only 5-char words, 12000ish words in the list",
            WordlistId::DiceLong => "6^5 = 7776 words",
            WordlistId::DiceShort1 => "Featuring only short words (6^4 = 1296 words)",
            WordlistId::DiceShort2 => {
                "Featuring longer words that may be more memorable (6^4 = 1296 words)"
            }
        }
    }

    /// A sample passphrase shown in the wordlist chooser
    pub fn example(self) -> &'static str {
        match self {
            WordlistId::Bip39 => "spider music exhibit",
            WordlistId::Wordle => "spews livid airns",
            WordlistId::DiceLong => "freebee attendant empirical",
            WordlistId::DiceShort1 => "stack lip visa",
            WordlistId::DiceShort2 => "liquid mapmaker shyness",
        }
    }

    /// Full download location for this list under `base_url`
    pub fn source_url(self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.file_name())
    }
}

impl fmt::Display for WordlistId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
