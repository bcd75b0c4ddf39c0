//! # Features
//!
//! Passphrase generation and the per-user settings it reads.

pub mod generator;
pub mod preferences;
pub mod wordlists;

pub use generator::{GenerateError, PassphraseConfig, PassphraseGenerator};
pub use preferences::{PendingAction, UserConfigStore, UserPreferences};
pub use wordlists::{Wordlist, WordlistError, WordlistId, WordlistRegistry};
