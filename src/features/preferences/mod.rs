//! # Feature: User Preferences
//!
//! Per-user wordlist, word count and separator, plus the short-lived pending
//! action marker that drives the conversation. Everything lives in the
//! key-value backend under `<prefix>:<user id>` keys; nothing is cached in
//! process memory.
//!
//! | Key | Value | Expiry |
//! |---|---|---|
//! | `plist:<user>` | wordlist id | none |
//! | `wordsn:<user>` | word count | 365 days |
//! | `sep:<user>` | separator | 365 days |
//! | `lastact:<user>` | pending action tag | 1 hour |
//!
//! Concurrent writes for one user are last-write-wins.
//!
//! - **Version**: 1.1.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.1.0: Typed store errors, `UserPreferences` snapshot with defaults applied
//! - 1.0.0: Initial release

pub mod pending;
pub mod store;

pub use pending::PendingAction;
pub use store::{UserConfigStore, UserPreferences};

use std::time::Duration;

pub const WORDLIST_PREFIX: &str = "plist";
pub const WORD_COUNT_PREFIX: &str = "wordsn";
pub const SEPARATOR_PREFIX: &str = "sep";
pub const PENDING_ACTION_PREFIX: &str = "lastact";

pub use crate::features::generator::{
    DEFAULT_LENGTH as DEFAULT_WORD_COUNT, DEFAULT_SEPARATOR,
};

/// Largest accepted word count
pub const MAX_WORD_COUNT: usize = 200;
/// Separators must be strictly shorter than this many bytes
pub const MAX_SEPARATOR_BYTES: usize = 8;

pub const PENDING_ACTION_TTL: Duration = Duration::from_secs(3600);
pub const PREFERENCE_TTL_DAYS: i64 = 365;

/// Backend key for one user's field
pub fn key(prefix: &str, user_id: u64) -> String {
    format!("{prefix}:{user_id}")
}
