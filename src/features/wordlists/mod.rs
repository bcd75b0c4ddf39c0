//! # Feature: Wordlists
//!
//! The catalog of supported wordlists and the registry holding their words.
//! Every list is downloaded once at startup (JSON array of strings, 3 second
//! timeout by default); a list that fails to load stops the bot from starting.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Registry is built once and shared by reference instead of a global map
//! - 1.1.0: Added Wordle, Dice Long, Dice Short 1 and Dice Short 2
//! - 1.0.0: Initial release with BIP39

pub mod catalog;
pub mod registry;

pub use catalog::WordlistId;
pub use registry::{parse_words, Wordlist, WordlistError, WordlistRegistry};
