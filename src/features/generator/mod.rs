//! # Feature: Passphrase Generation
//!
//! Draws words uniformly at random (with replacement) from a loaded wordlist
//! and joins them with a separator. Indices come from a cryptographically
//! secure generator through a `Uniform` distribution built once per call,
//! which rejects draws that would bias the result toward low indices.
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 1.2.0: Sample through `Uniform` (rejection sampling) instead of `random_range`
//! - 1.1.0: PassphraseConfig is a plain value; generator owns a registry handle
//! - 1.0.0: Initial release

use rand::distr::{Distribution, Uniform};
use rand::{CryptoRng, Rng};
use std::sync::Arc;
use thiserror::Error;

use crate::features::wordlists::{Wordlist, WordlistId, WordlistRegistry};

pub const DEFAULT_LENGTH: usize = 3;
pub const DEFAULT_SEPARATOR: &str = "-";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("wordlist {0} is not available for generation")]
    InvalidConfig(WordlistId),
}

/// Everything needed for one passphrase, built fresh per request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassphraseConfig {
    pub wordlist: WordlistId,
    pub length: usize,
    pub separator: String,
}

impl PassphraseConfig {
    pub fn new(wordlist: WordlistId, length: usize, separator: impl Into<String>) -> Self {
        Self {
            wordlist,
            length,
            separator: separator.into(),
        }
    }
}

impl Default for PassphraseConfig {
    fn default() -> Self {
        Self::new(WordlistId::DEFAULT, DEFAULT_LENGTH, DEFAULT_SEPARATOR)
    }
}

#[derive(Debug, Clone)]
pub struct PassphraseGenerator {
    registry: Arc<WordlistRegistry>,
}

impl PassphraseGenerator {
    pub fn new(registry: Arc<WordlistRegistry>) -> Self {
        Self { registry }
    }

    /// The wordlist `config` would draw from, if it is usable
    pub fn validate(&self, config: &PassphraseConfig) -> Result<&Wordlist, GenerateError> {
        self.registry
            .get(config.wordlist)
            .filter(|w| w.is_usable())
            .ok_or(GenerateError::InvalidConfig(config.wordlist))
    }

    /// Generate a passphrase using the thread-local CSPRNG
    pub fn generate(&self, config: &PassphraseConfig) -> Result<String, GenerateError> {
        self.generate_with(config, &mut rand::rng())
    }

    /// Generate a passphrase drawing indices from `rng`
    ///
    /// A zero length yields an empty string without touching `rng`.
    pub fn generate_with<R>(&self, config: &PassphraseConfig, rng: &mut R) -> Result<String, GenerateError>
    where
        R: Rng + CryptoRng,
    {
        let wordlist = self.validate(config)?;
        if config.length == 0 {
            return Ok(String::new());
        }

        let words = wordlist.words();
        let index = Uniform::new(0, words.len())
            .map_err(|_| GenerateError::InvalidConfig(config.wordlist))?;
        let parts: Vec<&str> = (0..config.length)
            .map(|_| words[index.sample(rng)].as_str())
            .collect();

        Ok(parts.join(&config.separator))
    }
}
