//! # Core Module
//!
//! Configuration and transport-neutral response types shared by every layer.
//!
//! - **Version**: 2.0.0
//! - **Since**: 0.1.0
//! - **Toggleable**: false
//!
//! ## Changelog
//! - 2.0.0: Response/Outbound types replace embed builders
//! - 1.1.0: Add response module with message chunking utilities
//! - 1.0.0: Initial creation with config module

pub mod config;
pub mod response;

pub use config::Config;
pub use response::{
    chunk_for_message, chunk_text, Choice, ChoiceMenu, ChoiceStyle, Format, Outbound, Response,
    MESSAGE_LIMIT,
};
