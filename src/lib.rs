// Core layer - configuration and transport-neutral responses
pub mod core;

// Storage layer - key-value backends
pub mod storage;

// Features layer - wordlists, generation, user preferences
pub mod features;

// Application layer - conversation state machine
pub mod conversation;

// Discord presentation
pub mod commands;
pub mod message_components;

pub use crate::core::Config;

pub use conversation::{ConversationController, InboundEvent};
pub use features::{PassphraseGenerator, UserConfigStore, WordlistRegistry};
pub use storage::{KeyValueStore, StoreError};
