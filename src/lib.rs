//! # teletrans - in-place translation of your own chat messages
//!
//! `teletrans` watches the messages an account sends and, when a translation
//! policy covers the conversation, replaces each one with its translation.
//! With several target languages the first translation leads and the rest
//! follow inside a quote block.
//!
//! ## Controlling it from the chat
//!
//! ```text
//! .tt-on,zh,en|ja        translate this chat from zh into en and ja
//! .tt-on-global,zh,en    default for every chat without its own policy
//! .tt-off                stop translating this chat
//! .tt-off-global         drop the default
//! .tt-once,zh,fr 你好     translate one message with an ad-hoc policy
//! .tt-skip 你好           send one message untranslated
//! .tt,ja,en              (as a reply) translate the replied-to message
//! ```
//!
//! Editing a message so it starts with `.tt ` translates it again.
//!
//! ## Configuration
//!
//! Settings and policies live in `<workspace>/config.json`:
//!
//! ```json
//! {
//!   "target_config": { "-1001.42": { "source_lang": "zh", "target_langs": ["en"] } },
//!   "openai": { "enable": true, "api_key": "sk-...", "model": "gpt-4o-mini" },
//!   "deeplx": { "url": "https://api.deeplx.org/translate" }
//! }
//! ```

/// Chat-client collaborator trait and message events.
pub mod chat;

/// Command-line interface definition.
pub mod cli;

/// In-chat control commands: parsing and execution.
pub mod command;

/// Message composition with UTF-16 formatting spans.
pub mod compose;

/// JSON configuration document.
pub mod config;

/// Local interactive transport.
pub mod console;

/// Crate error type.
pub mod error;

/// File system utilities.
pub mod fs;

/// Logging setup.
pub mod logging;

/// Workspace paths.
pub mod paths;

/// Per-conversation translation policies.
pub mod policy;

/// Event routing.
pub mod router;

/// Translation backends and the fan-out orchestrator.
pub mod translation;

/// Terminal UI components (spinner, colors).
pub mod ui;

pub use error::{Error, Result};
