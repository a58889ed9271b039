//! Local interactive transport.
//!
//! Plays the part of a chat network: messages typed at the prompt become
//! events for the router, and the engine's edits and deletions are applied to
//! an in-process message list and echoed back as edit events.

mod client;
mod command;
mod session;
mod ui;

pub use client::{CONSOLE_SENDER_ID, ConsoleClient, ConsoleMessage};
pub use command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
pub use session::{ConsoleSession, DEFAULT_CHAT_ID};
