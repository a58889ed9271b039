//! The chat-client collaborator.
//!
//! The engine never talks to a chat network directly. A transport delivers
//! [`MessageEvent`]s for messages the account itself sent, and exposes the
//! few calls the engine needs through [`ChatClient`].

mod echo;

use async_trait::async_trait;

use crate::compose::FormattingSpan;

pub use echo::EditLog;

/// Identifies a message within a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Created,
    Edited,
}

/// Rich-text annotation kinds the engine cares about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Blockquote,
    Other,
}

/// A rich-text annotation on a message, in UTF-16 units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEntity {
    pub kind: EntityKind,
    pub span: FormattingSpan,
}

/// One of the account's own messages, as created or edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageEvent {
    pub kind: EventKind,
    pub message: MessageRef,
    pub sender_id: i64,
    pub text: String,
    /// Id of the message this one replies to, in the same chat.
    pub reply_to: Option<i64>,
    pub entities: Vec<TextEntity>,
}

impl MessageEvent {
    pub const fn chat_id(&self) -> i64 {
        self.message.chat_id
    }

    pub fn has_blockquote(&self) -> bool {
        self.entities
            .iter()
            .any(|entity| entity.kind == EntityKind::Blockquote)
    }
}

/// Calls back into the chat client.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Replaces the message text; `span` marks the quoted block.
    async fn edit_message(
        &self,
        message: MessageRef,
        text: &str,
        span: Option<FormattingSpan>,
    ) -> anyhow::Result<()>;

    async fn delete_message(&self, message: MessageRef) -> anyhow::Result<()>;

    /// Returns the text of a message, or `None` if it no longer exists.
    async fn fetch_message(&self, chat_id: i64, message_id: i64)
    -> anyhow::Result<Option<String>>;
}
