use serde::{Deserialize, Serialize};
use std::fmt;

/// Chat id standing in for "every conversation" in sender-wide keys.
pub const GLOBAL_CHAT_ID: i64 = 0;

/// Identifies the scope a [`Policy`](super::Policy) applies to.
///
/// Serialized as `"<chat>.<sender>"`; lookups are exact string matches.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationKey(String);

impl ConversationKey {
    /// Key for one sender in one specific chat.
    pub fn chat(chat_id: i64, sender_id: i64) -> Self {
        Self(format!("{chat_id}.{sender_id}"))
    }

    /// Sender-wide fallback key.
    pub fn global(sender_id: i64) -> Self {
        Self::chat(GLOBAL_CHAT_ID, sender_id)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
