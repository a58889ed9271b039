use parking_lot::Mutex;
use std::collections::HashMap;

use super::{ChatClient, MessageRef};
use crate::compose::FormattingSpan;

/// Edits the engine itself made, so the `Edited` events they cause are not
/// mistaken for the user's.
///
/// Only the latest edit per message is kept; an entry is consumed by the
/// first matching echo.
#[derive(Debug, Default)]
pub struct EditLog {
    edits: Mutex<HashMap<MessageRef, String>>,
}

impl EditLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the edit, then applies it through `chat`.
    pub async fn edit<C: ChatClient>(
        &self,
        chat: &C,
        message: MessageRef,
        text: &str,
        span: Option<FormattingSpan>,
    ) -> anyhow::Result<()> {
        self.edits.lock().insert(message, text.trim().to_string());
        let result = chat.edit_message(message, text, span).await;
        if result.is_err() {
            self.forget(message);
        }
        result
    }

    /// Returns `true` if `text` is what the engine last wrote into `message`.
    pub fn take_echo(&self, message: MessageRef, text: &str) -> bool {
        let mut edits = self.edits.lock();
        if edits.get(&message).is_some_and(|own| own == text.trim()) {
            edits.remove(&message);
            return true;
        }
        false
    }

    pub fn forget(&self, message: MessageRef) {
        self.edits.lock().remove(&message);
    }

    pub fn len(&self) -> usize {
        self.edits.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.lock().is_empty()
    }
}
