use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;

use super::ui;
use crate::chat::{ChatClient, EntityKind, EventKind, MessageEvent, MessageRef, TextEntity};
use crate::compose::FormattingSpan;

/// Sender id the console user posts as.
pub const CONSOLE_SENDER_ID: i64 = 1;

/// A message as the console keeps it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConsoleMessage {
    pub message: MessageRef,
    pub text: String,
    pub span: Option<FormattingSpan>,
    pub reply_to: Option<i64>,
    pub deleted: bool,
}

impl ConsoleMessage {
    fn event(&self, kind: EventKind) -> MessageEvent {
        MessageEvent {
            kind,
            message: self.message,
            sender_id: CONSOLE_SENDER_ID,
            text: self.text.clone(),
            reply_to: self.reply_to,
            entities: self
                .span
                .map(|span| TextEntity {
                    kind: EntityKind::Blockquote,
                    span,
                })
                .into_iter()
                .collect(),
        }
    }
}

#[derive(Debug, Default)]
struct State {
    messages: Vec<ConsoleMessage>,
    /// Edit events produced by the engine's own edits, like a real client
    /// would deliver them.
    pending: VecDeque<MessageEvent>,
}

/// In-process chat client backing the interactive console.
#[derive(Debug, Default)]
pub struct ConsoleClient {
    state: Mutex<State>,
    quiet: bool,
}

impl ConsoleClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// A client that renders nothing; for tests.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            ..Self::default()
        }
    }

    /// Posts a new message and returns its created event.
    pub fn post(&self, chat_id: i64, text: &str, reply_to: Option<i64>) -> MessageEvent {
        let mut state = self.state.lock();
        let message = ConsoleMessage {
            message: MessageRef {
                chat_id,
                message_id: state.messages.len() as i64 + 1,
            },
            text: text.to_string(),
            span: None,
            reply_to,
            deleted: false,
        };
        let event = message.event(EventKind::Created);
        state.messages.push(message);
        event
    }

    /// Edits one of the user's messages; `None` if it does not exist here.
    pub fn edit_by_user(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
    ) -> Option<MessageEvent> {
        let mut state = self.state.lock();
        let message = find_mut(&mut state.messages, chat_id, message_id)?;
        message.text = text.to_string();
        message.span = None;
        Some(message.event(EventKind::Edited))
    }

    /// Takes the next edit event produced by an engine edit.
    pub fn next_pending(&self) -> Option<MessageEvent> {
        self.state.lock().pending.pop_front()
    }

    pub fn history(&self, chat_id: i64) -> Vec<ConsoleMessage> {
        self.state
            .lock()
            .messages
            .iter()
            .filter(|m| m.message.chat_id == chat_id && !m.deleted)
            .cloned()
            .collect()
    }

    pub fn get(&self, message: MessageRef) -> Option<ConsoleMessage> {
        self.state
            .lock()
            .messages
            .iter()
            .find(|m| m.message == message)
            .cloned()
    }
}

fn find_mut(
    messages: &mut [ConsoleMessage],
    chat_id: i64,
    message_id: i64,
) -> Option<&mut ConsoleMessage> {
    messages.iter_mut().find(|m| {
        m.message.chat_id == chat_id && m.message.message_id == message_id && !m.deleted
    })
}

#[async_trait]
impl ChatClient for ConsoleClient {
    async fn edit_message(
        &self,
        message: MessageRef,
        text: &str,
        span: Option<FormattingSpan>,
    ) -> anyhow::Result<()> {
        let edited = {
            let mut state = self.state.lock();
            let Some(stored) = find_mut(&mut state.messages, message.chat_id, message.message_id)
            else {
                anyhow::bail!("message {} not found", message.message_id);
            };
            stored.text = text.to_string();
            stored.span = span;
            let edited = stored.clone();
            state.pending.push_back(edited.event(EventKind::Edited));
            edited
        };

        if !self.quiet {
            ui::print_edited(&edited);
        }
        Ok(())
    }

    async fn delete_message(&self, message: MessageRef) -> anyhow::Result<()> {
        {
            let mut state = self.state.lock();
            let Some(stored) = find_mut(&mut state.messages, message.chat_id, message.message_id)
            else {
                anyhow::bail!("message {} not found", message.message_id);
            };
            stored.deleted = true;
        }

        if !self.quiet {
            ui::print_deleted(message.message_id);
        }
        Ok(())
    }

    async fn fetch_message(
        &self,
        chat_id: i64,
        message_id: i64,
    ) -> anyhow::Result<Option<String>> {
        let mut state = self.state.lock();
        Ok(find_mut(&mut state.messages, chat_id, message_id).map(|m| m.text.clone()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_engine_edit_queues_edited_event() {
        let client = ConsoleClient::quiet();
        let event = client.post(7, "你好", None);

        let span = FormattingSpan {
            offset: 6,
            length: 5,
        };
        client
            .edit_message(event.message, "Hello\nHallo", Some(span))
            .await
            .unwrap();

        let pending = client.next_pending().unwrap();
        assert_eq!(pending.kind, EventKind::Edited);
        assert_eq!(pending.text, "Hello\nHallo");
        assert!(pending.has_blockquote());
        assert!(client.next_pending().is_none());
    }

    #[tokio::test]
    async fn test_deleted_messages_leave_history() {
        let client = ConsoleClient::quiet();
        let first = client.post(7, "one", None);
        client.post(7, "two", None);
        client.post(8, "elsewhere", None);

        client.delete_message(first.message).await.unwrap();

        let history = client.history(7);
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].text, "two");
        assert_eq!(client.fetch_message(7, 1).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_fetch_and_user_edit() {
        let client = ConsoleClient::quiet();
        let event = client.post(7, "Bonjour", None);
        let reply = client.post(7, ".tt,fr,en", Some(event.message.message_id));

        assert_eq!(reply.reply_to, Some(1));
        assert_eq!(
            client.fetch_message(7, 1).await.unwrap().as_deref(),
            Some("Bonjour")
        );

        let edited = client.edit_by_user(7, 1, ".tt Bonjour !").unwrap();
        assert_eq!(edited.kind, EventKind::Edited);
        assert!(client.edit_by_user(7, 99, "nope").is_none());
    }

    #[tokio::test]
    async fn test_edit_missing_message_fails() {
        let client = ConsoleClient::quiet();
        let missing = MessageRef {
            chat_id: 1,
            message_id: 1,
        };
        assert!(client.edit_message(missing, "x", None).await.is_err());
        assert!(client.delete_message(missing).await.is_err());
    }
}
