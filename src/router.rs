//! Dispatches the account's own message events.
//!
//! Each event goes either to the command interpreter or down the
//! policy-driven translate-and-rewrite path. Failures end the handling of
//! that one event; the message is left as the user wrote it.

use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::chat::{ChatClient, EditLog, EventKind, MessageEvent, MessageRef};
use crate::command::{
    Command, CommandInterpreter, REPLY_COMMAND_PREFIX, is_command, parse_reply_command,
    strip_retranslate_marker,
};
use crate::compose::compose;
use crate::config::ConfigFile;
use crate::error::{Error, Result};
use crate::policy::{Policy, PolicyStore};
use crate::translation::{TranslationBackend, TranslationRequest, Translator};

/// What the router did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not this system's concern.
    Ignored,
    /// A control command ran.
    Command,
    /// The message was replaced with its translation.
    Rewritten,
    /// Translation ran but there was nothing to write back.
    Unchanged,
    /// An error was logged; the message is untouched.
    Failed,
}

/// Router behaviour taken from the config document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouterSettings {
    /// Prefixes belonging to other automation tools and bot commands.
    pub ignored_prefixes: Vec<String>,
    pub notice_ttl: Duration,
}

impl From<&ConfigFile> for RouterSettings {
    fn from(config: &ConfigFile) -> Self {
        Self {
            ignored_prefixes: config.ignored_prefixes.clone(),
            notice_ttl: config.notice_ttl(),
        }
    }
}

pub struct EventRouter<C, B> {
    store: PolicyStore,
    translator: Translator<B>,
    chat: C,
    edits: EditLog,
    settings: RouterSettings,
}

impl<C: ChatClient, B: TranslationBackend> EventRouter<C, B> {
    pub fn new(
        store: PolicyStore,
        translator: Translator<B>,
        chat: C,
        settings: RouterSettings,
    ) -> Self {
        Self {
            store,
            translator,
            chat,
            edits: EditLog::new(),
            settings,
        }
    }

    pub const fn store(&self) -> &PolicyStore {
        &self.store
    }

    pub const fn chat(&self) -> &C {
        &self.chat
    }

    pub const fn translator(&self) -> &Translator<B> {
        &self.translator
    }

    pub const fn edits(&self) -> &EditLog {
        &self.edits
    }

    /// Handles one event. Never fails: errors are logged and swallowed.
    pub async fn handle(&self, event: &MessageEvent) -> Outcome {
        match self.dispatch(event).await {
            Ok(outcome) => {
                debug!(?outcome, message = ?event.message, "Handled event");
                outcome
            }
            Err(err) => {
                error!(error = %err, message = ?event.message, "Error handling message");
                if let Error::Provider {
                    response: Some(response),
                    ..
                } = &err
                {
                    debug!(%response, "Provider response");
                }
                Outcome::Failed
            }
        }
    }

    async fn dispatch(&self, event: &MessageEvent) -> Result<Outcome> {
        if event.kind == EventKind::Edited && self.edits.take_echo(event.message, &event.text) {
            debug!("Echo of our own edit");
            return Ok(Outcome::Ignored);
        }
        let text = event.text.trim();
        if text.is_empty() {
            return Ok(Outcome::Ignored);
        }
        if event.has_blockquote() {
            debug!("Message already carries a quote block");
            return Ok(Outcome::Ignored);
        }
        if self.is_foreign_command(text) {
            return Ok(Outcome::Ignored);
        }

        if is_command(text) {
            return self.interpreter().execute(event, Command::parse(text)).await;
        }

        if let Some(policy) = parse_reply_command(text) {
            return self.translate_reply(event, policy).await;
        }

        let text = match (event.kind, strip_retranslate_marker(text)) {
            (_, Some(stripped)) => stripped,
            (EventKind::Created, None) => text,
            // Only marked edits are translated again.
            (EventKind::Edited, None) => return Ok(Outcome::Ignored),
        };

        let Some(policy) = self.store.resolve(event.chat_id(), event.sender_id) else {
            return Ok(Outcome::Ignored);
        };

        info!(chat_id = event.chat_id(), "Translating message");
        translate_and_rewrite(
            &self.translator,
            &self.chat,
            &self.edits,
            event.message,
            &event.text,
            text,
            &policy,
        )
        .await
    }

    /// Translates the replied-to message, writing onto the replying one.
    async fn translate_reply(
        &self,
        event: &MessageEvent,
        policy: Result<Policy>,
    ) -> Result<Outcome> {
        let Some(reply_to) = event.reply_to else {
            warn!("'{REPLY_COMMAND_PREFIX}' used outside a reply");
            return Ok(Outcome::Ignored);
        };
        let policy = match policy {
            Ok(policy) => policy,
            Err(err) => return self.interpreter().execute(event, Err(err)).await,
        };

        let original = self
            .chat
            .fetch_message(event.chat_id(), reply_to)
            .await
            .map_err(Error::Transport)?;
        let Some(original) = original else {
            let err = Error::configuration(format!("Replied message {reply_to} not found"));
            return self.interpreter().execute(event, Err(err)).await;
        };

        self.interpreter()
            .translate_once(event, original.trim(), &policy)
            .await
    }

    fn is_foreign_command(&self, text: &str) -> bool {
        self.settings
            .ignored_prefixes
            .iter()
            .any(|prefix| !prefix.is_empty() && text.starts_with(prefix.as_str()))
    }

    const fn interpreter(&self) -> CommandInterpreter<'_, C, B> {
        CommandInterpreter {
            store: &self.store,
            chat: &self.chat,
            edits: &self.edits,
            translator: &self.translator,
            notice_ttl: self.settings.notice_ttl,
        }
    }
}

/// Translates `text` by `policy` and replaces `message` with the result.
///
/// `current_text` is what the message says now; an identical single-language
/// result is not written back.
pub async fn translate_and_rewrite<C: ChatClient, B: TranslationBackend>(
    translator: &Translator<B>,
    chat: &C,
    edits: &EditLog,
    message: MessageRef,
    current_text: &str,
    text: &str,
    policy: &Policy,
) -> Result<Outcome> {
    let result = translator
        .translate(&TranslationRequest::new(text, policy))
        .await?;

    let ordered = result.ordered(&policy.target_langs);
    let Some(composed) = compose(current_text, &ordered) else {
        return Ok(Outcome::Unchanged);
    };

    edits
        .edit(chat, message, &composed.text, composed.span)
        .await
        .map_err(Error::Transport)?;
    Ok(Outcome::Rewritten)
}
