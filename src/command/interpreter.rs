use std::time::Duration;
use tracing::{error, info, warn};

use super::parser::Command;
use crate::chat::{ChatClient, EditLog, MessageEvent};
use crate::error::{Error, Result};
use crate::policy::{ConversationKey, Policy, PolicyStore};
use crate::router::{Outcome, translate_and_rewrite};
use crate::translation::{TranslationBackend, Translator};

/// Applies one parsed command to the store and the triggering message.
///
/// Borrowed per event from the router; holds no state of its own.
pub struct CommandInterpreter<'a, C, B> {
    pub store: &'a PolicyStore,
    pub chat: &'a C,
    pub edits: &'a EditLog,
    pub translator: &'a Translator<B>,
    /// How long a notice stays visible before the message is deleted.
    pub notice_ttl: Duration,
}

impl<C: ChatClient, B: TranslationBackend> CommandInterpreter<'_, C, B> {
    /// Runs a command, or shows the parse error in place of the message.
    pub async fn execute(
        &self,
        event: &MessageEvent,
        command: Result<Command>,
    ) -> Result<Outcome> {
        match command {
            Ok(command) => self.run(event, command).await,
            Err(Error::Configuration(reason)) => {
                warn!(%reason, "Rejected command");
                self.notify(event, &format!("✗ {reason}")).await?;
                Ok(Outcome::Command)
            }
            Err(err) => Err(err),
        }
    }

    async fn run(&self, event: &MessageEvent, command: Command) -> Result<Outcome> {
        let chat_key = ConversationKey::chat(event.chat_id(), event.sender_id);
        let global_key = ConversationKey::global(event.sender_id);

        match command {
            Command::Off => {
                self.disable(&chat_key);
                self.delete(event).await?;
            }
            Command::OffGlobal => {
                self.disable(&global_key);
                self.delete(event).await?;
            }
            Command::On(policy) => {
                let notice = enabled_notice("this chat", &policy);
                self.enable(chat_key, policy);
                self.notify(event, &notice).await?;
            }
            Command::OnGlobal(policy) => {
                let notice = enabled_notice("all chats", &policy);
                self.enable(global_key, policy);
                self.notify(event, &notice).await?;
            }
            Command::Skip { rest } => {
                info!("Skipping translation for one message");
                if rest.trim().is_empty() {
                    self.delete(event).await?;
                } else {
                    self.edits
                        .edit(self.chat, event.message, &rest, None)
                        .await
                        .map_err(Error::Transport)?;
                }
            }
            Command::Once { policy, text } => {
                return self.translate_once(event, &text, &policy).await;
            }
            Command::Unknown(head) => {
                warn!(command = %head, "Unknown command");
                self.notify(event, &format!("✗ Unknown command: {head}"))
                    .await?;
            }
        }

        Ok(Outcome::Command)
    }

    /// Replaces the command message with the translation of `text`, or
    /// with a notice when there is nothing to translate.
    pub async fn translate_once(
        &self,
        event: &MessageEvent,
        text: &str,
        policy: &Policy,
    ) -> Result<Outcome> {
        let outcome = translate_and_rewrite(
            self.translator,
            self.chat,
            self.edits,
            event.message,
            &event.text,
            text,
            policy,
        )
        .await?;

        if outcome == Outcome::Unchanged {
            info!("Nothing to translate");
            self.notify(event, NOTHING_TO_TRANSLATE).await?;
        }
        Ok(outcome)
    }

    fn enable(&self, key: ConversationKey, policy: Policy) {
        info!(%key, ?policy, "Translation enabled");
        if let Err(err) = self.store.set(key, policy) {
            error!(error = %err, "Policy kept in memory only");
        }
    }

    fn disable(&self, key: &ConversationKey) {
        match self.store.delete(key) {
            Ok(true) => info!(%key, "Translation disabled"),
            Ok(false) => {}
            Err(err) => error!(error = %err, "Policy removal kept in memory only"),
        }
    }

    async fn delete(&self, event: &MessageEvent) -> Result<()> {
        self.edits.forget(event.message);
        self.chat
            .delete_message(event.message)
            .await
            .map_err(Error::Transport)
    }

    /// Shows a notice in place of the message, then deletes it.
    async fn notify(&self, event: &MessageEvent, notice: &str) -> Result<()> {
        self.edits
            .edit(self.chat, event.message, notice, None)
            .await
            .map_err(Error::Transport)?;
        tokio::time::sleep(self.notice_ttl).await;
        self.delete(event).await
    }
}

const NOTHING_TO_TRANSLATE: &str = "✗ Nothing to translate";

fn enabled_notice(scope: &str, policy: &Policy) -> String {
    format!(
        "✓ Translation on for {scope}: {} → {}",
        policy.source_lang,
        policy.target_langs.join(", ")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enabled_notice_lists_targets_in_order() {
        let policy = Policy::new("zh", vec!["en".to_string(), "ja".to_string()]);
        let notice = policy.map(|p| enabled_notice("this chat", &p)).unwrap_or_default();
        assert_eq!(notice, "✓ Translation on for this chat: zh → en, ja");
    }
}
