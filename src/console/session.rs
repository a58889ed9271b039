use anyhow::Result;
use inquire::Text;
use inquire::ui::{Attributes, Color, RenderConfig, StyleSheet, Styled};
use tracing::debug;

use super::client::{CONSOLE_SENDER_ID, ConsoleClient};
use super::command::{Input, SlashCommand, SlashCommandCompleter, parse_input};
use super::ui;
use crate::chat::{MessageEvent, MessageRef};
use crate::policy::GLOBAL_CHAT_ID;
use crate::router::{EventRouter, Outcome};
use crate::translation::TranslationBackend;
use crate::ui::Spinner;

/// Conversation the console opens in.
pub const DEFAULT_CHAT_ID: i64 = 1;

/// An interactive session posting into the in-process chat.
///
/// Every message and edit typed here goes through the event router exactly
/// as one from a real chat account would.
pub struct ConsoleSession<B> {
    router: EventRouter<ConsoleClient, B>,
    chat_id: i64,
}

impl<B: TranslationBackend> ConsoleSession<B> {
    pub const fn new(router: EventRouter<ConsoleClient, B>) -> Self {
        Self {
            router,
            chat_id: DEFAULT_CHAT_ID,
        }
    }

    pub const fn chat_id(&self) -> i64 {
        self.chat_id
    }

    pub async fn run(&mut self) -> Result<()> {
        ui::print_header(self.chat_id);

        let prompt_style = Styled::new("❯")
            .with_fg(Color::LightBlue)
            .with_attr(Attributes::BOLD);
        let mut render_config = RenderConfig::default()
            .with_prompt_prefix(prompt_style)
            .with_answered_prompt_prefix(prompt_style);
        render_config.option = StyleSheet::new().with_fg(Color::Grey);
        render_config.selected_option = Some(StyleSheet::new().with_fg(Color::DarkMagenta));

        loop {
            let input = Text::new("")
                .with_render_config(render_config)
                .with_autocomplete(SlashCommandCompleter)
                .with_help_message("Type a message, /help for commands, Ctrl+C to quit")
                .prompt();

            match input {
                Ok(line) => match parse_input(&line) {
                    Input::Empty => {}
                    Input::Command(command) => {
                        if !self.handle_command(command).await {
                            break;
                        }
                    }
                    Input::Message(text) => self.send(&text, None).await,
                },
                Err(
                    inquire::InquireError::OperationCanceled
                    | inquire::InquireError::OperationInterrupted,
                ) => {
                    println!();
                    break;
                }
                Err(e) => return Err(e.into()),
            }
        }

        ui::print_goodbye();
        Ok(())
    }

    /// Returns `false` when the session should end.
    async fn handle_command(&mut self, command: SlashCommand) -> bool {
        match command {
            SlashCommand::Chat(GLOBAL_CHAT_ID) => {
                ui::print_error(&format!("Chat id {GLOBAL_CHAT_ID} is reserved"));
            }
            SlashCommand::Chat(chat_id) => {
                self.chat_id = chat_id;
                ui::print_switched(chat_id);
            }
            SlashCommand::Reply { to, text } => {
                let target = MessageRef {
                    chat_id: self.chat_id,
                    message_id: to,
                };
                match self.router.chat().get(target) {
                    Some(message) if !message.deleted => self.send(&text, Some(to)).await,
                    _ => ui::print_error(&format!("No message #{to} in this chat")),
                }
            }
            SlashCommand::Edit { id, text } => {
                match self.router.chat().edit_by_user(self.chat_id, id, &text) {
                    Some(event) => self.deliver(event).await,
                    None => ui::print_error(&format!("No message #{id} in this chat")),
                }
            }
            SlashCommand::History => {
                ui::print_history(self.chat_id, &self.router.chat().history(self.chat_id));
            }
            SlashCommand::Policy => {
                let policy = self
                    .router
                    .store()
                    .resolve(self.chat_id, CONSOLE_SENDER_ID);
                ui::print_policy(self.chat_id, policy.as_ref());
            }
            SlashCommand::Help => ui::print_help(),
            SlashCommand::Quit => return false,
            SlashCommand::Usage(usage) => ui::print_error(&format!("Usage: {usage}")),
            SlashCommand::Unknown(command) => {
                ui::print_error(&format!("Unknown command: /{command}"));
            }
        }
        true
    }

    async fn send(&self, text: &str, reply_to: Option<i64>) {
        let event = self.router.chat().post(self.chat_id, text, reply_to);
        ui::print_sent(event.message.message_id);
        self.deliver(event).await;
    }

    /// Routes an event, then the edit events its handling produced.
    async fn deliver(&self, event: MessageEvent) {
        let spinner = Spinner::new("Translating...");
        let outcome = self.router.handle(&event).await;

        spinner.set_message("Delivering edits...");
        while let Some(echo) = self.router.chat().next_pending() {
            let outcome = self.router.handle(&echo).await;
            debug!(?outcome, message = ?echo.message, "Handled echoed edit");
        }
        spinner.stop();

        if outcome == Outcome::Failed {
            ui::print_error("Message left unchanged, see log.txt");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DeeplxConfig, OpenAiConfig};
    use crate::policy::{Policies, PolicyStore};
    use crate::router::RouterSettings;
    use crate::translation::{ProviderGateway, Translator};
    use std::time::Duration;

    fn session() -> ConsoleSession<ProviderGateway> {
        let gateway = ProviderGateway::new(&DeeplxConfig::default(), &OpenAiConfig::default());
        let router = EventRouter::new(
            PolicyStore::in_memory(Policies::new()),
            Translator::new(gateway, false),
            ConsoleClient::quiet(),
            RouterSettings {
                ignored_prefixes: Vec::new(),
                notice_ttl: Duration::ZERO,
            },
        );
        ConsoleSession::new(router)
    }

    #[tokio::test]
    async fn test_chat_switch_rejects_global_id() {
        let mut session = session();

        assert!(session.handle_command(SlashCommand::Chat(0)).await);
        assert_eq!(session.chat_id(), DEFAULT_CHAT_ID);

        assert!(session.handle_command(SlashCommand::Chat(-42)).await);
        assert_eq!(session.chat_id(), -42);
    }

    #[tokio::test]
    async fn test_quit_ends_session() {
        let mut session = session();
        assert!(!session.handle_command(SlashCommand::Quit).await);
    }

    #[tokio::test]
    async fn test_policy_command_updates_store() {
        let session = session();

        session.send(".tt-on,zh,en", None).await;

        let policy = session
            .router
            .store()
            .resolve(DEFAULT_CHAT_ID, CONSOLE_SENDER_ID);
        assert_eq!(
            policy.map(|p| p.target_langs),
            Some(vec!["en".to_string()])
        );
        // The notice was shown, then the command message deleted.
        assert!(session.router.chat().history(DEFAULT_CHAT_ID).is_empty());
    }
}
