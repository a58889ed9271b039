use inquire::autocompletion::{Autocomplete, Replacement};

// Available slash commands: (command, description)
const SLASH_COMMANDS: &[(&str, &str)] = &[
    ("/chat", "Switch to another conversation id"),
    ("/edit", "Edit one of your messages: /edit <n> <text>"),
    ("/help", "Show available commands"),
    ("/history", "Show messages in this conversation"),
    ("/policy", "Show the policy that applies here"),
    ("/quit", "Exit"),
    ("/reply", "Reply to a message: /reply <n> <text>"),
];

/// Slash command autocompleter
#[derive(Clone, Default)]
pub struct SlashCommandCompleter;

impl Autocomplete for SlashCommandCompleter {
    fn get_suggestions(&mut self, input: &str) -> Result<Vec<String>, inquire::CustomUserError> {
        if !input.starts_with('/') {
            return Ok(vec![]);
        }

        let suggestions: Vec<String> = SLASH_COMMANDS
            .iter()
            .filter(|(cmd, _)| cmd.starts_with(input))
            .map(|(cmd, desc)| format!("{cmd}  {desc}"))
            .collect();

        Ok(suggestions)
    }

    fn get_completion(
        &mut self,
        _input: &str,
        highlighted_suggestion: Option<String>,
    ) -> Result<Replacement, inquire::CustomUserError> {
        let replacement =
            highlighted_suggestion.map(|s| s.split_whitespace().next().unwrap_or("").to_string());
        Ok(replacement)
    }
}

/// Console-only commands; everything else is a chat message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlashCommand {
    Chat(i64),
    Reply { to: i64, text: String },
    Edit { id: i64, text: String },
    History,
    Policy,
    Help,
    Quit,
    /// Known command with bad arguments; holds the usage line.
    Usage(&'static str),
    Unknown(String),
}

#[derive(Debug, PartialEq, Eq)]
pub enum Input {
    Message(String),
    Command(SlashCommand),
    Empty,
}

pub fn parse_input(input: &str) -> Input {
    let input = input.trim();

    if input.is_empty() {
        return Input::Empty;
    }

    input
        .strip_prefix('/')
        .map_or_else(|| Input::Message(input.to_string()), parse_slash_command)
}

fn parse_slash_command(cmd: &str) -> Input {
    let (name, args) = cmd
        .split_once(char::is_whitespace)
        .map_or((cmd, ""), |(name, args)| (name, args.trim()));

    let command = match name {
        "chat" => args
            .parse()
            .map_or(SlashCommand::Usage("/chat <id>"), SlashCommand::Chat),
        "reply" => parse_id_and_text(args).map_or(
            SlashCommand::Usage("/reply <n> <text>"),
            |(to, text)| SlashCommand::Reply { to, text },
        ),
        "edit" => parse_id_and_text(args).map_or(
            SlashCommand::Usage("/edit <n> <text>"),
            |(id, text)| SlashCommand::Edit { id, text },
        ),
        "history" => SlashCommand::History,
        "policy" => SlashCommand::Policy,
        "help" => SlashCommand::Help,
        "quit" | "exit" | "q" => SlashCommand::Quit,
        _ => SlashCommand::Unknown(cmd.to_string()),
    };

    Input::Command(command)
}

fn parse_id_and_text(args: &str) -> Option<(i64, String)> {
    let (id, text) = args.split_once(char::is_whitespace)?;
    let id = id.trim_start_matches('#').parse().ok()?;
    let text = text.trim();
    (!text.is_empty()).then(|| (id, text.to_string()))
}
