use crate::error::{Error, Result};
use crate::policy::Policy;

/// Prefix shared by every policy command.
pub const COMMAND_PREFIX: &str = ".tt-";

/// One-shot form used on a reply: `.tt,<src>,<langs>`.
pub const REPLY_COMMAND_PREFIX: &str = ".tt,";

/// Prefix a user puts on an edited message to have it translated again.
pub const RETRANSLATE_MARKER: &str = ".tt ";

const SKIP: &str = ".tt-skip";

const USAGE: &str = "Usage: .tt-on,<source>,<target>[|<target>...]";
const ONCE_USAGE: &str = "Usage: .tt-once,<source>,<target>[|<target>...] <text>";

/// A control command typed into the user's own message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Drop the policy for this chat.
    Off,
    /// Drop the sender-wide policy.
    OffGlobal,
    /// Set the policy for this chat.
    On(Policy),
    /// Set the sender-wide policy.
    OnGlobal(Policy),
    /// Send the rest of the message untranslated.
    Skip { rest: String },
    /// Translate the given text once, leaving stored policies alone.
    Once { policy: Policy, text: String },
    /// Starts with the command prefix but names no known command.
    Unknown(String),
}

/// Returns `true` if the (trimmed) text is meant for the command interpreter.
pub fn is_command(text: &str) -> bool {
    text.starts_with(COMMAND_PREFIX)
}

impl Command {
    /// Parses a trimmed message starting with [`COMMAND_PREFIX`].
    ///
    /// Malformed arguments to a known command are a [`Error::Configuration`]
    /// carrying a message fit to show the user.
    pub fn parse(text: &str) -> Result<Self> {
        if let Some(rest) = text.strip_prefix(SKIP) {
            return Ok(Self::Skip {
                rest: rest.to_string(),
            });
        }

        let head_end = text
            .find(|c: char| c == ',' || c.is_whitespace())
            .unwrap_or(text.len());
        let (head, tail) = text.split_at(head_end);
        let args = tail.strip_prefix(',').unwrap_or("");

        match head {
            ".tt-off" => Ok(Self::Off),
            ".tt-off-global" => Ok(Self::OffGlobal),
            ".tt-on" => parse_policy(args).map(Self::On),
            ".tt-on-global" => parse_policy(args).map(Self::OnGlobal),
            ".tt-once" => parse_once(args),
            _ => Ok(Self::Unknown(head.to_string())),
        }
    }
}

/// Parses `.tt,<src>,<langs>`; `None` if the text is not in that form.
pub fn parse_reply_command(text: &str) -> Option<Result<Policy>> {
    let args = text.strip_prefix(REPLY_COMMAND_PREFIX)?;
    Some(parse_policy(args.trim()))
}

/// Strips [`RETRANSLATE_MARKER`], returning the text to translate.
pub fn strip_retranslate_marker(text: &str) -> Option<&str> {
    text.strip_prefix(RETRANSLATE_MARKER).map(str::trim_start)
}

fn parse_policy(args: &str) -> Result<Policy> {
    Policy::parse(args).map_err(|err| Error::configuration(format!("{err}\n{USAGE}")))
}

fn parse_once(args: &str) -> Result<Command> {
    let Some((policy_args, text)) = args.split_once(char::is_whitespace) else {
        return Err(Error::configuration(format!("nothing to translate\n{ONCE_USAGE}")));
    };
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::configuration(format!("nothing to translate\n{ONCE_USAGE}")));
    }

    let policy = Policy::parse(policy_args)
        .map_err(|err| Error::configuration(format!("{err}\n{ONCE_USAGE}")))?;
    Ok(Command::Once {
        policy,
        text: text.to_string(),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn policy(args: &str) -> Policy {
        Policy::parse(args).unwrap()
    }

    #[test]
    fn test_parse_off_commands() {
        assert_eq!(Command::parse(".tt-off").unwrap(), Command::Off);
        assert_eq!(Command::parse(".tt-off-global").unwrap(), Command::OffGlobal);
    }

    #[test]
    fn test_parse_on_commands() {
        assert_eq!(
            Command::parse(".tt-on,en,fr|de").unwrap(),
            Command::On(policy("en,fr|de"))
        );
        assert_eq!(
            Command::parse(".tt-on-global,zh,en").unwrap(),
            Command::OnGlobal(policy("zh,en"))
        );
    }

    #[test]
    fn test_parse_on_with_empty_targets_is_configuration_error() {
        let err = Command::parse(".tt-on,en,").unwrap_err();
        assert!(matches!(err, Error::Configuration(ref msg) if msg.contains("Usage")));
    }

    #[test]
    fn test_parse_on_without_arguments_is_configuration_error() {
        assert!(matches!(
            Command::parse(".tt-on"),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            Command::parse(".tt-on-global,en"),
            Err(Error::Configuration(_))
        ));
    }

    #[test]
    fn test_parse_skip_keeps_rest_verbatim() {
        assert_eq!(
            Command::parse(".tt-skip  keep  this ").unwrap(),
            Command::Skip {
                rest: "  keep  this ".to_string()
            }
        );
        assert_eq!(
            Command::parse(".tt-skip").unwrap(),
            Command::Skip {
                rest: String::new()
            }
        );
    }

    #[test]
    fn test_parse_once() {
        assert_eq!(
            Command::parse(".tt-once,zh,en|ja 今天 天气 很好").unwrap(),
            Command::Once {
                policy: policy("zh,en|ja"),
                text: "今天 天气 很好".to_string(),
            }
        );
    }

    #[test]
    fn test_parse_once_requires_text() {
        assert!(matches!(
            Command::parse(".tt-once,zh,en"),
            Err(Error::Configuration(ref msg)) if msg.contains("nothing to translate")
        ));
        assert!(Command::parse(".tt-once,zh,en   ").is_err());
    }

    #[test]
    fn test_parse_unknown_command() {
        assert_eq!(
            Command::parse(".tt-bogus,1,2").unwrap(),
            Command::Unknown(".tt-bogus".to_string())
        );
        assert_eq!(
            Command::parse(".tt-offline").unwrap(),
            Command::Unknown(".tt-offline".to_string())
        );
    }

    #[test]
    fn test_is_command() {
        assert!(is_command(".tt-off"));
        assert!(!is_command(".tt,en,fr"));
        assert!(!is_command("hello .tt-off"));
    }

    #[test]
    fn test_parse_reply_command() {
        assert_eq!(
            parse_reply_command(".tt,en,fr").map(Result::unwrap),
            Some(policy("en,fr"))
        );
        assert!(matches!(parse_reply_command(".tt,en"), Some(Err(_))));
        assert!(parse_reply_command("hello").is_none());
    }

    #[test]
    fn test_strip_retranslate_marker() {
        assert_eq!(strip_retranslate_marker(".tt  你好"), Some("你好"));
        assert_eq!(strip_retranslate_marker("你好"), None);
    }
}
