//! Colors for console output, via owo-colors.

use owo_colors::OwoColorize;
use std::fmt::Display;

use crate::policy::Policy;

/// Prefix drawn before every quoted line.
pub const QUOTE_BAR: &str = "│ ";

/// Styles for what the console prints.
pub struct Style;

impl Style {
    pub fn header<T: Display>(text: T) -> String {
        format!("{}", text.bold())
    }

    pub fn label<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// Chat ids and other values the user typed
    pub fn value<T: Display>(text: T) -> String {
        format!("{}", text.cyan())
    }

    pub fn success<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn error<T: Display>(text: T) -> String {
        format!("{}", text.red().bold())
    }

    /// Slash commands
    pub fn command<T: Display>(text: T) -> String {
        format!("{}", text.green())
    }

    pub fn hint<T: Display>(text: T) -> String {
        format!("{}", text.dimmed().italic())
    }

    pub fn version<T: Display>(text: T) -> String {
        format!("{}", text.dimmed())
    }

    /// `#<id>`, the handle used by `/reply` and `/edit`.
    pub fn message_tag(message_id: i64) -> String {
        format!("{}", format!("#{message_id}").blue().bold())
    }

    /// `src → dst1, dst2` with the primary target highlighted.
    pub fn languages(policy: &Policy) -> String {
        let (primary, rest) = policy
            .target_langs
            .split_first()
            .map_or(("", &[][..]), |(first, rest)| (first.as_str(), rest));
        let targets: Vec<String> = std::iter::once(format!("{}", primary.yellow().bold()))
            .chain(rest.iter().map(|lang| format!("{}", lang.yellow())))
            .collect();
        format!("{} → {}", policy.source_lang.yellow(), targets.join(", "))
    }

    /// One line inside a quote block.
    pub fn quote_line(line: &str) -> String {
        format!("{}", format!("{QUOTE_BAR}{line}").bright_black())
    }

    /// A notice the engine wrote into a message, colored by its outcome mark.
    pub fn notice(text: &str) -> String {
        if text.starts_with('✗') {
            format!("{}", text.red())
        } else if text.starts_with('✓') {
            format!("{}", text.green())
        } else {
            text.to_string()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_languages_lists_targets_in_order() {
        let policy = Policy::parse("zh,en|ja|ko").unwrap();
        let rendered = Style::languages(&policy);

        let en = rendered.find("en").unwrap();
        let ja = rendered.find("ja").unwrap();
        let ko = rendered.find("ko").unwrap();
        assert!(rendered.contains("zh"));
        assert!(rendered.contains('→'));
        assert!(en < ja && ja < ko);
    }

    #[test]
    fn test_quote_line_carries_bar() {
        assert!(Style::quote_line("こんにちは").contains("│ こんにちは"));
    }

    #[test]
    fn test_message_tag() {
        assert!(Style::message_tag(42).contains("#42"));
    }

    #[test]
    fn test_notice_keeps_text() {
        assert!(Style::notice("✗ Nothing to translate").contains("Nothing to translate"));
        assert_eq!(Style::notice("Hello"), "Hello");
    }
}
