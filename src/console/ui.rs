//! Console rendering.

use super::client::ConsoleMessage;
use crate::compose::FormattingSpan;
use crate::compose::utf16::byte_index;
use crate::policy::Policy;
use crate::ui::Style;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn print_header(chat_id: i64) {
    println!(
        "{} {} - Console",
        Style::header("teletrans"),
        Style::version(format!("v{VERSION}"))
    );
    println!(
        "  {}  {}",
        Style::label("chat"),
        Style::value(chat_id)
    );
    println!();
}

pub fn print_goodbye() {
    println!("{}", Style::success("Goodbye!"));
}

pub fn print_help() {
    println!("{}", Style::header("Available commands"));
    let commands = [
        ("/chat <id>", "Switch to another conversation"),
        ("/reply <n> <text>", "Send a message replying to #n"),
        ("/edit <n> <text>", "Edit message #n"),
        ("/history", "Show messages in this conversation"),
        ("/policy", "Show the policy that applies here"),
        ("/help", "Show this help"),
        ("/quit", "Exit"),
    ];
    for (command, description) in commands {
        println!(
            "  {:<18} {}",
            Style::command(command),
            Style::label(description)
        );
    }
    println!();
    println!("{}", Style::header("In-chat commands"));
    println!(
        "  {}",
        Style::hint(".tt-on,<src>,<dst>[|<dst>...]   .tt-on-global,...   .tt-off   .tt-off-global")
    );
    println!(
        "  {}",
        Style::hint(".tt-once,<src>,<dst> <text>   .tt-skip <text>   .tt,<src>,<dst> (as a reply)")
    );
    println!();
}

pub fn print_sent(message_id: i64) {
    println!("{}", Style::message_tag(message_id));
}

pub fn print_edited(message: &ConsoleMessage) {
    println!(
        "{} {}",
        Style::message_tag(message.message.message_id),
        Style::label("edited")
    );
    println!("{}", render(message));
    println!();
}

pub fn print_deleted(message_id: i64) {
    println!(
        "{} {}",
        Style::message_tag(message_id),
        Style::label("deleted")
    );
    println!();
}

pub fn print_history(chat_id: i64, messages: &[ConsoleMessage]) {
    println!("{} {}", Style::header("Chat"), Style::value(chat_id));
    if messages.is_empty() {
        println!("  {}", Style::hint("no messages"));
    }
    for message in messages {
        let reply = message
            .reply_to
            .map(|to| format!(" ↩ #{to}"))
            .unwrap_or_default();
        println!(
            "{}{}",
            Style::message_tag(message.message.message_id),
            Style::label(reply)
        );
        println!("{}", render(message));
    }
    println!();
}

pub fn print_policy(chat_id: i64, policy: Option<&Policy>) {
    match policy {
        Some(policy) => println!(
            "{} {}",
            Style::label(format!("chat {chat_id}:")),
            Style::languages(policy)
        ),
        None => println!(
            "{} {}",
            Style::label(format!("chat {chat_id}:")),
            Style::hint("translation off")
        ),
    }
    println!();
}

pub fn print_switched(chat_id: i64) {
    println!(
        "{} Now in chat {}",
        Style::success("✓"),
        Style::value(chat_id)
    );
    println!();
}

pub fn print_error(message: &str) {
    eprintln!("{} {message}", Style::error("Error:"));
    eprintln!();
}

/// Message text with its quoted region drawn as a quote block.
fn render(message: &ConsoleMessage) -> String {
    let (body, quote) = split_quote(&message.text, message.span);
    let mut lines: Vec<String> = body
        .lines()
        .map(|line| format!("  {}", Style::notice(line)))
        .collect();
    if let Some(quote) = quote {
        lines.extend(
            quote
                .lines()
                .map(|line| format!("  {}", Style::quote_line(line))),
        );
    }
    lines.join("\n")
}

/// Splits `text` around `span`; the span is in UTF-16 units.
fn split_quote(text: &str, span: Option<FormattingSpan>) -> (&str, Option<&str>) {
    let Some(span) = span else {
        return (text, None);
    };
    let (Some(start), Some(end)) = (byte_index(text, span.offset), byte_index(text, span.end()))
    else {
        return (text, None);
    };
    (text[..start].trim_end_matches('\n'), Some(&text[start..end]))
}
