//! Builds the rewritten message from ordered translations.
//!
//! The primary translation goes first; the remaining translations follow on
//! their own lines and are covered by a [`FormattingSpan`] so the client can
//! render them as a quote.

pub mod utf16;

use utf16::utf16_len;

/// A region of the final message in UTF-16 code units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattingSpan {
    pub offset: usize,
    pub length: usize,
}

impl FormattingSpan {
    pub const fn end(&self) -> usize {
        self.offset + self.length
    }
}

/// The text to write back and the quoted region, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub text: String,
    pub span: Option<FormattingSpan>,
}

/// Joins translations (already in policy order) into the final message.
///
/// Returns `None` when there is nothing to write: no translations, or a
/// single translation identical to the original text.
pub fn compose(original: &str, ordered: &[&str]) -> Option<ComposedMessage> {
    let (primary, secondary) = ordered.split_first()?;

    if secondary.is_empty() {
        if *primary == original {
            return None;
        }
        return Some(ComposedMessage {
            text: (*primary).to_string(),
            span: None,
        });
    }

    let text = format!("{primary}\n{}", secondary.join("\n"));
    let offset = utf16_len(primary) + 1;
    let span = FormattingSpan {
        offset,
        length: utf16_len(&text) - offset,
    };

    Some(ComposedMessage {
        text,
        span: Some(span),
    })
}
