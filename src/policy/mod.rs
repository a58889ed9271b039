//! Per-conversation translation policies.
//!
//! A policy says which language the user writes in and which languages the
//! message should be rewritten into. The first target is the primary
//! translation, shown inline; the rest go into the quoted block.

mod key;
mod store;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{Error, Result};

pub use key::{ConversationKey, GLOBAL_CHAT_ID};
pub use store::PolicyStore;

/// All stored policies, ordered by key so rewrites of the config are stable.
pub type Policies = BTreeMap<ConversationKey, Policy>;

/// Source language plus an ordered, non-empty list of target languages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    pub source_lang: String,
    pub target_langs: Vec<String>,
}

impl Policy {
    pub fn new(source_lang: impl Into<String>, target_langs: Vec<String>) -> Result<Self> {
        let source_lang = source_lang.into();
        if source_lang.is_empty() {
            return Err(Error::configuration("source language is empty"));
        }
        if target_langs.is_empty() {
            return Err(Error::configuration("target language list is empty"));
        }
        if target_langs.iter().any(String::is_empty) {
            return Err(Error::configuration("target language list has an empty entry"));
        }
        Ok(Self {
            source_lang,
            target_langs,
        })
    }

    /// Parses the `<src>,<lang1>|<lang2>...` argument form used by commands.
    pub fn parse(args: &str) -> Result<Self> {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        let [source, targets] = parts.as_slice() else {
            return Err(Error::configuration(format!(
                "expected <source>,<target>[|<target>...], got '{args}'"
            )));
        };

        let target_langs = if targets.is_empty() {
            Vec::new()
        } else {
            targets.split('|').map(|t| t.trim().to_string()).collect()
        };

        Self::new(*source, target_langs)
    }

    /// The language shown inline.
    pub fn primary(&self) -> &str {
        // Non-empty by construction.
        self.target_langs.first().map_or("", String::as_str)
    }

    pub(crate) fn is_valid(&self) -> bool {
        !self.source_lang.is_empty()
            && !self.target_langs.is_empty()
            && !self.target_langs.iter().any(String::is_empty)
    }
}
