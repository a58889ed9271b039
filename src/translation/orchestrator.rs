use futures_util::future::try_join_all;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::client::TranslationBackend;
use super::language::{is_logographic, same_language};
use super::provider::{ProviderId, select_provider};
use crate::error::{Error, Result};
use crate::policy::Policy;

/// One message to translate into every language of a policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub text: String,
    pub source_lang: String,
    pub target_langs: Vec<String>,
}

impl TranslationRequest {
    pub fn new(text: impl Into<String>, policy: &Policy) -> Self {
        Self {
            text: text.into(),
            source_lang: policy.source_lang.clone(),
            target_langs: policy.target_langs.clone(),
        }
    }
}

/// Translations keyed by target language.
///
/// Empty when the orchestrator decided there was nothing to translate.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationResult {
    translations: HashMap<String, String>,
}

impl TranslationResult {
    pub fn is_empty(&self) -> bool {
        self.translations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.translations.len()
    }

    pub fn get(&self, target_lang: &str) -> Option<&str> {
        self.translations.get(target_lang).map(String::as_str)
    }

    /// Translations in the given language order.
    ///
    /// Returns an empty list if any requested language is missing.
    pub fn ordered(&self, target_langs: &[String]) -> Vec<&str> {
        target_langs
            .iter()
            .map(|lang| self.get(lang))
            .collect::<Option<Vec<_>>>()
            .unwrap_or_default()
    }
}

/// Returns `true` if the text has no letters or digits at all (emoji,
/// punctuation, symbols, whitespace).
pub fn is_symbolic(text: &str) -> bool {
    !text.chars().any(char::is_alphanumeric)
}

/// Heuristic: a CJK-source message that starts with an ASCII letter or digit
/// is probably already written in a Latin-script language. Best effort only.
pub fn starts_in_latin_script(text: &str, source_lang: &str) -> bool {
    is_logographic(source_lang)
        && text
            .trim_start()
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphanumeric())
}

/// Fans a message out to the backends, one call per target language.
#[derive(Debug)]
pub struct Translator<B> {
    backend: B,
    augmented_enabled: bool,
}

impl<B: TranslationBackend> Translator<B> {
    pub const fn new(backend: B, augmented_enabled: bool) -> Self {
        Self {
            backend,
            augmented_enabled,
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Translates into every target language concurrently.
    ///
    /// The first failing call fails the whole request; partial results are
    /// never returned.
    pub async fn translate(&self, request: &TranslationRequest) -> Result<TranslationResult> {
        if is_symbolic(&request.text) {
            debug!("Nothing to translate in symbol-only text");
            return Ok(TranslationResult::default());
        }
        if starts_in_latin_script(&request.text, &request.source_lang) {
            debug!(
                source_lang = %request.source_lang,
                "Skipping translation of Latin-script text from a CJK source"
            );
            return Ok(TranslationResult::default());
        }

        let mut targets: Vec<&str> = Vec::with_capacity(request.target_langs.len());
        for lang in &request.target_langs {
            if !targets.contains(&lang.as_str()) {
                targets.push(lang);
            }
        }

        let start = Instant::now();
        let translations = try_join_all(targets.into_iter().map(|target| async move {
            let text = self
                .translate_one(&request.text, &request.source_lang, target)
                .await?;
            Ok::<_, Error>((target.to_string(), text))
        }))
        .await?;
        info!(
            source_lang = %request.source_lang,
            targets = translations.len(),
            elapsed_ms = start.elapsed().as_millis(),
            "Translated message"
        );

        Ok(TranslationResult {
            translations: translations.into_iter().collect(),
        })
    }

    async fn translate_one(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String> {
        if same_language(source_lang, target_lang) {
            return Ok(text.to_string());
        }

        match select_provider(target_lang, self.augmented_enabled) {
            ProviderId::Default => {
                self.backend
                    .translate_default(text, source_lang, target_lang)
                    .await
            }
            ProviderId::Augmented => {
                match self
                    .backend
                    .translate_augmented(text, source_lang, target_lang)
                    .await
                {
                    Err(err @ Error::Provider { .. }) => {
                        warn!(
                            error = %err,
                            target_lang,
                            "Augmented provider failed, falling back to default"
                        );
                        self.backend
                            .translate_default(text, source_lang, target_lang)
                            .await
                    }
                    other => other,
                }
            }
        }
    }
}
