mod client;
mod language;
mod orchestrator;
mod prompt;
mod provider;

pub use client::{ProviderGateway, TranslationBackend};
pub use language::{is_logographic, same_language};
pub use orchestrator::{
    TranslationRequest, TranslationResult, Translator, is_symbolic, starts_in_latin_script,
};
pub use prompt::{AUGMENTED_LANGUAGES, is_augmented_language, style_prompt};
pub use provider::{ProviderId, select_provider};
