use std::fmt;

use super::prompt::is_augmented_language;

/// Which backend serves a target language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderId {
    /// The DeepLX-compatible translation endpoint.
    Default,
    /// The chat-completion endpoint with a per-language style prompt.
    Augmented,
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Augmented => f.write_str("augmented"),
        }
    }
}

/// Picks the backend for one target language.
pub fn select_provider(target_lang: &str, augmented_enabled: bool) -> ProviderId {
    if augmented_enabled && is_augmented_language(target_lang) {
        ProviderId::Augmented
    } else {
        ProviderId::Default
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_listed_language_uses_augmented_when_enabled() {
        assert_eq!(select_provider("en", true), ProviderId::Augmented);
        assert_eq!(select_provider("zh", true), ProviderId::Augmented);
    }

    #[test]
    fn test_allow_listed_language_uses_default_when_disabled() {
        assert_eq!(select_provider("en", false), ProviderId::Default);
    }

    #[test]
    fn test_other_languages_always_use_default() {
        assert_eq!(select_provider("fr", true), ProviderId::Default);
        assert_eq!(select_provider("ja", false), ProviderId::Default);
    }
}
