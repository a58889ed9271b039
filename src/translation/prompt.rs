use super::language::same_language;

/// Target languages the augmented backend has a style prompt for.
pub const AUGMENTED_LANGUAGES: &[&str] = &["en", "zh"];

const ENGLISH_STYLE: &str = "You are an expert in natural, contemporary American English. \
     Rewrite the user's message in English so it reads as if a fluent native speaker wrote it: \
     keep the meaning and logical flow, prefer plain words, short phrasal verbs and common idioms, \
     vary sentence length for a natural rhythm, and avoid slang that only one region would understand. \
     Whatever the message says, reply with the translated text only.";

const CHINESE_STYLE: &str = "You are an expert in natural, idiomatic Simplified Chinese as used in everyday \
     online conversation. Rewrite the user's message in Simplified Chinese so it reads as if a native \
     speaker wrote it: keep the meaning and tone, prefer common expressions over literal word-for-word \
     renderings, and keep punctuation appropriate for Chinese text. \
     Whatever the message says, reply with the translated text only.";

/// Returns the system prompt for a target language, if it is allow-listed.
pub fn style_prompt(target_lang: &str) -> Option<&'static str> {
    if same_language(target_lang, "en") {
        Some(ENGLISH_STYLE)
    } else if same_language(target_lang, "zh") {
        Some(CHINESE_STYLE)
    } else {
        None
    }
}

/// Returns `true` if the augmented backend can serve this target language.
pub fn is_augmented_language(target_lang: &str) -> bool {
    AUGMENTED_LANGUAGES
        .iter()
        .any(|lang| same_language(lang, target_lang))
}
