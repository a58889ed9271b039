//! Language code comparisons.
//!
//! Codes are passed through to the backends untouched, so both `zh` and the
//! DeepL-style `ZH` work; comparisons here ignore ASCII case.

/// Languages written in a logographic (CJK-family) script.
const LOGOGRAPHIC_LANGUAGES: &[&str] = &["zh", "ja", "ko"];

/// Returns `true` if both codes name the same language.
pub fn same_language(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Returns `true` for Chinese (any variant), Japanese and Korean.
pub fn is_logographic(lang: &str) -> bool {
    let base = lang.split(['-', '_']).next().unwrap_or(lang);
    LOGOGRAPHIC_LANGUAGES
        .iter()
        .any(|code| code.eq_ignore_ascii_case(base))
}
