//! UTF-16 position arithmetic.
//!
//! Chat formatting entities are addressed in UTF-16 code units. A character
//! outside the Basic Multilingual Plane (emoji, rare CJK) is one `char` but
//! two code units, so scalar counts drift by one per such character.

/// Returns `true` for code points that need a surrogate pair in UTF-16.
pub const fn is_supplementary(c: char) -> bool {
    c as u32 >= 0x1_0000
}

/// Number of characters in `text` that need a surrogate pair.
pub fn supplementary_count(text: &str) -> usize {
    text.chars().filter(|&c| is_supplementary(c)).count()
}

/// Length of `text` in UTF-16 code units.
pub fn utf16_len(text: &str) -> usize {
    text.chars().count() + supplementary_count(text)
}

/// Maps a UTF-16 offset back to a byte index into `text`.
///
/// Returns `None` if the offset is past the end or splits a surrogate pair.
pub fn byte_index(text: &str, utf16_offset: usize) -> Option<usize> {
    let mut units = 0;
    for (index, c) in text.char_indices() {
        if units == utf16_offset {
            return Some(index);
        }
        if units > utf16_offset {
            return None;
        }
        units += c.len_utf16();
    }
    (units == utf16_offset).then_some(text.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLES: &[&str] = &[
        "",
        "hello",
        "元気です",
        "😊",
        "I'm fine 😊",
        "𠀀𠀁 CJK extension B",
        "mixed: é ü 中 🇯🇵 👍🏽 end",
    ];

    #[test]
    fn test_utf16_len_matches_std_encoder() {
        for sample in SAMPLES {
            assert_eq!(
                utf16_len(sample),
                sample.encode_utf16().count(),
                "length mismatch for {sample:?}"
            );
        }
    }

    #[test]
    fn test_bmp_text_counts_scalars() {
        assert_eq!(utf16_len("元気です"), 4);
        assert_eq!(supplementary_count("元気です"), 0);
    }

    #[test]
    fn test_supplementary_characters_count_twice() {
        assert_eq!(supplementary_count("I'm fine 😊"), 1);
        assert_eq!(utf16_len("I'm fine 😊"), 11);
        assert_eq!(utf16_len("🇯🇵"), 4);
    }

    #[test]
    fn test_is_supplementary_boundary() {
        assert!(!is_supplementary('\u{FFFF}'));
        assert!(is_supplementary('\u{10000}'));
    }

    #[test]
    fn test_byte_index_round_trips_every_boundary() {
        for sample in SAMPLES {
            let mut units = 0;
            for (index, c) in sample.char_indices() {
                assert_eq!(byte_index(sample, units), Some(index));
                units += c.len_utf16();
            }
            assert_eq!(byte_index(sample, units), Some(sample.len()));
        }
    }

    #[test]
    fn test_byte_index_rejects_bad_offsets() {
        assert_eq!(byte_index("a😊b", 2), None);
        assert_eq!(byte_index("abc", 4), None);
    }
}
