//! Tone calibration — maps the first brand-tone selection to a visual mood
//! and to copywriting vocabulary.
//!
//! Unknown tones fall back to the professional calibration.

/// Vocabulary and mood calibrated to a brand tone.
#[derive(Debug, Clone, PartialEq)]
pub struct ToneGuide {
    /// Mood label used in the image prompt.
    pub mood: &'static str,
    pub voice_words: &'static [&'static str],
    pub avoid_words: &'static [&'static str],
}

const DEFAULT_GUIDE: ToneGuide = ToneGuide {
    mood: "calm, confident",
    voice_words: &["trusted", "reliable", "expert", "dependable"],
    avoid_words: &["slang", "emoji", "exclamation-heavy hype"],
};

/// Returns the calibration for a brand tone (case-insensitive).
pub fn tone_guide(tone: &str) -> ToneGuide {
    match tone.trim().to_lowercase().as_str() {
        "professional" => DEFAULT_GUIDE,
        "friendly" => ToneGuide {
            mood: "warm, welcoming",
            voice_words: &["welcome", "neighbourhood", "together", "come say hi"],
            avoid_words: &["corporate jargon", "cold formality"],
        },
        "bold" => ToneGuide {
            mood: "energetic, modern",
            voice_words: &["now", "unstoppable", "fresh", "level up"],
            avoid_words: &["hedging", "passive voice"],
        },
        "premium" => ToneGuide {
            mood: "elegant, refined",
            voice_words: &["crafted", "exceptional", "curated", "signature"],
            avoid_words: &["discount language", "cheap", "bargain"],
        },
        "playful" => ToneGuide {
            voice_words: &["fun", "treat yourself", "smile", "delight"],
            avoid_words: &["stiff formality", "technical jargon"],
            ..DEFAULT_GUIDE
        },
        "minimal" => ToneGuide {
            voice_words: &["simple", "clear", "honest", "essential"],
            avoid_words: &["superlatives", "filler adjectives"],
            ..DEFAULT_GUIDE
        },
        _ => DEFAULT_GUIDE,
    }
}

/// Mood label for the image prompt.
pub fn mood_for_tone(tone: &str) -> &'static str {
    tone_guide(tone).mood
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mood_table() {
        assert_eq!(mood_for_tone("professional"), "calm, confident");
        assert_eq!(mood_for_tone("friendly"), "warm, welcoming");
        assert_eq!(mood_for_tone("bold"), "energetic, modern");
        assert_eq!(mood_for_tone("premium"), "elegant, refined");
    }

    #[test]
    fn test_unknown_tone_defaults_to_calm() {
        assert_eq!(mood_for_tone("whimsical"), "calm, confident");
        assert_eq!(mood_for_tone(""), "calm, confident");
    }

    #[test]
    fn test_tone_lookup_is_case_insensitive() {
        assert_eq!(mood_for_tone(" Premium "), "elegant, refined");
    }

    #[test]
    fn test_premium_avoids_discount_language() {
        assert!(tone_guide("premium").avoid_words.contains(&"cheap"));
    }
}
