//! Language definitions for the advisory chat
//!
//! Covers the languages farmers use with the assistant: English plus the
//! Indic languages the knowledge base and question templates support.
//! Detection is purely script-based; no external model is involved.

use serde::{Deserialize, Serialize};

/// Fraction of word-like characters that must belong to a script for its
/// language to win detection.
const SCRIPT_RATIO_THRESHOLD: f64 = 0.3;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    English,
    Telugu,
    Hindi,
    Tamil,
    Kannada,
    Malayalam,
}

impl Language {
    /// Get ISO 639-1 code
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Telugu => "te",
            Self::Hindi => "hi",
            Self::Tamil => "ta",
            Self::Kannada => "kn",
            Self::Malayalam => "ml",
        }
    }

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::English => "English",
            Self::Telugu => "Telugu",
            Self::Hindi => "Hindi",
            Self::Tamil => "Tamil",
            Self::Kannada => "Kannada",
            Self::Malayalam => "Malayalam",
        }
    }

    /// Get script used by this language
    pub fn script(&self) -> Script {
        match self {
            Self::English => Script::Latin,
            Self::Telugu => Script::Telugu,
            Self::Hindi => Script::Devanagari,
            Self::Tamil => Script::Tamil,
            Self::Kannada => Script::Kannada,
            Self::Malayalam => Script::Malayalam,
        }
    }

    /// Parse from string (case-insensitive)
    pub fn from_str_loose(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        match s.as_str() {
            "en" | "eng" | "english" => Some(Self::English),
            "te" | "tel" | "telugu" => Some(Self::Telugu),
            "hi" | "hin" | "hindi" => Some(Self::Hindi),
            "ta" | "tam" | "tamil" => Some(Self::Tamil),
            "kn" | "kan" | "kannada" => Some(Self::Kannada),
            "ml" | "mal" | "malayalam" => Some(Self::Malayalam),
            _ => None,
        }
    }

    /// Get all supported languages
    pub fn all() -> &'static [Language] {
        &[
            Self::English,
            Self::Telugu,
            Self::Hindi,
            Self::Tamil,
            Self::Kannada,
            Self::Malayalam,
        ]
    }

    /// Detect the language of a text from script character ratios.
    ///
    /// Counts characters per Indic script as a fraction of all word-like
    /// characters (letters and digits; whitespace and punctuation are
    /// ignored). The first script whose fraction exceeds the threshold
    /// wins; otherwise the result is English. Total function: empty or
    /// all-punctuation input yields English.
    pub fn detect(text: &str) -> Language {
        let total = text.chars().filter(|c| c.is_alphanumeric()).count();
        if total == 0 {
            return Language::English;
        }

        for lang in [
            Language::Telugu,
            Language::Hindi,
            Language::Tamil,
            Language::Kannada,
            Language::Malayalam,
        ] {
            let script = lang.script();
            let count = text.chars().filter(|c| script.contains_char(*c)).count();
            if count as f64 / total as f64 > SCRIPT_RATIO_THRESHOLD {
                return lang;
            }
        }

        Language::English
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Script systems used by the supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Script {
    Latin,
    Telugu,
    Devanagari,
    Tamil,
    Kannada,
    Malayalam,
}

impl Script {
    /// Get Unicode range for this script (first block only)
    pub fn unicode_range(&self) -> (u32, u32) {
        match self {
            Self::Latin => (0x0000, 0x007F),
            Self::Telugu => (0x0C00, 0x0C7F),
            Self::Devanagari => (0x0900, 0x097F),
            Self::Tamil => (0x0B80, 0x0BFF),
            Self::Kannada => (0x0C80, 0x0CFF),
            Self::Malayalam => (0x0D00, 0x0D7F),
        }
    }

    /// Check if a character belongs to this script
    pub fn contains_char(&self, c: char) -> bool {
        let code = c as u32;
        let (start, end) = self.unicode_range();
        code >= start && code <= end
    }
}
