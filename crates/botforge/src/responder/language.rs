use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Language buckets the responder distinguishes
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    /// Thai
    Th,
    /// Japanese
    Ja,
    /// English and everything else
    #[default]
    En,
}

impl Language {
    /// Bucket a detector language code (ISO 639-1 or 639-3)
    pub fn from_code(code: &str) -> Self {
        let code = code.to_ascii_lowercase();
        if code.starts_with("th") {
            Language::Th
        } else if code.starts_with("ja") || code == "jpn" {
            Language::Ja
        } else {
            Language::En
        }
    }

    /// Bucket the detector's guess; no guess means English
    pub fn detect(detector: &dyn LanguageDetector, text: &str) -> Self {
        detector
            .detect(text)
            .map(|code| Self::from_code(&code))
            .unwrap_or(Language::En)
    }
}

/// Best-effort language identification
pub trait LanguageDetector: Send + Sync {
    /// Language code for `text`, or `None` when no guess can be made
    fn detect(&self, text: &str) -> Option<String>;
}

/// Detector backed by `whatlang`
#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangDetector;

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Option<String> {
        whatlang::detect(text).map(|info| info.lang().code().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_from_code() {
        assert_eq!(Language::from_code("th"), Language::Th);
        assert_eq!(Language::from_code("tha"), Language::Th);
        assert_eq!(Language::from_code("ja"), Language::Ja);
        assert_eq!(Language::from_code("jpn"), Language::Ja);
        assert_eq!(Language::from_code("JA"), Language::Ja);
        assert_eq!(Language::from_code("en"), Language::En);
        assert_eq!(Language::from_code("fra"), Language::En);
        assert_eq!(Language::from_code(""), Language::En);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!(Language::Th.to_string(), "TH");
        assert_eq!(Language::Ja.as_ref(), "JA");
        assert_eq!(Language::from_str("en").unwrap(), Language::En);
        assert_eq!(serde_json::to_string(&Language::Ja).unwrap(), "\"JA\"");
    }

    #[test]
    fn test_whatlang_scripts() {
        let detector = WhatlangDetector;
        assert_eq!(
            Language::detect(&detector, "สวัสดีครับ วันนี้อากาศดีมาก"),
            Language::Th
        );
        assert_eq!(
            Language::detect(&detector, "こんにちは、今日はとても良い天気ですね"),
            Language::Ja
        );
        assert_eq!(
            Language::detect(&detector, "Hello there, how is the weather today?"),
            Language::En
        );
    }

    #[test]
    fn test_detection_failure_is_english() {
        struct Failing;
        impl LanguageDetector for Failing {
            fn detect(&self, _text: &str) -> Option<String> {
                None
            }
        }

        assert_eq!(Language::detect(&Failing, "สวัสดี"), Language::En);
        assert_eq!(Language::detect(&WhatlangDetector, ""), Language::En);
    }
}
