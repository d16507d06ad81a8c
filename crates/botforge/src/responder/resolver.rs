use super::{Language, LanguageDetector, ResponderMessages, WhatlangDetector};
use crate::config::BotforgeConfig;
use crate::storage::Storage;
use async_trait::async_trait;
use botforge_core::{Processor, ProcessorMetadata, Request, Response, SlotSet};
use serde_json::Value;
use std::sync::Arc;
use strum_macros::Display;
use tracing::{debug, warn};

/// Action name the dialogue host dispatches to this processor
pub const ACTION_NAME: &str = "action_detect_and_respond_multilang";

/// Slot receiving the detected language code
pub const DETECTED_LANGUAGE_SLOT: &str = "detected_language";

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ResolutionSource {
    /// Looked up in the canned response file
    Canned,
    /// Low confidence or no canned response
    Fallback,
    /// Canned response file unreadable
    LoadFailure,
}

/// Reply chosen for one message
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub text: String,
    pub language: Language,
    pub source: ResolutionSource,
    /// Conversation-state updates for the host
    pub events: Vec<SlotSet>,
}

/// Picks a canned reply in the user's language
///
/// The response file is re-read on every call and maps intent name to
/// `{"TH": .., "JA": .., "EN": ..}`.
#[derive(Clone)]
pub struct ResponseResolver {
    storage: Arc<dyn Storage>,
    detector: Arc<dyn LanguageDetector>,
    responses_file: String,
    confidence_threshold: f64,
    messages: ResponderMessages,
}

impl ResponseResolver {
    /// Create a resolver using the `whatlang` detector
    pub fn new(storage: Arc<dyn Storage>, config: &BotforgeConfig) -> Self {
        Self {
            storage,
            detector: Arc::new(WhatlangDetector),
            responses_file: config.responses_file.clone(),
            confidence_threshold: config.confidence_threshold,
            messages: config.messages.clone(),
        }
    }

    /// Replace the language detector
    pub fn with_detector(mut self, detector: Arc<dyn LanguageDetector>) -> Self {
        self.detector = detector;
        self
    }

    /// Choose the reply for a classified message
    pub async fn resolve(&self, intent: &str, confidence: f64, raw_text: &str) -> Resolution {
        let language = Language::detect(self.detector.as_ref(), raw_text);
        debug!(intent, confidence, language = %language, "Resolving response");

        let Some(responses) = self.load_responses().await else {
            return Resolution {
                text: self.messages.load_failure.get(language).to_string(),
                language,
                source: ResolutionSource::LoadFailure,
                events: Vec::new(),
            };
        };

        let canned = responses
            .get(intent)
            .and_then(|by_language| by_language.get(language.as_ref()))
            .and_then(Value::as_str)
            .filter(|text| !text.is_empty());

        let (text, source) = match canned {
            Some(text) if confidence >= self.confidence_threshold => {
                (text.to_string(), ResolutionSource::Canned)
            }
            _ => (
                self.messages.fallback.get(language).to_string(),
                ResolutionSource::Fallback,
            ),
        };

        Resolution {
            text,
            language,
            source,
            events: vec![SlotSet::new(DETECTED_LANGUAGE_SLOT, language.to_string())],
        }
    }

    async fn load_responses(&self) -> Option<Value> {
        let content = match self.storage.read(&self.responses_file).await {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.responses_file, "Failed to read responses: {}", e);
                return None;
            }
        };

        match serde_json::from_slice(&content) {
            Ok(responses) => Some(responses),
            Err(e) => {
                warn!(path = %self.responses_file, "Failed to parse responses: {}", e);
                None
            }
        }
    }
}

#[async_trait]
impl Processor for ResponseResolver {
    async fn process(&self, request: Request) -> botforge_core::Result<Response> {
        let (intent, confidence) = request
            .intent()
            .map(|prediction| (prediction.name.as_str(), prediction.confidence))
            .unwrap_or(("", 0.0));

        let resolution = self.resolve(intent, confidence, &request.message).await;
        Ok(Response::with_events(
            request.id.clone(),
            resolution.text,
            resolution.events,
        ))
    }

    fn metadata(&self) -> ProcessorMetadata {
        ProcessorMetadata {
            name: Some(ACTION_NAME.to_string()),
            description: Some(
                "Detects the user's language and replies with a canned response".to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    /// Always guesses the configured code
    struct FixedDetector(Option<&'static str>);

    impl LanguageDetector for FixedDetector {
        fn detect(&self, _text: &str) -> Option<String> {
            self.0.map(str::to_string)
        }
    }

    const RESPONSES: &str = r#"{
        "greet": {"TH": "สวัสดีค่ะ", "JA": "こんにちは", "EN": "Hello!"},
        "thanks": {"EN": "You're welcome", "TH": ""}
    }"#;

    async fn resolver(dir: &TempDir, code: Option<&'static str>) -> ResponseResolver {
        let storage = Arc::new(LocalStorage::new(dir.path()));
        storage
            .write("data/responses.json", RESPONSES.as_bytes())
            .await
            .unwrap();
        ResponseResolver::new(storage, &BotforgeConfig::default())
            .with_detector(Arc::new(FixedDetector(code)))
    }

    #[tokio::test]
    async fn test_canned_response_per_language() {
        let dir = TempDir::new().unwrap();

        let th = resolver(&dir, Some("th")).await.resolve("greet", 0.9, "x").await;
        assert_eq!(th.text, "สวัสดีค่ะ");
        assert_eq!(th.language, Language::Th);
        assert_eq!(th.source, ResolutionSource::Canned);
        assert_eq!(th.events, vec![SlotSet::new("detected_language", "TH")]);

        let ja = resolver(&dir, Some("ja")).await.resolve("greet", 0.6, "x").await;
        assert_eq!(ja.text, "こんにちは");

        let en = resolver(&dir, Some("de")).await.resolve("greet", 1.0, "x").await;
        assert_eq!(en.text, "Hello!");
        assert_eq!(en.language, Language::En);
    }

    #[tokio::test]
    async fn test_low_confidence_always_falls_back() {
        let dir = TempDir::new().unwrap();
        let messages = ResponderMessages::default();

        for (code, language) in [("th", Language::Th), ("ja", Language::Ja), ("en", Language::En)] {
            let resolution = resolver(&dir, Some(code))
                .await
                .resolve("greet", 0.4, "x")
                .await;
            assert_eq!(resolution.text, messages.fallback.get(language));
            assert_eq!(resolution.source, ResolutionSource::Fallback);
            assert_eq!(resolution.language, language);
        }
    }

    #[tokio::test]
    async fn test_missing_entry_falls_back() {
        let dir = TempDir::new().unwrap();
        let messages = ResponderMessages::default();

        // No JA entry for "thanks"
        let ja = resolver(&dir, Some("ja")).await.resolve("thanks", 0.9, "x").await;
        assert_eq!(ja.text, messages.fallback.ja);
        // Empty TH entry
        let th = resolver(&dir, Some("th")).await.resolve("thanks", 0.9, "x").await;
        assert_eq!(th.text, messages.fallback.th);
        // Unknown intent
        let en = resolver(&dir, Some("en")).await.resolve("unknown", 0.9, "x").await;
        assert_eq!(en.source, ResolutionSource::Fallback);
        assert_eq!(en.events.len(), 1);
    }

    #[tokio::test]
    async fn test_unreadable_responses() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        let resolver = ResponseResolver::new(storage.clone(), &BotforgeConfig::default())
            .with_detector(Arc::new(FixedDetector(Some("ja"))));

        let missing = resolver.resolve("greet", 0.9, "x").await;
        assert_eq!(missing.source, ResolutionSource::LoadFailure);
        assert_eq!(missing.language, Language::Ja);
        assert_eq!(missing.text, ResponderMessages::default().load_failure.ja);
        assert!(missing.events.is_empty());

        storage.write("data/responses.json", b"{oops").await.unwrap();
        let broken = resolver.resolve("greet", 0.9, "x").await;
        assert_eq!(broken.source, ResolutionSource::LoadFailure);
    }

    #[tokio::test]
    async fn test_detection_failure_defaults_to_english() {
        let dir = TempDir::new().unwrap();
        let resolution = resolver(&dir, None).await.resolve("greet", 0.9, "สวัสดี").await;
        assert_eq!(resolution.language, Language::En);
        assert_eq!(resolution.text, "Hello!");
    }

    #[tokio::test]
    async fn test_configurable_threshold() {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(LocalStorage::new(dir.path()));
        storage
            .write("data/responses.json", RESPONSES.as_bytes())
            .await
            .unwrap();
        let config = BotforgeConfig {
            confidence_threshold: 0.3,
            ..Default::default()
        };
        let resolver = ResponseResolver::new(storage, &config)
            .with_detector(Arc::new(FixedDetector(Some("en"))));

        assert_eq!(resolver.resolve("greet", 0.4, "x").await.text, "Hello!");
    }

    #[tokio::test]
    async fn test_as_processor() {
        let dir = TempDir::new().unwrap();
        let resolver = resolver(&dir, Some("th")).await;
        assert_eq!(resolver.metadata().name.as_deref(), Some(ACTION_NAME));

        let request = Request::with_intent("สวัสดี", "greet", 0.95);
        let request_id = request.id.clone();
        let response = resolver.process(request).await.unwrap();
        assert_eq!(response.request_id, request_id);
        assert_eq!(response.message, "สวัสดีค่ะ");
        assert_eq!(response.events()[0].value, "TH");

        // No intent prediction means zero confidence
        let response = resolver.process(Request::simple("hi")).await.unwrap();
        assert_eq!(response.message, ResponderMessages::default().fallback.th);
    }
}
