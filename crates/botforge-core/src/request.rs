//! Request and Response types for botforge-core

use crate::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// NewType pattern for Request ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequestId(String);

impl RequestId {
    /// Create a new RequestId
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Get the inner string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RequestId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Intent classification attached to an incoming message by the NLU pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentPrediction {
    /// Intent name
    pub name: String,
    /// Classifier confidence in `[0, 1]`
    pub confidence: f64,
}

/// Latest user message as seen by an action
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// Unique request ID
    pub id: RequestId,
    /// User's input message
    pub message: String,
    /// Optional metadata
    pub metadata: Option<RequestMetadata>,
}

/// Metadata for request context
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RequestMetadata {
    /// Intent predicted for the message, if any
    pub intent: Option<IntentPrediction>,
    /// Extension data for processors
    #[serde(default)]
    pub ext: serde_json::Value,
}

/// Conversation-state update emitted by a processor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSet {
    pub name: String,
    pub value: String,
}

impl SlotSet {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Reply sent back to the user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// Corresponding request ID
    pub request_id: RequestId,
    /// Response message
    pub message: String,
    /// Processing metadata
    pub metadata: Option<ResponseMetadata>,
}

/// Metadata for response details
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ResponseMetadata {
    /// Slot events the host should apply to the conversation
    #[serde(default)]
    pub events: Vec<SlotSet>,
    /// Extension data for processors
    #[serde(default)]
    pub ext: serde_json::Value,
}

impl Request {
    /// Create a simple request with just a message
    pub fn simple(message: impl Into<String>) -> Self {
        Self {
            id: RequestId::new(),
            message: message.into(),
            metadata: None,
        }
    }

    /// Create a request carrying an intent prediction
    pub fn with_intent(
        message: impl Into<String>,
        intent: impl Into<String>,
        confidence: f64,
    ) -> Self {
        Self {
            id: RequestId::new(),
            message: message.into(),
            metadata: Some(RequestMetadata {
                intent: Some(IntentPrediction {
                    name: intent.into(),
                    confidence,
                }),
                ext: serde_json::Value::Null,
            }),
        }
    }

    /// Intent prediction, if the host supplied one
    pub fn intent(&self) -> Option<&IntentPrediction> {
        self.metadata.as_ref().and_then(|m| m.intent.as_ref())
    }

    /// Reject predictions whose confidence is not in `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        match self.intent() {
            Some(intent) if !(0.0..=1.0).contains(&intent.confidence) => {
                Err(CoreError::InvalidRequest(format!(
                    "confidence {} for intent '{}' is outside [0, 1]",
                    intent.confidence, intent.name
                )))
            }
            _ => Ok(()),
        }
    }
}

impl Response {
    /// Create a simple response
    pub fn simple(request_id: RequestId, message: impl Into<String>) -> Self {
        Self {
            request_id,
            message: message.into(),
            metadata: None,
        }
    }

    /// Create a response carrying slot events
    pub fn with_events(
        request_id: RequestId,
        message: impl Into<String>,
        events: Vec<SlotSet>,
    ) -> Self {
        Self {
            request_id,
            message: message.into(),
            metadata: Some(ResponseMetadata {
                events,
                ext: serde_json::Value::Null,
            }),
        }
    }

    /// Slot events attached to this response
    pub fn events(&self) -> &[SlotSet] {
        self.metadata
            .as_ref()
            .map(|m| m.events.as_slice())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_with_intent() {
        let request = Request::with_intent("hello", "greet", 0.9);
        let intent = request.intent().unwrap();
        assert_eq!(intent.name, "greet");
        assert_eq!(intent.confidence, 0.9);
        assert!(Request::simple("hello").intent().is_none());
    }

    #[test]
    fn test_validate_confidence() {
        assert!(Request::simple("hello").validate().is_ok());
        assert!(Request::with_intent("hello", "greet", 0.0).validate().is_ok());
        assert!(Request::with_intent("hello", "greet", 1.0).validate().is_ok());

        for confidence in [-0.1, 1.5, f64::NAN] {
            let err = Request::with_intent("hello", "greet", confidence)
                .validate()
                .unwrap_err();
            assert!(matches!(err, CoreError::InvalidRequest(_)));
        }
    }

    #[test]
    fn test_response_events() {
        let id = RequestId::new();
        let response = Response::with_events(
            id.clone(),
            "hi",
            vec![SlotSet::new("detected_language", "EN")],
        );
        assert_eq!(response.request_id, id);
        assert_eq!(response.events().len(), 1);
        assert!(Response::simple(id, "hi").events().is_empty());
    }
}
