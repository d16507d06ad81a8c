use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Schema version written into new question banks
pub const QUESTION_BANK_VERSION: &str = "1.0";

/// Source tag for examples added through the store
pub const USER_SOURCE: &str = "user";

/// Normalized form used for duplicate detection
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Question bank metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BankMetadata {
    /// Creation timestamp
    pub created_at: String,
    /// Last update timestamp
    pub last_updated: String,
    /// Sum of all intent example counts
    pub total_examples: usize,
}

/// Per-intent metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IntentMetadata {
    /// Number of examples under the intent
    pub count: usize,
    /// Timestamp of the most recent addition
    pub last_added: Option<String>,
}

/// A single recorded utterance
///
/// Only `text` is required so hand-written banks load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Example {
    pub text: String,
    #[serde(default)]
    pub added_at: String,
    #[serde(default)]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub source: String,
}

/// Examples recorded for one intent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct IntentEntry {
    pub examples: Vec<Example>,
    pub metadata: IntentMetadata,
}

impl IntentEntry {
    /// Whether an example with the same normalized text exists
    pub fn contains(&self, text: &str) -> bool {
        let needle = normalize(text);
        self.examples.iter().any(|ex| normalize(&ex.text) == needle)
    }

    /// Example texts in insertion order
    pub fn texts(&self) -> Vec<String> {
        self.examples.iter().map(|ex| ex.text.clone()).collect()
    }
}

/// The question bank: the single source of truth for training examples
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionBank {
    /// Schema version
    #[serde(default = "default_version")]
    pub version: String,
    /// Bank-wide metadata
    #[serde(default)]
    pub metadata: BankMetadata,
    /// Intents in insertion order
    pub intents: IndexMap<String, IntentEntry>,
}

fn default_version() -> String {
    QUESTION_BANK_VERSION.to_string()
}

impl QuestionBank {
    /// Create an empty question bank
    pub fn new() -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            version: QUESTION_BANK_VERSION.to_string(),
            metadata: BankMetadata {
                created_at: now.clone(),
                last_updated: now,
                total_examples: 0,
            },
            intents: IndexMap::new(),
        }
    }

    /// Record a new example under `intent`
    ///
    /// Returns `false` when the trimmed text is empty or already present
    /// (case-insensitively) under the intent; the bank is left untouched.
    pub fn add_example(&mut self, intent: &str, text: &str, confidence: Option<f64>) -> bool {
        let cleaned = text.trim();
        if cleaned.is_empty() {
            return false;
        }

        if self
            .intents
            .get(intent)
            .is_some_and(|entry| entry.contains(cleaned))
        {
            return false;
        }

        let now = chrono::Utc::now().to_rfc3339();
        let entry = self.intents.entry(intent.to_string()).or_default();
        entry.examples.push(Example {
            text: cleaned.to_string(),
            added_at: now.clone(),
            confidence,
            source: USER_SOURCE.to_string(),
        });
        // Recounted so hand-written banks with stale or missing counts heal
        entry.metadata.count = entry.examples.len();
        entry.metadata.last_added = Some(now.clone());

        self.metadata.total_examples = self.count_examples();
        self.metadata.last_updated = now;
        true
    }

    /// Intent name to example texts, in insertion order
    pub fn questions(&self) -> IndexMap<String, Vec<String>> {
        self.intents
            .iter()
            .map(|(intent, entry)| (intent.clone(), entry.texts()))
            .collect()
    }

    /// Count examples by walking every intent
    pub fn count_examples(&self) -> usize {
        self.intents.values().map(|entry| entry.examples.len()).sum()
    }
}

impl Default for QuestionBank {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_bank_is_empty() {
        let bank = QuestionBank::new();
        assert_eq!(bank.version, "1.0");
        assert_eq!(bank.metadata.total_examples, 0);
        assert_eq!(bank.metadata.created_at, bank.metadata.last_updated);
        assert!(bank.intents.is_empty());
    }

    #[test]
    fn test_add_example_updates_counts() {
        let mut bank = QuestionBank::new();

        assert!(bank.add_example("greet", "  hi  ", Some(0.4)));
        assert!(bank.add_example("greet", "hello", None));
        assert!(bank.add_example("bye", "see you", None));

        let greet = &bank.intents["greet"];
        assert_eq!(greet.metadata.count, 2);
        assert!(greet.metadata.last_added.is_some());
        assert_eq!(greet.examples[0].text, "hi");
        assert_eq!(greet.examples[0].confidence, Some(0.4));
        assert_eq!(greet.examples[0].source, "user");
        assert_eq!(bank.metadata.total_examples, 3);
        assert_eq!(bank.count_examples(), 3);
    }

    #[test]
    fn test_add_example_rejects_duplicates_and_blank() {
        let mut bank = QuestionBank::new();

        assert!(bank.add_example("greet", "Hello", None));
        assert!(!bank.add_example("greet", "  hELLo ", None));
        assert!(!bank.add_example("greet", "   ", None));
        assert!(!bank.add_example("other", "", None));
        // Same text under another intent is not a duplicate
        assert!(bank.add_example("other", "hello", None));

        assert_eq!(bank.intents["greet"].metadata.count, 1);
        assert_eq!(bank.metadata.total_examples, 2);
        assert!(!bank.intents.contains_key("missing"));
    }

    #[test]
    fn test_questions_keep_insertion_order() {
        let mut bank = QuestionBank::new();
        bank.add_example("zeta", "z", None);
        bank.add_example("alpha", "a", None);
        bank.add_example("zeta", "zz", None);

        let questions = bank.questions();
        let intents: Vec<&String> = questions.keys().collect();
        assert_eq!(intents, vec!["zeta", "alpha"]);
        assert_eq!(questions["zeta"], vec!["z", "zz"]);
    }

    #[test]
    fn test_minimal_examples_deserialize() {
        let bank: QuestionBank = serde_json::from_str(
            r#"{"intents": {"greet": {"examples": [{"text": "hi"}]}, "empty": {}}}"#,
        )
        .unwrap();

        assert_eq!(bank.version, QUESTION_BANK_VERSION);
        let example = &bank.intents["greet"].examples[0];
        assert_eq!(example.text, "hi");
        assert_eq!(example.added_at, "");
        assert_eq!(example.confidence, None);
        assert!(bank.intents["empty"].examples.is_empty());
    }

    #[test]
    fn test_serialization_shape() {
        let mut bank = QuestionBank::new();
        bank.add_example("greet", "hi", None);

        let value = serde_json::to_value(&bank).unwrap();
        assert_eq!(value["version"], "1.0");
        assert_eq!(value["metadata"]["total_examples"], 1);
        assert_eq!(value["intents"]["greet"]["metadata"]["count"], 1);
        assert_eq!(value["intents"]["greet"]["examples"][0]["text"], "hi");
        assert!(value["intents"]["greet"]["examples"][0]["confidence"].is_null());
    }
}
