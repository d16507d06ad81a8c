use super::Language;
use serde::{Deserialize, Serialize};

/// One message in each supported language
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct LocalizedMessage {
    pub th: String,
    pub ja: String,
    pub en: String,
}

impl LocalizedMessage {
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::Th => &self.th,
            Language::Ja => &self.ja,
            Language::En => &self.en,
        }
    }
}

/// Fixed replies used when no canned response applies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponderMessages {
    /// Low confidence or no response for the intent
    pub fallback: LocalizedMessage,
    /// Canned response file could not be read
    pub load_failure: LocalizedMessage,
}

impl Default for ResponderMessages {
    fn default() -> Self {
        Self {
            fallback: LocalizedMessage {
                th: "เอ๊ะ ถามอะไรของเธอเนี่ย ลองถามใหม่อีกทีสิ หรือจะเลือกจากคำถามตัวอย่างก็ได้นะจ๊ะ"
                    .to_string(),
                ja: "ちょっと、何を聞いてるのか全然わからないんだけど！もう一回言ってみて。それかサンプル質問から選んでよね〜"
                    .to_string(),
                en: "Honey, that question makes zero sense to me! Try again, silly~ or pick one of the sample questions."
                    .to_string(),
            },
            load_failure: LocalizedMessage {
                th: "ขออภัย โหลดข้อมูลไม่ได้ค่ะ".to_string(),
                ja: "申し訳ありませんが、データを読み込めませんでした。".to_string(),
                en: "Sorry, failed to load data.".to_string(),
            },
        }
    }
}
