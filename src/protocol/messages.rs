//! Wire types for the generation gateway.
//!
//! All bodies are JSON over HTTP POST. Response shapes have drifted between
//! gateway versions, so each response type accepts every shape seen so far.

use serde::{Deserialize, Serialize};

use crate::models::Difficulty;

/// Path of the quiz generation endpoint, relative to the gateway base URL.
pub const GENERATE_QUIZ_PATH: &str = "/api/generate-quiz";

/// Path of the word extraction endpoint.
pub const EXTRACT_WORDS_PATH: &str = "/api/extract-words";

/// Default gateway base URL.
pub const DEFAULT_GATEWAY_URL: &str = "http://localhost:3000";

/// Request body for quiz generation.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateQuizRequest<'a> {
    pub words: &'a [String],
    pub difficulty: Difficulty,
}

/// Request body for word extraction. `image` is base64 JPEG data with no
/// data-URL prefix.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractWordsRequest<'a> {
    pub image: &'a str,
}

/// A quiz item as the gateway sends it.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQuizItem {
    pub original_word: String,
    pub correct_form: String,
    #[serde(default)]
    pub sentence_before: Option<String>,
    #[serde(default)]
    pub sentence_after: Option<String>,
    #[serde(default, alias = "translationHint")]
    pub translation: Option<String>,
}

/// Quiz generation response: either a bare array or wrapped under `quizItems`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum QuizPayload {
    Bare(Vec<RawQuizItem>),
    Wrapped {
        #[serde(rename = "quizItems")]
        quiz_items: Vec<RawQuizItem>,
    },
}

impl QuizPayload {
    pub fn into_items(self) -> Vec<RawQuizItem> {
        match self {
            QuizPayload::Bare(items) | QuizPayload::Wrapped { quiz_items: items } => items,
        }
    }
}

/// Word extraction response: either a bare array or wrapped under `extractedWords`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum WordsPayload {
    Bare(Vec<String>),
    Wrapped {
        #[serde(rename = "extractedWords")]
        extracted_words: Vec<String>,
    },
}

impl WordsPayload {
    pub fn into_words(self) -> Vec<String> {
        match self {
            WordsPayload::Bare(words) | WordsPayload::Wrapped { extracted_words: words } => words,
        }
    }
}

/// Error body returned by the gateway on non-success responses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let words = vec!["apple".to_string(), "快樂".to_string()];
        let json = serde_json::to_string(&GenerateQuizRequest {
            words: &words,
            difficulty: Difficulty::SecondaryUpper,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"words":["apple","快樂"],"difficulty":"Secondary 4-6 (Upper)"}"#
        );

        let json = serde_json::to_string(&ExtractWordsRequest { image: "/9j/4AAQ" }).unwrap();
        assert_eq!(json, r#"{"image":"/9j/4AAQ"}"#);
    }

    #[test]
    fn test_quiz_payload_shapes() {
        let bare: QuizPayload =
            serde_json::from_str(r#"[{"originalWord":"run","correctForm":"ran"}]"#).unwrap();
        assert_eq!(bare.into_items().len(), 1);

        let wrapped: QuizPayload = serde_json::from_str(
            r#"{"quizItems":[{"originalWord":"run","correctForm":"ran","translationHint":"跑"}]}"#,
        )
        .unwrap();
        let items = wrapped.into_items();
        assert_eq!(items[0].translation.as_deref(), Some("跑"));
        assert!(items[0].sentence_before.is_none());
    }

    #[test]
    fn test_words_payload_shapes() {
        let bare: WordsPayload = serde_json::from_str(r#"["cat","dog"]"#).unwrap();
        assert_eq!(bare.into_words(), vec!["cat", "dog"]);

        let wrapped: WordsPayload =
            serde_json::from_str(r#"{"extractedWords":["tree"]}"#).unwrap();
        assert_eq!(wrapped.into_words(), vec!["tree"]);

        assert!(serde_json::from_str::<WordsPayload>(r#"{"words":["tree"]}"#).is_err());
    }
}
