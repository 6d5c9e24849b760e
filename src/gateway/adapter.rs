//! Normalizes gateway responses into the crate's own types.
//!
//! Every response passes through here before it reaches the session, so
//! callers never see a half-valid batch.

use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::models::QuizItem;
use crate::protocol::{ErrorBody, QuizPayload, RawQuizItem, WordsPayload};

use super::{
    DEFAULT_EXTRACTION_MESSAGE, DEFAULT_GENERATION_MESSAGE, EMPTY_QUIZ_MESSAGE, GatewayError,
};

const NO_WORDS_FOUND_MESSAGE: &str = "No vocabulary words were found in the image.";

/// Turn a generation response into quiz items.
pub fn decode_quiz_response(status: StatusCode, body: &[u8]) -> Result<Vec<QuizItem>, GatewayError> {
    if !status.is_success() {
        return Err(failure(status, body, GatewayError::GenerationFailed, DEFAULT_GENERATION_MESSAGE));
    }

    let payload: QuizPayload = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "malformed quiz payload");
        malformed(GatewayError::GenerationFailed)
    })?;

    let raw_items = payload.into_items();
    if raw_items.is_empty() {
        return Err(GatewayError::GenerationFailed(EMPTY_QUIZ_MESSAGE.to_string()));
    }

    let items = raw_items
        .into_iter()
        .enumerate()
        .map(|(index, raw)| to_quiz_item(index, raw))
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = items.len(), "decoded quiz items");
    Ok(items)
}

/// Turn an extraction response into a clean word list.
pub fn decode_words_response(status: StatusCode, body: &[u8]) -> Result<Vec<String>, GatewayError> {
    if !status.is_success() {
        return Err(failure(status, body, GatewayError::ExtractionFailed, DEFAULT_EXTRACTION_MESSAGE));
    }

    let payload: WordsPayload = serde_json::from_slice(body).map_err(|e| {
        warn!(error = %e, "malformed word payload");
        malformed(GatewayError::ExtractionFailed)
    })?;

    let words: Vec<String> = payload
        .into_words()
        .into_iter()
        .map(|w| w.trim().to_string())
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() {
        return Err(GatewayError::ExtractionFailed(NO_WORDS_FOUND_MESSAGE.to_string()));
    }

    debug!(count = words.len(), "decoded extracted words");
    Ok(words)
}

fn to_quiz_item(index: usize, raw: RawQuizItem) -> Result<QuizItem, GatewayError> {
    if raw.correct_form.trim().is_empty() {
        warn!(index, word = %raw.original_word, "quiz item has an empty answer");
        return Err(malformed(GatewayError::GenerationFailed));
    }

    let translation_hint = raw
        .translation
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty());

    Ok(QuizItem::new(
        raw.original_word,
        raw.correct_form,
        raw.sentence_before.unwrap_or_default(),
        raw.sentence_after.unwrap_or_default(),
        translation_hint,
    ))
}

fn malformed(kind: fn(String) -> GatewayError) -> GatewayError {
    kind("The quiz service sent a malformed response. Please try again.".to_string())
}

fn failure(
    status: StatusCode,
    body: &[u8],
    kind: fn(String) -> GatewayError,
    default_message: &str,
) -> GatewayError {
    if status == StatusCode::TOO_MANY_REQUESTS {
        warn!(%status, "gateway rate limited the request");
        return GatewayError::RateLimited;
    }

    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty());

    warn!(%status, server_message = ?message, "gateway request failed");
    kind(message.unwrap_or_else(|| default_message.to_string()))
}
