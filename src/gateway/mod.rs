//! Boundary to the generative-AI gateway.
//!
//! The rest of the crate only sees [`QuizItem`] and plain word lists; payload
//! shape handling lives in [`adapter`].

pub mod adapter;
mod http;

use std::future::Future;

use thiserror::Error;

use crate::models::{Difficulty, QuizItem};

pub use http::HttpGateway;

/// User-facing text for an upstream rate limit.
pub const RATE_LIMITED_MESSAGE: &str =
    "The quiz service is busy right now (too many requests). Please wait a moment and try again.";

pub const DEFAULT_GENERATION_MESSAGE: &str =
    "Failed to generate quiz. Please check your words and try again.";

pub const DEFAULT_EXTRACTION_MESSAGE: &str = "Failed to analyze image. Please try again.";

pub const EMPTY_QUIZ_MESSAGE: &str = "The quiz service returned no questions. Please try again.";

/// Failures reported by a gateway call.
///
/// Malformed payloads are folded into the `*Failed` variants; a batch is
/// either fully valid or rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    #[error("{}", RATE_LIMITED_MESSAGE)]
    RateLimited,
    #[error("{0}")]
    GenerationFailed(String),
    #[error("{0}")]
    ExtractionFailed(String),
}

impl GatewayError {
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, GatewayError::RateLimited)
    }
}

/// The two operations the quiz session depends on.
pub trait QuizGateway {
    fn generate_quiz(
        &self,
        words: &[String],
        difficulty: Difficulty,
    ) -> impl Future<Output = Result<Vec<QuizItem>, GatewayError>> + Send;

    /// `image_base64` carries JPEG bytes without a data-URL prefix.
    fn extract_words(
        &self,
        image_base64: &str,
    ) -> impl Future<Output = Result<Vec<String>, GatewayError>> + Send;
}
