use std::time::Instant;

use tracing::{info, warn};

use crate::config::GatewayConfig;
use crate::models::{Difficulty, QuizItem};
use crate::protocol::{
    EXTRACT_WORDS_PATH, ExtractWordsRequest, GENERATE_QUIZ_PATH, GenerateQuizRequest,
};

use super::adapter::{decode_quiz_response, decode_words_response};
use super::{GatewayError, QuizGateway};

/// Gateway reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    base_url: String,
    client: reqwest::Client,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: serde::Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<(reqwest::StatusCode, Vec<u8>), reqwest::Error> {
        let response = self.client.post(self.url(path)).json(body).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        Ok((status, bytes.to_vec()))
    }
}

fn unreachable_message(err: &reqwest::Error) -> String {
    if err.is_timeout() {
        "The quiz service took too long to answer. Please try again.".to_string()
    } else {
        format!("Could not reach the quiz service: {err}")
    }
}

impl QuizGateway for HttpGateway {
    async fn generate_quiz(
        &self,
        words: &[String],
        difficulty: Difficulty,
    ) -> Result<Vec<QuizItem>, GatewayError> {
        info!(words = words.len(), %difficulty, "requesting quiz generation");
        let started = Instant::now();

        let request = GenerateQuizRequest { words, difficulty };
        let (status, body) = self.post(GENERATE_QUIZ_PATH, &request).await.map_err(|e| {
            warn!(error = %e, "quiz generation request failed");
            GatewayError::GenerationFailed(unreachable_message(&e))
        })?;

        let items = decode_quiz_response(status, &body)?;
        info!(
            items = items.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "quiz generated"
        );
        Ok(items)
    }

    async fn extract_words(&self, image_base64: &str) -> Result<Vec<String>, GatewayError> {
        info!(image_len = image_base64.len(), "requesting word extraction");

        let request = ExtractWordsRequest { image: image_base64 };
        let (status, body) = self.post(EXTRACT_WORDS_PATH, &request).await.map_err(|e| {
            warn!(error = %e, "word extraction request failed");
            GatewayError::ExtractionFailed(unreachable_message(&e))
        })?;

        let words = decode_words_response(status, &body)?;
        info!(words = words.len(), "words extracted");
        Ok(words)
    }
}
