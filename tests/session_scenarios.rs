//! End-to-end session flows against an in-memory gateway.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use reqwest::StatusCode;
use vocab_quiz::gateway::RATE_LIMITED_MESSAGE;
use vocab_quiz::gateway::adapter::decode_quiz_response;
use vocab_quiz::quiz::AnswerStatus;
use vocab_quiz::{Difficulty, GatewayError, Phase, QuizGateway, QuizItem, QuizSession, SessionError};

/// Replays a canned HTTP response through the real response decoder.
#[derive(Clone)]
struct CannedGateway {
    status: StatusCode,
    body: &'static str,
    calls: Arc<AtomicUsize>,
}

impl CannedGateway {
    fn new(status: StatusCode, body: &'static str) -> Self {
        Self {
            status,
            body,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl QuizGateway for CannedGateway {
    async fn generate_quiz(
        &self,
        _words: &[String],
        _difficulty: Difficulty,
    ) -> Result<Vec<QuizItem>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        decode_quiz_response(self.status, self.body.as_bytes())
    }

    async fn extract_words(&self, _image_base64: &str) -> Result<Vec<String>, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(GatewayError::ExtractionFailed("not used".into()))
    }
}

const TWO_APPLES: &str = r#"[
    {"originalWord": "apple", "correctForm": "apple", "sentenceBefore": "I ate an ", "sentenceAfter": " today.", "translation": "蘋果"},
    {"originalWord": "apple", "correctForm": "apple", "sentenceBefore": "An ", "sentenceAfter": " a day.", "translation": "蘋果"}
]"#;

const THREE_WRAPPED: &str = r#"{"quizItems": [
    {"originalWord": "run", "correctForm": "run", "sentenceBefore": "I ", "sentenceAfter": "."},
    {"originalWord": "run", "correctForm": "run", "sentenceBefore": "We ", "sentenceAfter": "."},
    {"originalWord": "run", "correctForm": "run", "sentenceBefore": "They ", "sentenceAfter": "."}
]}"#;

async fn started(body: &'static str, words: &str) -> QuizSession {
    let gateway = CannedGateway::new(StatusCode::OK, body);
    let mut session = QuizSession::new(Difficulty::PrimaryUpper);
    session.set_words_raw(words);
    session.start(&gateway).await.unwrap();
    session
}

fn answer_current(session: &mut QuizSession, input: &str) -> bool {
    let index = session.current_index();
    session.answer(index, input).unwrap()
}

#[tokio::test]
async fn test_scenario_a_start_loads_items() {
    let session = started(TWO_APPLES, "apple, apple").await;

    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.total(), 2);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.difficulty(), Difficulty::PrimaryUpper);
}

#[tokio::test]
async fn test_scenario_b_punctuation_and_case_are_ignored() {
    let mut session = started(TWO_APPLES, "apple, apple").await;

    assert!(answer_current(&mut session, "Apple."));
    session.advance().unwrap();

    assert_eq!(session.score(), 1);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.answer_status(), AnswerStatus::Unanswered);
}

#[tokio::test]
async fn test_scenario_c_last_advance_completes() {
    let mut session = started(THREE_WRAPPED, "run").await;

    assert!(answer_current(&mut session, "run"));
    session.advance().unwrap();
    assert!(!answer_current(&mut session, "ran"));
    session.reveal().unwrap();
    session.advance().unwrap();
    assert!(answer_current(&mut session, " RUN! "));
    session.advance().unwrap();

    assert_eq!(session.phase(), Phase::Completed);
    assert_eq!(session.score(), 2);
    assert_eq!(session.outcomes(), [true, false, true]);
    assert!(session.current_item().is_none());
    assert!(matches!(
        session.advance(),
        Err(SessionError::InvalidPhase { .. })
    ));
}

#[tokio::test]
async fn test_scenario_d_empty_words_make_no_request() {
    let gateway = CannedGateway::new(StatusCode::OK, TWO_APPLES);
    let mut session = QuizSession::default();
    session.set_words_raw(" , ;\n ");

    let err = session.start(&gateway).await.unwrap_err();

    assert_eq!(err, SessionError::EmptyWordList);
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.error(), Some("Please enter at least one word."));
    assert_eq!(gateway.calls(), 0);
}

#[tokio::test]
async fn test_scenario_e_rate_limit_keeps_input() {
    let gateway = CannedGateway::new(
        StatusCode::TOO_MANY_REQUESTS,
        r#"{"error": "Resource exhausted"}"#,
    );
    let mut session = QuizSession::new(Difficulty::SecondaryLower);
    session.set_words_raw("apple\nbanana");

    let err = session.start(&gateway).await.unwrap_err();

    assert_eq!(err, SessionError::Gateway(GatewayError::RateLimited));
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.error(), Some(RATE_LIMITED_MESSAGE));
    assert_eq!(session.words_raw(), "apple\nbanana");
    assert_eq!(session.difficulty(), Difficulty::SecondaryLower);
    assert_eq!(gateway.calls(), 1);
}

#[tokio::test]
async fn test_scenario_f_pause_and_resume_round_trip() {
    let mut session = started(THREE_WRAPPED, "run").await;
    assert!(answer_current(&mut session, "run"));
    session.advance().unwrap();

    let items = session.items().to_vec();
    let index = session.current_index();
    let score = session.score();

    session.go_home().unwrap();
    assert_eq!(session.phase(), Phase::Setup);
    assert!(session.is_paused());

    session.resume().unwrap();
    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.items(), items.as_slice());
    assert_eq!(session.current_index(), index);
    assert_eq!(session.score(), score);
    assert!(!session.is_paused());
}

#[tokio::test]
async fn test_retry_replays_same_items() {
    let mut session = started(THREE_WRAPPED, "run").await;
    for _ in 0..3 {
        answer_current(&mut session, "run");
        session.advance().unwrap();
    }
    let mut ids: Vec<_> = session.items().iter().map(|item| item.id).collect();

    session.retry_same_words().unwrap();

    assert_eq!(session.phase(), Phase::InProgress);
    assert_eq!(session.score(), 0);
    assert_eq!(session.current_index(), 0);
    assert!(session.outcomes().is_empty());
    let mut retried: Vec<_> = session.items().iter().map(|item| item.id).collect();
    ids.sort();
    retried.sort();
    assert_eq!(ids, retried);
}

#[tokio::test]
async fn test_malformed_batch_is_a_generation_failure() {
    let gateway = CannedGateway::new(
        StatusCode::OK,
        r#"[{"originalWord": "cat", "correctForm": "  "}]"#,
    );
    let mut session = QuizSession::default();
    session.set_words_raw("cat");

    let err = session.start(&gateway).await.unwrap_err();

    assert!(matches!(
        err,
        SessionError::Gateway(GatewayError::GenerationFailed(_))
    ));
    assert_eq!(session.phase(), Phase::Setup);
    assert!(session.items().is_empty());
}
