//! The quiz session state machine.
//!
//! One session exists per running app. Every user action goes through a
//! method here; network calls are split into a `begin_*` step that hands out
//! a ticket and a `complete_*` step that applies the result, so the caller
//! decides how to await them.

use std::fmt;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::gateway::{EMPTY_QUIZ_MESSAGE, GatewayError, QuizGateway};
use crate::models::{Difficulty, QuizItem};

use super::extraction::{WordSelection, append_words};
use super::grading::is_match;
use super::shuffle::shuffle;
use super::words::parse_words;

/// Stage of the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Loading,
    InProgress,
    Completed,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Setup => "setup",
            Phase::Loading => "loading",
            Phase::InProgress => "in progress",
            Phase::Completed => "completed",
        };
        f.write_str(name)
    }
}

/// Resolution of the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerStatus {
    #[default]
    Unanswered,
    Incorrect,
    Correct,
    Revealed,
}

impl AnswerStatus {
    /// A resolved question accepts no more answers and may be advanced.
    pub fn is_resolved(self) -> bool {
        matches!(self, AnswerStatus::Correct | AnswerStatus::Revealed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Please enter at least one word.")]
    EmptyWordList,
    #[error("cannot {action} while the quiz is {phase}")]
    InvalidPhase { action: &'static str, phase: Phase },
    #[error("a request is already in progress")]
    RequestInFlight,
    #[error("the word selection is still open")]
    SelectionOpen,
    #[error("question {got} is not the current question ({expected})")]
    WrongQuestion { expected: usize, got: usize },
    #[error("type an answer before submitting")]
    BlankAnswer,
    #[error("this question has already been answered")]
    QuestionResolved,
    #[error("answer or reveal the question before moving on")]
    QuestionUnresolved,
    #[error("there is no current question")]
    NoCurrentQuestion,
    #[error("no quiz is being generated")]
    NothingToCancel,
    #[error("there is no paused quiz to resume")]
    NothingToResume,
    #[error("no word selection is open")]
    NoSelection,
    #[error("the response belongs to a request that is no longer current")]
    StaleTicket,
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

/// Identifies one outstanding network request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketId(u64);

/// Everything needed to issue a generation request.
#[derive(Debug, Clone)]
pub struct GenerationTicket {
    id: TicketId,
    words: Vec<String>,
    difficulty: Difficulty,
}

impl GenerationTicket {
    pub fn id(&self) -> TicketId {
        self.id
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn into_parts(self) -> (TicketId, Vec<String>, Difficulty) {
        (self.id, self.words, self.difficulty)
    }
}

/// Where the photo side flow currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ExtractionState {
    #[default]
    Idle,
    Pending(TicketId),
    Selecting(WordSelection),
}

#[derive(Debug, Clone)]
pub struct QuizSession {
    phase: Phase,
    items: Vec<QuizItem>,
    current_index: usize,
    score: usize,
    answer: AnswerStatus,
    outcomes: Vec<bool>,
    difficulty: Difficulty,
    words_raw: String,
    error: Option<String>,
    paused_from: Option<Phase>,
    pending_generation: Option<TicketId>,
    extraction: ExtractionState,
    next_ticket: u64,
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(Difficulty::default())
    }
}

impl QuizSession {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            phase: Phase::Setup,
            items: Vec::new(),
            current_index: 0,
            score: 0,
            answer: AnswerStatus::Unanswered,
            outcomes: Vec::new(),
            difficulty,
            words_raw: String::new(),
            error: None,
            paused_from: None,
            pending_generation: None,
            extraction: ExtractionState::Idle,
            next_ticket: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn items(&self) -> &[QuizItem] {
        &self.items
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }

    pub fn current_item(&self) -> Option<&QuizItem> {
        match self.phase {
            Phase::InProgress => self.items.get(self.current_index),
            _ => None,
        }
    }

    pub fn answer_status(&self) -> AnswerStatus {
        self.answer
    }

    /// Whether each committed question was answered correctly, in order.
    pub fn outcomes(&self) -> &[bool] {
        &self.outcomes
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Ignored while a generation request is outstanding.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        if self.phase != Phase::Loading {
            self.difficulty = difficulty;
        }
    }

    pub fn words_raw(&self) -> &str {
        &self.words_raw
    }

    pub fn words_raw_mut(&mut self) -> &mut String {
        &mut self.words_raw
    }

    pub fn set_words_raw(&mut self, raw: impl Into<String>) {
        self.words_raw = raw.into();
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// True in Setup when an earlier quiz can be resumed.
    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Setup && self.paused_from.is_some()
    }

    /// The phase a paused session returns to on resume.
    pub fn paused_from(&self) -> Option<Phase> {
        self.paused_from.filter(|_| self.phase == Phase::Setup)
    }

    pub fn extraction(&self) -> &ExtractionState {
        &self.extraction
    }

    pub fn is_extracting(&self) -> bool {
        matches!(self.extraction, ExtractionState::Pending(_))
    }

    pub fn selection(&self) -> Option<&WordSelection> {
        match &self.extraction {
            ExtractionState::Selecting(selection) => Some(selection),
            _ => None,
        }
    }

    pub fn selection_mut(&mut self) -> Option<&mut WordSelection> {
        match &mut self.extraction {
            ExtractionState::Selecting(selection) => Some(selection),
            _ => None,
        }
    }

    fn issue_ticket(&mut self) -> TicketId {
        self.next_ticket += 1;
        TicketId(self.next_ticket)
    }

    fn check_invariants(&self) {
        debug_assert!(self.score <= self.current_index, "score exceeds answered questions");
        debug_assert_eq!(self.outcomes.len(), self.current_index);
        debug_assert!(self.current_index <= self.items.len(), "index past the last question");
    }

    fn require_phase(&self, expected: Phase, action: &'static str) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::InvalidPhase {
                action,
                phase: self.phase,
            })
        }
    }

    /// Validate the word list and move to Loading.
    ///
    /// An empty list sets the error message and leaves the phase alone; no
    /// request should be issued in that case.
    pub fn begin_start(&mut self) -> Result<GenerationTicket, SessionError> {
        if self.phase == Phase::Loading {
            return Err(SessionError::RequestInFlight);
        }
        self.require_phase(Phase::Setup, "start a quiz")?;

        let words = parse_words(&self.words_raw);
        if words.is_empty() {
            let err = SessionError::EmptyWordList;
            self.error = Some(err.to_string());
            return Err(err);
        }

        let id = self.issue_ticket();
        self.error = None;
        self.pending_generation = Some(id);
        self.phase = Phase::Loading;
        info!(words = words.len(), difficulty = %self.difficulty, "quiz generation started");

        Ok(GenerationTicket {
            id,
            words,
            difficulty: self.difficulty,
        })
    }

    /// Apply the outcome of a generation request.
    ///
    /// Results for a ticket other than the outstanding one are rejected with
    /// [`SessionError::StaleTicket`] and change nothing.
    pub fn complete_start(
        &mut self,
        ticket: TicketId,
        result: Result<Vec<QuizItem>, GatewayError>,
    ) -> Result<(), SessionError> {
        if self.phase != Phase::Loading || self.pending_generation != Some(ticket) {
            debug!(?ticket, "dropping stale generation result");
            return Err(SessionError::StaleTicket);
        }
        self.pending_generation = None;

        let result = result.and_then(|items| {
            if items.is_empty() {
                Err(GatewayError::GenerationFailed(EMPTY_QUIZ_MESSAGE.to_string()))
            } else {
                Ok(items)
            }
        });

        match result {
            Ok(items) => {
                self.items = shuffle(&items);
                self.current_index = 0;
                self.score = 0;
                self.answer = AnswerStatus::Unanswered;
                self.outcomes.clear();
                self.paused_from = None;
                self.phase = Phase::InProgress;
                info!(items = self.items.len(), "quiz ready");
                self.check_invariants();
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, rate_limited = err.is_rate_limited(), "quiz generation failed");
                self.error = Some(err.to_string());
                self.phase = Phase::Setup;
                Err(err.into())
            }
        }
    }

    /// Validate, request and apply a quiz in one call.
    pub async fn start<G: QuizGateway>(&mut self, gateway: &G) -> Result<(), SessionError> {
        let (ticket, words, difficulty) = self.begin_start()?.into_parts();
        let result = gateway.generate_quiz(&words, difficulty).await;
        self.complete_start(ticket, result)
    }

    /// Abandon the outstanding generation request and go back to Setup.
    ///
    /// The word list, difficulty and any paused quiz are kept; the late
    /// response is dropped as stale.
    pub fn cancel_start(&mut self) -> Result<(), SessionError> {
        if self.phase != Phase::Loading {
            return Err(SessionError::NothingToCancel);
        }
        self.pending_generation = None;
        self.phase = Phase::Setup;
        info!("quiz generation cancelled");
        Ok(())
    }

    /// Grade `input` against the current question without advancing.
    ///
    /// A wrong answer may be retried; once correct the question is locked.
    pub fn answer(&mut self, item_index: usize, input: &str) -> Result<bool, SessionError> {
        self.require_phase(Phase::InProgress, "answer")?;
        if item_index != self.current_index {
            return Err(SessionError::WrongQuestion {
                expected: self.current_index,
                got: item_index,
            });
        }
        if input.trim().is_empty() {
            return Err(SessionError::BlankAnswer);
        }
        if self.answer.is_resolved() {
            return Err(SessionError::QuestionResolved);
        }

        let item = self
            .items
            .get(self.current_index)
            .ok_or(SessionError::NoCurrentQuestion)?;
        let correct = is_match(input, &item.correct_form);
        self.answer = if correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        };
        debug!(index = item_index, correct, "answer graded");
        Ok(correct)
    }

    /// Give up on the current question and show its answer.
    pub fn reveal(&mut self) -> Result<&str, SessionError> {
        self.require_phase(Phase::InProgress, "reveal an answer")?;
        if self.answer.is_resolved() {
            return Err(SessionError::QuestionResolved);
        }
        let item = self
            .items
            .get(self.current_index)
            .ok_or(SessionError::NoCurrentQuestion)?;
        self.answer = AnswerStatus::Revealed;
        debug!(index = self.current_index, "answer revealed");
        Ok(&item.correct_form)
    }

    /// Commit the resolved question and move on.
    ///
    /// Counts a point only when the question was answered correctly. The
    /// next question starts unresolved, so one question can never be
    /// committed twice.
    pub fn advance(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::InProgress, "advance")?;
        if !self.answer.is_resolved() {
            return Err(SessionError::QuestionUnresolved);
        }

        let correct = self.answer == AnswerStatus::Correct;
        if correct {
            self.score += 1;
        }
        self.outcomes.push(correct);
        self.answer = AnswerStatus::Unanswered;

        if self.current_index + 1 < self.items.len() {
            self.current_index += 1;
        } else {
            self.current_index = self.items.len();
            self.phase = Phase::Completed;
            info!(score = self.score, total = self.items.len(), "quiz completed");
        }
        self.check_invariants();
        Ok(())
    }

    /// Back to the setup screen, keeping the quiz for later.
    pub fn go_home(&mut self) -> Result<(), SessionError> {
        match self.phase {
            Phase::InProgress | Phase::Completed => {
                self.paused_from = Some(self.phase);
                self.phase = Phase::Setup;
                debug!(from = %self.paused_from.unwrap_or(Phase::Setup), "quiz paused");
                Ok(())
            }
            phase => Err(SessionError::InvalidPhase {
                action: "go home",
                phase,
            }),
        }
    }

    /// Return to the quiz that [`go_home`](Self::go_home) paused.
    pub fn resume(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Setup, "resume")?;
        let target = self.paused_from.take().ok_or(SessionError::NothingToResume)?;
        self.phase = target;
        self.error = None;
        debug!(to = %target, "quiz resumed");
        Ok(())
    }

    /// Throw everything away and return to a fresh setup screen.
    ///
    /// Outstanding requests become stale. The chosen difficulty survives.
    pub fn reset(&mut self) {
        info!(phase = %self.phase, "session reset");
        *self = Self {
            next_ticket: self.next_ticket,
            ..Self::new(self.difficulty)
        };
    }

    /// Same as [`reset`](Self::reset); named for the resume banner action.
    pub fn discard(&mut self) {
        self.reset();
    }

    /// Replay the finished quiz with the same questions.
    pub fn retry_same_words(&mut self) -> Result<(), SessionError> {
        self.require_phase(Phase::Completed, "retry")?;
        self.current_index = 0;
        self.score = 0;
        self.answer = AnswerStatus::Unanswered;
        self.outcomes.clear();
        self.phase = Phase::InProgress;
        info!(items = self.items.len(), "quiz restarted with the same questions");
        Ok(())
    }

    /// Mark a word extraction as in flight.
    pub fn begin_extraction(&mut self) -> Result<TicketId, SessionError> {
        self.require_phase(Phase::Setup, "scan an image")?;
        match self.extraction {
            ExtractionState::Pending(_) => return Err(SessionError::RequestInFlight),
            ExtractionState::Selecting(_) => return Err(SessionError::SelectionOpen),
            ExtractionState::Idle => {}
        }

        let id = self.issue_ticket();
        self.error = None;
        self.extraction = ExtractionState::Pending(id);
        info!("word extraction started");
        Ok(id)
    }

    /// Apply the outcome of a word extraction.
    pub fn complete_extraction(
        &mut self,
        ticket: TicketId,
        result: Result<Vec<String>, GatewayError>,
    ) -> Result<(), SessionError> {
        if self.extraction != ExtractionState::Pending(ticket) {
            debug!(?ticket, "dropping stale extraction result");
            return Err(SessionError::StaleTicket);
        }

        match result {
            Ok(words) => {
                info!(words = words.len(), "words ready for selection");
                self.extraction = ExtractionState::Selecting(WordSelection::new(words));
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "word extraction failed");
                self.extraction = ExtractionState::Idle;
                self.error = Some(err.to_string());
                Err(err.into())
            }
        }
    }

    /// Request and apply a word extraction in one call.
    pub async fn extract_from<G: QuizGateway>(
        &mut self,
        gateway: &G,
        image_base64: &str,
    ) -> Result<(), SessionError> {
        let ticket = self.begin_extraction()?;
        let result = gateway.extract_words(image_base64).await;
        self.complete_extraction(ticket, result)
    }

    /// Append the selected words to the word list and close the selection.
    ///
    /// Returns how many words were added.
    pub fn confirm_selection(&mut self) -> Result<usize, SessionError> {
        let ExtractionState::Selecting(selection) = std::mem::take(&mut self.extraction) else {
            return Err(SessionError::NoSelection);
        };

        let chosen = selection.selected_words();
        self.words_raw = append_words(&self.words_raw, &chosen);
        debug!(added = chosen.len(), "extracted words added");
        Ok(chosen.len())
    }

    pub fn cancel_selection(&mut self) -> Result<(), SessionError> {
        match self.extraction {
            ExtractionState::Selecting(_) => {
                self.extraction = ExtractionState::Idle;
                Ok(())
            }
            _ => Err(SessionError::NoSelection),
        }
    }
}
