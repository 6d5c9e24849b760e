use std::path::Path;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::data::load_image_base64;
use crate::gateway::{GatewayError, HttpGateway, QuizGateway};
use crate::models::QuizItem;
use crate::quiz::{AnswerStatus, Phase, QuizSession, SessionError, TicketId};

/// Completion of a spawned gateway call, delivered back to the event loop.
#[derive(Debug)]
pub enum GatewayEvent {
    QuizGenerated {
        ticket: TicketId,
        result: Result<Vec<QuizItem>, GatewayError>,
    },
    WordsExtracted {
        ticket: TicketId,
        result: Result<Vec<String>, GatewayError>,
    },
}

/// The session plus everything the terminal UI needs around it.
///
/// Gateway calls run on spawned tasks and report back over a channel, so the
/// session is only ever touched from the event loop.
pub struct App<G = HttpGateway> {
    session: QuizSession,
    gateway: G,
    events_tx: mpsc::UnboundedSender<GatewayEvent>,
    events_rx: mpsc::UnboundedReceiver<GatewayEvent>,
    answer_input: String,
    hint_visible: bool,
    image_prompt: Option<String>,
    result_scroll: usize,
    pub should_quit: bool,
}

impl<G> App<G> {
    pub fn new(session: QuizSession, gateway: G) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            session,
            gateway,
            events_tx,
            events_rx,
            answer_input: String::new(),
            hint_visible: false,
            image_prompt: None,
            result_scroll: 0,
            should_quit: false,
        }
    }

    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut QuizSession {
        &mut self.session
    }

    pub fn answer_input(&self) -> &str {
        &self.answer_input
    }

    pub fn hint_visible(&self) -> bool {
        self.hint_visible
    }

    pub fn image_prompt(&self) -> Option<&str> {
        self.image_prompt.as_deref()
    }

    pub fn result_scroll(&self) -> usize {
        self.result_scroll
    }

    pub fn feedback(&self) -> Option<String> {
        let item = self.session.current_item()?;
        match self.session.answer_status() {
            AnswerStatus::Unanswered => None,
            AnswerStatus::Incorrect => Some("Not quite. Try again!".to_string()),
            AnswerStatus::Correct => Some("Correct! Well done!".to_string()),
            AnswerStatus::Revealed => Some(format!("The answer is: {}", item.correct_form)),
        }
    }
}

impl<G> App<G>
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    /// Validate the word list and request a quiz in the background.
    pub fn start_generation(&mut self) {
        let ticket = match self.session.begin_start() {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!(error = %e, "quiz not started");
                return;
            }
        };

        let (ticket, words, difficulty) = ticket.into_parts();
        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.generate_quiz(&words, difficulty).await;
            let _ = tx.send(GatewayEvent::QuizGenerated { ticket, result });
        });
    }

    /// Esc on the loading screen: drop the request, keep what was typed.
    pub fn cancel_generation(&mut self) {
        if let Err(e) = self.session.cancel_start() {
            debug!(error = %e, "nothing to cancel");
        }
    }

    pub fn open_image_prompt(&mut self) {
        if self.session.phase() == Phase::Setup && !self.session.is_extracting() {
            self.image_prompt = Some(String::new());
        }
    }

    pub fn close_image_prompt(&mut self) {
        self.image_prompt = None;
    }

    pub fn image_prompt_mut(&mut self) -> Option<&mut String> {
        self.image_prompt.as_mut()
    }

    /// Read the image at the prompted path and send it for word extraction.
    pub fn submit_image_prompt(&mut self) {
        let Some(path) = self.image_prompt.take() else {
            return;
        };
        let path = path.trim();
        if path.is_empty() {
            return;
        }
        self.start_extraction(Path::new(path));
    }

    pub fn start_extraction(&mut self, path: &Path) {
        let image = match load_image_base64(path) {
            Ok(image) => image,
            Err(e) => {
                warn!(error = %e, "could not load image");
                self.session.set_error(e.to_string());
                return;
            }
        };

        let ticket = match self.session.begin_extraction() {
            Ok(ticket) => ticket,
            Err(e) => {
                debug!(error = %e, "extraction not started");
                return;
            }
        };

        let gateway = self.gateway.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = gateway.extract_words(&image).await;
            let _ = tx.send(GatewayEvent::WordsExtracted { ticket, result });
        });
    }

    /// Apply every gateway completion that has arrived so far.
    pub fn poll_gateway(&mut self) {
        while let Ok(event) = self.events_rx.try_recv() {
            self.apply(event);
        }
    }

    /// Wait for the next gateway completion and apply it.
    pub async fn next_gateway_event(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    fn apply(&mut self, event: GatewayEvent) {
        let outcome = match event {
            GatewayEvent::QuizGenerated { ticket, result } => {
                let outcome = self.session.complete_start(ticket, result);
                if outcome.is_ok() {
                    self.clear_question_input();
                    self.result_scroll = 0;
                }
                outcome
            }
            GatewayEvent::WordsExtracted { ticket, result } => {
                self.session.complete_extraction(ticket, result)
            }
        };

        match outcome {
            Ok(()) | Err(SessionError::Gateway(_)) => {}
            Err(e) => debug!(error = %e, "gateway result not applied"),
        }
    }

    pub fn push_answer_char(&mut self, c: char) {
        if !self.session.answer_status().is_resolved() {
            self.answer_input.push(c);
        }
    }

    pub fn pop_answer_char(&mut self) {
        if !self.session.answer_status().is_resolved() {
            self.answer_input.pop();
        }
    }

    /// Enter on the quiz screen: grade an open question, or move past a
    /// resolved one.
    pub fn submit_or_continue(&mut self) {
        if self.session.answer_status().is_resolved() {
            self.advance();
            return;
        }
        if self.answer_input.trim().is_empty() {
            return;
        }

        let index = self.session.current_index();
        if let Err(e) = self.session.answer(index, &self.answer_input) {
            debug!(error = %e, "answer not graded");
        }
    }

    /// Put the first letter of the answer into the input box.
    pub fn first_letter_hint(&mut self) {
        if self.session.answer_status().is_resolved() {
            return;
        }
        if let Some(letter) = self.session.current_item().and_then(QuizItem::first_letter) {
            self.answer_input = letter.to_string();
        }
    }

    pub fn toggle_hint(&mut self) {
        let has_hint = self
            .session
            .current_item()
            .is_some_and(|item| item.translation_hint.is_some());
        if has_hint {
            self.hint_visible = !self.hint_visible;
        }
    }

    pub fn reveal(&mut self) {
        if let Ok(answer) = self.session.reveal() {
            self.answer_input = answer.to_string();
        }
    }

    fn advance(&mut self) {
        match self.session.advance() {
            Ok(()) => {
                self.clear_question_input();
                self.result_scroll = 0;
            }
            Err(e) => debug!(error = %e, "cannot advance"),
        }
    }

    fn clear_question_input(&mut self) {
        self.answer_input.clear();
        self.hint_visible = false;
    }

    pub fn go_home(&mut self) {
        if self.session.go_home().is_ok() {
            self.image_prompt = None;
        }
    }

    pub fn resume(&mut self) {
        if let Err(e) = self.session.resume() {
            debug!(error = %e, "nothing resumed");
        }
    }

    /// Drop the current quiz and any typed input.
    pub fn reset(&mut self) {
        self.session.reset();
        self.clear_question_input();
        self.image_prompt = None;
        self.result_scroll = 0;
    }

    pub fn retry_same_words(&mut self) {
        if self.session.retry_same_words().is_ok() {
            self.clear_question_input();
            self.result_scroll = 0;
        }
    }

    pub fn scroll_results_down(&mut self) {
        let max_scroll = self.session.outcomes().len().saturating_sub(1);
        self.result_scroll = (self.result_scroll + 1).min(max_scroll);
    }

    pub fn scroll_results_up(&mut self) {
        self.result_scroll = self.result_scroll.saturating_sub(1);
    }
}
