//! # vocab-quiz
//!
//! A terminal vocabulary trainer. Words typed in (or scanned from a photo)
//! are sent to a generative-AI gateway, which returns fill-in-the-blank
//! sentences that are then answered one by one.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use vocab_quiz::{Config, QuizError, VocabQuiz};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), QuizError> {
//!     let quiz = VocabQuiz::from_config(&Config::default())?;
//!     quiz.run().await
//! }
//! ```

pub mod app;
pub mod config;
pub mod data;
pub mod gateway;
pub mod logging;
pub mod models;
pub mod protocol;
pub mod quiz;
pub mod terminal;
mod ui;

use std::io;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use thiserror::Error;
use tracing::{debug, info};

pub use app::App;
pub use config::Config;
pub use data::{LoadError, load_image_base64, load_word_file};
pub use gateway::{GatewayError, HttpGateway, QuizGateway};
pub use models::{Difficulty, QuizItem};
pub use quiz::{Phase, QuizSession, SessionError};

const INPUT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Error type for running the quiz.
#[derive(Debug, Error)]
pub enum QuizError {
    #[error("failed to load word list: {0}")]
    Load(#[from] LoadError),
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// A quiz instance that can be run in the terminal.
pub struct VocabQuiz<G = HttpGateway> {
    app: App<G>,
}

impl VocabQuiz {
    /// Build the HTTP gateway and prefill the word list from `config`.
    pub fn from_config(config: &Config) -> Result<Self, QuizError> {
        let gateway = HttpGateway::new(&config.gateway)?;
        let mut session = QuizSession::new(config.difficulty);
        if let Some(path) = &config.words_file {
            session.set_words_raw(load_word_file(path)?);
        }
        Ok(Self::new(session, gateway))
    }
}

impl<G> VocabQuiz<G>
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    pub fn new(session: QuizSession, gateway: G) -> Self {
        Self {
            app: App::new(session, gateway),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// Takes over the terminal until the user quits. Must be called from
    /// within a tokio runtime, since gateway calls are spawned onto it.
    pub async fn run(mut self) -> Result<(), QuizError> {
        info!("starting terminal session");
        let mut term = terminal::init()?;
        let result = run_event_loop(&mut term, &mut self.app).await;
        terminal::restore()?;
        info!("terminal session ended");
        result
    }

    pub fn app(&self) -> &App<G> {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut App<G> {
        &mut self.app
    }
}

async fn run_event_loop<G>(
    terminal: &mut terminal::AppTerminal,
    app: &mut App<G>,
) -> Result<(), QuizError>
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    while !app.should_quit {
        // Let spawned gateway calls make progress on a current-thread runtime.
        tokio::task::yield_now().await;
        app.poll_gateway();
        terminal.draw(|frame| ui::render(frame, app))?;

        if event::poll(INPUT_POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                if handle_input(app, key) {
                    app.should_quit = true;
                }
            }
        }
    }

    Ok(())
}

fn is_ctrl(key: &KeyEvent, c: char) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char(c)
}

/// Returns true if the app should exit.
pub fn handle_input<G>(app: &mut App<G>, key: KeyEvent) -> bool
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    if is_ctrl(&key, 'c') {
        return true;
    }

    match app.session().phase() {
        Phase::Setup if app.session().selection().is_some() => {
            handle_selection_input(app, key);
            false
        }
        Phase::Setup if app.image_prompt().is_some() => {
            handle_image_prompt_input(app, key);
            false
        }
        Phase::Setup => handle_setup_input(app, key),
        Phase::Loading => {
            if key.code == KeyCode::Esc {
                app.cancel_generation();
            }
            false
        }
        Phase::InProgress => {
            handle_quiz_input(app, key);
            false
        }
        Phase::Completed => handle_result_input(app, key),
    }
}

fn handle_setup_input<G>(app: &mut App<G>, key: KeyEvent) -> bool
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let session = app.session_mut();

    match key.code {
        KeyCode::Esc => return true,
        KeyCode::Enter => app.start_generation(),
        KeyCode::Left => session.set_difficulty(session.difficulty().previous()),
        KeyCode::Right => session.set_difficulty(session.difficulty().next()),
        KeyCode::Char('o') if ctrl => app.open_image_prompt(),
        KeyCode::Char('r') if ctrl => app.resume(),
        KeyCode::Char('d') if ctrl => {
            if session.is_paused() {
                app.reset();
            }
        }
        KeyCode::Char('n') if ctrl => {
            session.clear_error();
            session.words_raw_mut().push('\n');
        }
        KeyCode::Char(c) if !ctrl => {
            session.clear_error();
            session.words_raw_mut().push(c);
        }
        KeyCode::Backspace => {
            session.clear_error();
            session.words_raw_mut().pop();
        }
        _ => {}
    }
    false
}

fn handle_image_prompt_input<G>(app: &mut App<G>, key: KeyEvent)
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    match key.code {
        KeyCode::Esc => app.close_image_prompt(),
        KeyCode::Enter => app.submit_image_prompt(),
        KeyCode::Backspace => {
            if let Some(path) = app.image_prompt_mut() {
                path.pop();
            }
        }
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            if let Some(path) = app.image_prompt_mut() {
                path.push(c);
            }
        }
        _ => {}
    }
}

fn handle_selection_input<G>(app: &mut App<G>, key: KeyEvent) {
    let session = app.session_mut();
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => {
            if let Some(selection) = session.selection_mut() {
                selection.move_previous();
            }
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if let Some(selection) = session.selection_mut() {
                selection.move_next();
            }
        }
        KeyCode::Char(' ') => {
            if let Some(selection) = session.selection_mut() {
                selection.toggle_current();
            }
        }
        KeyCode::Enter => match session.confirm_selection() {
            Ok(added) => info!(added, "extracted words added"),
            Err(e) => debug!(error = %e, "selection not confirmed"),
        },
        KeyCode::Esc => {
            let _ = session.cancel_selection();
        }
        _ => {}
    }
}

fn handle_quiz_input<G>(app: &mut App<G>, key: KeyEvent)
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Enter => app.submit_or_continue(),
        KeyCode::Tab => app.toggle_hint(),
        KeyCode::Esc => app.go_home(),
        KeyCode::Char('l') if ctrl => app.first_letter_hint(),
        KeyCode::Char('a') if ctrl => app.reveal(),
        KeyCode::Char(c) if !ctrl => app.push_answer_char(c),
        KeyCode::Backspace => app.pop_answer_char(),
        _ => {}
    }
}

fn handle_result_input<G>(app: &mut App<G>, key: KeyEvent) -> bool
where
    G: QuizGateway + Clone + Send + Sync + 'static,
{
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => app.scroll_results_down(),
        KeyCode::Up | KeyCode::Char('k') => app.scroll_results_up(),
        KeyCode::Char('r') | KeyCode::Char('R') => app.retry_same_words(),
        KeyCode::Char('n') | KeyCode::Char('N') => app.reset(),
        KeyCode::Esc => app.go_home(),
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,
        _ => {}
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct EchoGateway;

    impl QuizGateway for EchoGateway {
        async fn generate_quiz(
            &self,
            words: &[String],
            _difficulty: Difficulty,
        ) -> Result<Vec<QuizItem>, GatewayError> {
            Ok(words
                .iter()
                .map(|w| QuizItem::new(w.as_str(), w.as_str(), "Say ", ".", None))
                .collect())
        }

        async fn extract_words(&self, _image_base64: &str) -> Result<Vec<String>, GatewayError> {
            Ok(vec!["cat".into(), "dog".into()])
        }
    }

    fn app() -> App<EchoGateway> {
        App::new(QuizSession::default(), EchoGateway)
    }

    fn press(app: &mut App<EchoGateway>, code: KeyCode) -> bool {
        handle_input(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn ctrl(app: &mut App<EchoGateway>, c: char) -> bool {
        handle_input(app, KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn type_text(app: &mut App<EchoGateway>, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_typing_edits_word_list() {
        let mut app = app();
        type_text(&mut app, "cat,");
        ctrl(&mut app, 'n');
        type_text(&mut app, "dogx");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.session().words_raw(), "cat,\ndog");
    }

    #[test]
    fn test_q_is_text_on_setup_screen() {
        let mut app = app();
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert_eq!(app.session().words_raw(), "q");
    }

    #[test]
    fn test_arrows_cycle_difficulty() {
        let mut app = app();
        let start = app.session().difficulty();
        press(&mut app, KeyCode::Right);
        assert_eq!(app.session().difficulty(), start.next());
        press(&mut app, KeyCode::Left);
        assert_eq!(app.session().difficulty(), start);
    }

    #[test]
    fn test_ctrl_c_quits_everywhere() {
        let mut app = app();
        assert!(ctrl(&mut app, 'c'));
    }

    #[test]
    fn test_empty_enter_shows_error() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), Phase::Setup);
        assert_eq!(app.session().error(), Some("Please enter at least one word."));

        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.session().error(), None);
    }

    #[test]
    fn test_image_prompt_captures_keys() {
        let mut app = app();
        ctrl(&mut app, 'o');
        type_text(&mut app, "a.jpg");
        assert_eq!(app.image_prompt(), Some("a.jpg"));
        assert_eq!(app.session().words_raw(), "");

        press(&mut app, KeyCode::Esc);
        assert!(app.image_prompt().is_none());
    }

    #[tokio::test]
    async fn test_full_quiz_through_keys() {
        let mut app = app();
        type_text(&mut app, "sun");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), Phase::Loading);
        app.next_gateway_event().await;

        type_text(&mut app, "SUN");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), Phase::Completed);
        assert_eq!(app.session().score(), 1);

        press(&mut app, KeyCode::Esc);
        assert!(app.session().is_paused());
        ctrl(&mut app, 'r');
        assert_eq!(app.session().phase(), Phase::Completed);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.session().phase(), Phase::Setup);
        assert!(!app.session().is_paused());
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[tokio::test]
    async fn test_escape_while_loading_keeps_inputs_and_paused_quiz() {
        let mut app = app();
        type_text(&mut app, "sun");
        press(&mut app, KeyCode::Enter);
        app.next_gateway_event().await;
        press(&mut app, KeyCode::Esc);
        assert!(app.session().is_paused());

        type_text(&mut app, ",moon");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.session().phase(), Phase::Loading);
        press(&mut app, KeyCode::Esc);

        assert_eq!(app.session().phase(), Phase::Setup);
        assert_eq!(app.session().words_raw(), "sun,moon");
        assert!(app.session().is_paused());

        app.next_gateway_event().await;
        assert_eq!(app.session().phase(), Phase::Setup);
        assert_eq!(app.session().total(), 1);

        ctrl(&mut app, 'r');
        assert_eq!(app.session().phase(), Phase::InProgress);
    }
}
