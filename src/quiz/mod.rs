//! Quiz logic: word parsing, grading, shuffling and the session itself.

pub mod extraction;
pub mod grading;
pub mod session;
pub mod shuffle;
pub mod words;

pub use extraction::{WordSelection, append_words};
pub use grading::{is_match, normalize};
pub use session::{
    AnswerStatus, ExtractionState, GenerationTicket, Phase, QuizSession, SessionError, TicketId,
};
pub use shuffle::{shuffle, shuffle_with};
pub use words::parse_words;
