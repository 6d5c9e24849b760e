mod difficulty;
mod quiz_item;

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use quiz_item::QuizItem;
