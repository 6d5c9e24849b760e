use uuid::Uuid;

/// One generated fill-in-the-blank question.
///
/// Items are built in a single batch by the gateway adapter and never
/// mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub id: Uuid,
    pub original_word: String,
    pub correct_form: String,
    pub sentence_before: String,
    pub sentence_after: String,
    pub translation_hint: Option<String>,
}

impl QuizItem {
    pub fn new(
        original_word: impl Into<String>,
        correct_form: impl Into<String>,
        sentence_before: impl Into<String>,
        sentence_after: impl Into<String>,
        translation_hint: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            original_word: original_word.into(),
            correct_form: correct_form.into(),
            sentence_before: sentence_before.into(),
            sentence_after: sentence_after.into(),
            translation_hint,
        }
    }

    /// First character of the accepted answer, used for the letter hint.
    pub fn first_letter(&self) -> Option<char> {
        self.correct_form.chars().next()
    }

    /// The sentence with `blank` standing in for the answer.
    pub fn sentence_with(&self, blank: &str) -> String {
        format!("{}{}{}", self.sentence_before, blank, self.sentence_after)
    }
}
