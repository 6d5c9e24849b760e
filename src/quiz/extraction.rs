//! Word selection after extracting vocabulary from a photo.

/// The words found in one scanned image, each individually selectable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSelection {
    words: Vec<String>,
    selected: Vec<bool>,
    cursor: usize,
}

impl WordSelection {
    /// Every word starts selected.
    pub fn new(words: Vec<String>) -> Self {
        let selected = vec![true; words.len()];
        Self {
            words,
            selected,
            cursor: 0,
        }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_selected(&self, index: usize) -> bool {
        self.selected.get(index).copied().unwrap_or(false)
    }

    pub fn toggle(&mut self, index: usize) {
        if let Some(flag) = self.selected.get_mut(index) {
            *flag = !*flag;
        }
    }

    pub fn toggle_current(&mut self) {
        self.toggle(self.cursor);
    }

    pub fn move_next(&mut self) {
        if !self.words.is_empty() {
            self.cursor = (self.cursor + 1) % self.words.len();
        }
    }

    pub fn move_previous(&mut self) {
        if !self.words.is_empty() {
            self.cursor = (self.cursor + self.words.len() - 1) % self.words.len();
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.iter().filter(|s| **s).count()
    }

    /// Selected words in the order they were extracted.
    pub fn selected_words(&self) -> Vec<&str> {
        self.words
            .iter()
            .zip(&self.selected)
            .filter(|(_, selected)| **selected)
            .map(|(word, _)| word.as_str())
            .collect()
    }
}

/// Append `new_words` to an existing word-list buffer, comma separated.
///
/// The existing text is kept so manual entries and several scans can be
/// combined. Nothing changes when `new_words` is empty.
pub fn append_words(existing: &str, new_words: &[&str]) -> String {
    if new_words.is_empty() {
        return existing.to_string();
    }

    let joined = new_words.join(", ");
    let trimmed = existing.trim();
    if trimmed.is_empty() {
        joined
    } else {
        format!("{trimmed}, {joined}")
    }
}
