/// Punctuation ignored when comparing answers, wherever it appears.
pub const STRIPPED_PUNCTUATION: [char; 21] = [
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Canonical form of an answer: trimmed, lower-cased, punctuation removed.
///
/// Inner whitespace is kept so "ice cream" never matches "icecream".
pub fn normalize(s: &str) -> String {
    let stripped: String = s
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
        .collect();
    // Stripping can expose whitespace, e.g. "! run".
    stripped.trim().to_string()
}

pub fn is_match(user_input: &str, correct_form: &str) -> bool {
    normalize(user_input) == normalize(correct_form)
}
