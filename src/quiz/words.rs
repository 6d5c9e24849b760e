/// Characters that separate vocabulary entries in free-text input.
const WORD_DELIMITERS: [char; 3] = ['\n', ',', ';'];

/// Split raw input into trimmed, non-empty vocabulary entries.
///
/// Order follows the input and repeated words are kept, since practising a
/// word twice is a valid request.
pub fn parse_words(raw: &str) -> Vec<String> {
    raw.split(WORD_DELIMITERS)
        .map(str::trim)
        .filter(|word| !word.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_splits_on_every_delimiter() {
        assert_eq!(
            parse_words("apple, running\nbeautiful;快樂"),
            vec!["apple", "running", "beautiful", "快樂"]
        );
    }

    #[test]
    fn test_delimiter_runs_collapse() {
        assert_eq!(parse_words(",,apple;;\n\n,pear,"), vec!["apple", "pear"]);
    }

    #[test]
    fn test_keeps_duplicates_and_inner_spaces() {
        assert_eq!(
            parse_words("apple, apple , ice cream"),
            vec!["apple", "apple", "ice cream"]
        );
    }

    #[test]
    fn test_windows_line_endings() {
        assert_eq!(parse_words("cat\r\ndog\r\n"), vec!["cat", "dog"]);
    }

    #[test]
    fn test_blank_input_is_empty() {
        assert!(parse_words("").is_empty());
        assert!(parse_words("  \n , ;\t").is_empty());
    }

    proptest! {
        #[test]
        fn parsed_words_are_never_blank(raw in ".{0,200}") {
            for word in parse_words(&raw) {
                prop_assert!(!word.trim().is_empty());
                prop_assert_eq!(word.trim(), word.as_str());
            }
        }

        #[test]
        fn parsed_words_keep_input_order(words in prop::collection::vec("[a-z]{1,8}", 0..20)) {
            let raw = words.join(" ;\n, ");
            prop_assert_eq!(parse_words(&raw), words);
        }
    }
}
