use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// Audience tier sent along with a generation request.
///
/// The serialized labels are part of the gateway contract and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum Difficulty {
    #[serde(rename = "Primary 1-3 (Lower)")]
    PrimaryLower,
    #[default]
    #[serde(rename = "Primary 4-6 (Upper)")]
    PrimaryUpper,
    #[serde(rename = "Secondary 1-3 (Lower)")]
    SecondaryLower,
    #[serde(rename = "Secondary 4-6 (Upper)")]
    SecondaryUpper,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::PrimaryLower,
        Difficulty::PrimaryUpper,
        Difficulty::SecondaryLower,
        Difficulty::SecondaryUpper,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::PrimaryLower => "Primary 1-3 (Lower)",
            Difficulty::PrimaryUpper => "Primary 4-6 (Upper)",
            Difficulty::SecondaryLower => "Secondary 1-3 (Lower)",
            Difficulty::SecondaryUpper => "Secondary 4-6 (Upper)",
        }
    }

    fn alias(self) -> &'static str {
        match self {
            Difficulty::PrimaryLower => "primary-lower",
            Difficulty::PrimaryUpper => "primary-upper",
            Difficulty::SecondaryLower => "secondary-lower",
            Difficulty::SecondaryUpper => "secondary-upper",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|d| *d == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Returned when a difficulty string matches neither a label nor an alias.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown difficulty '{0}' (expected one of: primary-lower, primary-upper, secondary-lower, secondary-upper)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|d| d.label().eq_ignore_ascii_case(wanted) || d.alias().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseDifficultyError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_labels() {
        let json = serde_json::to_string(&Difficulty::ALL).unwrap();
        assert_eq!(
            json,
            r#"["Primary 1-3 (Lower)","Primary 4-6 (Upper)","Secondary 1-3 (Lower)","Secondary 4-6 (Upper)"]"#
        );
    }

    #[test]
    fn test_parse_label_and_alias() {
        assert_eq!("Secondary 1-3 (Lower)".parse(), Ok(Difficulty::SecondaryLower));
        assert_eq!("primary-lower".parse(), Ok(Difficulty::PrimaryLower));
        assert_eq!(" SECONDARY-UPPER ".parse(), Ok(Difficulty::SecondaryUpper));
        assert!("tertiary".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Difficulty::SecondaryUpper.next(), Difficulty::PrimaryLower);
        assert_eq!(Difficulty::PrimaryLower.previous(), Difficulty::SecondaryUpper);
        assert_eq!(Difficulty::default(), Difficulty::PrimaryUpper);
    }
}
