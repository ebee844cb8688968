//! Transition kinds and caller hints.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual variant of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Diagonal cell-wave wipe.
    Tiles,
    /// Circular wipe.
    Iris,
    /// No occlusion; the swap happens immediately.
    None,
}

impl TransitionKind {
    /// Lowercase name used in scripts and requests.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tiles => "tiles",
            Self::Iris => "iris",
            Self::None => "none",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no transition kind.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown transition kind: {0}")]
pub struct ParseKindError(pub String);

impl FromStr for TransitionKind {
    type Err = ParseKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tiles" => Ok(Self::Tiles),
            "iris" => Ok(Self::Iris),
            "none" => Ok(Self::None),
            _ => Err(ParseKindError(s.to_owned())),
        }
    }
}

/// What a caller asks for when requesting a scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EffectHint {
    /// Let the stage decide.
    #[default]
    Auto,
    /// A specific kind, honoured unless motion is reduced or nothing has
    /// been shown yet.
    Kind(TransitionKind),
}

impl From<&str> for EffectHint {
    /// Anything that is not a valid kind name means [`EffectHint::Auto`].
    fn from(s: &str) -> Self {
        s.parse().map_or(Self::Auto, Self::Kind)
    }
}

impl From<String> for EffectHint {
    fn from(s: String) -> Self {
        Self::from(s.as_str())
    }
}

impl From<EffectHint> for String {
    fn from(hint: EffectHint) -> Self {
        match hint {
            EffectHint::Auto => "auto".to_owned(),
            EffectHint::Kind(kind) => kind.as_str().to_owned(),
        }
    }
}

impl From<TransitionKind> for EffectHint {
    fn from(kind: TransitionKind) -> Self {
        Self::Kind(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parses_case_insensitively() {
        assert_eq!("Tiles".parse(), Ok(TransitionKind::Tiles));
        assert_eq!(" iris ".parse(), Ok(TransitionKind::Iris));
        assert_eq!("none".parse(), Ok(TransitionKind::None));
    }

    #[test]
    fn test_unknown_kind_is_an_error() {
        assert_eq!(
            "sparkle".parse::<TransitionKind>(),
            Err(ParseKindError("sparkle".to_owned()))
        );
    }

    #[test]
    fn test_invalid_hint_falls_back_to_auto() {
        assert_eq!(EffectHint::from("sparkle"), EffectHint::Auto);
        assert_eq!(EffectHint::from("auto"), EffectHint::Auto);
        assert_eq!(
            EffectHint::from("iris"),
            EffectHint::Kind(TransitionKind::Iris)
        );
    }

    #[test]
    fn test_hint_deserializes_from_string() {
        let hint: EffectHint = serde_json::from_str("\"tiles\"").unwrap();

        assert_eq!(hint, EffectHint::Kind(TransitionKind::Tiles));
    }
}
