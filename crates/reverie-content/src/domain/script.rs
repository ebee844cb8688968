//! YAML script model.
//!
//! A script is an ordered list of scenes. Each entry carries an `id`, an
//! optional `scored` flag and a `kind` tag selecting the fields that follow:
//!
//! ```yaml
//! scenes:
//!   - id: intro
//!     kind: title_card
//!     title: "Happy Birthday!"
//!     subtitle: "Press A to begin"
//!     scored: true
//! ```

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const DEMO_SCRIPT: &str = include_str!("../../scripts/demo.yaml");

/// Most options a choice may offer; each gets a letter badge.
pub const MAX_OPTIONS: usize = 26;

/// Errors raised while loading a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// Path that was read.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The YAML did not match the script format.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// The script lists no scenes.
    #[error("script has no scenes")]
    Empty,

    /// Two scenes share an id.
    #[error("duplicate scene id: {0}")]
    DuplicateScene(SceneId),

    /// A choice scene is inconsistent.
    #[error("invalid choice in scene {scene}: {reason}")]
    InvalidChoice {
        /// The offending scene.
        scene: SceneId,
        /// What is wrong with it.
        reason: String,
    },

    /// The stage rejected the catalog.
    #[error(transparent)]
    Catalog(#[from] StageError),
}

/// Heading over a subtitle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleCardSpec {
    /// Heading.
    pub title: String,
    /// Line typed after the heading.
    #[serde(default)]
    pub subtitle: String,
}

/// A question with lettered options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSpec {
    /// Heading.
    pub title: String,
    /// The question.
    pub prompt: String,
    /// Answers in display order.
    pub options: Vec<String>,
    /// Index of the right answer.
    pub correct: usize,
    /// Typed after the right answer is confirmed.
    #[serde(default = "default_praise")]
    pub praise: String,
}

fn default_praise() -> String {
    "Correct!".to_owned()
}

/// Paragraphs typed one after another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterSpec {
    /// Heading.
    pub title: String,
    /// Line under the heading.
    #[serde(default)]
    pub subtitle: String,
    /// Body paragraphs.
    pub paragraphs: Vec<String>,
}

/// Closing scene with the scorecard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinaleSpec {
    /// Heading.
    pub title: String,
    /// Closing line.
    #[serde(default)]
    pub message: String,
}

/// Kind-specific part of a scene entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneKind {
    /// See [`TitleCardSpec`].
    TitleCard(TitleCardSpec),
    /// See [`ChoiceSpec`].
    Choice(ChoiceSpec),
    /// See [`LetterSpec`].
    Letter(LetterSpec),
    /// See [`FinaleSpec`].
    Finale(FinaleSpec),
}

/// One scene entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SceneSpec {
    /// Catalog id.
    pub id: SceneId,
    /// Whether completing the scene earns a star.
    #[serde(default)]
    pub scored: bool,
    /// Kind and content.
    #[serde(flatten)]
    pub kind: SceneKind,
}

/// A parsed and validated script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    /// Scenes in catalog order.
    pub scenes: Vec<SceneSpec>,
}

impl Script {
    /// Parses and validates a YAML script.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Parse` for malformed YAML, or a validation
    /// error (see [`Script::validate`]).
    pub fn from_yaml(yaml: &str) -> Result<Self, ScriptError> {
        let script: Self = serde_yaml::from_str(yaml)?;
        script.validate()?;
        Ok(script)
    }

    /// Reads, parses and validates the script at `path`.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Io` if the file cannot be read, otherwise as
    /// [`Script::from_yaml`].
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let yaml = std::fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&yaml)
    }

    /// The built-in demo script.
    ///
    /// # Errors
    ///
    /// Returns a `ScriptError` if the bundled YAML is invalid.
    pub fn demo() -> Result<Self, ScriptError> {
        Self::from_yaml(DEMO_SCRIPT)
    }

    /// Checks the invariants the catalog relies on.
    ///
    /// # Errors
    ///
    /// Returns `ScriptError::Empty`, `ScriptError::DuplicateScene` or
    /// `ScriptError::InvalidChoice`.
    pub fn validate(&self) -> Result<(), ScriptError> {
        if self.scenes.is_empty() {
            return Err(ScriptError::Empty);
        }
        let mut seen = BTreeSet::new();
        for scene in &self.scenes {
            if !seen.insert(&scene.id) {
                return Err(ScriptError::DuplicateScene(scene.id.clone()));
            }
            if let SceneKind::Choice(choice) = &scene.kind {
                validate_choice(&scene.id, choice)?;
            }
        }
        Ok(())
    }

    /// Id of the first scene.
    #[must_use]
    pub fn first_scene(&self) -> Option<&SceneId> {
        self.scenes.first().map(|s| &s.id)
    }
}

fn validate_choice(scene: &SceneId, choice: &ChoiceSpec) -> Result<(), ScriptError> {
    let invalid = |reason: String| ScriptError::InvalidChoice {
        scene: scene.clone(),
        reason,
    };
    let count = choice.options.len();
    if count == 0 {
        return Err(invalid("no options".to_owned()));
    }
    if count > MAX_OPTIONS {
        return Err(invalid(format!("{count} options, at most {MAX_OPTIONS} allowed")));
    }
    if choice.correct >= count {
        return Err(invalid(format!(
            "correct index {} out of range for {count} options",
            choice.correct
        )));
    }
    Ok(())
}
