//! Engine error types.

use thiserror::Error;

use crate::scene_id::SceneId;

/// Top-level error type for the scene engine.
///
/// None of these are fatal to the process: the stage logs them and carries
/// on with the next step it can perform.
#[derive(Debug, Error)]
pub enum StageError {
    /// A scene id was requested that the catalog does not contain.
    #[error("scene not found: {0}")]
    SceneNotFound(SceneId),

    /// A scene failed inside one of its lifecycle hooks.
    #[error("scene {scene} failed during {hook}: {message}")]
    SceneFault {
        /// The scene that failed.
        scene: SceneId,
        /// The lifecycle hook (`enter` or `exit`).
        hook: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// A visual surface the engine expected is not attached.
    #[error("surface unavailable: {0}")]
    SurfaceUnavailable(&'static str),

    /// Two catalog entries share an id.
    #[error("duplicate scene id: {0}")]
    DuplicateScene(SceneId),

    /// The stage event loop has shut down and no longer accepts commands.
    #[error("stage is closed")]
    StageClosed,
}

impl StageError {
    /// Convenience constructor for a fault raised from `enter`.
    #[must_use]
    pub fn enter_fault(scene: &SceneId, message: impl Into<String>) -> Self {
        Self::SceneFault {
            scene: scene.clone(),
            hook: "enter",
            message: message.into(),
        }
    }

    /// Convenience constructor for a fault raised from `exit`.
    #[must_use]
    pub fn exit_fault(scene: &SceneId, message: impl Into<String>) -> Self {
        Self::SceneFault {
            scene: scene.clone(),
            hook: "exit",
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scene_fault_message_names_scene_and_hook() {
        let err = StageError::enter_fault(&SceneId::from("quiz"), "missing prompt");

        assert_eq!(
            err.to_string(),
            "scene quiz failed during enter: missing prompt"
        );
    }
}
