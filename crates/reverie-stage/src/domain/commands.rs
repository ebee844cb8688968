//! Commands accepted by the stage event loop.

use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_transition::EffectHint;
use tokio::sync::mpsc;

/// A request processed by the stage, one at a time, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageCommand {
    /// Swap to `target`.
    RequestScene {
        /// The scene to show.
        target: SceneId,
        /// Preferred transition.
        hint: EffectHint,
    },
    /// Record the current scene as completed.
    MarkCurrentComplete,
    /// Clear the completion set.
    ResetProgress,
    /// Move to the next catalog entry.
    Advance,
    /// Move to the previous catalog entry.
    Retreat,
    /// Primary input on the current scene.
    PrimaryAction,
    /// Secondary input on the current scene.
    SecondaryAction,
    /// Skip every reveal that is still typing.
    Tap,
}

/// Cloneable sender half of the stage's command queue.
#[derive(Debug, Clone)]
pub struct StageHandle {
    tx: mpsc::UnboundedSender<StageCommand>,
}

impl StageHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<StageCommand>) -> Self {
        Self { tx }
    }

    /// Queues `command`.
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn send(&self, command: StageCommand) -> Result<(), StageError> {
        self.tx.send(command).map_err(|_| StageError::StageClosed)
    }

    /// Queues a scene change.
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn request_scene(
        &self,
        target: impl Into<SceneId>,
        hint: impl Into<EffectHint>,
    ) -> Result<(), StageError> {
        self.send(StageCommand::RequestScene {
            target: target.into(),
            hint: hint.into(),
        })
    }

    /// Queues [`StageCommand::MarkCurrentComplete`].
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn mark_current_complete(&self) -> Result<(), StageError> {
        self.send(StageCommand::MarkCurrentComplete)
    }

    /// Queues [`StageCommand::ResetProgress`].
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn reset_progress(&self) -> Result<(), StageError> {
        self.send(StageCommand::ResetProgress)
    }

    /// Queues [`StageCommand::Advance`].
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn advance(&self) -> Result<(), StageError> {
        self.send(StageCommand::Advance)
    }

    /// Queues [`StageCommand::Retreat`].
    ///
    /// # Errors
    ///
    /// Returns `StageError::StageClosed` if the event loop has stopped.
    pub fn retreat(&self) -> Result<(), StageError> {
        self.send(StageCommand::Retreat)
    }

    /// Returns `true` once the event loop has stopped.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
