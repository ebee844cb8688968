//! The scene contract.

use reverie_core::effects::Effects;
use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_typewriter::Typewriter;

use super::commands::StageHandle;
use super::render::RenderNode;
use super::score::Scorecard;

/// What a scene can reach while it is active.
///
/// Built fresh by the stage for every lifecycle call.
#[derive(Debug, Clone)]
pub struct SceneContext {
    /// Id the scene was activated under.
    pub id: SceneId,
    /// Navigation commands back into the stage.
    pub handle: StageHandle,
    /// Reveal sessions bound to the stage's cancellation source.
    pub typewriter: Typewriter,
    /// Sound, vibration and particle collaborators.
    pub effects: Effects,
    /// Motion preference, read once at startup.
    pub reduced_motion: bool,
    /// Progress at the time of the call.
    pub scorecard: Scorecard,
}

/// One screen of the experience.
///
/// The catalog constructs a new value for every activation, so fields only
/// live for one `enter`/`exit` pair.
pub trait Scene: Send {
    /// Builds the render tree and starts any reveal work. Must not block.
    ///
    /// # Errors
    ///
    /// Returns `StageError::SceneFault` if the scene cannot render. The
    /// stage logs it and leaves the render container empty.
    fn enter(&mut self, ctx: &SceneContext) -> Result<RenderNode, StageError>;

    /// Releases everything `enter` registered. Must be safe to call after a
    /// failed `enter`.
    ///
    /// # Errors
    ///
    /// Returns `StageError::SceneFault` on failure; the stage logs it and
    /// navigates anyway.
    fn exit(&mut self) -> Result<(), StageError> {
        Ok(())
    }

    /// Primary input ("A").
    fn on_primary_action(&mut self, ctx: &SceneContext);

    /// Secondary input ("B").
    fn on_secondary_action(&mut self, ctx: &SceneContext);
}
