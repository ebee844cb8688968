//! Mutable stage state.

use std::collections::BTreeSet;
use std::fmt;

use reverie_core::scene_id::SceneId;

use super::scene::Scene;

/// Which scene is active and what has been completed.
///
/// Owned exclusively by the stage event loop.
#[derive(Default)]
pub struct GameState {
    pub(crate) current_scene_id: Option<SceneId>,
    pub(crate) current_scene: Option<Box<dyn Scene>>,
    pub(crate) completed: BTreeSet<SceneId>,
    pub(crate) started: bool,
    pub(crate) transitioning: bool,
}

impl GameState {
    /// Creates the initial state: nothing shown, nothing completed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Id of the active scene.
    #[must_use]
    pub fn current_scene_id(&self) -> Option<&SceneId> {
        self.current_scene_id.as_ref()
    }

    /// Completed scene ids.
    #[must_use]
    pub fn completed(&self) -> &BTreeSet<SceneId> {
        &self.completed
    }

    /// Returns `true` once any scene has been shown.
    #[must_use]
    pub fn is_started(&self) -> bool {
        self.started
    }

    /// Returns `true` while a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Adds the current scene to the completion set.
    ///
    /// Returns `true` if the set grew.
    pub fn mark_current_complete(&mut self) -> bool {
        match &self.current_scene_id {
            Some(id) => self.completed.insert(id.clone()),
            None => false,
        }
    }

    /// Empties the completion set.
    pub fn reset_progress(&mut self) {
        self.completed.clear();
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameState")
            .field("current_scene_id", &self.current_scene_id)
            .field("completed", &self.completed)
            .field("started", &self.started)
            .field("transitioning", &self.transitioning)
            .finish_non_exhaustive()
    }
}
