//! Read model published by the stage after every state change.

use reverie_core::cancel::Epoch;
use reverie_core::scene_id::SceneId;
use serde::Serialize;

use crate::domain::score::Scorecard;
use crate::domain::surface::ProgressBadge;

/// Serializable state of the stage at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageSnapshot {
    /// Active scene.
    pub current_scene: Option<SceneId>,
    /// Whether any scene has been shown.
    pub started: bool,
    /// Whether a transition is in flight.
    pub transitioning: bool,
    /// Current cancellation epoch.
    pub epoch: Epoch,
    /// Completed scenes, sorted.
    pub completed: Vec<SceneId>,
    /// Completion badge.
    pub badge: ProgressBadge,
    /// Stars and grade.
    pub scorecard: Scorecard,
    /// Catalog order.
    pub order: Vec<SceneId>,
}
