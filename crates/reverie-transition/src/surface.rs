//! The visual layer a transition drives.

use crate::geometry::OcclusionPlan;

/// Full-viewport occlusion layer.
///
/// Call order for one run: `prime`, `deactivate`, `flush_layout`, then one
/// frame later `activate`; after the covering instant, one frame later,
/// `release`. Deactivating and flushing before activation makes the
/// activation step itself instantaneous, so no blank frame shows.
pub trait OcclusionSurface: Send + Sync {
    /// Builds the cells or iris for the run.
    fn prime(&self, plan: &OcclusionPlan);

    /// Removes the active visual state without animating.
    fn deactivate(&self);

    /// Forces a synchronous layout pass.
    fn flush_layout(&self);

    /// Starts the covering animation.
    fn activate(&self);

    /// Starts uncovering the viewport.
    fn release(&self);
}
