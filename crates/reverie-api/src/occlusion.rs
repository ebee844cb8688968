//! Occlusion surface for a headless server.

use reverie_transition::{OcclusionPlan, OcclusionSurface};
use tracing::debug;

/// Occlusion layer with nothing to paint; reports each step at debug level.
///
/// Attaching it keeps transition timing intact, so `transitioning` in the
/// snapshot reflects the real animation window.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingOcclusion;

impl OcclusionSurface for TracingOcclusion {
    fn prime(&self, plan: &OcclusionPlan) {
        match plan {
            OcclusionPlan::Tiles { grid, cells, .. } => {
                debug!(
                    columns = grid.columns,
                    rows = grid.rows,
                    cells = cells.len(),
                    "occlusion primed: tiles"
                );
            }
            OcclusionPlan::Iris(_) => debug!("occlusion primed: iris"),
        }
    }

    fn deactivate(&self) {
        debug!("occlusion deactivated");
    }

    fn flush_layout(&self) {
        debug!("occlusion layout flushed");
    }

    fn activate(&self) {
        debug!("occlusion activated");
    }

    fn release(&self) {
        debug!("occlusion released");
    }
}
