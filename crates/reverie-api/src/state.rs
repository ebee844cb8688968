//! Shared application state.

use std::sync::Arc;

use reverie_core::effects::Effects;
use reverie_core::viewport::{StaticViewport, Viewport};
use reverie_stage::{
    MemorySurface, SceneCatalog, Stage, StageConfig, StageHandle, StageSnapshot, StageSurface,
};
use reverie_transition::EffectHint;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::occlusion::TracingOcclusion;

/// Application state shared across all request handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Command queue of the running stage.
    pub stage: StageHandle,
    /// Latest published stage snapshot.
    pub snapshot: watch::Receiver<StageSnapshot>,
    /// Render container the stage mounts into.
    pub surface: Arc<MemorySurface>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        stage: StageHandle,
        snapshot: watch::Receiver<StageSnapshot>,
        surface: Arc<MemorySurface>,
    ) -> Self {
        Self {
            stage,
            snapshot,
            surface,
        }
    }

    /// Builds a stage over `catalog`, spawns its event loop and queues the
    /// first scene.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn launch(catalog: SceneCatalog, config: StageConfig, viewport: Viewport) -> Self {
        let first = catalog.first().cloned();
        let surface = Arc::new(MemorySurface::new());
        let stage = Stage::builder(catalog)
            .config(config)
            .effects(Effects::silent())
            .viewport(Arc::new(StaticViewport(viewport)))
            .occlusion(Arc::new(TracingOcclusion))
            .surface(Arc::clone(&surface) as Arc<dyn StageSurface>)
            .build();
        let handle = stage.handle();
        let snapshot = stage.subscribe();
        tokio::spawn(stage.run());

        match first {
            Some(first) => {
                info!(scene = %first, "queueing first scene");
                if let Err(err) = handle.request_scene(first, EffectHint::Auto) {
                    warn!(error = %err, "could not queue first scene");
                }
            }
            None => warn!("catalog is empty, nothing to show"),
        }
        Self::new(handle, snapshot, surface)
    }
}
