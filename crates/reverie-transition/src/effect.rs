//! Transition runs.
//!
//! A run moves through `Idle → Priming → Animating → Completing → Idle`.
//! [`Transitioner::prime`] builds the geometry, [`Transitioner::animate`]
//! resolves at the covering instant, and [`Transitioner::uncover`] releases
//! the occlusion one frame later. [`Transitioner::run`] chains the three
//! around a callback.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use reverie_core::clock::Clock;
use reverie_core::error::StageError;
use reverie_core::viewport::ViewportProvider;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::geometry::{IrisParams, OcclusionPlan, TileGrid};
use crate::kind::TransitionKind;
use crate::surface::OcclusionSurface;

/// Future returned by [`Transitioner::animate`].
pub type CoverFuture = Pin<Box<dyn Future<Output = TransitionRun> + Send>>;

/// Durations of the transition variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionConfig {
    /// Per-cell animation time of the tiles wipe.
    pub tiles: Duration,
    /// Closing time of the iris wipe.
    pub iris: Duration,
    /// Length of one render frame.
    pub frame: Duration,
}

impl Default for TransitionConfig {
    fn default() -> Self {
        Self {
            tiles: Duration::from_millis(1400),
            iris: Duration::from_millis(1600),
            frame: Duration::from_millis(16),
        }
    }
}

/// Lifecycle phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionPhase {
    /// No run in progress.
    Idle,
    /// Geometry built, surface not yet active.
    Priming,
    /// Covering animation running.
    Animating,
    /// Viewport covered; the caller swaps content now.
    Completing,
}

/// State of one transition.
#[derive(Debug, Clone, Serialize)]
pub struct TransitionRun {
    /// Run identifier for log correlation.
    pub id: Uuid,
    /// Effective kind (may be `None` after degrading).
    pub kind: TransitionKind,
    /// Nominal animation duration.
    pub duration: Duration,
    /// Time from activation to the covering instant.
    pub occlusion: Duration,
    /// Grid layout (tiles only).
    pub grid: Option<TileGrid>,
    /// When priming started.
    pub started_at: DateTime<Utc>,
    /// Current phase.
    pub phase: TransitionPhase,
}

/// Runs transitions against one occlusion surface.
#[derive(Clone)]
pub struct Transitioner {
    config: TransitionConfig,
    viewport: Arc<dyn ViewportProvider>,
    surface: Option<Arc<dyn OcclusionSurface>>,
    clock: Arc<dyn Clock>,
}

impl Transitioner {
    /// Creates a transitioner. A `surface` of `None` degrades every run to
    /// [`TransitionKind::None`].
    #[must_use]
    pub fn new(
        config: TransitionConfig,
        viewport: Arc<dyn ViewportProvider>,
        surface: Option<Arc<dyn OcclusionSurface>>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            config,
            viewport,
            surface,
            clock,
        }
    }

    /// The configured durations.
    #[must_use]
    pub fn config(&self) -> TransitionConfig {
        self.config
    }

    /// Checks that an occlusion surface is attached.
    ///
    /// # Errors
    ///
    /// Returns `StageError::SurfaceUnavailable` when there is none.
    pub fn occlusion_surface(&self) -> Result<&Arc<dyn OcclusionSurface>, StageError> {
        self.surface
            .as_ref()
            .ok_or(StageError::SurfaceUnavailable("occlusion"))
    }

    /// Builds the geometry for `requested` and hands it to the surface.
    #[must_use]
    pub fn prime(&self, requested: TransitionKind) -> TransitionRun {
        let kind = match (self.occlusion_surface(), requested) {
            (Err(err), TransitionKind::Tiles | TransitionKind::Iris) => {
                warn!(error = %err, requested = %requested, "skipping transition");
                TransitionKind::None
            }
            _ => requested,
        };
        let viewport = self.viewport.viewport();

        let mut run = TransitionRun {
            id: Uuid::new_v4(),
            kind,
            duration: Duration::ZERO,
            occlusion: Duration::ZERO,
            grid: None,
            started_at: self.clock.now(),
            phase: TransitionPhase::Priming,
        };

        let plan = match kind {
            TransitionKind::Tiles => {
                let grid = TileGrid::for_viewport(viewport);
                let duration = self.config.tiles;
                run.duration = duration;
                run.occlusion = grid.occlusion_time(duration);
                run.grid = Some(grid);
                Some(OcclusionPlan::Tiles {
                    grid,
                    cells: grid.cells(duration),
                    duration,
                })
            }
            TransitionKind::Iris => {
                run.duration = self.config.iris;
                run.occlusion = self.config.iris;
                Some(OcclusionPlan::Iris(IrisParams::new(self.config.iris, viewport)))
            }
            TransitionKind::None => {
                run.phase = TransitionPhase::Completing;
                None
            }
        };

        if let (Some(plan), Some(surface)) = (plan, &self.surface) {
            surface.prime(&plan);
        }
        debug!(run_id = %run.id, kind = %run.kind, occlusion = ?run.occlusion, "transition primed");
        run
    }

    /// Activates the surface and resolves at the covering instant.
    ///
    /// A `None` run resolves without waiting.
    #[must_use]
    pub fn animate(&self, mut run: TransitionRun) -> CoverFuture {
        let surface = self.surface.clone();
        let frame = self.config.frame;
        Box::pin(async move {
            if let Some(surface) = surface.filter(|_| run.kind != TransitionKind::None) {
                surface.deactivate();
                surface.flush_layout();
                tokio::time::sleep(frame).await;
                surface.activate();
                run.phase = TransitionPhase::Animating;
                tokio::time::sleep(run.occlusion).await;
            }
            run.phase = TransitionPhase::Completing;
            run
        })
    }

    /// Releases the occlusion on the next frame and returns the run to
    /// `Idle`.
    pub fn uncover(&self, run: &mut TransitionRun) {
        if let Some(surface) = self
            .surface
            .clone()
            .filter(|_| run.kind != TransitionKind::None)
        {
            let frame = self.config.frame;
            tokio::spawn(async move {
                tokio::time::sleep(frame).await;
                surface.release();
            });
        }
        run.phase = TransitionPhase::Idle;
    }

    /// Runs a whole transition, invoking `on_cover` at the covering
    /// instant.
    pub async fn run<F>(&self, requested: TransitionKind, on_cover: F) -> TransitionRun
    where
        F: FnOnce(),
    {
        let run = self.prime(requested);
        let mut run = self.animate(run).await;
        on_cover();
        self.uncover(&mut run);
        run
    }
}

impl std::fmt::Debug for Transitioner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transitioner")
            .field("config", &self.config)
            .field("has_surface", &self.surface.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use reverie_core::viewport::Viewport;
    use reverie_test_support::{FixedClock, FixedViewport};
    use tokio::time::Instant;

    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum OcclusionCall {
        PrimeTiles(usize),
        PrimeIris,
        Deactivate,
        FlushLayout,
        Activate,
        Release,
    }

    #[derive(Default)]
    struct RecordingOcclusion {
        calls: Mutex<Vec<(OcclusionCall, Instant)>>,
    }

    impl RecordingOcclusion {
        fn record(&self, call: OcclusionCall) {
            self.calls.lock().unwrap().push((call, Instant::now()));
        }

        fn calls(&self) -> Vec<(OcclusionCall, Instant)> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl OcclusionSurface for RecordingOcclusion {
        fn prime(&self, plan: &OcclusionPlan) {
            self.record(match plan {
                OcclusionPlan::Tiles { cells, .. } => OcclusionCall::PrimeTiles(cells.len()),
                OcclusionPlan::Iris(_) => OcclusionCall::PrimeIris,
            });
        }

        fn deactivate(&self) {
            self.record(OcclusionCall::Deactivate);
        }

        fn flush_layout(&self) {
            self.record(OcclusionCall::FlushLayout);
        }

        fn activate(&self) {
            self.record(OcclusionCall::Activate);
        }

        fn release(&self) {
            self.record(OcclusionCall::Release);
        }
    }

    fn transitioner(surface: Option<Arc<RecordingOcclusion>>) -> Transitioner {
        let clock = FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap());
        Transitioner::new(
            TransitionConfig::default(),
            Arc::new(FixedViewport(Some(Viewport::new(1120, 800)))),
            surface.map(|s| s as Arc<dyn OcclusionSurface>),
            Arc::new(clock),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_tiles_callback_fires_after_full_occlusion() {
        // Arrange
        let surface = Arc::new(RecordingOcclusion::default());
        let transitioner = transitioner(Some(surface.clone()));
        let start = Instant::now();
        let mut fired_at = None;

        // Act
        let run = transitioner
            .run(TransitionKind::Tiles, || fired_at = Some(Instant::now()))
            .await;

        // Assert
        let elapsed = fired_at.unwrap() - start;
        assert!(elapsed >= Duration::from_millis(1620));
        assert_eq!(run.occlusion, Duration::from_millis(1620));
        assert_eq!(run.grid, Some(TileGrid::new(14, 10)));
        assert_eq!(run.phase, TransitionPhase::Idle);
        assert_eq!(surface.calls()[0].0, OcclusionCall::PrimeTiles(140));
    }

    #[tokio::test(start_paused = true)]
    async fn test_surface_calls_follow_activation_protocol() {
        // Arrange
        let surface = Arc::new(RecordingOcclusion::default());
        let transitioner = transitioner(Some(surface.clone()));

        // Act
        transitioner.run(TransitionKind::Iris, || {}).await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Assert
        let calls: Vec<OcclusionCall> = surface.calls().into_iter().map(|(c, _)| c).collect();
        assert_eq!(
            calls,
            vec![
                OcclusionCall::PrimeIris,
                OcclusionCall::Deactivate,
                OcclusionCall::FlushLayout,
                OcclusionCall::Activate,
                OcclusionCall::Release,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_release_happens_one_frame_after_cover() {
        // Arrange
        let surface = Arc::new(RecordingOcclusion::default());
        let transitioner = transitioner(Some(surface.clone()));
        let mut covered_at = None;

        // Act
        transitioner
            .run(TransitionKind::Iris, || covered_at = Some(Instant::now()))
            .await;
        tokio::time::sleep(Duration::from_millis(50)).await;

        // Assert
        let (_, released_at) = surface
            .calls()
            .into_iter()
            .find(|(c, _)| *c == OcclusionCall::Release)
            .unwrap();
        assert_eq!(released_at - covered_at.unwrap(), Duration::from_millis(16));
    }

    #[tokio::test(start_paused = true)]
    async fn test_iris_waits_exactly_its_duration_after_activation() {
        // Arrange
        let surface = Arc::new(RecordingOcclusion::default());
        let transitioner = transitioner(Some(surface.clone()));
        let mut covered_at = None;

        // Act
        transitioner
            .run(TransitionKind::Iris, || covered_at = Some(Instant::now()))
            .await;

        // Assert
        let (_, activated_at) = surface
            .calls()
            .into_iter()
            .find(|(c, _)| *c == OcclusionCall::Activate)
            .unwrap();
        assert_eq!(covered_at.unwrap() - activated_at, Duration::from_millis(1600));
    }

    #[tokio::test(start_paused = true)]
    async fn test_none_invokes_callback_immediately() {
        // Arrange
        let surface = Arc::new(RecordingOcclusion::default());
        let transitioner = transitioner(Some(surface.clone()));
        let start = Instant::now();
        let fired = AtomicBool::new(false);

        // Act
        transitioner
            .run(TransitionKind::None, || fired.store(true, Ordering::SeqCst))
            .await;

        // Assert
        assert!(fired.load(Ordering::SeqCst));
        assert_eq!(Instant::now() - start, Duration::ZERO);
        assert!(surface.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_surface_degrades_to_none() {
        // Arrange
        let transitioner = transitioner(None);
        let start = Instant::now();

        // Act
        let run = transitioner.run(TransitionKind::Tiles, || {}).await;

        // Assert
        assert_eq!(run.kind, TransitionKind::None);
        assert_eq!(Instant::now() - start, Duration::ZERO);
    }

    #[test]
    fn test_missing_surface_is_reported_as_unavailable() {
        let bare = transitioner(None);
        let wired = transitioner(Some(Arc::new(RecordingOcclusion::default())));

        let err = bare.occlusion_surface().err().expect("expected missing surface error");

        assert!(matches!(err, StageError::SurfaceUnavailable("occlusion")));
        assert_eq!(err.to_string(), "surface unavailable: occlusion");
        assert!(wired.occlusion_surface().is_ok());
    }

    #[test]
    fn test_prime_stamps_start_time_from_clock() {
        let transitioner = transitioner(None);

        let run = transitioner.prime(TransitionKind::None);

        assert_eq!(
            run.started_at,
            Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
        );
        assert_eq!(run.phase, TransitionPhase::Completing);
    }
}
