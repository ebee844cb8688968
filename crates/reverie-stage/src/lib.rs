//! Reverie — scene orchestration.
//!
//! Owns which scene is active, runs the transition between scenes, tracks
//! completion and scoring, and hands scenes a [`StageHandle`] to drive
//! navigation.

pub mod application;
pub mod domain;

pub use application::snapshot::StageSnapshot;
pub use application::stage::{Rejection, RequestOutcome, Stage, StageBuilder, StageConfig};
pub use domain::catalog::SceneCatalog;
pub use domain::commands::{StageCommand, StageHandle};
pub use domain::render::{RenderNode, RenderView, TextRole};
pub use domain::scene::{Scene, SceneContext};
pub use domain::score::{Grade, Scorecard};
pub use domain::state::GameState;
pub use domain::surface::{MemorySurface, ProgressBadge, StageSurface, SurfaceView};
