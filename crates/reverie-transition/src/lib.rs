//! Reverie — transition effects.
//!
//! A transition covers the whole viewport, hands control to the caller at
//! the instant of maximum coverage (where the stage swaps scenes), then
//! releases the occlusion on the next frame.

pub mod effect;
pub mod geometry;
pub mod kind;
pub mod surface;

pub use effect::{CoverFuture, TransitionConfig, TransitionPhase, TransitionRun, Transitioner};
pub use geometry::{IrisParams, OcclusionPlan, TileCell, TileGrid};
pub use kind::{EffectHint, ParseKindError, TransitionKind};
pub use surface::OcclusionSurface;
