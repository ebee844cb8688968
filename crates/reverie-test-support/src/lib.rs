//! Shared test doubles and utilities for the Reverie scene engine.

mod clock;
mod effects;
mod sink;
mod viewport;

pub use clock::FixedClock;
pub use effects::{RecordingAudio, RecordingBursts, RecordingHaptics};
pub use sink::RecordingSink;
pub use viewport::FixedViewport;
