//! Reverie — typewriter engine.
//!
//! Reveals text into a [`sink::TextSink`] one grapheme at a time with
//! punctuation-aware pacing. Sessions can be skipped to completion by a tap
//! on their sink and are cancelled silently when the cancellation epoch they
//! captured goes stale.

pub mod composite;
pub mod pacing;
pub mod session;
pub mod sink;

pub use composite::{Line, SequenceItem};
pub use pacing::{Pacing, PacingTable};
pub use session::{RevealOutcome, RevealSession, RevealTask, SkipHandle, Typewriter};
pub use sink::{TextBuffer, TextSink};
