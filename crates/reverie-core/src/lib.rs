//! Reverie Core — shared abstractions.
//!
//! This crate defines the identifiers, the cancellation primitive and the
//! collaborator traits that the typewriter, transition and stage crates
//! depend on. It contains no scheduling or rendering code.

pub mod cancel;
pub mod clock;
pub mod effects;
pub mod error;
pub mod scene_id;
pub mod text;
pub mod viewport;
