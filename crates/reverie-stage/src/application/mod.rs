//! The stage event loop and its read model.

pub mod snapshot;
pub mod stage;
