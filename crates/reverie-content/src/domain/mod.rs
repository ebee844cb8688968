//! Script model and scene kinds.

pub mod scenes;
pub mod script;
