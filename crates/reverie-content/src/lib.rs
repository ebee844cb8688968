//! Reverie — scripted content.
//!
//! Parses a YAML script into scene specifications and turns them into a
//! [`reverie_stage::SceneCatalog`] of title cards, choice lists, letters and
//! a finale.

pub mod application;
pub mod domain;

pub use application::catalog::build_catalog;
pub use domain::script::{Script, ScriptError};
