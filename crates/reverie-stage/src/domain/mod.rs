//! Scene contract, render tree and stage state.

pub mod catalog;
pub mod commands;
pub mod render;
pub mod scene;
pub mod score;
pub mod state;
pub mod surface;
