//! Catalog assembly.

pub mod catalog;
