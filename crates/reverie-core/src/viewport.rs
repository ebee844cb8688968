//! Viewport size abstraction.
//!
//! Transition geometry depends on the size of the display surface. Reading
//! it through a trait keeps the grid math testable without a real display.

use serde::{Deserialize, Serialize};

/// Size of the display surface in CSS-like pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Viewport {
    /// Creates a viewport of the given size.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Parses a `WIDTHxHEIGHT` string such as `1120x800`.
    #[must_use]
    pub fn parse(spec: &str) -> Option<Self> {
        let (w, h) = spec.trim().split_once(['x', 'X'])?;
        Some(Self::new(w.trim().parse().ok()?, h.trim().parse().ok()?))
    }
}

/// Supplies the current viewport size.
pub trait ViewportProvider: Send + Sync {
    /// Returns the current size, or `None` when no surface is attached.
    fn viewport(&self) -> Option<Viewport>;
}

/// A provider that always reports the same size.
#[derive(Debug, Clone, Copy)]
pub struct StaticViewport(pub Viewport);

impl ViewportProvider for StaticViewport {
    fn viewport(&self) -> Option<Viewport> {
        Some(self.0)
    }
}
