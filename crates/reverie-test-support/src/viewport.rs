//! Test viewport — a `ViewportProvider` with a settable answer.

use reverie_core::viewport::{Viewport, ViewportProvider};

/// A provider that reports the wrapped size, or no surface at all for
/// `FixedViewport(None)`.
#[derive(Debug, Clone, Copy)]
pub struct FixedViewport(pub Option<Viewport>);

impl ViewportProvider for FixedViewport {
    fn viewport(&self) -> Option<Viewport> {
        self.0
    }
}
