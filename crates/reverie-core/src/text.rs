//! Text display collaborators.

use std::sync::Arc;

/// Something a pointer or touch on a text surface can trigger.
pub trait TapHandler: Send + Sync {
    /// Handles one tap. Returns `true` if it had an effect.
    fn tap(&self) -> bool;
}

/// A writable text surface.
///
/// A reveal session attaches itself as the surface's tap handler when it
/// starts and detaches when it terminates, mirroring a click listener that
/// lives exactly as long as the typing.
pub trait TextSink: Send + Sync {
    /// Empties the surface.
    fn clear(&self);

    /// Appends one revealed unit.
    fn append(&self, unit: &str);

    /// Replaces the whole content.
    fn set_text(&self, text: &str);

    /// Registers the tap handler of a starting session.
    fn attach_tap(&self, _handler: Arc<dyn TapHandler>) {}

    /// Removes `handler` if it is still the attached one.
    fn detach_tap(&self, _handler: &dyn TapHandler) {}
}

/// `true` if `attached` is the same object as `handler`.
#[must_use]
pub fn is_same_handler(attached: &Arc<dyn TapHandler>, handler: &dyn TapHandler) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(attached), std::ptr::from_ref(handler))
}
