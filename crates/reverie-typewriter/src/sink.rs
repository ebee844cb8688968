//! In-memory text sink.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub use reverie_core::text::TextSink;
use reverie_core::text::{TapHandler, is_same_handler};

#[derive(Default)]
struct BufferState {
    text: String,
    tap: Option<Arc<dyn TapHandler>>,
}

/// Text sink shared between the scene that owns it and the render tree
/// that displays it.
#[derive(Clone, Default)]
pub struct TextBuffer {
    inner: Arc<Mutex<BufferState>>,
}

impl TextBuffer {
    /// Creates an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a buffer that already holds `text`.
    #[must_use]
    pub fn with_text(text: impl Into<String>) -> Self {
        let buffer = Self::new();
        buffer.lock().text = text.into();
        buffer
    }

    fn lock(&self) -> MutexGuard<'_, BufferState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the current content.
    #[must_use]
    pub fn text(&self) -> String {
        self.lock().text.clone()
    }

    /// Returns `true` while a reveal session is typing into this buffer.
    #[must_use]
    pub fn is_typing(&self) -> bool {
        self.lock().tap.is_some()
    }

    /// Pointer/touch on the buffer: skips the attached session, if any.
    ///
    /// Returns `true` if a session was skipped to completion.
    pub fn tap(&self) -> bool {
        // Release the buffer before the handler writes back into it.
        let handler = self.lock().tap.clone();
        handler.is_some_and(|h| h.tap())
    }
}

impl TextSink for TextBuffer {
    fn clear(&self) {
        self.lock().text.clear();
    }

    fn append(&self, unit: &str) {
        self.lock().text.push_str(unit);
    }

    fn set_text(&self, text: &str) {
        let mut state = self.lock();
        state.text.clear();
        state.text.push_str(text);
    }

    fn attach_tap(&self, handler: Arc<dyn TapHandler>) {
        self.lock().tap = Some(handler);
    }

    fn detach_tap(&self, handler: &dyn TapHandler) {
        let mut state = self.lock();
        if state
            .tap
            .as_ref()
            .is_some_and(|attached| is_same_handler(attached, handler))
        {
            state.tap = None;
        }
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("TextBuffer")
            .field("text", &state.text)
            .field("typing", &state.tap.is_some())
            .finish()
    }
}
