//! Recording text sink — timestamps every write against tokio's clock.

use std::sync::Mutex;
use std::time::Duration;

use reverie_core::text::TextSink;
use tokio::time::Instant;

/// A sink that keeps its text and the virtual time of every append.
///
/// Intended for `#[tokio::test(start_paused = true)]` tests, where the
/// recorded instants are exact.
#[derive(Debug, Default)]
pub struct RecordingSink {
    text: Mutex<String>,
    appends: Mutex<Vec<Instant>>,
}

impl RecordingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current content.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn text(&self) -> String {
        self.text.lock().unwrap().clone()
    }

    /// When the first unit was appended.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn first_append_at(&self) -> Option<Instant> {
        self.appends.lock().unwrap().first().copied()
    }

    /// Time between consecutive appends.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn append_gaps(&self) -> Vec<Duration> {
        self.appends
            .lock()
            .unwrap()
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .collect()
    }

    /// [`append_gaps`](Self::append_gaps) in whole milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned or a gap overflows `u64`.
    pub fn append_gaps_ms(&self) -> Vec<u64> {
        self.append_gaps()
            .iter()
            .map(|gap| u64::try_from(gap.as_millis()).unwrap())
            .collect()
    }
}

impl TextSink for RecordingSink {
    fn clear(&self) {
        self.text.lock().unwrap().clear();
    }

    fn append(&self, unit: &str) {
        self.text.lock().unwrap().push_str(unit);
        self.appends.lock().unwrap().push(Instant::now());
    }

    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = text.to_owned();
    }
}
