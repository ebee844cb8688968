//! Epoch-based cooperative cancellation.
//!
//! Every delayed continuation (a typewriter tick, a pause between reveal
//! stages) snapshots the current [`Epoch`] when it is scheduled and compares
//! it again right before producing a visible effect. Bumping the source
//! invalidates every outstanding snapshot at once.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Version stamp captured by scheduled work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Epoch(pub u64);

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Issues monotonically increasing epochs.
///
/// Clones share one counter. The stage's event loop is the only writer;
/// sessions only read.
#[derive(Debug, Clone, Default)]
pub struct CancellationSource {
    counter: Arc<AtomicU64>,
}

impl CancellationSource {
    /// Creates a source starting at epoch 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the counter and returns the new epoch.
    pub fn bump(&self) -> Epoch {
        Epoch(self.counter.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// Reads the current epoch without mutating it.
    #[must_use]
    pub fn current(&self) -> Epoch {
        Epoch(self.counter.load(Ordering::Acquire))
    }

    /// Returns `true` if `epoch` is still the current one.
    #[must_use]
    pub fn is_current(&self, epoch: Epoch) -> bool {
        self.current() == epoch
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_source_starts_at_zero() {
        let source = CancellationSource::new();

        assert_eq!(source.current(), Epoch(0));
    }

    #[test]
    fn test_bump_returns_incremented_epoch() {
        // Arrange
        let source = CancellationSource::new();

        // Act
        let first = source.bump();
        let second = source.bump();

        // Assert
        assert_eq!(first, Epoch(1));
        assert_eq!(second, Epoch(2));
        assert_eq!(source.current(), Epoch(2));
    }

    #[test]
    fn test_clones_share_the_counter() {
        // Arrange
        let source = CancellationSource::new();
        let reader = source.clone();
        let captured = reader.current();

        // Act
        source.bump();

        // Assert
        assert!(!reader.is_current(captured));
        assert_eq!(reader.current(), Epoch(1));
    }
}
