//! Step-to-step delays for text reveal.

use std::time::Duration;

use unicode_segmentation::UnicodeSegmentation;

/// Splits text into the units a reveal appends one at a time.
///
/// Units are extended grapheme clusters, so emoji sequences and combining
/// marks are revealed whole.
#[must_use]
pub fn units(text: &str) -> Vec<&str> {
    text.graphemes(true).collect()
}

/// Additive pauses keyed by the trailing character of the unit just
/// appended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingTable {
    /// After `.`, `!` or `?`.
    pub sentence_end: Duration,
    /// After `,`.
    pub comma: Duration,
    /// After `—`.
    pub em_dash: Duration,
    /// After `…` or a `.` that completes three consecutive dots.
    pub ellipsis: Duration,
}

impl Default for PacingTable {
    fn default() -> Self {
        Self {
            sentence_end: Duration::from_millis(260),
            comma: Duration::from_millis(140),
            em_dash: Duration::from_millis(180),
            ellipsis: Duration::from_millis(300),
        }
    }
}

impl PacingTable {
    /// Bonus delay after `units[index]`.
    #[must_use]
    pub fn bonus(&self, units: &[&str], index: usize) -> Duration {
        let trailing = |i: usize| units.get(i).and_then(|u| u.chars().last());
        match trailing(index) {
            Some('…') => self.ellipsis,
            Some('.')
                if index >= 2
                    && trailing(index - 1) == Some('.')
                    && trailing(index - 2) == Some('.') =>
            {
                self.ellipsis
            }
            Some('.' | '!' | '?') => self.sentence_end,
            Some(',') => self.comma,
            Some('—') => self.em_dash,
            _ => Duration::ZERO,
        }
    }
}

/// How a session spaces its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pacing {
    /// Base delay plus punctuation bonuses.
    Punctuated {
        /// Delay applied after every unit.
        base: Duration,
        /// Bonus table.
        table: PacingTable,
    },
    /// Constant delay after every unit.
    Fixed(Duration),
}

impl Pacing {
    /// Punctuation-aware pacing with the default bonus table.
    #[must_use]
    pub fn punctuated(base: Duration) -> Self {
        Self::Punctuated {
            base,
            table: PacingTable::default(),
        }
    }

    /// Delay that follows `units[index]`.
    #[must_use]
    pub fn delay_after(&self, units: &[&str], index: usize) -> Duration {
        match self {
            Self::Punctuated { base, table } => *base + table.bonus(units, index),
            Self::Fixed(speed) => *speed,
        }
    }
}

/// One delay per unit of `text`: the pause that follows that unit under
/// punctuation-aware pacing with the default table.
#[must_use]
pub fn step_delays(text: &str, base: Duration) -> Vec<Duration> {
    let units = units(text);
    let pacing = Pacing::punctuated(base);
    (0..units.len())
        .map(|i| pacing.delay_after(&units, i))
        .collect()
}
