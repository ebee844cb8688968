//! Multi-stage reveals built from single sessions.
//!
//! Every stage of a composite is bound to the epoch captured when the
//! composite started, so one bump stops the whole chain, including the
//! pauses between stages.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use reverie_core::cancel::Epoch;

use crate::pacing::Pacing;
use crate::session::{RevealOutcome, Typewriter};
use crate::sink::TextSink;

/// Title reveal speed.
pub const TITLE_SPEED: Duration = Duration::from_millis(58);
/// Subtitle and body reveal speed.
pub const BODY_SPEED: Duration = Duration::from_millis(46);
/// Pause between a title and its subtitle.
pub const INTRO_PAUSE: Duration = Duration::from_millis(650);
/// Pause between a title and its subtitle under reduced motion.
pub const INTRO_PAUSE_REDUCED: Duration = Duration::from_millis(120);
/// Option badge reveal speed.
pub const LABEL_SPEED: Duration = Duration::from_millis(40);
/// Gap between an option badge and its text.
pub const AFTER_LABEL_GAP: Duration = Duration::from_millis(120);
/// Gap between consecutive options.
pub const ITEM_GAP: Duration = Duration::from_millis(160);

/// One text target of a composite reveal.
#[derive(Clone)]
pub struct Line {
    /// Where the text is written.
    pub sink: Arc<dyn TextSink>,
    /// Full text to reveal.
    pub text: String,
    /// Step pacing.
    pub pacing: Pacing,
}

impl Line {
    /// A punctuation-paced line.
    #[must_use]
    pub fn paced(sink: Arc<dyn TextSink>, text: impl Into<String>, base: Duration) -> Self {
        Self {
            sink,
            text: text.into(),
            pacing: Pacing::punctuated(base),
        }
    }

    /// A constant-speed line.
    #[must_use]
    pub fn fixed(sink: Arc<dyn TextSink>, text: impl Into<String>, speed: Duration) -> Self {
        Self {
            sink,
            text: text.into(),
            pacing: Pacing::Fixed(speed),
        }
    }
}

impl std::fmt::Debug for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Line")
            .field("text", &self.text)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

/// An entry of a [`Typewriter::reveal_sequence`].
#[derive(Debug, Clone)]
pub enum SequenceItem {
    /// A single line.
    Single(Line),
    /// A short label, a gap, then a longer body ("A) — " then the option).
    Labeled {
        /// Revealed first.
        label: Line,
        /// Pause between label and body.
        gap: Duration,
        /// Revealed second.
        body: Line,
    },
}

impl Typewriter {
    async fn reveal_line(&self, line: Line, epoch: Epoch) -> RevealOutcome {
        let pacing = match line.pacing {
            Pacing::Punctuated { base, .. } => Pacing::Punctuated {
                base,
                table: self.pacing_table(),
            },
            fixed @ Pacing::Fixed(_) => fixed,
        };
        self.session(line.sink, &line.text, pacing, epoch).await
    }

    /// Reveals a title, pauses, then reveals the subtitle.
    ///
    /// The epoch is read when this is called, not when the returned future
    /// is first polled. Resolves after both stages completed (naturally or by
    /// skip), or with [`RevealOutcome::Cancelled`] as soon as any stage is
    /// cancelled.
    pub fn type_title_then_subtitle(
        &self,
        title: Line,
        subtitle: Line,
        pause: Duration,
    ) -> impl Future<Output = RevealOutcome> + '_ {
        let epoch = self.cancellation().current();
        self.type_title_then_subtitle_at(title, subtitle, pause, epoch)
    }

    /// [`type_title_then_subtitle`](Self::type_title_then_subtitle) bound to
    /// `epoch`.
    pub async fn type_title_then_subtitle_at(
        &self,
        title: Line,
        subtitle: Line,
        pause: Duration,
        epoch: Epoch,
    ) -> RevealOutcome {
        if self.reveal_line(title, epoch).await == RevealOutcome::Cancelled {
            return RevealOutcome::Cancelled;
        }
        if !self.pause_at(epoch, pause).await {
            return RevealOutcome::Cancelled;
        }
        match self.reveal_line(subtitle, epoch).await {
            RevealOutcome::Cancelled => RevealOutcome::Cancelled,
            _ => RevealOutcome::Completed,
        }
    }

    /// Reveals `items` in order, waiting `gap` between consecutive items.
    ///
    /// Bound to the epoch current at the call. Stops at the first
    /// cancellation.
    pub fn reveal_sequence(
        &self,
        items: Vec<SequenceItem>,
        gap: Duration,
    ) -> impl Future<Output = RevealOutcome> + '_ {
        let epoch = self.cancellation().current();
        self.reveal_sequence_at(items, gap, epoch)
    }

    /// [`reveal_sequence`](Self::reveal_sequence) bound to `epoch`.
    pub async fn reveal_sequence_at(
        &self,
        items: Vec<SequenceItem>,
        gap: Duration,
        epoch: Epoch,
    ) -> RevealOutcome {
        let count = items.len();
        for (index, item) in items.into_iter().enumerate() {
            let outcome = match item {
                SequenceItem::Single(line) => self.reveal_line(line, epoch).await,
                SequenceItem::Labeled {
                    label,
                    gap: inner,
                    body,
                } => {
                    if self.reveal_line(label, epoch).await == RevealOutcome::Cancelled
                        || !self.pause_at(epoch, inner).await
                    {
                        RevealOutcome::Cancelled
                    } else {
                        self.reveal_line(body, epoch).await
                    }
                }
            };
            if outcome == RevealOutcome::Cancelled {
                return RevealOutcome::Cancelled;
            }
            if index + 1 < count && !self.pause_at(epoch, gap).await {
                return RevealOutcome::Cancelled;
            }
        }
        RevealOutcome::Completed
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use reverie_core::cancel::CancellationSource;
    use reverie_test_support::{RecordingAudio, RecordingSink};

    use super::*;
    use crate::sink::TextBuffer;

    fn typewriter() -> Typewriter {
        Typewriter::new(
            CancellationSource::new(),
            Arc::new(RecordingAudio::default()),
        )
    }

    #[tokio::test(start_paused = true)]
    async fn test_title_then_subtitle_waits_for_pause() {
        // Arrange
        let typewriter = typewriter();
        let title = Arc::new(RecordingSink::new());
        let subtitle = Arc::new(RecordingSink::new());
        let start = tokio::time::Instant::now();

        // Act
        let outcome = typewriter
            .type_title_then_subtitle(
                Line::paced(title.clone(), "Hey", Duration::from_millis(10)),
                Line::paced(subtitle.clone(), "you", Duration::from_millis(10)),
                Duration::from_millis(650),
            )
            .await;

        // Assert
        assert_eq!(outcome, RevealOutcome::Completed);
        assert_eq!(title.text(), "Hey");
        assert_eq!(subtitle.text(), "you");
        // Title's last unit lands at 20ms; subtitle starts 650ms later.
        let first_subtitle_unit = subtitle.first_append_at().unwrap();
        assert_eq!(first_subtitle_unit - start, Duration::from_millis(670));
    }

    #[tokio::test(start_paused = true)]
    async fn test_title_then_subtitle_cancelled_during_pause() {
        // Arrange
        let typewriter = typewriter();
        let cancel = typewriter.cancellation().clone();
        let title = Arc::new(TextBuffer::new());
        let subtitle = Arc::new(TextBuffer::new());
        let bumper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(200)).await;
            cancel.bump();
        });

        // Act
        let outcome = typewriter
            .type_title_then_subtitle(
                Line::paced(title.clone(), "Hey", Duration::from_millis(10)),
                Line::paced(subtitle.clone(), "you", Duration::from_millis(10)),
                Duration::from_millis(650),
            )
            .await;
        bumper.await.unwrap();

        // Assert
        assert_eq!(outcome, RevealOutcome::Cancelled);
        assert_eq!(title.text(), "Hey");
        assert_eq!(subtitle.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_title_then_subtitle_keeps_epoch_from_creation() {
        // Arrange
        let typewriter = typewriter();
        let title = Arc::new(TextBuffer::new());
        let subtitle = Arc::new(TextBuffer::new());
        let reveal = typewriter.type_title_then_subtitle(
            Line::paced(title.clone(), "Old", Duration::from_millis(10)),
            Line::paced(subtitle.clone(), "scene", Duration::from_millis(10)),
            Duration::from_millis(10),
        );

        // Act
        typewriter.cancellation().bump();
        let outcome = reveal.await;

        // Assert
        assert_eq!(outcome, RevealOutcome::Cancelled);
        assert_eq!(title.text(), "");
        assert_eq!(subtitle.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_keeps_epoch_from_creation() {
        // Arrange
        let typewriter = typewriter();
        let line = Arc::new(TextBuffer::new());
        let reveal = typewriter.reveal_sequence(
            vec![SequenceItem::Single(Line::paced(
                line.clone(),
                "stale",
                Duration::from_millis(10),
            ))],
            ITEM_GAP,
        );

        // Act
        typewriter.cancellation().bump();
        let outcome = reveal.await;

        // Assert
        assert_eq!(outcome, RevealOutcome::Cancelled);
        assert_eq!(line.text(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_skipped_title_still_reveals_subtitle() {
        // Arrange
        let typewriter = typewriter();
        let title = Arc::new(TextBuffer::new());
        let subtitle = Arc::new(TextBuffer::new());
        let tapper = {
            let title = title.clone();
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(5)).await;
                title.tap()
            })
        };

        // Act
        let outcome = typewriter
            .type_title_then_subtitle(
                Line::paced(title.clone(), "A long title", Duration::from_millis(50)),
                Line::paced(subtitle.clone(), "sub", Duration::from_millis(10)),
                Duration::from_millis(100),
            )
            .await;

        // Assert
        assert!(tapper.await.unwrap());
        assert_eq!(outcome, RevealOutcome::Completed);
        assert_eq!(title.text(), "A long title");
        assert_eq!(subtitle.text(), "sub");
    }

    #[tokio::test(start_paused = true)]
    async fn test_labeled_items_reveal_label_before_body() {
        // Arrange
        let typewriter = typewriter();
        let label = Arc::new(RecordingSink::new());
        let body = Arc::new(RecordingSink::new());
        let second = Arc::new(RecordingSink::new());
        let items = vec![
            SequenceItem::Labeled {
                label: Line::fixed(label.clone(), "A", LABEL_SPEED),
                gap: AFTER_LABEL_GAP,
                body: Line::paced(body.clone(), "Cake", BODY_SPEED),
            },
            SequenceItem::Single(Line::paced(second.clone(), "B", BODY_SPEED)),
        ];
        let start = tokio::time::Instant::now();

        // Act
        let outcome = typewriter.reveal_sequence(items, ITEM_GAP).await;

        // Assert
        assert_eq!(outcome, RevealOutcome::Completed);
        assert_eq!(label.text(), "A");
        assert_eq!(body.text(), "Cake");
        assert_eq!(second.text(), "B");
        assert_eq!(body.first_append_at().unwrap() - start, AFTER_LABEL_GAP);
        // Body ends at 120 + 3 * 46 = 258ms, then the item gap.
        assert_eq!(
            second.first_append_at().unwrap() - start,
            Duration::from_millis(258) + ITEM_GAP
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_sequence_stops_at_cancellation() {
        // Arrange
        let typewriter = typewriter();
        let cancel = typewriter.cancellation().clone();
        let first = Arc::new(TextBuffer::new());
        let second = Arc::new(TextBuffer::new());
        let items = vec![
            SequenceItem::Single(Line::paced(first.clone(), "one", Duration::from_millis(10))),
            SequenceItem::Single(Line::paced(second.clone(), "two", Duration::from_millis(10))),
        ];
        let bumper = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            cancel.bump();
        });

        // Act
        let outcome = typewriter.reveal_sequence(items, ITEM_GAP).await;
        bumper.await.unwrap();

        // Assert
        assert_eq!(outcome, RevealOutcome::Cancelled);
        assert_eq!(first.text(), "one");
        assert_eq!(second.text(), "");
    }
}
