//! Reveal sessions.
//!
//! A session appends one unit per step and ends in exactly one of three
//! ways: it reaches the end of its text, it is skipped, or its captured
//! epoch goes stale. The session future resolves once with the matching
//! [`RevealOutcome`].

use std::fmt;
use std::future::{Future, IntoFuture};
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use reverie_core::cancel::{CancellationSource, Epoch};
use reverie_core::effects::Audio;
use reverie_core::text::TapHandler;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::pacing::{self, Pacing, PacingTable};
use crate::sink::TextSink;

/// How a reveal session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealOutcome {
    /// Every unit was appended.
    Completed,
    /// A tap set the full text at once.
    Skipped,
    /// The captured epoch went stale; nothing further was written.
    Cancelled,
}

impl RevealOutcome {
    /// `true` for the two outcomes that count as completion.
    #[must_use]
    pub fn is_complete(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Active,
    Ended(RevealOutcome),
}

struct Shared {
    phase: Mutex<Phase>,
    wake: Notify,
    text: String,
    sink: Arc<dyn TextSink>,
    epoch: Epoch,
    cancel: CancellationSource,
}

impl Shared {
    fn phase(&self) -> MutexGuard<'_, Phase> {
        self.phase.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Moves an active session to `outcome` and detaches it from its sink.
    fn end(&self, mut phase: MutexGuard<'_, Phase>, outcome: RevealOutcome) -> RevealOutcome {
        *phase = Phase::Ended(outcome);
        drop(phase);
        self.sink.detach_tap(self);
        outcome
    }

    fn skip(&self) -> bool {
        let phase = self.phase();
        if *phase != Phase::Active {
            return false;
        }
        let outcome = if self.cancel.is_current(self.epoch) {
            self.sink.set_text(&self.text);
            self.end(phase, RevealOutcome::Skipped)
        } else {
            self.end(phase, RevealOutcome::Cancelled)
        };
        self.wake.notify_one();
        outcome == RevealOutcome::Skipped
    }
}

impl TapHandler for Shared {
    fn tap(&self) -> bool {
        self.skip()
    }
}

/// Tap target of one session. Cloning yields another handle to the same
/// session.
#[derive(Clone)]
pub struct SkipHandle {
    shared: Arc<Shared>,
}

impl SkipHandle {
    /// Sets the full text and completes the session.
    ///
    /// Returns `false` (and writes nothing) if the session already ended or
    /// its epoch is stale.
    pub fn skip(&self) -> bool {
        self.shared.skip()
    }

    /// `true` while the session has not ended.
    #[must_use]
    pub fn is_active(&self) -> bool {
        *self.shared.phase() == Phase::Active
    }
}

impl fmt::Debug for SkipHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkipHandle")
            .field("epoch", &self.shared.epoch)
            .field("phase", &*self.shared.phase())
            .finish()
    }
}

/// A prepared reveal. Await it (or [`spawn`](Self::spawn) it) to run.
pub struct RevealSession {
    handle: SkipHandle,
    pacing: Pacing,
    audio: Arc<dyn Audio>,
}

impl RevealSession {
    /// Returns the session's tap target.
    #[must_use]
    pub fn skip_handle(&self) -> SkipHandle {
        self.handle.clone()
    }

    /// Skips the session; see [`SkipHandle::skip`].
    pub fn skip(&self) -> bool {
        self.handle.skip()
    }

    /// Drives the session to its outcome.
    pub async fn run(self) -> RevealOutcome {
        let shared = Arc::clone(&self.handle.shared);
        let units = pacing::units(&shared.text);
        let last = units.len().saturating_sub(1);

        for (index, unit) in units.iter().enumerate() {
            {
                let phase = shared.phase();
                if let Phase::Ended(outcome) = *phase {
                    return outcome;
                }
                if !shared.cancel.is_current(shared.epoch) {
                    debug!(epoch = %shared.epoch, index, "reveal cancelled");
                    return shared.end(phase, RevealOutcome::Cancelled);
                }
                shared.sink.append(unit);
                if index == 0 {
                    self.audio.play_typing_tick();
                }
                if index == last {
                    return shared.end(phase, RevealOutcome::Completed);
                }
            }

            let delay = self.pacing.delay_after(&units, index);
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = shared.wake.notified() => {}
            }
        }

        // Empty text: nothing to append, completes at once.
        let phase = shared.phase();
        let current = *phase;
        match current {
            Phase::Ended(outcome) => outcome,
            Phase::Active => shared.end(phase, RevealOutcome::Completed),
        }
    }

    /// Spawns the session onto the tokio runtime.
    #[must_use]
    pub fn spawn(self) -> RevealTask {
        let skip = self.skip_handle();
        let join = tokio::spawn(self.run());
        RevealTask { skip, join }
    }
}

impl Drop for RevealSession {
    // Covers sessions dropped unrun or aborted mid-reveal.
    fn drop(&mut self) {
        let shared = &self.handle.shared;
        let phase = shared.phase();
        if *phase == Phase::Active {
            shared.end(phase, RevealOutcome::Cancelled);
        }
    }
}

impl IntoFuture for RevealSession {
    type Output = RevealOutcome;
    type IntoFuture = Pin<Box<dyn Future<Output = RevealOutcome> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(self.run())
    }
}

impl fmt::Debug for RevealSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevealSession")
            .field("handle", &self.handle)
            .field("pacing", &self.pacing)
            .finish_non_exhaustive()
    }
}

/// A spawned session.
#[derive(Debug)]
pub struct RevealTask {
    /// Tap target of the running session.
    pub skip: SkipHandle,
    /// Resolves with the outcome.
    pub join: JoinHandle<RevealOutcome>,
}

/// Factory for reveal sessions bound to one cancellation source.
#[derive(Clone)]
pub struct Typewriter {
    cancel: CancellationSource,
    audio: Arc<dyn Audio>,
    table: PacingTable,
}

impl Typewriter {
    /// Creates a typewriter reading epochs from `cancel` and ticking through
    /// `audio`.
    #[must_use]
    pub fn new(cancel: CancellationSource, audio: Arc<dyn Audio>) -> Self {
        Self {
            cancel,
            audio,
            table: PacingTable::default(),
        }
    }

    /// Replaces the punctuation bonus table.
    #[must_use]
    pub fn with_pacing(mut self, table: PacingTable) -> Self {
        self.table = table;
        self
    }

    pub(crate) fn pacing_table(&self) -> PacingTable {
        self.table
    }

    /// The cancellation source sessions compare against.
    #[must_use]
    pub fn cancellation(&self) -> &CancellationSource {
        &self.cancel
    }

    /// Prepares a punctuation-paced reveal bound to the current epoch.
    #[must_use]
    pub fn reveal(&self, sink: Arc<dyn TextSink>, text: &str, base: Duration) -> RevealSession {
        self.reveal_at(sink, text, base, self.cancel.current())
    }

    /// Prepares a punctuation-paced reveal bound to `epoch`.
    #[must_use]
    pub fn reveal_at(
        &self,
        sink: Arc<dyn TextSink>,
        text: &str,
        base: Duration,
        epoch: Epoch,
    ) -> RevealSession {
        let pacing = Pacing::Punctuated {
            base,
            table: self.table,
        };
        self.session(sink, text, pacing, epoch)
    }

    /// Prepares a constant-speed reveal bound to the current epoch.
    #[must_use]
    pub fn reveal_fixed(
        &self,
        sink: Arc<dyn TextSink>,
        text: &str,
        speed: Duration,
    ) -> RevealSession {
        self.session(sink, text, Pacing::Fixed(speed), self.cancel.current())
    }

    pub(crate) fn session(
        &self,
        sink: Arc<dyn TextSink>,
        text: &str,
        pacing: Pacing,
        epoch: Epoch,
    ) -> RevealSession {
        sink.clear();
        let shared = Arc::new(Shared {
            phase: Mutex::new(Phase::Active),
            wake: Notify::new(),
            text: text.to_owned(),
            sink: Arc::clone(&sink),
            epoch,
            cancel: self.cancel.clone(),
        });
        sink.attach_tap(Arc::clone(&shared) as Arc<dyn TapHandler>);
        let handle = SkipHandle { shared };
        RevealSession {
            handle,
            pacing,
            audio: Arc::clone(&self.audio),
        }
    }

    /// Sleeps for `duration` unless the current epoch goes stale.
    ///
    /// Returns `true` if the caller may continue.
    pub async fn pause(&self, duration: Duration) -> bool {
        self.pause_at(self.cancel.current(), duration).await
    }

    /// Sleeps for `duration`, then reports whether `epoch` is still current.
    pub async fn pause_at(&self, epoch: Epoch, duration: Duration) -> bool {
        if !self.cancel.is_current(epoch) {
            return false;
        }
        tokio::time::sleep(duration).await;
        self.cancel.is_current(epoch)
    }
}

impl fmt::Debug for Typewriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Typewriter")
            .field("epoch", &self.cancel.current())
            .field("table", &self.table)
            .finish_non_exhaustive()
    }
}
