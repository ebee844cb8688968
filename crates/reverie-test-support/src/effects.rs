//! Recording side-effect collaborators.

use std::sync::Mutex;

use reverie_core::effects::{Audio, BurstKind, Haptics, ParticleBurst, SoundCue};

/// Records every sound request.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    effects: Mutex<Vec<SoundCue>>,
    ticks: Mutex<usize>,
    stops: Mutex<usize>,
}

impl RecordingAudio {
    /// Effects played so far, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn effects(&self) -> Vec<SoundCue> {
        self.effects.lock().unwrap().clone()
    }

    /// Number of typing ticks played so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn typing_ticks(&self) -> usize {
        *self.ticks.lock().unwrap()
    }

    /// Number of times the typing sound was stopped.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn typing_stops(&self) -> usize {
        *self.stops.lock().unwrap()
    }
}

impl Audio for RecordingAudio {
    fn play_effect(&self, cue: SoundCue) {
        self.effects.lock().unwrap().push(cue);
    }

    fn play_typing_tick(&self) {
        *self.ticks.lock().unwrap() += 1;
    }

    fn stop_typing(&self) {
        *self.stops.lock().unwrap() += 1;
    }
}

/// Records every vibration request.
#[derive(Debug, Default)]
pub struct RecordingHaptics {
    pulses: Mutex<Vec<u32>>,
}

impl RecordingHaptics {
    /// Vibration lengths requested so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn pulses(&self) -> Vec<u32> {
        self.pulses.lock().unwrap().clone()
    }
}

impl Haptics for RecordingHaptics {
    fn vibrate(&self, ms: u32) {
        self.pulses.lock().unwrap().push(ms);
    }
}

/// Records every particle burst.
#[derive(Debug, Default)]
pub struct RecordingBursts {
    bursts: Mutex<Vec<BurstKind>>,
}

impl RecordingBursts {
    /// Bursts fired so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn bursts(&self) -> Vec<BurstKind> {
        self.bursts.lock().unwrap().clone()
    }
}

impl ParticleBurst for RecordingBursts {
    fn burst(&self, kind: BurstKind) {
        self.bursts.lock().unwrap().push(kind);
    }
}
