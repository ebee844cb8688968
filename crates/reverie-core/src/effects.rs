//! Fire-and-forget side-effect collaborators.
//!
//! The engine triggers sounds, vibration and particle bursts but never
//! observes a result. Every method returns `()`; implementations must absorb
//! their own failures.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Named one-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    /// Positive confirmation (advancing, correct answer).
    Confirm,
    /// Negative feedback (wrong answer, blocked action).
    Cancel,
    /// Short pop for small interactions.
    Pop,
}

/// Decorative particle burst variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BurstKind {
    /// Small celebratory burst.
    Mini,
    /// Large end-of-story burst.
    Finale,
}

/// Audio playback collaborator.
pub trait Audio: Send + Sync {
    /// Plays a named effect.
    fn play_effect(&self, cue: SoundCue);

    /// Plays the typing sound that accompanies a text reveal.
    fn play_typing_tick(&self);

    /// Stops a typing sound that is still playing. Called on every scene
    /// swap.
    fn stop_typing(&self) {}
}

/// Haptic feedback collaborator.
pub trait Haptics: Send + Sync {
    /// Vibrates for `ms` milliseconds where supported.
    fn vibrate(&self, ms: u32);
}

/// Particle burst collaborator.
pub trait ParticleBurst: Send + Sync {
    /// Fires a burst of the given kind.
    fn burst(&self, kind: BurstKind);
}

/// Collaborator that does nothing. Used when a surface has no audio,
/// vibration or particle layer.
#[derive(Debug, Clone, Copy, Default)]
pub struct Silent;

impl Audio for Silent {
    fn play_effect(&self, _cue: SoundCue) {}

    fn play_typing_tick(&self) {}
}

impl Haptics for Silent {
    fn vibrate(&self, _ms: u32) {}
}

impl ParticleBurst for Silent {
    fn burst(&self, _kind: BurstKind) {}
}

/// Bundle of side-effect collaborators handed to scenes.
#[derive(Clone)]
pub struct Effects {
    /// Sound effects and typing ticks.
    pub audio: Arc<dyn Audio>,
    /// Vibration.
    pub haptics: Arc<dyn Haptics>,
    /// Particle bursts.
    pub particles: Arc<dyn ParticleBurst>,
}

impl Effects {
    /// Creates a bundle from explicit collaborators.
    #[must_use]
    pub fn new(
        audio: Arc<dyn Audio>,
        haptics: Arc<dyn Haptics>,
        particles: Arc<dyn ParticleBurst>,
    ) -> Self {
        Self {
            audio,
            haptics,
            particles,
        }
    }

    /// A bundle where every collaborator is [`Silent`].
    #[must_use]
    pub fn silent() -> Self {
        Self::new(Arc::new(Silent), Arc::new(Silent), Arc::new(Silent))
    }
}

impl Default for Effects {
    fn default() -> Self {
        Self::silent()
    }
}

impl std::fmt::Debug for Effects {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Effects").finish_non_exhaustive()
    }
}
