//! The scene manager.
//!
//! A [`Stage`] owns the [`GameState`] exclusively. It can be driven directly
//! through its `&mut self` operations, or moved into [`Stage::run`], which
//! processes [`StageCommand`]s one at a time while polling the transition in
//! flight. Requests that arrive while a transition is running hit the
//! reentrancy guard and are rejected.

use std::fmt;
use std::sync::Arc;

use reverie_core::cancel::{CancellationSource, Epoch};
use reverie_core::clock::{Clock, SystemClock};
use reverie_core::effects::Effects;
use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_core::viewport::{StaticViewport, Viewport, ViewportProvider};
use reverie_transition::{
    CoverFuture, EffectHint, OcclusionSurface, TransitionConfig, TransitionKind, TransitionRun,
    Transitioner,
};
use reverie_typewriter::{PacingTable, Typewriter};
use tokio::sync::{mpsc, watch};
use tracing::{debug, error, info, warn};

use super::snapshot::StageSnapshot;
use crate::domain::catalog::SceneCatalog;
use crate::domain::commands::{StageCommand, StageHandle};
use crate::domain::render::RenderNode;
use crate::domain::scene::SceneContext;
use crate::domain::score::Scorecard;
use crate::domain::state::GameState;
use crate::domain::surface::{ProgressBadge, StageSurface};

/// Viewport assumed when the builder is given none.
pub const DEFAULT_VIEWPORT: Viewport = Viewport::new(1120, 800);

/// Stage-wide settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageConfig {
    /// Reduced-motion preference. Forces every transition to `None`.
    pub reduced_motion: bool,
    /// Transition durations.
    pub transition: TransitionConfig,
    /// Punctuation pauses of the typewriter.
    pub pacing: PacingTable,
}

/// Why a scene request was a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Another transition is in flight.
    Transitioning,
    /// The target is already the current scene.
    AlreadyCurrent,
    /// The target is not in the catalog.
    UnknownScene,
    /// The catalog is empty, so there is nothing to advance or retreat to.
    NoTarget,
}

/// Result of [`Stage::request_scene`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The swap was started under a new epoch.
    Accepted {
        /// Epoch the new scene's work is bound to.
        epoch: Epoch,
        /// Transition actually used.
        kind: TransitionKind,
    },
    /// Nothing happened.
    Rejected(Rejection),
}

impl RequestOutcome {
    /// Returns `true` for [`RequestOutcome::Accepted`].
    #[must_use]
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted { .. })
    }
}

struct PendingSwap {
    target: SceneId,
    cover: CoverFuture,
}

/// Assembles a [`Stage`] from its collaborators.
pub struct StageBuilder {
    catalog: SceneCatalog,
    config: StageConfig,
    effects: Effects,
    viewport: Arc<dyn ViewportProvider>,
    occlusion: Option<Arc<dyn OcclusionSurface>>,
    surface: Option<Arc<dyn StageSurface>>,
    clock: Arc<dyn Clock>,
}

impl StageBuilder {
    /// Sets the stage configuration.
    #[must_use]
    pub fn config(mut self, config: StageConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the side-effect collaborators.
    #[must_use]
    pub fn effects(mut self, effects: Effects) -> Self {
        self.effects = effects;
        self
    }

    /// Sets the viewport provider used for transition geometry.
    #[must_use]
    pub fn viewport(mut self, viewport: Arc<dyn ViewportProvider>) -> Self {
        self.viewport = viewport;
        self
    }

    /// Attaches the occlusion layer. Without one every transition degrades
    /// to `None`.
    #[must_use]
    pub fn occlusion(mut self, occlusion: Arc<dyn OcclusionSurface>) -> Self {
        self.occlusion = Some(occlusion);
        self
    }

    /// Attaches the render container. Without one rendering is a no-op.
    #[must_use]
    pub fn surface(mut self, surface: Arc<dyn StageSurface>) -> Self {
        self.surface = Some(surface);
        self
    }

    /// Sets the clock that stamps transition runs.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Builds the stage. Nothing is shown until the first request.
    #[must_use]
    pub fn build(self) -> Stage {
        let cancel = CancellationSource::new();
        let typewriter = Typewriter::new(cancel.clone(), Arc::clone(&self.effects.audio))
            .with_pacing(self.config.pacing);
        let transitioner = Transitioner::new(
            self.config.transition,
            self.viewport,
            self.occlusion,
            self.clock,
        );
        let (tx, commands) = mpsc::unbounded_channel();
        let (snapshot, _) = watch::channel(StageSnapshot {
            current_scene: None,
            started: false,
            transitioning: false,
            epoch: cancel.current(),
            completed: Vec::new(),
            badge: ProgressBadge {
                completed: 0,
                total: self.catalog.len(),
            },
            scorecard: Scorecard::new(0, self.catalog.scored_count()),
            order: self.catalog.order(),
        });

        let stage = Stage {
            state: GameState::new(),
            catalog: self.catalog,
            config: self.config,
            cancel,
            typewriter,
            transitioner,
            effects: self.effects,
            surface: self.surface,
            mounted: None,
            pending: None,
            commands,
            handle: StageHandle::new(tx),
            snapshot,
        };
        stage.refresh_badge();
        stage
    }
}

/// The scene manager.
pub struct Stage {
    state: GameState,
    catalog: SceneCatalog,
    config: StageConfig,
    cancel: CancellationSource,
    typewriter: Typewriter,
    transitioner: Transitioner,
    effects: Effects,
    surface: Option<Arc<dyn StageSurface>>,
    mounted: Option<RenderNode>,
    pending: Option<PendingSwap>,
    commands: mpsc::UnboundedReceiver<StageCommand>,
    handle: StageHandle,
    snapshot: watch::Sender<StageSnapshot>,
}

impl Stage {
    /// Starts building a stage over `catalog`.
    #[must_use]
    pub fn builder(catalog: SceneCatalog) -> StageBuilder {
        StageBuilder {
            catalog,
            config: StageConfig::default(),
            effects: Effects::silent(),
            viewport: Arc::new(StaticViewport(DEFAULT_VIEWPORT)),
            occlusion: None,
            surface: None,
            clock: Arc::new(SystemClock),
        }
    }

    /// A sender for this stage's command queue.
    #[must_use]
    pub fn handle(&self) -> StageHandle {
        self.handle.clone()
    }

    /// Receives a fresh [`StageSnapshot`] after every state change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<StageSnapshot> {
        self.snapshot.subscribe()
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The scene catalog.
    #[must_use]
    pub fn catalog(&self) -> &SceneCatalog {
        &self.catalog
    }

    /// Current cancellation epoch.
    #[must_use]
    pub fn epoch(&self) -> Epoch {
        self.cancel.current()
    }

    /// Stars over scored scenes.
    #[must_use]
    pub fn scorecard(&self) -> Scorecard {
        let stars = self
            .state
            .completed
            .iter()
            .filter(|id| self.catalog.is_scored(id))
            .count();
        Scorecard::new(stars, self.catalog.scored_count())
    }

    /// Completed scenes capped at the catalog size.
    #[must_use]
    pub fn badge(&self) -> ProgressBadge {
        let total = self.catalog.len();
        ProgressBadge {
            completed: self.state.completed.len().min(total),
            total,
        }
    }

    /// Builds the current read model.
    #[must_use]
    pub fn snapshot(&self) -> StageSnapshot {
        StageSnapshot {
            current_scene: self.state.current_scene_id.clone(),
            started: self.state.started,
            transitioning: self.state.transitioning,
            epoch: self.epoch(),
            completed: self.state.completed.iter().cloned().collect(),
            badge: self.badge(),
            scorecard: self.scorecard(),
            order: self.catalog.order(),
        }
    }

    /// Starts a swap to `target`.
    ///
    /// Rejected while a transition is in flight, when `target` is already
    /// current, or when the catalog does not know it. An accepted request
    /// bumps the epoch, which silently stops every reveal of the outgoing
    /// scene. A `None` transition swaps before this returns; the others
    /// complete when the cover future resolves (see [`Stage::settle`] and
    /// [`Stage::run`]).
    pub fn request_scene(&mut self, target: &SceneId, hint: EffectHint) -> RequestOutcome {
        if self.state.transitioning {
            debug!(scene = %target, "scene request rejected: transition in flight");
            return RequestOutcome::Rejected(Rejection::Transitioning);
        }
        if self.state.current_scene_id.as_ref() == Some(target) {
            debug!(scene = %target, "scene request rejected: already current");
            return RequestOutcome::Rejected(Rejection::AlreadyCurrent);
        }
        if !self.catalog.contains(target) {
            let err = StageError::SceneNotFound(target.clone());
            warn!(error = %err, "scene request rejected");
            return RequestOutcome::Rejected(Rejection::UnknownScene);
        }

        let epoch = self.cancel.bump();
        self.effects.audio.stop_typing();
        let requested = self.resolve_kind(hint);
        self.state.transitioning = true;

        let mut run = self.transitioner.prime(requested);
        let kind = run.kind;
        info!(
            scene = %target,
            from = ?self.state.current_scene_id,
            kind = %kind,
            epoch = %epoch,
            run_id = %run.id,
            "scene swap accepted"
        );

        if kind == TransitionKind::None {
            self.swap(target.clone());
            self.transitioner.uncover(&mut run);
        } else {
            self.pending = Some(PendingSwap {
                target: target.clone(),
                cover: self.transitioner.animate(run),
            });
            self.publish();
        }
        RequestOutcome::Accepted { epoch, kind }
    }

    fn resolve_kind(&self, hint: EffectHint) -> TransitionKind {
        if self.config.reduced_motion {
            TransitionKind::None
        } else if !self.state.started {
            TransitionKind::Iris
        } else {
            match hint {
                EffectHint::Kind(kind) => kind,
                EffectHint::Auto => TransitionKind::Tiles,
            }
        }
    }

    fn context(&self, id: &SceneId) -> SceneContext {
        SceneContext {
            id: id.clone(),
            handle: self.handle(),
            typewriter: self.typewriter.clone(),
            effects: self.effects.clone(),
            reduced_motion: self.config.reduced_motion,
            scorecard: self.scorecard(),
        }
    }

    /// Runs at the covering instant: tears down the old scene and mounts
    /// the new one.
    fn swap(&mut self, target: SceneId) {
        if let Some(mut previous) = self.state.current_scene.take() {
            if let Err(err) = previous.exit() {
                error!(error = %err, "scene exit failed");
            }
        }
        self.mounted = None;
        if let Some(surface) = &self.surface {
            surface.clear();
        }

        let ctx = self.context(&target);
        if let Some(mut scene) = self.catalog.build(&target) {
            match scene.enter(&ctx) {
                Ok(tree) => self.mount(tree),
                Err(err) => error!(error = %err, "scene enter failed"),
            }
            self.state.current_scene = Some(scene);
        }

        self.state.current_scene_id = Some(target);
        self.refresh_badge();
        self.state.transitioning = false;
        self.state.started = true;
        self.publish();
    }

    fn mount(&mut self, tree: RenderNode) {
        match &self.surface {
            Some(surface) => {
                surface.mount(&tree);
                if let Some(id) = tree.first_focusable() {
                    surface.focus(id);
                }
            }
            None => debug!("no render container attached, skipping mount"),
        }
        self.mounted = Some(tree);
    }

    fn finish(&mut self, target: SceneId, mut run: TransitionRun) {
        self.swap(target);
        self.transitioner.uncover(&mut run);
        debug!(run_id = %run.id, kind = %run.kind, "transition finished");
    }

    fn refresh_badge(&self) {
        if let Some(surface) = &self.surface {
            surface.set_progress(self.badge());
        }
    }

    fn publish(&self) {
        self.snapshot.send_replace(self.snapshot());
    }

    /// Waits for the transition in flight, if any, and completes the swap.
    pub async fn settle(&mut self) {
        if let Some(mut pending) = self.pending.take() {
            let run = (&mut pending.cover).await;
            self.finish(pending.target, run);
        }
    }

    /// Adds the current scene to the completion set.
    ///
    /// Returns `true` if the set grew.
    pub fn mark_current_complete(&mut self) -> bool {
        let grew = self.state.mark_current_complete();
        self.refresh_badge();
        if grew {
            debug!(scene = ?self.state.current_scene_id, "scene completed");
            self.publish();
        }
        grew
    }

    /// Clears the completion set.
    pub fn reset_progress(&mut self) {
        self.state.reset_progress();
        self.refresh_badge();
        info!("progress reset");
        self.publish();
    }

    /// Requests the catalog entry after the current one.
    pub fn advance(&mut self) -> RequestOutcome {
        match self
            .catalog
            .next_after(self.state.current_scene_id.as_ref())
            .cloned()
        {
            Some(target) => self.request_scene(&target, EffectHint::Auto),
            None => RequestOutcome::Rejected(Rejection::NoTarget),
        }
    }

    /// Requests the catalog entry before the current one.
    pub fn retreat(&mut self) -> RequestOutcome {
        match self
            .catalog
            .previous_before(self.state.current_scene_id.as_ref())
            .cloned()
        {
            Some(target) => self.request_scene(&target, EffectHint::Auto),
            None => RequestOutcome::Rejected(Rejection::NoTarget),
        }
    }

    /// Forwards the primary input to the current scene.
    pub fn primary_action(&mut self) {
        let Some(id) = self.state.current_scene_id.clone() else {
            return;
        };
        let ctx = self.context(&id);
        if let Some(scene) = self.state.current_scene.as_mut() {
            scene.on_primary_action(&ctx);
        }
    }

    /// Forwards the secondary input to the current scene.
    pub fn secondary_action(&mut self) {
        let Some(id) = self.state.current_scene_id.clone() else {
            return;
        };
        let ctx = self.context(&id);
        if let Some(scene) = self.state.current_scene.as_mut() {
            scene.on_secondary_action(&ctx);
        }
    }

    /// Skips every reveal still typing into the mounted tree.
    ///
    /// Returns the number of reveals skipped.
    pub fn tap(&mut self) -> usize {
        let skipped = self.mounted.as_ref().map_or(0, RenderNode::tap_all);
        debug!(skipped, "tap");
        skipped
    }

    /// Applies one command.
    pub fn dispatch(&mut self, command: StageCommand) {
        match command {
            StageCommand::RequestScene { target, hint } => {
                self.request_scene(&target, hint);
            }
            StageCommand::MarkCurrentComplete => {
                self.mark_current_complete();
            }
            StageCommand::ResetProgress => self.reset_progress(),
            StageCommand::Advance => {
                self.advance();
            }
            StageCommand::Retreat => {
                self.retreat();
            }
            StageCommand::PrimaryAction => self.primary_action(),
            StageCommand::SecondaryAction => self.secondary_action(),
            StageCommand::Tap => {
                self.tap();
            }
        }
    }

    /// Applies every command already queued, without waiting.
    ///
    /// Returns the number of commands applied.
    pub fn process_queued(&mut self) -> usize {
        let mut applied = 0;
        while let Ok(command) = self.commands.try_recv() {
            self.dispatch(command);
            applied += 1;
        }
        applied
    }

    /// Runs the event loop until the task is dropped.
    pub async fn run(mut self) {
        info!(scenes = self.catalog.len(), "stage loop started");
        loop {
            tokio::select! {
                command = self.commands.recv() => match command {
                    Some(command) => self.dispatch(command),
                    None => break,
                },
                run = covered(&mut self.pending), if self.pending.is_some() => {
                    if let Some(pending) = self.pending.take() {
                        self.finish(pending.target, run);
                    }
                }
            }
        }
        info!("stage loop stopped");
    }
}

async fn covered(pending: &mut Option<PendingSwap>) -> TransitionRun {
    match pending {
        Some(pending) => (&mut pending.cover).await,
        None => std::future::pending().await,
    }
}

impl fmt::Debug for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stage")
            .field("state", &self.state)
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("epoch", &self.epoch())
            .finish_non_exhaustive()
    }
}

impl fmt::Debug for StageBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StageBuilder")
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
