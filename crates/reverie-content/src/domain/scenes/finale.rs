//! Closing scene with the scorecard.

use reverie_core::effects::{BurstKind, SoundCue};
use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_stage::{Grade, RenderNode, Scene, SceneContext, Scorecard, TextRole};
use reverie_transition::TransitionKind;
use reverie_typewriter::composite::{
    BODY_SPEED, INTRO_PAUSE, INTRO_PAUSE_REDUCED, ITEM_GAP, TITLE_SPEED,
};
use reverie_typewriter::{Line, TextBuffer};
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::{forward, sink};
use crate::domain::script::FinaleSpec;

/// Replay label after a perfect run.
pub const REPLAY_PERFECT: &str = "Play again?";
/// Replay label otherwise.
pub const REPLAY_CHASE: &str = "Try for S-Rank";

/// One-line summary of a scorecard.
#[must_use]
pub fn summary(card: &Scorecard) -> String {
    format!(
        "Stars {}/{}, Rank {}. {}",
        card.stars, card.total_stars, card.grade, card.note
    )
}

/// Shows stars and rank. A clears progress and restarts from the first
/// scene behind an iris; B goes back.
pub struct FinaleScene {
    spec: FinaleSpec,
    first: SceneId,
    title: TextBuffer,
    summary: TextBuffer,
    message: TextBuffer,
    tasks: JoinSet<()>,
}

impl FinaleScene {
    /// Creates the scene. `first` is the scene a replay starts from.
    #[must_use]
    pub fn new(spec: FinaleSpec, first: SceneId) -> Self {
        Self {
            spec,
            first,
            title: TextBuffer::new(),
            summary: TextBuffer::new(),
            message: TextBuffer::new(),
            tasks: JoinSet::new(),
        }
    }
}

impl Scene for FinaleScene {
    fn enter(&mut self, ctx: &SceneContext) -> Result<RenderNode, StageError> {
        let card = &ctx.scorecard;
        let perfect = card.grade == Grade::S;
        info!(
            scene = %ctx.id,
            stars = card.stars,
            total = card.total_stars,
            grade = %card.grade,
            "finale"
        );
        if perfect {
            ctx.effects.particles.burst(BurstKind::Finale);
        }

        let pause = if ctx.reduced_motion {
            INTRO_PAUSE_REDUCED
        } else {
            INTRO_PAUSE
        };
        let title = Line::paced(sink(&self.title), self.spec.title.clone(), TITLE_SPEED);
        let scoreline = Line::paced(sink(&self.summary), summary(card), BODY_SPEED);
        let message = sink(&self.message);
        let text = self.spec.message.clone();
        let typewriter = ctx.typewriter.clone();
        let epoch = typewriter.cancellation().current();
        self.tasks.spawn(async move {
            let outcome = typewriter
                .type_title_then_subtitle_at(title, scoreline, pause, epoch)
                .await;
            if !outcome.is_complete() || text.is_empty() {
                return;
            }
            if typewriter.pause_at(epoch, ITEM_GAP).await {
                let outcome = typewriter.reveal_at(message, &text, BODY_SPEED, epoch).await;
                debug!(?outcome, "finale message revealed");
            }
        });

        let label = if perfect { REPLAY_PERFECT } else { REPLAY_CHASE };
        Ok(RenderNode::column([
            RenderNode::text(TextRole::Title, &self.title),
            RenderNode::text(TextRole::Subtitle, &self.summary),
            RenderNode::text(TextRole::Body, &self.message),
            RenderNode::button("replay", &TextBuffer::with_text(label)),
        ]))
    }

    fn exit(&mut self) -> Result<(), StageError> {
        self.tasks.abort_all();
        Ok(())
    }

    fn on_primary_action(&mut self, ctx: &SceneContext) {
        ctx.effects.audio.play_effect(SoundCue::Confirm);
        ctx.effects.particles.burst(BurstKind::Mini);
        forward(ctx.handle.reset_progress());
        forward(ctx.handle.request_scene(self.first.clone(), TransitionKind::Iris));
    }

    fn on_secondary_action(&mut self, ctx: &SceneContext) {
        forward(ctx.handle.retreat());
    }
}
