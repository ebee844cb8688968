//! Heading and subtitle, typed on entry.

use reverie_core::effects::{BurstKind, SoundCue};
use reverie_core::error::StageError;
use reverie_stage::{RenderNode, Scene, SceneContext, TextRole};
use reverie_typewriter::composite::{BODY_SPEED, INTRO_PAUSE, INTRO_PAUSE_REDUCED, TITLE_SPEED};
use reverie_typewriter::{Line, TextBuffer};
use tokio::task::JoinSet;
use tracing::debug;

use super::{forward, sink};
use crate::domain::script::TitleCardSpec;

/// Opening card. A completes it and moves on; B goes back.
pub struct TitleCardScene {
    spec: TitleCardSpec,
    title: TextBuffer,
    subtitle: TextBuffer,
    tasks: JoinSet<()>,
}

impl TitleCardScene {
    /// Creates the scene; nothing is typed until `enter`.
    #[must_use]
    pub fn new(spec: TitleCardSpec) -> Self {
        Self {
            spec,
            title: TextBuffer::new(),
            subtitle: TextBuffer::new(),
            tasks: JoinSet::new(),
        }
    }
}

impl Scene for TitleCardScene {
    fn enter(&mut self, ctx: &SceneContext) -> Result<RenderNode, StageError> {
        let typewriter = ctx.typewriter.clone();
        let title = Line::paced(sink(&self.title), self.spec.title.clone(), TITLE_SPEED);
        let subtitle = Line::paced(sink(&self.subtitle), self.spec.subtitle.clone(), BODY_SPEED);
        let pause = if ctx.reduced_motion {
            INTRO_PAUSE_REDUCED
        } else {
            INTRO_PAUSE
        };
        let id = ctx.id.clone();
        let epoch = typewriter.cancellation().current();
        self.tasks.spawn(async move {
            let outcome = typewriter
                .type_title_then_subtitle_at(title, subtitle, pause, epoch)
                .await;
            debug!(scene = %id, ?outcome, "title card revealed");
        });

        Ok(RenderNode::column([
            RenderNode::text(TextRole::Title, &self.title),
            RenderNode::text(TextRole::Subtitle, &self.subtitle),
            RenderNode::button("start", &TextBuffer::with_text("Start")),
        ]))
    }

    fn exit(&mut self) -> Result<(), StageError> {
        self.tasks.abort_all();
        Ok(())
    }

    fn on_primary_action(&mut self, ctx: &SceneContext) {
        ctx.effects.audio.play_effect(SoundCue::Confirm);
        ctx.effects.particles.burst(BurstKind::Mini);
        forward(ctx.handle.mark_current_complete());
        forward(ctx.handle.advance());
    }

    fn on_secondary_action(&mut self, ctx: &SceneContext) {
        forward(ctx.handle.retreat());
    }
}
