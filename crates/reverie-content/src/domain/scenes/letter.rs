//! A letter typed paragraph by paragraph.

use std::time::Duration;

use reverie_core::effects::BurstKind;
use reverie_core::error::StageError;
use reverie_stage::{RenderNode, Scene, SceneContext, TextRole};
use reverie_typewriter::composite::{BODY_SPEED, INTRO_PAUSE, INTRO_PAUSE_REDUCED, TITLE_SPEED};
use reverie_typewriter::{Line, SequenceItem, TextBuffer, TextSink};
use tokio::task::JoinSet;
use tracing::debug;

use super::{forward, sink};
use crate::domain::script::LetterSpec;

const REVEAL_DELAY: Duration = Duration::from_millis(900);
const REVEAL_DELAY_REDUCED: Duration = Duration::from_millis(200);
const PARAGRAPH_SPEED: Duration = Duration::from_millis(58);
const PARAGRAPH_GAP: Duration = Duration::from_millis(280);
const PARAGRAPH_GAP_REDUCED: Duration = Duration::from_millis(160);

/// Shown on the continue button once the last paragraph is in.
pub const CONTINUE_HINT: &str = "Press A to continue";

/// Heading, subtitle, then the paragraphs. The continue hint appears once
/// every paragraph has been revealed.
pub struct LetterScene {
    spec: LetterSpec,
    title: TextBuffer,
    subtitle: TextBuffer,
    paragraphs: Vec<TextBuffer>,
    hint: TextBuffer,
    tasks: JoinSet<()>,
}

impl LetterScene {
    /// Creates the scene; nothing is typed until `enter`.
    #[must_use]
    pub fn new(spec: LetterSpec) -> Self {
        let paragraphs = spec.paragraphs.iter().map(|_| TextBuffer::new()).collect();
        Self {
            spec,
            title: TextBuffer::new(),
            subtitle: TextBuffer::new(),
            paragraphs,
            hint: TextBuffer::new(),
            tasks: JoinSet::new(),
        }
    }
}

impl Scene for LetterScene {
    fn enter(&mut self, ctx: &SceneContext) -> Result<RenderNode, StageError> {
        let (pause, delay, gap) = if ctx.reduced_motion {
            (INTRO_PAUSE_REDUCED, REVEAL_DELAY_REDUCED, PARAGRAPH_GAP_REDUCED)
        } else {
            (INTRO_PAUSE, REVEAL_DELAY, PARAGRAPH_GAP)
        };
        let title = Line::paced(sink(&self.title), self.spec.title.clone(), TITLE_SPEED);
        let subtitle = Line::paced(sink(&self.subtitle), self.spec.subtitle.clone(), BODY_SPEED);
        let body: Vec<SequenceItem> = self
            .paragraphs
            .iter()
            .zip(&self.spec.paragraphs)
            .map(|(buffer, text)| {
                SequenceItem::Single(Line::paced(sink(buffer), text.clone(), PARAGRAPH_SPEED))
            })
            .collect();
        let hint = self.hint.clone();
        let typewriter = ctx.typewriter.clone();
        let id = ctx.id.clone();
        let epoch = typewriter.cancellation().current();

        self.tasks.spawn(async move {
            let heading = typewriter
                .type_title_then_subtitle_at(title, subtitle, pause, epoch)
                .await;
            if !heading.is_complete() || !typewriter.pause_at(epoch, delay).await {
                return;
            }
            let outcome = typewriter.reveal_sequence_at(body, gap, epoch).await;
            if outcome.is_complete() && typewriter.cancellation().is_current(epoch) {
                hint.set_text(CONTINUE_HINT);
            }
            debug!(scene = %id, ?outcome, "letter revealed");
        });

        let mut children = vec![
            RenderNode::text(TextRole::Title, &self.title),
            RenderNode::text(TextRole::Subtitle, &self.subtitle),
        ];
        children.extend(
            self.paragraphs
                .iter()
                .map(|p| RenderNode::text(TextRole::Body, p)),
        );
        children.push(RenderNode::button("continue", &self.hint));
        Ok(RenderNode::column(children))
    }

    fn exit(&mut self) -> Result<(), StageError> {
        self.tasks.abort_all();
        Ok(())
    }

    fn on_primary_action(&mut self, ctx: &SceneContext) {
        ctx.effects.particles.burst(BurstKind::Mini);
        forward(ctx.handle.mark_current_complete());
        forward(ctx.handle.advance());
    }

    fn on_secondary_action(&mut self, ctx: &SceneContext) {
        forward(ctx.handle.retreat());
    }
}
