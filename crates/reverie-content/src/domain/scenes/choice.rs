//! A question with lettered options.

use std::time::Duration;

use reverie_core::effects::SoundCue;
use reverie_core::error::StageError;
use reverie_stage::{RenderNode, Scene, SceneContext, TextRole};
use reverie_typewriter::composite::{
    AFTER_LABEL_GAP, BODY_SPEED, INTRO_PAUSE, INTRO_PAUSE_REDUCED, ITEM_GAP, LABEL_SPEED,
    TITLE_SPEED,
};
use reverie_typewriter::{Line, SequenceItem, TextBuffer, TextSink};
use tokio::task::JoinSet;
use tracing::{debug, info};

use super::{forward, sink};
use crate::domain::script::ChoiceSpec;

/// How long the praise stays up before the stage moves on.
const PRAISE_HOLD: Duration = Duration::from_millis(620);
const CORRECT_PULSE_MS: u32 = 10;
const WRONG_PULSE_MS: u32 = 35;

/// Shown after a wrong answer.
pub const WRONG_FEEDBACK: &str = "Not quite, try again.";

fn letter(index: usize) -> char {
    // Options are capped at 26 by script validation.
    u8::try_from(index).map_or('?', |i| char::from(b'A' + i % 26))
}

fn badge(index: usize) -> String {
    format!("{}) ", letter(index))
}

struct OptionBuffers {
    badge: TextBuffer,
    body: TextBuffer,
}

/// A cycles through the options, B commits the selected one. The right
/// answer completes the scene, types the praise and advances after a
/// short hold; a wrong one only gives feedback.
pub struct ChoiceScene {
    spec: ChoiceSpec,
    title: TextBuffer,
    prompt: TextBuffer,
    options: Vec<OptionBuffers>,
    feedback: TextBuffer,
    selected: usize,
    answered: bool,
    tasks: JoinSet<()>,
}

impl ChoiceScene {
    /// Creates the scene with the first option selected.
    #[must_use]
    pub fn new(spec: ChoiceSpec) -> Self {
        let options = spec
            .options
            .iter()
            .map(|_| OptionBuffers {
                badge: TextBuffer::new(),
                body: TextBuffer::new(),
            })
            .collect();
        Self {
            spec,
            title: TextBuffer::new(),
            prompt: TextBuffer::new(),
            options,
            feedback: TextBuffer::new(),
            selected: 0,
            answered: false,
            tasks: JoinSet::new(),
        }
    }

    /// Index of the highlighted option.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected
    }

    fn confirm(&mut self, ctx: &SceneContext) {
        if self.selected != self.spec.correct {
            debug!(scene = %ctx.id, selected = self.selected, "wrong answer");
            ctx.effects.audio.play_effect(SoundCue::Cancel);
            ctx.effects.haptics.vibrate(WRONG_PULSE_MS);
            self.feedback.set_text(WRONG_FEEDBACK);
            return;
        }

        info!(scene = %ctx.id, "correct answer");
        self.answered = true;
        ctx.effects.audio.play_effect(SoundCue::Confirm);
        ctx.effects.haptics.vibrate(CORRECT_PULSE_MS);
        forward(ctx.handle.mark_current_complete());

        let typewriter = ctx.typewriter.clone();
        let handle = ctx.handle.clone();
        let feedback = sink(&self.feedback);
        let praise = self.spec.praise.clone();
        let epoch = typewriter.cancellation().current();
        self.tasks.spawn(async move {
            let outcome = typewriter
                .reveal_at(feedback, &praise, BODY_SPEED, epoch)
                .await;
            if outcome.is_complete() && typewriter.pause_at(epoch, PRAISE_HOLD).await {
                forward(handle.advance());
            }
        });
    }
}

impl Scene for ChoiceScene {
    fn enter(&mut self, ctx: &SceneContext) -> Result<RenderNode, StageError> {
        let pause = if ctx.reduced_motion {
            INTRO_PAUSE_REDUCED
        } else {
            INTRO_PAUSE
        };
        let title = Line::paced(sink(&self.title), self.spec.title.clone(), TITLE_SPEED);
        let prompt = Line::paced(sink(&self.prompt), self.spec.prompt.clone(), BODY_SPEED);
        let items: Vec<SequenceItem> = self
            .options
            .iter()
            .zip(&self.spec.options)
            .enumerate()
            .map(|(index, (buffers, text))| SequenceItem::Labeled {
                label: Line::fixed(sink(&buffers.badge), badge(index), LABEL_SPEED),
                gap: AFTER_LABEL_GAP,
                body: Line::paced(sink(&buffers.body), text.clone(), BODY_SPEED),
            })
            .collect();
        let typewriter = ctx.typewriter.clone();
        let id = ctx.id.clone();
        let epoch = typewriter.cancellation().current();
        self.tasks.spawn(async move {
            if typewriter
                .type_title_then_subtitle_at(title, prompt, pause, epoch)
                .await
                .is_complete()
            {
                let outcome = typewriter.reveal_sequence_at(items, ITEM_GAP, epoch).await;
                debug!(scene = %id, ?outcome, "options revealed");
            }
        });

        let mut children = vec![
            RenderNode::text(TextRole::Title, &self.title),
            RenderNode::text(TextRole::Body, &self.prompt),
        ];
        children.extend(self.options.iter().enumerate().map(|(index, buffers)| {
            RenderNode::column([
                RenderNode::text(TextRole::Label, &buffers.badge),
                RenderNode::button(
                    format!("option-{}", letter(index).to_ascii_lowercase()),
                    &buffers.body,
                ),
            ])
        }));
        children.push(RenderNode::text(TextRole::Hint, &self.feedback));
        Ok(RenderNode::column(children))
    }

    fn exit(&mut self) -> Result<(), StageError> {
        self.tasks.abort_all();
        Ok(())
    }

    fn on_primary_action(&mut self, ctx: &SceneContext) {
        if self.answered || self.options.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.options.len();
        ctx.effects.audio.play_effect(SoundCue::Pop);
        let text = &self.spec.options[self.selected];
        self.feedback
            .set_text(&format!("Selected: {}{text}", badge(self.selected)));
    }

    fn on_secondary_action(&mut self, ctx: &SceneContext) {
        if self.answered {
            return;
        }
        self.confirm(ctx);
    }
}
