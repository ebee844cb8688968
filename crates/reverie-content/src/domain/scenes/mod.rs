//! Scene kinds a script can instantiate.
//!
//! Every scene owns the buffers it renders and a [`tokio::task::JoinSet`]
//! with its reveal work; `exit` aborts whatever is still running.

mod choice;
mod finale;
mod letter;
mod title_card;

use std::sync::Arc;

use reverie_core::error::StageError;
use reverie_core::scene_id::SceneId;
use reverie_stage::Scene;
use reverie_typewriter::{TextBuffer, TextSink};
use tracing::warn;

pub use choice::ChoiceScene;
pub use finale::FinaleScene;
pub use letter::LetterScene;
pub use title_card::TitleCardScene;

use super::script::SceneKind;

/// Builds a fresh scene for `kind`. `first` is where the finale restarts.
#[must_use]
pub fn instantiate(kind: &SceneKind, first: &SceneId) -> Box<dyn Scene> {
    match kind {
        SceneKind::TitleCard(spec) => Box::new(TitleCardScene::new(spec.clone())),
        SceneKind::Choice(spec) => Box::new(ChoiceScene::new(spec.clone())),
        SceneKind::Letter(spec) => Box::new(LetterScene::new(spec.clone())),
        SceneKind::Finale(spec) => Box::new(FinaleScene::new(spec.clone(), first.clone())),
    }
}

fn sink(buffer: &TextBuffer) -> Arc<dyn TextSink> {
    Arc::new(buffer.clone())
}

/// Stage commands only fail once the loop is gone; nothing to do but log.
fn forward(result: Result<(), StageError>) {
    if let Err(err) = result {
        warn!(error = %err, "stage command dropped");
    }
}
