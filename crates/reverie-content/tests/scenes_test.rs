//! Drives script scenes through a real stage with reduced motion.

use std::sync::Arc;
use std::time::Duration;

use reverie_content::{Script, build_catalog};
use reverie_core::effects::{Audio, BurstKind, Effects, Haptics, ParticleBurst, SoundCue};
use reverie_core::scene_id::SceneId;
use reverie_stage::{MemorySurface, RenderView, Stage, StageConfig, StageSurface, TextRole};
use reverie_test_support::{RecordingAudio, RecordingBursts, RecordingHaptics};
use reverie_transition::EffectHint;

struct Harness {
    stage: Stage,
    surface: Arc<MemorySurface>,
    audio: Arc<RecordingAudio>,
    haptics: Arc<RecordingHaptics>,
    bursts: Arc<RecordingBursts>,
}

impl Harness {
    fn new(script: &Script) -> Self {
        let surface = Arc::new(MemorySurface::new());
        let audio = Arc::new(RecordingAudio::default());
        let haptics = Arc::new(RecordingHaptics::default());
        let bursts = Arc::new(RecordingBursts::default());
        let effects = Effects::new(
            Arc::clone(&audio) as Arc<dyn Audio>,
            Arc::clone(&haptics) as Arc<dyn Haptics>,
            Arc::clone(&bursts) as Arc<dyn ParticleBurst>,
        );
        let stage = Stage::builder(build_catalog(script).unwrap())
            .config(StageConfig {
                reduced_motion: true,
                ..StageConfig::default()
            })
            .effects(effects)
            .surface(Arc::clone(&surface) as Arc<dyn StageSurface>)
            .build();
        Self {
            stage,
            surface,
            audio,
            haptics,
            bursts,
        }
    }

    fn demo() -> Self {
        Self::new(&Script::demo().unwrap())
    }

    fn show(&mut self, id: &str) {
        assert!(
            self.stage
                .request_scene(&SceneId::from(id), EffectHint::Auto)
                .is_accepted()
        );
    }

    fn current(&self) -> Option<String> {
        self.stage
            .state()
            .current_scene_id()
            .map(|id| id.as_str().to_owned())
    }

    fn texts(&self, role: TextRole) -> Vec<String> {
        let mut out = Vec::new();
        if let Some(tree) = self.surface.view().tree {
            collect_texts(&tree, role, &mut out);
        }
        out
    }

    fn buttons(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        if let Some(tree) = self.surface.view().tree {
            collect_buttons(&tree, &mut out);
        }
        out
    }
}

fn collect_texts(view: &RenderView, wanted: TextRole, out: &mut Vec<String>) {
    match view {
        RenderView::Column { children } => {
            for child in children {
                collect_texts(child, wanted, out);
            }
        }
        RenderView::Text { role, text, .. } if *role == wanted => out.push(text.clone()),
        RenderView::Text { .. } | RenderView::Button { .. } => {}
    }
}

fn collect_buttons(view: &RenderView, out: &mut Vec<(String, String)>) {
    match view {
        RenderView::Column { children } => {
            for child in children {
                collect_buttons(child, out);
            }
        }
        RenderView::Button { id, label } => out.push((id.clone(), label.clone())),
        RenderView::Text { .. } => {}
    }
}

async fn idle(seconds: u64) {
    tokio::time::sleep(Duration::from_secs(seconds)).await;
}

#[tokio::test(start_paused = true)]
async fn test_title_card_types_heading_then_advances_on_primary() {
    // Arrange
    let mut h = Harness::demo();
    h.show("intro");

    // Act
    idle(10).await;
    let title = h.texts(TextRole::Title);
    let subtitle = h.texts(TextRole::Subtitle);
    h.stage.primary_action();
    h.stage.process_queued();

    // Assert
    assert_eq!(title, vec!["Happy Birthday!"]);
    assert_eq!(subtitle, vec!["Press A to begin, B to go back."]);
    assert_eq!(h.current().as_deref(), Some("quiz"));
    assert!(h.stage.state().completed().contains(&SceneId::from("intro")));
    assert_eq!(h.audio.effects(), vec![SoundCue::Confirm]);
    assert_eq!(h.bursts.bursts(), vec![BurstKind::Mini]);
    assert_eq!(h.surface.focused().as_deref(), Some("option-a"));
}

#[tokio::test(start_paused = true)]
async fn test_choice_reveals_lettered_options() {
    let mut h = Harness::demo();
    h.show("quiz");

    idle(30).await;

    assert_eq!(h.texts(TextRole::Label), vec!["A) ", "B) ", "C) ", "D) "]);
    let buttons = h.buttons();
    assert_eq!(buttons[0].0, "option-a");
    assert_eq!(buttons[0].1, "Cake and our favourite playlist");
    assert_eq!(buttons[3].0, "option-d");
}

#[tokio::test(start_paused = true)]
async fn test_wrong_answer_gives_feedback_without_completing() {
    // Arrange
    let mut h = Harness::demo();
    h.show("quiz");

    // Act
    h.stage.primary_action();
    let selected = h.texts(TextRole::Hint);
    h.stage.secondary_action();
    h.stage.process_queued();

    // Assert
    assert_eq!(
        selected,
        vec!["Selected: B) A polite congratulatory handshake"]
    );
    assert_eq!(h.texts(TextRole::Hint), vec!["Not quite, try again."]);
    assert_eq!(h.audio.effects(), vec![SoundCue::Pop, SoundCue::Cancel]);
    assert_eq!(h.haptics.pulses(), vec![35]);
    assert!(h.stage.state().completed().is_empty());
    assert_eq!(h.current().as_deref(), Some("quiz"));
}

#[tokio::test(start_paused = true)]
async fn test_correct_answer_completes_praises_then_advances() {
    // Arrange
    let mut h = Harness::demo();
    h.show("quiz");

    // Act
    h.stage.secondary_action();
    h.stage.process_queued();
    let completed = h.stage.state().completed().len();
    idle(10).await;
    let praise = h.texts(TextRole::Hint);
    h.stage.process_queued();

    // Assert
    assert_eq!(completed, 1);
    assert_eq!(praise, vec!["Correct! Celebrate like we mean it."]);
    assert_eq!(h.audio.effects(), vec![SoundCue::Confirm]);
    assert_eq!(h.haptics.pulses(), vec![10]);
    assert_eq!(h.current().as_deref(), Some("shine"));
}

#[tokio::test(start_paused = true)]
async fn test_choice_ignores_input_once_answered() {
    let mut h = Harness::demo();
    h.show("quiz");
    h.stage.secondary_action();

    h.stage.primary_action();
    h.stage.secondary_action();

    assert_eq!(h.audio.effects(), vec![SoundCue::Confirm]);
    assert_eq!(h.haptics.pulses(), vec![10]);
}

#[tokio::test(start_paused = true)]
async fn test_leaving_choice_during_praise_cancels_the_advance() {
    // Arrange
    let mut h = Harness::demo();
    h.show("quiz");
    h.stage.secondary_action();
    h.stage.process_queued();

    // Act
    h.show("letter");
    idle(10).await;
    h.stage.process_queued();

    // Assert
    assert_eq!(h.current().as_deref(), Some("letter"));
}

#[tokio::test(start_paused = true)]
async fn test_letter_shows_hint_after_last_paragraph() {
    // Arrange
    let mut h = Harness::demo();
    h.show("letter");

    // Act
    idle(1).await;
    let early = h.buttons();
    idle(60).await;

    // Assert
    assert_eq!(early, vec![("continue".to_owned(), String::new())]);
    assert_eq!(
        h.buttons(),
        vec![("continue".to_owned(), "Press A to continue".to_owned())]
    );
    let body = h.texts(TextRole::Body);
    assert_eq!(body.len(), 3);
    assert_eq!(body[2], "Happy birthday!");
}

#[tokio::test(start_paused = true)]
async fn test_tap_skips_letter_heading() {
    let mut h = Harness::demo();
    h.show("letter");
    tokio::time::sleep(Duration::from_millis(100)).await;

    let skipped = h.stage.tap();

    assert!(skipped >= 1);
    assert_eq!(h.texts(TextRole::Title), vec!["A letter for you"]);
}

#[tokio::test(start_paused = true)]
async fn test_finale_without_stars_offers_rank_chase_and_restarts() {
    // Arrange
    let mut h = Harness::demo();
    h.show("outro");
    let buttons = h.buttons();

    // Act
    idle(10).await;
    let summary = h.texts(TextRole::Subtitle);
    h.stage.primary_action();
    h.stage.process_queued();

    // Assert
    assert_eq!(
        buttons,
        vec![("replay".to_owned(), "Try for S-Rank".to_owned())]
    );
    assert_eq!(summary, vec!["Stars 0/4, Rank D. Practice mode"]);
    assert_eq!(h.current().as_deref(), Some("intro"));
    assert!(h.stage.state().completed().is_empty());
    assert_eq!(h.bursts.bursts(), vec![BurstKind::Mini]);
}

#[tokio::test(start_paused = true)]
async fn test_perfect_run_fires_finale_burst() {
    // Arrange
    let script = Script::from_yaml(
        r"
scenes:
  - { id: intro, kind: title_card, title: Hi, scored: true }
  - { id: outro, kind: finale, title: Bye }
",
    )
    .unwrap();
    let mut h = Harness::new(&script);
    h.show("intro");

    // Act
    h.stage.primary_action();
    h.stage.process_queued();

    // Assert
    assert_eq!(h.current().as_deref(), Some("outro"));
    assert_eq!(h.bursts.bursts(), vec![BurstKind::Mini, BurstKind::Finale]);
    assert_eq!(
        h.buttons(),
        vec![("replay".to_owned(), "Play again?".to_owned())]
    );
}

#[tokio::test(start_paused = true)]
async fn test_secondary_on_title_card_stays_at_first_scene() {
    let mut h = Harness::demo();
    h.show("intro");

    h.stage.secondary_action();
    h.stage.process_queued();

    assert_eq!(h.current().as_deref(), Some("intro"));
}
