//! The render container scenes are mounted into.

use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use super::render::{RenderNode, RenderView};

/// Completed scenes out of the catalog size, as shown on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ProgressBadge {
    /// Completed scenes, capped at `total`.
    pub completed: usize,
    /// Catalog size.
    pub total: usize,
}

/// Display surface owned by whichever scene is current.
///
/// The stage clears it only between scenes.
pub trait StageSurface: Send + Sync {
    /// Removes the mounted tree.
    fn clear(&self);

    /// Mounts a scene's tree.
    fn mount(&self, tree: &RenderNode);

    /// Moves input focus to the button with `id`.
    fn focus(&self, id: &str);

    /// Updates the completion badge.
    fn set_progress(&self, badge: ProgressBadge);
}

#[derive(Debug, Default)]
struct MemoryState {
    tree: Option<RenderNode>,
    focused: Option<String>,
    badge: ProgressBadge,
}

/// A surface that keeps the mounted tree in memory.
#[derive(Debug, Default)]
pub struct MemorySurface {
    state: Mutex<MemoryState>,
}

/// Serializable picture of a [`MemorySurface`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SurfaceView {
    /// The mounted tree, if any.
    pub tree: Option<RenderView>,
    /// Focused button id.
    pub focused: Option<String>,
    /// Completion badge.
    pub badge: ProgressBadge,
}

impl MemorySurface {
    /// Creates an empty surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns `true` when nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().tree.is_none()
    }

    /// Focused button id.
    #[must_use]
    pub fn focused(&self) -> Option<String> {
        self.lock().focused.clone()
    }

    /// Current badge.
    #[must_use]
    pub fn badge(&self) -> ProgressBadge {
        self.lock().badge
    }

    /// Snapshot of the mounted tree with its current text.
    #[must_use]
    pub fn view(&self) -> SurfaceView {
        let state = self.lock();
        SurfaceView {
            tree: state.tree.as_ref().map(RenderNode::view),
            focused: state.focused.clone(),
            badge: state.badge,
        }
    }
}

impl StageSurface for MemorySurface {
    fn clear(&self) {
        let mut state = self.lock();
        state.tree = None;
        state.focused = None;
    }

    fn mount(&self, tree: &RenderNode) {
        self.lock().tree = Some(tree.clone());
    }

    fn focus(&self, id: &str) {
        self.lock().focused = Some(id.to_owned());
    }

    fn set_progress(&self, badge: ProgressBadge) {
        self.lock().badge = badge;
    }
}

#[cfg(test)]
mod tests {
    use reverie_typewriter::TextBuffer;

    use super::*;
    use crate::domain::render::TextRole;

    #[test]
    fn test_clear_drops_tree_and_focus_but_keeps_badge() {
        // Arrange
        let surface = MemorySurface::new();
        let tree = RenderNode::button("next", &TextBuffer::with_text("Next"));
        surface.mount(&tree);
        surface.focus("next");
        surface.set_progress(ProgressBadge {
            completed: 2,
            total: 5,
        });

        // Act
        surface.clear();

        // Assert
        assert!(surface.is_empty());
        assert_eq!(surface.focused(), None);
        assert_eq!(surface.badge().completed, 2);
    }

    #[test]
    fn test_view_reports_live_text() {
        let title = TextBuffer::new();
        let surface = MemorySurface::new();
        surface.mount(&RenderNode::text(TextRole::Title, &title));

        reverie_typewriter::TextSink::set_text(&title, "Hi");

        assert_eq!(
            surface.view().tree,
            Some(RenderView::Text {
                role: TextRole::Title,
                text: "Hi".to_owned(),
                typing: false,
            })
        );
    }
}
