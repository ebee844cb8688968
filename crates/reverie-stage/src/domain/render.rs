//! Render tree returned by `Scene::enter`.
//!
//! Text nodes hold [`TextBuffer`]s shared with the scene, so reveal sessions
//! keep writing into a tree after it has been mounted. [`RenderNode::view`]
//! takes a serializable picture of the current text.

use reverie_typewriter::TextBuffer;
use serde::Serialize;

/// Presentation role of a text node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextRole {
    /// Scene heading.
    Title,
    /// Line under the heading.
    Subtitle,
    /// Paragraph or prompt.
    Body,
    /// Short badge such as "A)".
    Label,
    /// Input hint or feedback line.
    Hint,
}

/// A node of a scene's render tree.
#[derive(Debug, Clone)]
pub enum RenderNode {
    /// Children stacked vertically.
    Column(Vec<RenderNode>),
    /// Text written by the scene or a reveal session.
    Text {
        /// Presentation role.
        role: TextRole,
        /// Live content.
        buffer: TextBuffer,
    },
    /// An interactive element. The only kind of node that takes focus.
    Button {
        /// Stable identifier within the tree.
        id: String,
        /// Live label.
        label: TextBuffer,
    },
}

impl RenderNode {
    /// A column of `children`.
    #[must_use]
    pub fn column(children: impl IntoIterator<Item = RenderNode>) -> Self {
        Self::Column(children.into_iter().collect())
    }

    /// A text node sharing `buffer`.
    #[must_use]
    pub fn text(role: TextRole, buffer: &TextBuffer) -> Self {
        Self::Text {
            role,
            buffer: buffer.clone(),
        }
    }

    /// A button sharing `label`.
    #[must_use]
    pub fn button(id: impl Into<String>, label: &TextBuffer) -> Self {
        Self::Button {
            id: id.into(),
            label: label.clone(),
        }
    }

    /// Id of the first button in document order.
    #[must_use]
    pub fn first_focusable(&self) -> Option<&str> {
        match self {
            Self::Column(children) => children.iter().find_map(Self::first_focusable),
            Self::Text { .. } => None,
            Self::Button { id, .. } => Some(id),
        }
    }

    /// Every buffer in the tree, in document order.
    #[must_use]
    pub fn buffers(&self) -> Vec<&TextBuffer> {
        let mut out = Vec::new();
        self.collect_buffers(&mut out);
        out
    }

    fn collect_buffers<'a>(&'a self, out: &mut Vec<&'a TextBuffer>) {
        match self {
            Self::Column(children) => {
                for child in children {
                    child.collect_buffers(out);
                }
            }
            Self::Text { buffer, .. } => out.push(buffer),
            Self::Button { label, .. } => out.push(label),
        }
    }

    /// Taps every buffer, skipping each reveal still typing into the tree.
    ///
    /// Returns the number of reveals that were skipped.
    pub fn tap_all(&self) -> usize {
        self.buffers().into_iter().filter(|b| b.tap()).count()
    }

    /// Serializable snapshot of the tree and its current text.
    #[must_use]
    pub fn view(&self) -> RenderView {
        match self {
            Self::Column(children) => RenderView::Column {
                children: children.iter().map(Self::view).collect(),
            },
            Self::Text { role, buffer } => RenderView::Text {
                role: *role,
                text: buffer.text(),
                typing: buffer.is_typing(),
            },
            Self::Button { id, label } => RenderView::Button {
                id: id.clone(),
                label: label.text(),
            },
        }
    }
}

/// Point-in-time picture of a [`RenderNode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderView {
    /// See [`RenderNode::Column`].
    Column {
        /// Child views.
        children: Vec<RenderView>,
    },
    /// See [`RenderNode::Text`].
    Text {
        /// Presentation role.
        role: TextRole,
        /// Text at snapshot time.
        text: String,
        /// Whether a reveal was still typing.
        typing: bool,
    },
    /// See [`RenderNode::Button`].
    Button {
        /// Button id.
        id: String,
        /// Label at snapshot time.
        label: String,
    },
}

#[cfg(test)]
mod tests {
    use reverie_typewriter::TextSink;

    use super::*;

    fn sample() -> RenderNode {
        RenderNode::column([
            RenderNode::text(TextRole::Title, &TextBuffer::with_text("Quiz")),
            RenderNode::column([
                RenderNode::text(TextRole::Label, &TextBuffer::with_text("A)")),
                RenderNode::button("option-0", &TextBuffer::with_text("Cake")),
            ]),
            RenderNode::button("option-1", &TextBuffer::with_text("Email")),
        ])
    }

    #[test]
    fn test_first_focusable_searches_depth_first() {
        assert_eq!(sample().first_focusable(), Some("option-0"));
        assert_eq!(
            RenderNode::text(TextRole::Body, &TextBuffer::new()).first_focusable(),
            None
        );
    }

    #[test]
    fn test_view_reflects_writes_after_mount() {
        // Arrange
        let title = TextBuffer::new();
        let tree = RenderNode::column([RenderNode::text(TextRole::Title, &title)]);

        // Act
        title.set_text("Hello");
        let json = serde_json::to_value(tree.view()).unwrap();

        // Assert
        assert_eq!(
            json,
            serde_json::json!({
                "type": "column",
                "children": [
                    { "type": "text", "role": "title", "text": "Hello", "typing": false }
                ]
            })
        );
    }

    #[test]
    fn test_buffers_in_document_order() {
        let texts: Vec<String> = sample().buffers().iter().map(|b| b.text()).collect();

        assert_eq!(texts, vec!["Quiz", "A)", "Cake", "Email"]);
    }

    #[test]
    fn test_tap_all_without_sessions_skips_nothing() {
        assert_eq!(sample().tap_all(), 0);
    }
}
