use crate::block::BlockRenderer;
use crate::parse::parse_blocks;
use crate::reconcile::DocumentSnapshot;
use crate::reconcile::ReconcileSummary;
use crate::reconcile::Reconciler;
use ratatui::text::Line;
use streamdown_core::node::VisualNode;
use streamdown_core::surface::apply_edits;
use streamdown_core::theme::Theme;

/// View-model for one streamed document: parse → reconcile → mirror.
///
/// Owns the snapshot and a child list mirroring the reconciler's output,
/// the way a host surface would. Feed it the whole current text with
/// [`StreamingDocument::set_markdown`] (or a delta with
/// [`StreamingDocument::append`]) each time the producer flushes, then
/// draw [`StreamingDocument::lines`].
///
/// Updates are synchronous and must be serialized by the caller; the
/// producer side is expected to throttle flush frequency (see the chat
/// example). Setting identical text twice is a no-op on the second call.
#[derive(Debug)]
pub struct StreamingDocument {
    reconciler: Reconciler,
    snapshot: DocumentSnapshot,
    children: Vec<VisualNode>,
    source: String,
}

impl Default for StreamingDocument {
    fn default() -> Self {
        Self::new(Theme::default())
    }
}

impl StreamingDocument {
    pub fn new(theme: Theme) -> Self {
        Self {
            reconciler: Reconciler::new(BlockRenderer::new(theme)),
            snapshot: DocumentSnapshot::new(),
            children: Vec::new(),
            source: String::new(),
        }
    }

    /// Replaces the source text wholesale and reconciles.
    pub fn set_markdown(&mut self, text: &str) -> ReconcileSummary {
        self.source.clear();
        self.source.push_str(text);
        let blocks = parse_blocks(&self.source);
        let result = self.reconciler.reconcile(&mut self.snapshot, blocks);
        apply_edits(&mut self.children, &result.edits);
        result.summary
    }

    /// Appends a streamed delta to the source text and reconciles.
    pub fn append(&mut self, delta: &str) -> ReconcileSummary {
        self.source.push_str(delta);
        let blocks = parse_blocks(&self.source);
        let result = self.reconciler.reconcile(&mut self.snapshot, blocks);
        apply_edits(&mut self.children, &result.edits);
        result.summary
    }

    /// Drops all content, returning to the created-empty state.
    pub fn reset(&mut self) {
        self.source.clear();
        self.snapshot.clear();
        self.children.clear();
    }

    /// Styles used for rendering. Changing the theme requires a new
    /// document (styles are baked into nodes at render time).
    pub fn theme(&self) -> &Theme {
        self.reconciler.renderer().theme()
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The mirrored visual node sequence, one node per top-level block.
    pub fn nodes(&self) -> &[VisualNode] {
        &self.children
    }

    /// Flattens all nodes into terminal lines, one blank line between
    /// blocks.
    pub fn lines(&self) -> Vec<Line<'static>> {
        let mut out = Vec::new();
        for (i, node) in self.children.iter().enumerate() {
            if i > 0 {
                out.push(Line::default());
            }
            out.extend(node.to_lines());
        }
        out
    }
}
