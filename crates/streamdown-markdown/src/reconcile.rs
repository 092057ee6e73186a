use crate::block::BlockRenderer;
use crate::model::Block;
use streamdown_core::node::VisualNode;
use streamdown_core::surface::SurfaceEdit;

/// The paired previous block sequence and previous visual node sequence,
/// carried between updates.
///
/// The two sequences are positionally aligned: `blocks().len() ==
/// nodes().len()` holds after every completed update. Created empty;
/// emptied again whenever the source text becomes empty.
#[derive(Clone, Debug, Default)]
pub struct DocumentSnapshot {
    blocks: Vec<Block>,
    nodes: Vec<VisualNode>,
}

impl DocumentSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn nodes(&self) -> &[VisualNode] {
        &self.nodes
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
        self.nodes.clear();
    }
}

/// Counts of what one reconcile pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    /// Positions whose previous visual node was kept unchanged.
    pub reused: usize,
    /// Positions whose visual node was rebuilt in place.
    pub rebuilt: usize,
    /// New trailing nodes rendered and appended.
    pub appended: usize,
    /// Trailing nodes dropped.
    pub truncated: usize,
}

impl ReconcileSummary {
    /// Whether the pass changed nothing (the idempotent case).
    pub fn is_noop(&self) -> bool {
        self.rebuilt == 0 && self.appended == 0 && self.truncated == 0
    }
}

/// Result of one reconcile pass: the surface edits in application order,
/// plus a summary of what happened.
#[derive(Clone, Debug, Default)]
pub struct Reconciled {
    pub edits: Vec<SurfaceEdit>,
    pub summary: ReconcileSummary,
}

/// Index-aligned reconciliation between the snapshot's block sequence and
/// a freshly parsed one.
///
/// This is deliberately not a general tree diff: the dominant workload is
/// monotonic text growth, so blocks are compared position by position via
/// their [`crate::model::SourceKey`]s. A block inserted mid-sequence makes
/// every following position compare unequal and rebuilds the tail, an
/// accepted cost for streamed input. Likewise, when an earlier block's
/// length changes, later spans shift and textually unchanged tails
/// rebuild; see [`crate::model::SourceKey`]. An implementation wanting
/// arbitrary-edit support would key blocks by content hash and run an
/// LCS-style list diff instead.
#[derive(Clone, Debug)]
pub struct Reconciler {
    renderer: BlockRenderer,
}

impl Reconciler {
    pub fn new(renderer: BlockRenderer) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &BlockRenderer {
        &self.renderer
    }

    /// Reconciles `snapshot` against `new_blocks`.
    ///
    /// Per shared index: equal keys keep the old node, unequal keys
    /// rebuild it in place. Extra trailing blocks render and append;
    /// missing trailing blocks truncate. Never fails: an empty input
    /// reconciles to an empty snapshot (and a truncate-to-zero edit).
    pub fn reconcile(&self, snapshot: &mut DocumentSnapshot, new_blocks: Vec<Block>) -> Reconciled {
        let mut edits = Vec::new();
        let mut summary = ReconcileSummary::default();

        let old_len = snapshot.blocks.len();
        let new_len = new_blocks.len();
        let shared = old_len.min(new_len);

        for index in 0..shared {
            if snapshot.blocks[index].key == new_blocks[index].key {
                summary.reused += 1;
                continue;
            }
            let node = self.renderer.render(&new_blocks[index]);
            snapshot.nodes[index] = node.clone();
            edits.push(SurfaceEdit::Replace { index, node });
            summary.rebuilt += 1;
        }

        for block in &new_blocks[shared..] {
            let node = self.renderer.render(block);
            snapshot.nodes.push(node.clone());
            edits.push(SurfaceEdit::Append { node });
            summary.appended += 1;
        }

        if new_len < old_len {
            snapshot.nodes.truncate(new_len);
            edits.push(SurfaceEdit::Truncate { len: new_len });
            summary.truncated = old_len - new_len;
        }

        snapshot.blocks = new_blocks;
        debug_assert_eq!(snapshot.blocks.len(), snapshot.nodes.len());

        Reconciled { edits, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BlockKind;
    use crate::model::Inline;
    use crate::model::SourceKey;
    use streamdown_core::theme::Theme;

    fn paragraph(span: std::ops::Range<usize>, text: &str) -> Block {
        Block::new(
            SourceKey::new(span, text),
            BlockKind::Paragraph(vec![Inline::Literal(text.to_string())]),
        )
    }

    fn reconciler() -> Reconciler {
        Reconciler::new(BlockRenderer::new(Theme::default()))
    }

    #[test]
    fn equal_keys_keep_the_old_node() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        r.reconcile(&mut snapshot, vec![paragraph(0..3, "one")]);
        let kept = snapshot.nodes()[0].clone();

        let result = r.reconcile(&mut snapshot, vec![paragraph(0..3, "one")]);
        assert!(result.summary.is_noop());
        assert_eq!(result.summary.reused, 1);
        assert!(result.edits.is_empty());
        assert!(snapshot.nodes()[0].same_node(&kept));
    }

    #[test]
    fn changed_key_rebuilds_in_place() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        r.reconcile(
            &mut snapshot,
            vec![paragraph(0..3, "one"), paragraph(5..8, "two")],
        );
        let kept = snapshot.nodes()[0].clone();

        let result = r.reconcile(
            &mut snapshot,
            vec![paragraph(0..3, "one"), paragraph(5..8, "TWO")],
        );
        assert_eq!(result.summary.rebuilt, 1);
        assert_eq!(result.summary.reused, 1);
        assert!(snapshot.nodes()[0].same_node(&kept));
        assert!(matches!(
            result.edits.as_slice(),
            [SurfaceEdit::Replace { index: 1, .. }]
        ));
    }

    #[test]
    fn trailing_growth_appends_in_order() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        r.reconcile(&mut snapshot, vec![paragraph(0..3, "one")]);

        let result = r.reconcile(
            &mut snapshot,
            vec![
                paragraph(0..3, "one"),
                paragraph(5..8, "two"),
                paragraph(10..15, "three"),
            ],
        );
        assert_eq!(result.summary.appended, 2);
        assert_eq!(result.summary.rebuilt, 0);
        assert_eq!(snapshot.len(), 3);
    }

    #[test]
    fn trailing_shrink_truncates() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        r.reconcile(
            &mut snapshot,
            vec![
                paragraph(0..3, "one"),
                paragraph(5..8, "two"),
                paragraph(10..15, "three"),
            ],
        );
        let kept = snapshot.nodes()[0].clone();

        let result = r.reconcile(&mut snapshot, vec![paragraph(0..3, "one")]);
        assert_eq!(result.summary.truncated, 2);
        assert_eq!(result.summary.reused, 1);
        assert_eq!(snapshot.len(), 1);
        assert!(snapshot.nodes()[0].same_node(&kept));
        assert!(matches!(
            result.edits.as_slice(),
            [SurfaceEdit::Truncate { len: 1 }]
        ));
    }

    #[test]
    fn empty_input_empties_the_snapshot() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        r.reconcile(&mut snapshot, vec![paragraph(0..3, "one")]);

        let result = r.reconcile(&mut snapshot, Vec::new());
        assert_eq!(result.summary.truncated, 1);
        assert!(snapshot.is_empty());
        assert!(snapshot.nodes().is_empty());
    }

    #[test]
    fn snapshot_sequences_stay_aligned() {
        let r = reconciler();
        let mut snapshot = DocumentSnapshot::new();
        for blocks in [
            vec![paragraph(0..3, "one")],
            vec![paragraph(0..3, "one"), paragraph(5..8, "two")],
            vec![paragraph(0..4, "ONE!"), paragraph(6..9, "two")],
            Vec::new(),
        ] {
            r.reconcile(&mut snapshot, blocks);
            assert_eq!(snapshot.blocks().len(), snapshot.nodes().len());
        }
    }
}
