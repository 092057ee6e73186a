use crate::node::VisualNode;

/// Positional child-collection operations a host surface supports.
///
/// The reconciler expresses its result as [`SurfaceEdit`]s against this
/// contract; any ordered child collection qualifies. `Vec<VisualNode>`
/// implements it directly and is what the built-in streaming view uses.
pub trait Surface {
    fn replace(&mut self, index: usize, node: VisualNode);
    fn append(&mut self, node: VisualNode);
    fn truncate(&mut self, len: usize);
}

impl Surface for Vec<VisualNode> {
    fn replace(&mut self, index: usize, node: VisualNode) {
        if let Some(slot) = self.get_mut(index) {
            *slot = node;
        }
    }

    fn append(&mut self, node: VisualNode) {
        self.push(node);
    }

    fn truncate(&mut self, len: usize) {
        Vec::truncate(self, len);
    }
}

/// One reconciliation edit, in application order.
#[derive(Clone, Debug)]
pub enum SurfaceEdit {
    Replace { index: usize, node: VisualNode },
    Append { node: VisualNode },
    Truncate { len: usize },
}

/// Applies edits to a surface, in order.
pub fn apply_edits<S: Surface>(surface: &mut S, edits: &[SurfaceEdit]) {
    for edit in edits {
        match edit {
            SurfaceEdit::Replace { index, node } => surface.replace(*index, node.clone()),
            SurfaceEdit::Append { node } => surface.append(node.clone()),
            SurfaceEdit::Truncate { len } => surface.truncate(*len),
        }
    }
}
