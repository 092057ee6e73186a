use crate::run::Run;
use crate::run::runs_to_lines;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;
use std::sync::Arc;
use unicode_width::UnicodeWidthStr;

/// Handle to one rendered block primitive.
///
/// Nodes are built by a renderer and mirrored positionally between a
/// document snapshot and the host surface's child collection. Cloning is
/// cheap (the content is shared), and [`VisualNode::same_node`] tells the
/// two clones apart from a rebuilt node with identical content, which is
/// the hook hosts and tests use to observe reuse.
///
/// The reconciler treats nodes as opaque output values: it constructs and
/// replaces them but never looks inside. Only hosts inspect
/// [`VisualNode::content`] (or flatten with [`VisualNode::to_lines`]).
#[derive(Clone, Debug)]
pub struct VisualNode {
    inner: Arc<NodeContent>,
}

impl VisualNode {
    pub fn new(content: NodeContent) -> Self {
        Self {
            inner: Arc::new(content),
        }
    }

    pub fn content(&self) -> &NodeContent {
        &self.inner
    }

    /// Whether `self` and `other` are handles to the same rendered node,
    /// as opposed to equal-looking rebuilds.
    pub fn same_node(&self, other: &VisualNode) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Flattens the node into terminal lines.
    ///
    /// List items indent continuation lines under their marker; quote
    /// children get a leading accent bar; code lines carry the node's
    /// preformatted style.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        match self.content() {
            NodeContent::Text(text) => runs_to_lines(&text.runs, text.style),
            NodeContent::Code(code) => code
                .text
                .split('\n')
                .map(|l| Line::styled(l.to_string(), code.style))
                .collect(),
            NodeContent::List(list) => {
                let mut out = Vec::new();
                for item in &list.items {
                    flatten_list_item(item, &mut out);
                }
                out
            }
            NodeContent::Quote(quote) => {
                let mut out = Vec::new();
                for child in &quote.children {
                    for line in child.to_lines() {
                        let mut spans = vec![Span::styled("▌ ", quote.accent)];
                        spans.extend(line.spans);
                        out.push(Line::from(spans).style(line.style));
                    }
                }
                out
            }
        }
    }
}

impl PartialEq for VisualNode {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

/// Typed content behind a [`VisualNode`] handle.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeContent {
    /// Styled, wrappable text (paragraphs, headings, unknown blocks).
    Text(TextNode),
    /// Marker-prefixed entries, one per list item.
    List(ListNode),
    /// Children decorated with a leading accent border.
    Quote(QuoteNode),
    /// Preformatted fixed-width text.
    Code(CodeNode),
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct TextNode {
    pub runs: Vec<Run>,
    pub style: Style,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListNode {
    pub items: Vec<ListItemNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ListItemNode {
    pub marker: Run,
    pub children: Vec<VisualNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct QuoteNode {
    pub accent: Style,
    pub children: Vec<VisualNode>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct CodeNode {
    pub text: String,
    pub style: Style,
}

fn flatten_list_item(item: &ListItemNode, out: &mut Vec<Line<'static>>) {
    let marker = match &item.marker {
        Run::Text(span) => span.clone(),
        Run::Break => Span::raw(""),
    };
    let indent = " ".repeat(UnicodeWidthStr::width(marker.content.as_ref()));

    let mut child_lines = Vec::new();
    for child in &item.children {
        child_lines.extend(child.to_lines());
    }
    if child_lines.is_empty() {
        out.push(Line::from(vec![marker]));
        return;
    }

    for (i, line) in child_lines.into_iter().enumerate() {
        let prefix = if i == 0 {
            marker.clone()
        } else {
            Span::raw(indent.clone())
        };
        let mut spans = vec![prefix];
        spans.extend(line.spans);
        out.push(Line::from(spans).style(line.style));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run::Run;

    fn plain(line: &Line<'_>) -> String {
        line.spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect::<Vec<_>>()
            .join("")
    }

    #[test]
    fn clones_share_identity_but_rebuilds_do_not() {
        let a = VisualNode::new(NodeContent::Text(TextNode::default()));
        let b = a.clone();
        let c = VisualNode::new(NodeContent::Text(TextNode::default()));
        assert!(a.same_node(&b));
        assert!(!a.same_node(&c));
        assert_eq!(a, c);
    }

    #[test]
    fn list_items_indent_continuation_lines() {
        let para = VisualNode::new(NodeContent::Text(TextNode {
            runs: vec![
                Run::text("first", Style::default()),
                Run::Break,
                Run::text("second", Style::default()),
            ],
            style: Style::default(),
        }));
        let node = VisualNode::new(NodeContent::List(ListNode {
            items: vec![ListItemNode {
                marker: Run::text("1. ", Style::default()),
                children: vec![para],
            }],
        }));
        let lines = node.to_lines();
        assert_eq!(plain(&lines[0]), "1. first");
        assert_eq!(plain(&lines[1]), "   second");
    }

    #[test]
    fn quote_children_get_accent_prefix() {
        let para = VisualNode::new(NodeContent::Text(TextNode {
            runs: vec![Run::text("quoted", Style::default())],
            style: Style::default(),
        }));
        let node = VisualNode::new(NodeContent::Quote(QuoteNode {
            accent: Style::default(),
            children: vec![para],
        }));
        let lines = node.to_lines();
        assert_eq!(plain(&lines[0]), "▌ quoted");
    }

    #[test]
    fn empty_code_text_is_one_empty_line() {
        let node = VisualNode::new(NodeContent::Code(CodeNode {
            text: String::new(),
            style: Style::default(),
        }));
        let lines = node.to_lines();
        assert_eq!(lines.len(), 1);
        assert_eq!(plain(&lines[0]), "");
    }
}
