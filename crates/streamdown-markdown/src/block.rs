use crate::inline::render_inlines;
use crate::model::Block;
use crate::model::BlockKind;
use crate::model::Inline;
use crate::model::ListItem;
use ratatui::style::Style;
use streamdown_core::node::CodeNode;
use streamdown_core::node::ListItemNode;
use streamdown_core::node::ListNode;
use streamdown_core::node::NodeContent;
use streamdown_core::node::QuoteNode;
use streamdown_core::node::TextNode;
use streamdown_core::node::VisualNode;
use streamdown_core::run::Run;
use streamdown_core::theme::Theme;

/// Renders parsed blocks into visual nodes.
///
/// Rendering is pure and infallible: a block kind without a dedicated
/// visual degrades to an empty text node rather than erroring, so a
/// partially streamed document never interrupts its host.
#[derive(Clone, Debug)]
pub struct BlockRenderer {
    theme: Theme,
}

impl BlockRenderer {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Renders one block, recursing into nested blocks for list items and
    /// quote bodies.
    pub fn render(&self, block: &Block) -> VisualNode {
        match &block.kind {
            BlockKind::Paragraph(content) => self.text_node(content, self.theme.text_primary),
            BlockKind::Heading { content, .. } => self.text_node(content, self.theme.heading),
            BlockKind::List { ordered, items } => self.list_node(*ordered, items),
            BlockKind::Quote(children) => VisualNode::new(NodeContent::Quote(QuoteNode {
                accent: self.theme.quote_accent,
                children: children.iter().map(|b| self.render(b)).collect(),
            })),
            BlockKind::CodeFence { lines } => self.code_node(lines),
            BlockKind::Other => VisualNode::new(NodeContent::Text(TextNode::default())),
        }
    }

    fn text_node(&self, content: &[Inline], style: Style) -> VisualNode {
        VisualNode::new(NodeContent::Text(TextNode {
            runs: render_inlines(content, style, &self.theme),
            style,
        }))
    }

    fn list_node(&self, ordered: bool, items: &[ListItem]) -> VisualNode {
        let mut number = 1u64;
        let items = items
            .iter()
            .map(|item| {
                let marker = if ordered {
                    let marker = format!("{number}. ");
                    number += 1;
                    marker
                } else {
                    "• ".to_string()
                };
                ListItemNode {
                    marker: Run::text(marker, self.theme.text_primary),
                    children: item.blocks.iter().map(|b| self.render(b)).collect(),
                }
            })
            .collect();
        VisualNode::new(NodeContent::List(ListNode { items }))
    }

    fn code_node(&self, lines: &[String]) -> VisualNode {
        let text = lines
            .iter()
            .filter(|l| !l.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join("\n");
        VisualNode::new(NodeContent::Code(CodeNode {
            text: text.trim().to_string(),
            style: self.theme.code_block,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SourceKey;

    fn block(kind: BlockKind) -> Block {
        Block::new(SourceKey::new(0..0, ""), kind)
    }

    fn paragraph(text: &str) -> Block {
        block(BlockKind::Paragraph(vec![Inline::Literal(
            text.to_string(),
        )]))
    }

    #[test]
    fn headings_carry_the_heading_style() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::Heading {
            level: 1,
            content: vec![Inline::Literal("title".to_string())],
        }));
        let NodeContent::Text(text) = node.content() else {
            panic!("expected text node");
        };
        assert_eq!(text.style, renderer.theme().heading);
    }

    #[test]
    fn ordered_lists_count_markers_from_one() {
        let renderer = BlockRenderer::new(Theme::default());
        let items = vec![
            ListItem {
                blocks: vec![paragraph("a")],
            },
            ListItem {
                blocks: vec![paragraph("b")],
            },
            ListItem {
                blocks: vec![paragraph("c")],
            },
        ];
        let node = renderer.render(&block(BlockKind::List {
            ordered: true,
            items,
        }));
        let NodeContent::List(list) = node.content() else {
            panic!("expected list node");
        };
        let markers: Vec<&str> = list.items.iter().map(|i| i.marker.plain()).collect();
        assert_eq!(markers, vec!["1. ", "2. ", "3. "]);
    }

    #[test]
    fn unordered_lists_use_the_bullet_glyph() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::List {
            ordered: false,
            items: vec![ListItem {
                blocks: vec![paragraph("a")],
            }],
        }));
        let NodeContent::List(list) = node.content() else {
            panic!("expected list node");
        };
        assert_eq!(list.items[0].marker.plain(), "• ");
    }

    #[test]
    fn code_fences_join_non_empty_lines_and_trim() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::CodeFence {
            lines: vec![
                "a".to_string(),
                String::new(),
                "b".to_string(),
                "  ".to_string(),
            ],
        }));
        let NodeContent::Code(code) = node.content() else {
            panic!("expected code node");
        };
        assert_eq!(code.text, "a\nb");
    }

    #[test]
    fn empty_code_fences_render_an_empty_node() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::CodeFence { lines: Vec::new() }));
        let NodeContent::Code(code) = node.content() else {
            panic!("expected code node");
        };
        assert!(code.text.is_empty());
    }

    #[test]
    fn quotes_recurse_into_their_children() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::Quote(vec![
            paragraph("a"),
            paragraph("b"),
        ])));
        let NodeContent::Quote(quote) = node.content() else {
            panic!("expected quote node");
        };
        assert_eq!(quote.children.len(), 2);
    }

    #[test]
    fn unknown_blocks_render_as_empty_text() {
        let renderer = BlockRenderer::new(Theme::default());
        let node = renderer.render(&block(BlockKind::Other));
        let NodeContent::Text(text) = node.content() else {
            panic!("expected text node");
        };
        assert!(text.runs.is_empty());
    }
}
