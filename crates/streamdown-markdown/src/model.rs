use std::ops::Range;

/// One top-level structural unit of a parsed document.
///
/// Blocks are owned, read-only trees produced fresh by the parser on every
/// update; nothing in the pipeline mutates or aliases them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Block {
    pub key: SourceKey,
    pub kind: BlockKind,
}

impl Block {
    pub fn new(key: SourceKey, kind: BlockKind) -> Self {
        Self { key, kind }
    }
}

/// Identity of a block: the byte span it occupied in the source text plus
/// the text of that span.
///
/// Two blocks at the same sequence index are considered the same block iff
/// their keys are equal: same offsets, same text. This is positional
/// identity, not a content hash: when an earlier block grows or shrinks,
/// every later block's span shifts and its key changes even though its
/// text did not, so the tail is rebuilt. That trade favors the dominant
/// append-only streaming workload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SourceKey {
    pub span: Range<usize>,
    pub text: String,
}

impl SourceKey {
    pub fn new(span: Range<usize>, text: impl Into<String>) -> Self {
        Self {
            span,
            text: text.into(),
        }
    }

    /// Builds a key by slicing `source` at `span`. Out-of-range or
    /// non-boundary spans yield an empty-text key rather than failing.
    pub fn from_source(source: &str, span: Range<usize>) -> Self {
        let text = source.get(span.clone()).unwrap_or_default().to_string();
        Self { span, text }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph(Vec<Inline>),
    Heading { level: u8, content: Vec<Inline> },
    List { ordered: bool, items: Vec<ListItem> },
    Quote(Vec<Block>),
    CodeFence { lines: Vec<String> },
    /// Parsed structure with no dedicated rendering (tables, rules, HTML
    /// blocks). Occupies a sequence position and renders empty.
    Other,
}

/// One entry of a list block: an ordered sequence of child blocks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListItem {
    pub blocks: Vec<Block>,
}

/// One unit of text-level formatting inside a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Inline {
    Literal(String),
    CodeSpan(String),
    Emphasis { delimiters: u8, content: Vec<Inline> },
    LineBreak,
    /// Any inline kind not explicitly modeled (links, images,
    /// strikethrough). Children flatten through unchanged.
    Container(Vec<Inline>),
}
