use crate::model::Block;
use crate::model::BlockKind;
use crate::model::Inline;
use crate::model::ListItem;
use crate::model::SourceKey;
use pulldown_cmark::Event;
use pulldown_cmark::HeadingLevel;
use pulldown_cmark::Options;
use pulldown_cmark::Parser;
use pulldown_cmark::Tag;
use pulldown_cmark::TagEnd;
use std::ops::Range;

/// Parses markdown into the ordered top-level block sequence.
///
/// Never fails: malformed or partially streamed input yields a flatter or
/// more fragmented sequence, and structure without a dedicated block kind
/// (tables, rules, HTML blocks) parses to [`BlockKind::Other`]. Each block
/// is keyed by the source span the parser attributed to it.
pub fn parse_blocks(source: &str) -> Vec<Block> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    let mut events = Parser::new_ext(source, options).into_offset_iter();
    parse_sequence(source, &mut events, None)
}

fn parse_sequence<'a, I>(source: &str, events: &mut I, until: Option<TagEnd>) -> Vec<Block>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut out = Vec::new();
    while let Some((ev, span)) = events.next() {
        match ev {
            Event::End(end) if Some(end) == until => break,
            Event::Start(tag) => out.push(parse_block(tag, span, source, events)),
            Event::Rule | Event::Html(_) => out.push(Block::new(
                SourceKey::from_source(source, span),
                BlockKind::Other,
            )),
            _ => {}
        }
    }
    out
}

fn parse_block<'a, I>(tag: Tag<'a>, span: Range<usize>, source: &str, events: &mut I) -> Block
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let key = SourceKey::from_source(source, span);
    let kind = match tag {
        Tag::Paragraph => BlockKind::Paragraph(collect_inlines(events, TagEnd::Paragraph)),
        Tag::Heading { level, .. } => BlockKind::Heading {
            level: heading_level(level),
            content: collect_inlines(events, TagEnd::Heading(level)),
        },
        Tag::List(start) => parse_list(start.is_some(), source, events),
        Tag::BlockQuote(kind) => BlockKind::Quote(parse_sequence(
            source,
            events,
            Some(TagEnd::BlockQuote(kind)),
        )),
        Tag::CodeBlock(_) => BlockKind::CodeFence {
            lines: collect_code_lines(events),
        },
        _ => {
            skip_to_end(events);
            BlockKind::Other
        }
    };
    Block::new(key, kind)
}

fn parse_list<'a, I>(ordered: bool, source: &str, events: &mut I) -> BlockKind
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut items = Vec::new();
    while let Some((ev, _)) = events.next() {
        match ev {
            Event::Start(Tag::Item) => items.push(parse_list_item(source, events)),
            Event::End(TagEnd::List(_)) => break,
            _ => {}
        }
    }
    BlockKind::List { ordered, items }
}

// Tight list items carry their text directly, without a paragraph wrapper;
// such runs of inline events become an implicit paragraph block.
fn parse_list_item<'a, I>(source: &str, events: &mut I) -> ListItem
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut blocks = Vec::new();
    let mut tight: Vec<Inline> = Vec::new();
    let mut tight_span: Option<Range<usize>> = None;

    while let Some((ev, span)) = events.next() {
        match ev {
            Event::End(TagEnd::Item) => break,
            Event::Start(tag) if is_inline_container(&tag) => {
                extend_span(&mut tight_span, &span);
                tight.push(parse_inline_container(tag, events));
            }
            Event::Start(tag) => {
                flush_tight(source, &mut tight, &mut tight_span, &mut blocks);
                blocks.push(parse_block(tag, span, source, events));
            }
            other => {
                if let Some(inline) = leaf_inline(other) {
                    extend_span(&mut tight_span, &span);
                    tight.push(inline);
                }
            }
        }
    }
    flush_tight(source, &mut tight, &mut tight_span, &mut blocks);
    ListItem { blocks }
}

fn flush_tight(
    source: &str,
    tight: &mut Vec<Inline>,
    tight_span: &mut Option<Range<usize>>,
    blocks: &mut Vec<Block>,
) {
    if tight.is_empty() {
        return;
    }
    let span = tight_span.take().unwrap_or(0..0);
    blocks.push(Block::new(
        SourceKey::from_source(source, span),
        BlockKind::Paragraph(std::mem::take(tight)),
    ));
}

fn collect_inlines<'a, I>(events: &mut I, until: TagEnd) -> Vec<Inline>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut out = Vec::new();
    while let Some((ev, _)) = events.next() {
        match ev {
            Event::End(end) if end == until => break,
            Event::Start(tag) if is_inline_container(&tag) => {
                out.push(parse_inline_container(tag, events));
            }
            Event::Start(_) => skip_to_end(events),
            other => {
                if let Some(inline) = leaf_inline(other) {
                    out.push(inline);
                }
            }
        }
    }
    out
}

fn is_inline_container(tag: &Tag<'_>) -> bool {
    matches!(
        tag,
        Tag::Emphasis | Tag::Strong | Tag::Strikethrough | Tag::Link { .. } | Tag::Image { .. }
    )
}

fn parse_inline_container<'a, I>(tag: Tag<'a>, events: &mut I) -> Inline
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    match tag {
        Tag::Emphasis => Inline::Emphasis {
            delimiters: 1,
            content: collect_inlines(events, TagEnd::Emphasis),
        },
        Tag::Strong => Inline::Emphasis {
            delimiters: 2,
            content: collect_inlines(events, TagEnd::Strong),
        },
        Tag::Strikethrough => Inline::Container(collect_inlines(events, TagEnd::Strikethrough)),
        Tag::Link { .. } => Inline::Container(collect_inlines(events, TagEnd::Link)),
        Tag::Image { .. } => Inline::Container(collect_inlines(events, TagEnd::Image)),
        _ => Inline::Container(Vec::new()),
    }
}

fn leaf_inline(ev: Event<'_>) -> Option<Inline> {
    match ev {
        Event::Text(text) => Some(Inline::Literal(text.into_string())),
        Event::Code(code) => Some(Inline::CodeSpan(code.into_string())),
        // The renderer treats soft and hard breaks alike.
        Event::SoftBreak | Event::HardBreak => Some(Inline::LineBreak),
        Event::Html(html) | Event::InlineHtml(html) => Some(Inline::Literal(html.into_string())),
        Event::FootnoteReference(label) => Some(Inline::Literal(format!("[^{label}]"))),
        Event::TaskListMarker(checked) => Some(Inline::Literal(
            if checked { "[x] " } else { "[ ] " }.to_string(),
        )),
        _ => None,
    }
}

fn collect_code_lines<'a, I>(events: &mut I) -> Vec<String>
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    for (ev, _) in events.by_ref() {
        match ev {
            Event::End(TagEnd::CodeBlock) => break,
            Event::Text(text) => {
                for ch in text.chars() {
                    match ch {
                        '\n' => lines.push(std::mem::take(&mut current)),
                        '\r' => {}
                        other => current.push(other),
                    }
                }
            }
            _ => {}
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    if lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }
    lines
}

// Consumes events until the Start that was just taken is balanced by its
// matching End.
fn skip_to_end<'a, I>(events: &mut I)
where
    I: Iterator<Item = (Event<'a>, Range<usize>)>,
{
    let mut depth = 1usize;
    for (ev, _) in events.by_ref() {
        match ev {
            Event::Start(_) => depth += 1,
            Event::End(_) => {
                depth -= 1;
                if depth == 0 {
                    break;
                }
            }
            _ => {}
        }
    }
}

fn extend_span(acc: &mut Option<Range<usize>>, span: &Range<usize>) {
    match acc {
        Some(range) => {
            range.start = range.start.min(span.start);
            range.end = range.end.max(span.end);
        }
        None => *acc = Some(span.clone()),
    }
}

fn heading_level(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
