use crate::model::Inline;
use ratatui::style::Modifier;
use ratatui::style::Style;
use streamdown_core::run::Run;
use streamdown_core::theme::Theme;

/// Flattens an inline tree into styled runs.
///
/// Output order mirrors the depth-first, left-to-right traversal of the
/// input. `base` is the enclosing block's style; emphasis scopes add
/// modifiers on top of it, code spans patch in the theme's inline-code
/// style, and generic containers flatten through unchanged.
pub fn render_inlines(inlines: &[Inline], base: Style, theme: &Theme) -> Vec<Run> {
    let mut runs = Vec::new();
    collect(inlines, base, theme, &mut runs);
    runs
}

fn collect(inlines: &[Inline], style: Style, theme: &Theme, out: &mut Vec<Run>) {
    for inline in inlines {
        match inline {
            Inline::Literal(text) => out.push(Run::text(text.clone(), style)),
            Inline::CodeSpan(text) => {
                out.push(Run::text(text.clone(), style.patch(theme.code_inline)));
            }
            Inline::Emphasis {
                delimiters,
                content,
            } => {
                let style = match delimiters {
                    1 => style.add_modifier(Modifier::ITALIC),
                    2 => style.add_modifier(Modifier::BOLD),
                    // Other delimiter counts are unmodeled and pass
                    // through with no added style.
                    _ => style,
                };
                collect(content, style, theme, out);
            }
            Inline::LineBreak => out.push(Run::Break),
            Inline::Container(children) => collect(children, style, theme, out),
        }
    }
}
