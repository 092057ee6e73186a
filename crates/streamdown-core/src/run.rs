use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::text::Span;

/// One fragment of flattened inline output.
///
/// A run is either a styled piece of text or an explicit break marker. The
/// order of runs mirrors the depth-first, left-to-right traversal of the
/// inline tree they were flattened from.
#[derive(Clone, Debug, PartialEq)]
pub enum Run {
    Text(Span<'static>),
    /// Forces a line break in the flattened output.
    Break,
}

impl Run {
    pub fn text(content: impl Into<String>, style: Style) -> Self {
        Self::Text(Span::styled(content.into(), style))
    }

    /// The run's text without styling. Break markers are empty.
    pub fn plain(&self) -> &str {
        match self {
            Self::Text(span) => span.content.as_ref(),
            Self::Break => "",
        }
    }
}

/// Groups runs into lines, splitting at [`Run::Break`] markers.
///
/// Always yields at least one line; a trailing break yields a trailing
/// empty line. `base` becomes each line's base style, patched underneath
/// the individual span styles.
pub fn runs_to_lines(runs: &[Run], base: Style) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    for run in runs {
        match run {
            Run::Text(span) => current.push(span.clone()),
            Run::Break => lines.push(Line::from(std::mem::take(&mut current)).style(base)),
        }
    }
    lines.push(Line::from(current).style(base));
    lines
}
