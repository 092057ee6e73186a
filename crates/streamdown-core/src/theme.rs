use ratatui::style::Style;

/// Style palette applied while rendering blocks into visual nodes.
///
/// Styles are baked into the produced nodes, so changing the theme requires
/// re-rendering (see `StreamingDocument::set_theme` in the markdown crate).
#[derive(Clone, Debug)]
pub struct Theme {
    pub text_primary: Style,
    pub text_muted: Style,
    pub heading: Style,
    pub code_inline: Style,
    pub code_block: Style,
    pub quote_accent: Style,
}

impl Default for Theme {
    fn default() -> Self {
        use ratatui::style::Stylize;

        Self {
            text_primary: Style::default(),
            text_muted: Style::default().dark_gray(),
            heading: Style::default().bold(),
            code_inline: Style::default().cyan(),
            code_block: Style::default().on_dark_gray(),
            quote_accent: Style::default().cyan(),
        }
    }
}
