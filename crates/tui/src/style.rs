//! Color palettes for the picker.

use ratatui::style::{Color, Modifier, Style};

/// Styles applied across the picker surface.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
	/// Prompt glyph and accents.
	pub prompt: Style,
	/// Regular result rows.
	pub row: Style,
	/// The highlighted result row.
	pub row_highlight: Style,
	/// Secondary text: placeholder, categories, empty message, spinner.
	pub muted: Style,
	/// Table header row.
	pub header: Style,
}

/// The palette used when no theme is configured.
#[must_use]
pub fn default_theme() -> Theme {
	by_name("dark").unwrap_or(DARK)
}

const DARK: Theme = Theme {
	prompt: Style::new().fg(Color::Cyan),
	row: Style::new(),
	row_highlight: Style::new()
		.fg(Color::Black)
		.bg(Color::Cyan)
		.add_modifier(Modifier::BOLD),
	muted: Style::new().fg(Color::DarkGray),
	header: Style::new().add_modifier(Modifier::BOLD),
};

const LIGHT: Theme = Theme {
	prompt: Style::new().fg(Color::Blue),
	row: Style::new().fg(Color::Black),
	row_highlight: Style::new()
		.fg(Color::White)
		.bg(Color::Blue)
		.add_modifier(Modifier::BOLD),
	muted: Style::new().fg(Color::Gray),
	header: Style::new().fg(Color::Black).add_modifier(Modifier::BOLD),
};

const BUILTINS: [(&str, Theme); 2] = [("dark", DARK), ("light", LIGHT)];

/// Look up a builtin theme by name.
#[must_use]
pub fn by_name(name: &str) -> Option<Theme> {
	BUILTINS
		.iter()
		.find(|(candidate, _)| *candidate == name)
		.map(|(_, theme)| *theme)
}

/// Names of every builtin theme.
#[must_use]
pub fn names() -> Vec<&'static str> {
	BUILTINS.iter().map(|(name, _)| *name).collect()
}
