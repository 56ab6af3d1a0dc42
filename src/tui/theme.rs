use ratatui::style::{Color, Modifier, Style};

/// Styles used by the selector frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
	pub header: Style,
	pub row_highlight: Style,
	pub prompt: Style,
	pub empty: Style,
	pub highlight: Style,
	pub muted: Style,
}

/// Slate palette.
pub const SLATE: Theme = Theme {
	header: Style::new()
		.fg(Color::Rgb(226, 232, 240))
		.add_modifier(Modifier::BOLD),
	row_highlight: Style::new()
		.bg(Color::Rgb(30, 41, 59))
		.fg(Color::Rgb(250, 204, 21)),
	prompt: Style::new().fg(Color::LightCyan),
	empty: Style::new().fg(Color::DarkGray),
	highlight: Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD),
	muted: Style::new().fg(Color::DarkGray),
};

impl Default for Theme {
	fn default() -> Self {
		SLATE
	}
}
