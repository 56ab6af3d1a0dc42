use std::time::SystemTime;

use chrono::TimeDelta;
use chrono_humanize::HumanTime;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Cell, HighlightSpacing, Paragraph, Row, Table, TableState};
use tries_core::SelectorView;
use unicode_width::UnicodeWidthStr;

use super::highlight::highlight_line;
use super::theme::Theme;

pub(crate) const HIGHLIGHT_SYMBOL: &str = "▶ ";
const TABLE_COLUMN_SPACING: u16 = 1;
const AGE_WIDTH: u16 = 16;
const SCORE_WIDTH: u16 = 5;

/// Rows taken by the prompt, table header and footer.
pub const CHROME_ROWS: u16 = 3;

const KEY_HINTS: &str = "↑↓ move  enter open  ^D delete  esc cancel";

/// Number of result rows that fit a terminal `height` rows tall.
#[must_use]
pub fn result_rows(height: u16) -> usize {
	usize::from(height.saturating_sub(CHROME_ROWS))
}

/// Presentation settings for selector frames.
#[derive(Debug, Clone, Default)]
pub struct DrawOptions {
	/// Label shown before the query, usually the experiments directory.
	pub title: String,
	/// Show the composite score next to each entry.
	pub show_scores: bool,
	pub theme: Theme,
}

/// Draw one selector frame, with ages measured from `now`.
pub fn draw(frame: &mut Frame, view: &SelectorView<'_>, options: &DrawOptions, now: SystemTime) {
	let [prompt_area, results_area, footer_area] = Layout::vertical([
		Constraint::Length(1),
		Constraint::Min(1),
		Constraint::Length(1),
	])
	.areas(frame.area());

	render_prompt(frame, prompt_area, view.query, options);
	if view.entries.is_empty() {
		render_empty(frame, results_area, view, options);
	} else {
		render_results(frame, results_area, view, options, now);
	}
	render_footer(frame, footer_area, view, options);
}

fn render_prompt(frame: &mut Frame, area: Rect, query: &str, options: &DrawOptions) {
	let label = format!("{} › ", options.title);
	let cursor_x = area
		.x
		.saturating_add(u16::try_from(label.width() + query.width()).unwrap_or(u16::MAX))
		.min(area.right().saturating_sub(1));
	let line = Line::from(vec![
		Span::styled(label, options.theme.prompt),
		Span::raw(query.to_string()),
	]);
	frame.render_widget(Paragraph::new(line), area);
	frame.set_cursor_position(Position::new(cursor_x, area.y));
}

fn render_empty(frame: &mut Frame, area: Rect, view: &SelectorView<'_>, options: &DrawOptions) {
	let message = if view.query.is_empty() {
		"No experiments yet"
	} else {
		"No matches"
	};
	let [_, message_area] =
		Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).areas(area);
	let empty = Paragraph::new(message)
		.alignment(Alignment::Center)
		.style(options.theme.empty);
	frame.render_widget(empty, message_area);
}

fn render_results(
	frame: &mut Frame,
	area: Rect,
	view: &SelectorView<'_>,
	options: &DrawOptions,
	now: SystemTime,
) {
	let theme = &options.theme;
	let mut headers = vec!["Name", "Modified"];
	let mut widths = vec![Constraint::Fill(1), Constraint::Length(AGE_WIDTH)];
	if options.show_scores {
		headers.push("Score");
		widths.push(Constraint::Length(SCORE_WIDTH));
	}

	let score_width = if options.show_scores {
		SCORE_WIDTH + TABLE_COLUMN_SPACING
	} else {
		0
	};
	let fixed = AGE_WIDTH + TABLE_COLUMN_SPACING + score_width;
	let name_width = usize::from(
		area.width
			.saturating_sub(fixed)
			.saturating_sub(u16::try_from(HIGHLIGHT_SYMBOL.width()).unwrap_or(0)),
	);

	let rows = view.entries.iter().map(|entry| {
		let mut cells = vec![
			Cell::from(highlight_line(
				entry.name(),
				&entry.positions,
				Some(name_width),
				theme.highlight,
			)),
			Cell::from(Span::styled(format_age(entry.candidate.modified, now), theme.muted)),
		];
		if options.show_scores {
			cells.push(Cell::from(format!("{:.2}", entry.score)));
		}
		Row::new(cells)
	});

	let header = Row::new(headers.into_iter().map(Cell::from)).style(theme.header);
	let table = Table::new(rows, widths)
		.header(header)
		.column_spacing(TABLE_COLUMN_SPACING)
		.highlight_spacing(HighlightSpacing::Always)
		.row_highlight_style(theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL);

	let mut state =
		TableState::default().with_selected(view.selected.and_then(|index| index.checked_sub(view.offset)));
	frame.render_stateful_widget(table, area, &mut state);
}

fn render_footer(frame: &mut Frame, area: Rect, view: &SelectorView<'_>, options: &DrawOptions) {
	let count = format!("{}/{}", view.entries.len(), view.total);
	let [hints_area, count_area] = Layout::horizontal([
		Constraint::Fill(1),
		Constraint::Length(u16::try_from(count.width()).unwrap_or(u16::MAX)),
	])
	.areas(area);

	frame.render_widget(Paragraph::new(KEY_HINTS).style(options.theme.muted), hints_area);
	frame.render_widget(
		Paragraph::new(count)
			.alignment(Alignment::Right)
			.style(options.theme.muted),
		count_area,
	);
}

/// Relative age such as `3 days ago`, or `-` when unknown.
pub(crate) fn format_age(modified: Option<SystemTime>, now: SystemTime) -> String {
	let Some(modified) = modified else {
		return "-".to_string();
	};
	let elapsed = now.duration_since(modified).unwrap_or_default();
	let delta = TimeDelta::from_std(elapsed).unwrap_or_else(|_| TimeDelta::days(36_500));
	// A negative delta displays as "3 days ago", or "now" within a few seconds.
	HumanTime::from(-delta).to_string()
}
