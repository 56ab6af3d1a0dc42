use std::mem;

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_truncate::UnicodeTruncateStr;
use unicode_width::UnicodeWidthStr;

const ELLIPSIS: &str = "…";

/// Build a line for `text` with the characters at `positions` styled as
/// `highlight`, truncated on the right to `max_width` columns.
///
/// `positions` are character indices into `text` in increasing order.
pub(crate) fn highlight_line(
	text: &str,
	positions: &[usize],
	max_width: Option<usize>,
	highlight: Style,
) -> Line<'static> {
	let (display, limit) = match max_width {
		Some(width) => truncate_right(text, width),
		None => (text.to_string(), usize::MAX),
	};

	let mut next = positions.iter().copied().filter(|&idx| idx < limit).peekable();
	if next.peek().is_none() {
		return Line::from(display);
	}

	let mut spans = Vec::new();
	let mut buffer = String::new();
	let mut highlighted = false;
	for (idx, ch) in display.chars().enumerate() {
		let hit = next.peek() == Some(&idx);
		if hit {
			next.next();
		}
		if hit != highlighted {
			if !buffer.is_empty() {
				spans.push(styled(mem::take(&mut buffer), highlighted, highlight));
			}
			highlighted = hit;
		}
		buffer.push(ch);
	}
	if !buffer.is_empty() {
		spans.push(styled(buffer, highlighted, highlight));
	}

	Line::from(spans)
}

fn styled(text: String, highlighted: bool, highlight: Style) -> Span<'static> {
	if highlighted {
		Span::styled(text, highlight)
	} else {
		Span::raw(text)
	}
}

/// Fit `text` into `max_width` columns, returning the display string and the
/// number of original characters it still shows.
fn truncate_right(text: &str, max_width: usize) -> (String, usize) {
	if text.width() <= max_width {
		return (text.to_string(), usize::MAX);
	}
	if max_width == 0 {
		return (String::new(), 0);
	}
	if max_width <= ELLIPSIS.width() {
		return (ELLIPSIS.to_string(), 0);
	}

	let (slice, _) = text.unicode_truncate(max_width - ELLIPSIS.width());
	(format!("{slice}{ELLIPSIS}"), slice.chars().count())
}

#[cfg(test)]
mod tests {
	use ratatui::style::{Color, Modifier};

	use super::*;

	fn hl() -> Style {
		Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD)
	}

	#[test]
	fn matched_characters_get_their_own_spans() {
		let line = highlight_line("redis-server", &[0, 2, 4], None, hl());
		let parts: Vec<(&str, bool)> = line
			.spans
			.iter()
			.map(|span| (span.content.as_ref(), span.style == hl()))
			.collect();
		assert_eq!(
			parts,
			[
				("r", true),
				("e", false),
				("d", true),
				("i", false),
				("s", true),
				("-server", false),
			]
		);
	}

	#[test]
	fn contiguous_matches_share_a_span() {
		let line = highlight_line("tokio-bench", &[0, 1, 2], None, hl());
		assert_eq!(line.spans.len(), 2);
		assert_eq!(line.spans[0].content, "tok");
		assert_eq!(line.spans[0].style, hl());
	}

	#[test]
	fn no_positions_yields_plain_text() {
		let line = highlight_line("plain", &[], None, hl());
		assert_eq!(line.spans.len(), 1);
		assert_eq!(line.spans[0].style, Style::default());
	}

	#[test]
	fn truncation_drops_hidden_positions() {
		let line = highlight_line("abcdefgh", &[1, 3, 6], Some(5), hl());
		let text: String = line.spans.iter().map(|span| span.content.as_ref()).collect();
		assert_eq!(text, "abcd…");
		let highlighted: Vec<&str> = line
			.spans
			.iter()
			.filter(|span| span.style == hl())
			.map(|span| span.content.as_ref())
			.collect();
		assert_eq!(highlighted, ["b", "d"]);
	}

	#[test]
	fn positions_are_character_indices() {
		let line = highlight_line("écart", &[0, 1], None, hl());
		assert_eq!(line.spans[0].content, "éc");
	}
}
