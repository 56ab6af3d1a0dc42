use std::io;
use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tries_core::{InputSource, SelectorEvent};

/// How long one poll waits for a key before reporting idle.
pub const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Keyboard events from the controlling terminal.
#[derive(Debug, Clone, Copy)]
pub struct KeyboardInput {
	timeout: Duration,
}

impl Default for KeyboardInput {
	fn default() -> Self {
		Self {
			timeout: POLL_INTERVAL,
		}
	}
}

impl InputSource for KeyboardInput {
	fn poll(&mut self) -> io::Result<Option<SelectorEvent>> {
		if !event::poll(self.timeout)? {
			return Ok(None);
		}
		match event::read()? {
			Event::Key(key) => Ok(map_key(key)),
			_ => Ok(None),
		}
	}
}

/// Translate a key press into a selector event.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<SelectorEvent> {
	if key.kind == KeyEventKind::Release {
		return None;
	}

	if key.modifiers.contains(KeyModifiers::CONTROL) {
		return match key.code {
			KeyCode::Char('c') => Some(SelectorEvent::Cancel),
			KeyCode::Char('d') => Some(SelectorEvent::Delete),
			KeyCode::Char('p' | 'k') => Some(SelectorEvent::MoveUp),
			KeyCode::Char('n' | 'j') => Some(SelectorEvent::MoveDown),
			_ => None,
		};
	}

	match key.code {
		KeyCode::Esc => Some(SelectorEvent::Cancel),
		KeyCode::Enter => Some(SelectorEvent::Confirm),
		KeyCode::Backspace => Some(SelectorEvent::Backspace),
		KeyCode::Up => Some(SelectorEvent::MoveUp),
		KeyCode::Down => Some(SelectorEvent::MoveDown),
		KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::ALT) && !ch.is_control() => {
			Some(SelectorEvent::Char(ch))
		}
		_ => None,
	}
}
