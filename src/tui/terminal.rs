use std::io::{self, Stderr};
use std::time::SystemTime;

use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
	self as crossterm_terminal, EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode,
	enable_raw_mode,
};
use tracing::debug;
use tries_core::{Renderer, SelectorView};

use super::render::{DrawOptions, draw, result_rows};

type Backend = CrosstermBackend<Stderr>;

/// Selector display on the alternate screen of stderr.
///
/// Stdout is left untouched for the shell to capture. The terminal is only
/// taken over on the first frame and is handed back on [`Renderer::suspend`]
/// or drop.
pub struct TerminalSurface {
	terminal: Option<Terminal<Backend>>,
	options: DrawOptions,
}

impl TerminalSurface {
	#[must_use]
	pub fn new(options: DrawOptions) -> Self {
		Self {
			terminal: None,
			options,
		}
	}

	fn enter(&mut self) -> io::Result<()> {
		if self.terminal.is_none() {
			enable_raw_mode()?;
			let terminal = undo_on_error(
				|| {
					let mut stderr = io::stderr();
					execute!(stderr, EnterAlternateScreen)?;
					let mut terminal = Terminal::new(CrosstermBackend::new(stderr))?;
					terminal.clear()?;
					Ok(terminal)
				},
				|| {
					let mut stderr = io::stderr();
					let _ = execute!(stderr, LeaveAlternateScreen);
					let _ = disable_raw_mode();
				},
			)?;
			debug!("entered selector screen");
			self.terminal = Some(terminal);
		}
		Ok(())
	}

	fn restore(&mut self) -> io::Result<()> {
		let Some(mut terminal) = self.terminal.take() else {
			return Ok(());
		};
		disable_raw_mode()?;
		execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
		terminal.show_cursor()?;
		debug!("left selector screen");
		Ok(())
	}
}

/// Run `setup`, calling `undo` before returning its error.
fn undo_on_error<T>(setup: impl FnOnce() -> io::Result<T>, undo: impl FnOnce()) -> io::Result<T> {
	setup().inspect_err(|_| undo())
}

impl Renderer for TerminalSurface {
	fn rows(&mut self) -> io::Result<usize> {
		let height = match &self.terminal {
			Some(terminal) => terminal.size()?.height,
			None => crossterm_terminal::size()?.1,
		};
		Ok(result_rows(height))
	}

	fn render(&mut self, view: &SelectorView<'_>) -> io::Result<()> {
		let now = SystemTime::now();
		self.enter()?;
		let Self { terminal, options } = self;
		if let Some(terminal) = terminal {
			terminal.draw(|frame| draw(frame, view, options, now))?;
		}
		Ok(())
	}

	fn suspend(&mut self) -> io::Result<()> {
		self.restore()
	}
}

impl Drop for TerminalSurface {
	fn drop(&mut self) {
		let _ = self.restore();
	}
}
