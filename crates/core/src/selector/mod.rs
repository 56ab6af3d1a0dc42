//! Interactive selection: the state machine and the collaborators it talks to.
//!
//! [`Selector`] owns the query buffer and cursor and turns [`SelectorEvent`]s
//! into [`Transition`]s. [`Session`] wraps it with the startup fast paths and
//! the frame/poll loop, reaching the outside world only through the traits
//! defined here so the whole flow can run headless in tests.

use std::io;
use std::path::Path;

use crate::candidate::Candidate;

mod session;
mod state;


pub use session::{AUTO_SELECT_THRESHOLD, Outcome, Session, SessionError};
pub use state::{Selector, SelectorView, Transition};

/// Discrete input understood by the selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorEvent {
	/// A printable character typed into the query.
	Char(char),
	/// Remove the last query character.
	Backspace,
	MoveUp,
	MoveDown,
	/// Choose the highlighted candidate.
	Confirm,
	/// Leave without choosing; also used for interrupts.
	Cancel,
	/// Ask the deletion collaborator to remove the highlighted candidate.
	Delete,
}

/// Supplies the candidate snapshot for a session.
pub trait CandidateSource {
	/// Capture the current candidates. Listing failures should be reported
	/// by the implementation and yield an empty snapshot.
	fn snapshot(&self) -> Vec<Candidate>;
}

/// Told about the candidate a session selected.
pub trait AccessRecorder {
	/// Mark `path` as recently used.
	fn record_access(&mut self, path: &Path) -> io::Result<()>;
}

/// Removes a candidate on the user's request.
pub trait DeletionHandler {
	/// Delete `candidate`, returning whether anything was removed.
	fn delete(&mut self, candidate: &Candidate) -> io::Result<bool>;
}

/// Draws selector frames.
pub trait Renderer {
	/// Number of result rows that currently fit on the display.
	fn rows(&mut self) -> io::Result<usize>;

	/// Draw one frame.
	fn render(&mut self, view: &SelectorView<'_>) -> io::Result<()>;

	/// Release the display so another collaborator can use it.
	fn suspend(&mut self) -> io::Result<()> {
		Ok(())
	}
}

/// Non-blocking source of selector input.
pub trait InputSource {
	/// Return the next event, or `None` when nothing is pending.
	fn poll(&mut self) -> io::Result<Option<SelectorEvent>>;
}

impl<T: CandidateSource + ?Sized> CandidateSource for &T {
	fn snapshot(&self) -> Vec<Candidate> {
		(**self).snapshot()
	}
}

impl<T: AccessRecorder + ?Sized> AccessRecorder for &mut T {
	fn record_access(&mut self, path: &Path) -> io::Result<()> {
		(**self).record_access(path)
	}
}

impl<T: DeletionHandler + ?Sized> DeletionHandler for &mut T {
	fn delete(&mut self, candidate: &Candidate) -> io::Result<bool> {
		(**self).delete(candidate)
	}
}
