use std::io;

use thiserror::Error;
use tracing::{debug, info, warn};

use super::state::{Selector, Transition};
use super::{AccessRecorder, CandidateSource, DeletionHandler, InputSource, Renderer};
use crate::candidate::Candidate;
use crate::ranker::Ranker;

/// Fuzzy score at which an initial query auto-selects its top result.
pub const AUTO_SELECT_THRESHOLD: f64 = 0.99;

/// How a session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
	/// A candidate was chosen, either by the user or by the auto-select fast path.
	Selected(Candidate),
	/// The user cancelled, or asked for a deletion.
	Cancelled,
	/// The initial query matched nothing, so the loop was never entered.
	NoMatch,
}

impl Outcome {
	/// The chosen candidate, if any.
	#[must_use]
	pub fn into_selection(self) -> Option<Candidate> {
		match self {
			Self::Selected(candidate) => Some(candidate),
			Self::Cancelled | Self::NoMatch => None,
		}
	}
}

/// Failures of the display or input collaborators.
#[derive(Debug, Error)]
pub enum SessionError {
	#[error("failed to draw selector: {0}")]
	Render(#[source] io::Error),
	#[error("failed to read input: {0}")]
	Input(#[source] io::Error),
}

/// One selection lifecycle over a single candidate snapshot.
pub struct Session<S, A, D> {
	ranker: Ranker,
	source: S,
	recorder: A,
	deleter: D,
}

impl<S, A, D> Session<S, A, D>
where
	S: CandidateSource,
	A: AccessRecorder,
	D: DeletionHandler,
{
	pub fn new(ranker: Ranker, source: S, recorder: A, deleter: D) -> Self {
		Self {
			ranker,
			source,
			recorder,
			deleter,
		}
	}

	/// Run a session, starting from `initial_query`.
	///
	/// A non-empty initial query is ranked once before anything is drawn. If
	/// its top result is an exact-enough match it is selected straight away;
	/// if nothing matches at all the session ends with [`Outcome::NoMatch`].
	/// In both cases the renderer and input source are never touched.
	///
	/// # Errors
	///
	/// Returns [`SessionError`] when drawing or reading input fails. Failures
	/// of the access recorder or deletion handler are logged, not returned.
	pub fn run<R, I>(
		&mut self,
		initial_query: &str,
		renderer: &mut R,
		input: &mut I,
	) -> Result<Outcome, SessionError>
	where
		R: Renderer,
		I: InputSource,
	{
		let snapshot = self.source.snapshot();
		debug!(candidates = snapshot.len(), query = initial_query, "starting session");

		let mut selector = Selector::with_query(self.ranker, snapshot, initial_query);

		if !initial_query.is_empty() {
			match selector.results().top() {
				Some(top) if top.fuzzy >= AUTO_SELECT_THRESHOLD => {
					let chosen = top.candidate.clone();
					info!(path = %chosen.path.display(), fuzzy = top.fuzzy, "auto-selected exact match");
					self.record(&chosen);
					return Ok(Outcome::Selected(chosen));
				}
				Some(top) if top.fuzzy > 0.0 => {}
				_ => {
					info!(query = initial_query, "no candidate matches initial query");
					return Ok(Outcome::NoMatch);
				}
			}
		}

		loop {
			let rows = renderer.rows().map_err(SessionError::Render)?;
			renderer
				.render(&selector.view(rows))
				.map_err(SessionError::Render)?;

			let Some(event) = input.poll().map_err(SessionError::Input)? else {
				continue;
			};

			match selector.handle(event) {
				Transition::Browsing => {}
				Transition::Selected(chosen) => {
					info!(path = %chosen.path.display(), "selected");
					self.record(&chosen);
					return Ok(Outcome::Selected(chosen));
				}
				Transition::Cancelled => {
					debug!("session cancelled");
					return Ok(Outcome::Cancelled);
				}
				Transition::DeleteRequested(target) => {
					renderer.suspend().map_err(SessionError::Render)?;
					match self.deleter.delete(&target) {
						Ok(true) => info!(path = %target.path.display(), "deleted"),
						Ok(false) => debug!(path = %target.path.display(), "deletion declined"),
						Err(err) => {
							warn!(path = %target.path.display(), error = %err, "deletion failed");
						}
					}
					return Ok(Outcome::Cancelled);
				}
			}
		}
	}

	fn record(&mut self, chosen: &Candidate) {
		if let Err(err) = self.recorder.record_access(&chosen.path) {
			warn!(path = %chosen.path.display(), error = %err, "failed to record access");
		}
	}
}
