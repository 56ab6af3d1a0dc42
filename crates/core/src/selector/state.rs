use std::time::SystemTime;

use tracing::trace;

use super::SelectorEvent;
use crate::candidate::{Candidate, RankedList, ScoredCandidate};
use crate::ranker::{Ranker, min_score_for};

/// Result of feeding one event to the [`Selector`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
	/// Still browsing; redraw and keep polling.
	Browsing,
	/// The user confirmed this candidate.
	Selected(Candidate),
	/// The user left without choosing.
	Cancelled,
	/// The user asked to delete this candidate. The session ends afterwards.
	DeleteRequested(Candidate),
}

/// What a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct SelectorView<'a> {
	/// Current query text.
	pub query: &'a str,
	/// Visible slice of the ranked list, as many entries as fit the display.
	pub entries: &'a [ScoredCandidate],
	/// Position of `entries[0]` in the full list.
	pub offset: usize,
	/// Index of the highlighted entry in the full list, `None` when there
	/// are no results.
	pub selected: Option<usize>,
	/// Length of the full ranked list.
	pub total: usize,
}

/// Query buffer, cursor, and ranked results for one browsing session.
///
/// The snapshot and the reference time for recency never change after
/// construction; every query edit re-ranks the snapshot from scratch.
#[derive(Debug, Clone)]
pub struct Selector {
	ranker: Ranker,
	snapshot: Vec<Candidate>,
	now: SystemTime,
	query: String,
	selected: usize,
	results: RankedList,
}

impl Selector {
	/// Start browsing `snapshot` with an empty query.
	#[must_use]
	pub fn new(ranker: Ranker, snapshot: Vec<Candidate>) -> Self {
		Self::with_query(ranker, snapshot, String::new())
	}

	/// Start browsing `snapshot` with `query` already typed.
	#[must_use]
	pub fn with_query(ranker: Ranker, snapshot: Vec<Candidate>, query: impl Into<String>) -> Self {
		Self::with_query_at(ranker, snapshot, query, SystemTime::now())
	}

	/// Like [`Selector::with_query`], measuring recency from `now` for the
	/// whole session.
	#[must_use]
	pub fn with_query_at(
		ranker: Ranker,
		snapshot: Vec<Candidate>,
		query: impl Into<String>,
		now: SystemTime,
	) -> Self {
		let mut selector = Self {
			ranker,
			snapshot,
			now,
			query: query.into(),
			selected: 0,
			results: RankedList::default(),
		};
		selector.rerank();
		selector
	}

	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	/// Index of the highlighted entry. Always `0` when there are no results.
	#[must_use]
	pub fn selected(&self) -> usize {
		self.selected
	}

	#[must_use]
	pub fn results(&self) -> &RankedList {
		&self.results
	}

	#[must_use]
	pub fn snapshot(&self) -> &[Candidate] {
		&self.snapshot
	}

	/// Reference time every ranking in this session is measured from.
	#[must_use]
	pub fn now(&self) -> SystemTime {
		self.now
	}

	/// The highlighted entry, if any.
	#[must_use]
	pub fn current(&self) -> Option<&ScoredCandidate> {
		self.results.get(self.selected)
	}

	/// Apply one input event.
	pub fn handle(&mut self, event: SelectorEvent) -> Transition {
		match event {
			SelectorEvent::Char(ch) => {
				self.query.push(ch);
				self.rerank();
			}
			SelectorEvent::Backspace => {
				if self.query.pop().is_some() {
					self.rerank();
				}
			}
			SelectorEvent::MoveUp => {
				self.selected = self.selected.saturating_sub(1);
			}
			SelectorEvent::MoveDown => {
				let last = self.results.len().saturating_sub(1);
				self.selected = (self.selected + 1).min(last);
			}
			SelectorEvent::Confirm => {
				if let Some(entry) = self.current() {
					return Transition::Selected(entry.candidate.clone());
				}
			}
			SelectorEvent::Cancel => return Transition::Cancelled,
			SelectorEvent::Delete => {
				if let Some(entry) = self.current() {
					return Transition::DeleteRequested(entry.candidate.clone());
				}
			}
		}
		Transition::Browsing
	}

	/// Frame contents for a display with room for `rows` results.
	///
	/// The window starts at the top of the list and only scrolls when the
	/// selection would otherwise fall below it.
	#[must_use]
	pub fn view(&self, rows: usize) -> SelectorView<'_> {
		let total = self.results.len();
		let offset = if rows == 0 {
			0
		} else {
			(self.selected + 1).saturating_sub(rows)
		};
		let end = offset.saturating_add(rows).min(total);
		let offset = offset.min(end);
		SelectorView {
			query: &self.query,
			entries: &self.results[offset..end],
			offset,
			selected: (total > 0).then_some(self.selected),
			total,
		}
	}

	fn rerank(&mut self) {
		self.results = self.ranker.rank_at(
			&self.query,
			&self.snapshot,
			min_score_for(&self.query),
			self.now,
		);
		self.selected = 0;
		trace!(query = %self.query, results = self.results.len(), "re-ranked snapshot");
	}
}
