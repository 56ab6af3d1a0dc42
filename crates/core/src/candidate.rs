//! Candidate records and the ranked list produced from them.

use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// A single experiment directory as captured at the start of a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
	/// Identifier handed back to collaborators when the candidate is chosen.
	pub path: PathBuf,
	/// Name matched against the query and shown to the user.
	pub name: String,
	/// Last modification time, or `None` when the lookup failed.
	pub modified: Option<SystemTime>,
}

impl Candidate {
	/// Construct a candidate from its parts.
	pub fn new(path: impl Into<PathBuf>, name: impl Into<String>, modified: Option<SystemTime>) -> Self {
		Self {
			path: path.into(),
			name: name.into(),
			modified,
		}
	}

	/// Return the identifier of this candidate.
	#[must_use]
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Number of characters in the display name.
	#[must_use]
	pub fn name_len(&self) -> usize {
		self.name.chars().count()
	}
}

/// A candidate annotated with every score that contributed to its rank.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
	pub candidate: Candidate,
	/// Fuzzy match quality in `[0, 1]`.
	pub fuzzy: f64,
	/// Time-decay score in `[0, 1]`.
	pub recency: f64,
	/// Weighted blend used for ordering, always in `[0, 1]`.
	pub score: f64,
	/// Character indices of the name matched by the query.
	pub positions: Vec<usize>,
}

impl ScoredCandidate {
	/// Display name of the underlying candidate.
	#[must_use]
	pub fn name(&self) -> &str {
		&self.candidate.name
	}
}

/// Scored candidates ordered by descending composite score.
///
/// Ties keep the order in which candidates appeared in the snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RankedList {
	entries: Vec<ScoredCandidate>,
}

impl RankedList {
	/// Sort `entries` into rank order.
	pub(crate) fn from_unsorted(mut entries: Vec<ScoredCandidate>) -> Self {
		// `sort_by` is stable, which keeps snapshot order on equal scores.
		entries.sort_by(|a, b| b.score.total_cmp(&a.score));
		Self { entries }
	}

	/// Highest ranked entry, if any.
	#[must_use]
	pub fn top(&self) -> Option<&ScoredCandidate> {
		self.entries.first()
	}

	/// Consume the list, returning the ordered entries.
	#[must_use]
	pub fn into_vec(self) -> Vec<ScoredCandidate> {
		self.entries
	}
}

impl Deref for RankedList {
	type Target = [ScoredCandidate];

	fn deref(&self) -> &Self::Target {
		&self.entries
	}
}

impl<'a> IntoIterator for &'a RankedList {
	type Item = &'a ScoredCandidate;
	type IntoIter = std::slice::Iter<'a, ScoredCandidate>;

	fn into_iter(self) -> Self::IntoIter {
		self.entries.iter()
	}
}
