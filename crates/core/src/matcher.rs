//! Case-insensitive subsequence matching of a query against a candidate name.
//!
//! The scan is leftmost-greedy: every query character binds to the first
//! unmatched occurrence in the name. That always finds *a* subsequence when
//! one exists, but not necessarily the one with the smallest gaps, so
//! `"rs"` against `"redis-rs"` binds the `s` of `redis` rather than the
//! trailing `rs`. Swapping in an optimal alignment only requires replacing
//! [`fuzzy_match`]; the ranker and selector consume the [`MatchResult`] as-is.

/// Score deducted per unmatched character between two matched positions.
pub const GAP_PENALTY_PER_CHAR: f64 = 0.01;

/// Upper bound on the total gap penalty.
pub const MAX_GAP_PENALTY: f64 = 0.5;

/// Bonus awarded when the first query character matches the first name character.
pub const START_BONUS: f64 = 0.1;

/// Bonus awarded when the match contains a contiguous run of [`CONTIGUOUS_RUN`].
pub const CONTIGUOUS_BONUS: f64 = 0.1;

/// Minimum run of adjacent matched positions that earns [`CONTIGUOUS_BONUS`].
pub const CONTIGUOUS_RUN: usize = 3;

/// Outcome of matching a query against one name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MatchResult {
	/// Match quality in `[0, 1]`; `0.0` means no match.
	pub score: f64,
	/// Strictly increasing character indices into the name, one per query character.
	pub positions: Vec<usize>,
}

impl MatchResult {
	/// The result of matching the empty query: a full match carrying no positions.
	#[must_use]
	pub fn trivial() -> Self {
		Self {
			score: 1.0,
			positions: Vec::new(),
		}
	}

	/// The result when the query is not a subsequence of the name.
	#[must_use]
	pub fn none() -> Self {
		Self::default()
	}

	/// Whether the query matched at all.
	#[must_use]
	pub fn is_match(&self) -> bool {
		self.score > 0.0
	}
}

/// Match `query` against `name`, ignoring case.
///
/// Positions are character (not byte) indices, so they line up with
/// `name.chars()` for highlighting.
#[must_use]
pub fn fuzzy_match(query: &str, name: &str) -> MatchResult {
	if query.is_empty() {
		return MatchResult::trivial();
	}
	if name.is_empty() {
		return MatchResult::none();
	}

	let needle: Vec<char> = query.chars().map(fold).collect();
	let mut positions = Vec::with_capacity(needle.len());
	let mut cursor = 0;

	for (idx, ch) in name.chars().enumerate() {
		if cursor == needle.len() {
			break;
		}
		if fold(ch) == needle[cursor] {
			positions.push(idx);
			cursor += 1;
		}
	}

	if cursor < needle.len() {
		return MatchResult::none();
	}

	let score = score_positions(&positions);
	MatchResult { score, positions }
}

/// Score a complete set of matched positions.
fn score_positions(positions: &[usize]) -> f64 {
	let gaps: usize = positions
		.windows(2)
		.map(|pair| pair[1] - pair[0] - 1)
		.sum();
	let mut score = 1.0 - (gaps as f64 * GAP_PENALTY_PER_CHAR).min(MAX_GAP_PENALTY);

	if positions.first() == Some(&0) {
		score += START_BONUS;
	}
	if longest_run(positions) >= CONTIGUOUS_RUN {
		score += CONTIGUOUS_BONUS;
	}

	score.clamp(0.0, 1.0)
}

/// Length of the longest run of positions that differ by exactly one.
fn longest_run(positions: &[usize]) -> usize {
	if positions.is_empty() {
		return 0;
	}

	let mut longest = 1;
	let mut current = 1;
	for pair in positions.windows(2) {
		if pair[1] == pair[0] + 1 {
			current += 1;
			longest = longest.max(current);
		} else {
			current = 1;
		}
	}
	longest
}

/// Fold a character for comparison, keeping a one-to-one mapping with the
/// name's characters.
fn fold(ch: char) -> char {
	ch.to_lowercase().next().unwrap_or(ch)
}
