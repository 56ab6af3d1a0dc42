//! Ranking of a candidate snapshot against a query.

use std::time::SystemTime;

use crate::candidate::{Candidate, RankedList, ScoredCandidate};
use crate::matcher::fuzzy_match;
use crate::recency::RecencyScorer;
use crate::scoring::{CompositeScorer, ScoringConfig};

/// Minimum composite score kept while the user is typing a query.
pub const ACTIVE_QUERY_MIN_SCORE: f64 = 0.1;

/// Minimum composite score kept when browsing with an empty query.
pub const BROWSE_MIN_SCORE: f64 = 0.0;

/// Minimum score policy for `query`.
///
/// An empty query matches everything with a fuzzy score of `1.0`, so the full
/// snapshot is shown and ordered mostly by recency. Once the user types, weak
/// matches are dropped to keep incremental results readable.
#[must_use]
pub fn min_score_for(query: &str) -> f64 {
	if query.is_empty() {
		BROWSE_MIN_SCORE
	} else {
		ACTIVE_QUERY_MIN_SCORE
	}
}

/// Scores and orders candidates using a fixed [`ScoringConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
	composite: CompositeScorer,
	recency: RecencyScorer,
}

impl Ranker {
	#[must_use]
	pub fn new(config: ScoringConfig) -> Self {
		Self {
			composite: CompositeScorer::new(config),
			recency: config.recency_scorer(),
		}
	}

	#[must_use]
	pub fn config(&self) -> &ScoringConfig {
		self.composite.config()
	}

	/// Score one candidate against `query` as of `now`.
	#[must_use]
	pub fn score(&self, query: &str, candidate: &Candidate, now: SystemTime) -> ScoredCandidate {
		let matched = fuzzy_match(query, &candidate.name);
		let recency = self.recency.score(candidate.modified, now);
		let score = self
			.composite
			.score(matched.score, recency, candidate.name_len());

		ScoredCandidate {
			candidate: candidate.clone(),
			fuzzy: matched.score,
			recency,
			score,
			positions: matched.positions,
		}
	}

	/// Rank `candidates` against `query` using the current time.
	#[must_use]
	pub fn rank(&self, query: &str, candidates: &[Candidate], min_score: f64) -> RankedList {
		self.rank_at(query, candidates, min_score, SystemTime::now())
	}

	/// Rank `candidates` against `query` with recency measured from `now`.
	///
	/// Entries scoring below `min_score` are dropped. The result is a pure
	/// function of the arguments.
	#[must_use]
	pub fn rank_at(
		&self,
		query: &str,
		candidates: &[Candidate],
		min_score: f64,
		now: SystemTime,
	) -> RankedList {
		let scored = candidates
			.iter()
			.map(|candidate| self.score(query, candidate, now))
			.filter(|entry| entry.score >= min_score)
			.collect();
		RankedList::from_unsorted(scored)
	}
}

#[cfg(test)]
mod tests {
	use std::time::Duration;

	use super::*;
	use crate::recency::SECONDS_PER_DAY;

	fn days_ago(now: SystemTime, days: f64) -> Option<SystemTime> {
		Some(now - Duration::from_secs_f64(days * SECONDS_PER_DAY))
	}

	fn snapshot(now: SystemTime) -> Vec<Candidate> {
		vec![
			Candidate::new("/t/2024-01-02-redis-server", "2024-01-02-redis-server", days_ago(now, 300.0)),
			Candidate::new("/t/redis-server", "redis-server", Some(now)),
			Candidate::new("/t/tokio-bench", "tokio-bench", days_ago(now, 2.0)),
			Candidate::new("/t/unreadable", "unreadable", None),
		]
	}

	#[test]
	fn fresh_exact_prefix_ranks_high() {
		let now = SystemTime::now();
		let ranked = Ranker::default().rank_at("redis", &snapshot(now), 0.1, now);
		let top = ranked.top().expect("results");
		assert_eq!(top.name(), "redis-server");
		assert!(top.score > 0.7);
		assert_eq!(top.fuzzy, 1.0);
	}

	#[test]
	fn entries_below_min_score_are_dropped() {
		let now = SystemTime::now();
		let candidates = snapshot(now);
		for min_score in [0.0, 0.1, 0.5, 0.9] {
			let ranked = Ranker::default().rank_at("rds", &candidates, min_score, now);
			assert!(ranked.iter().all(|entry| entry.score >= min_score));
		}
		let everything = Ranker::default().rank_at("zzz", &candidates, 0.0, now);
		assert_eq!(everything.len(), candidates.len());
	}

	#[test]
	fn unmatched_stale_candidates_fall_below_typing_threshold() {
		let now = SystemTime::now();
		let ranked = Ranker::default().rank_at("tokio", &snapshot(now), min_score_for("tokio"), now);
		let names: Vec<&str> = ranked.iter().map(ScoredCandidate::name).collect();
		assert_eq!(names.first(), Some(&"tokio-bench"));
		assert!(!names.contains(&"unreadable"));
	}

	#[test]
	fn empty_query_orders_by_recency() {
		let now = SystemTime::now();
		let ranked = Ranker::default().rank_at("", &snapshot(now), min_score_for(""), now);
		let names: Vec<&str> = ranked.iter().map(ScoredCandidate::name).collect();
		assert_eq!(
			names,
			["redis-server", "tokio-bench", "2024-01-02-redis-server", "unreadable"]
		);
		assert!(ranked.iter().all(|entry| entry.fuzzy == 1.0));
		assert!(ranked.iter().all(|entry| entry.positions.is_empty()));
	}

	#[test]
	fn missing_timestamp_only_zeroes_recency() {
		let now = SystemTime::now();
		let ranked = Ranker::default().rank_at("unread", &snapshot(now), 0.0, now);
		let entry = ranked
			.iter()
			.find(|entry| entry.name() == "unreadable")
			.expect("unreadable entry is still ranked");
		assert_eq!(entry.recency, 0.0);
		assert!(entry.fuzzy > 0.0);
	}

	#[test]
	fn ranking_is_deterministic() {
		let now = SystemTime::now();
		let candidates = snapshot(now);
		let ranker = Ranker::default();
		let first = ranker.rank_at("re", &candidates, 0.0, now);
		let second = ranker.rank_at("re", &candidates, 0.0, now);
		assert_eq!(first, second);
	}

	#[test]
	fn equal_scores_keep_snapshot_order() {
		let now = SystemTime::now();
		let candidates = vec![
			Candidate::new("/t/b", "same", Some(now)),
			Candidate::new("/t/a", "same", Some(now)),
		];
		let ranked = Ranker::default().rank_at("same", &candidates, 0.0, now);
		let paths: Vec<_> = ranked.iter().map(|entry| entry.candidate.path.clone()).collect();
		assert_eq!(paths, [std::path::PathBuf::from("/t/b"), std::path::PathBuf::from("/t/a")]);
	}

	#[test]
	fn custom_config_changes_order() {
		let now = SystemTime::now();
		// Scattered enough to hit the gap penalty cap with no bonuses.
		let loose = format!("xr{}e-d-i-s", "-".repeat(50));
		let candidates = vec![
			Candidate::new("/t/old-exact", "redis", days_ago(now, 360.0)),
			Candidate::new("/t/new-loose", loose.as_str(), Some(now)),
		];
		let fuzzy_first = Ranker::default().rank_at("redis", &candidates, 0.0, now);
		assert_eq!(fuzzy_first.top().map(ScoredCandidate::name), Some("redis"));
		assert_eq!(fuzzy_first[1].fuzzy, 0.5);

		let recency_first = Ranker::new(ScoringConfig::new(0.1, 0.9, 0.0).expect("valid"))
			.rank_at("redis", &candidates, 0.0, now);
		assert_eq!(recency_first.top().map(ScoredCandidate::name), Some(loose.as_str()));
	}
}
