//! Linear time-decay scoring of last-modified timestamps.

use std::time::SystemTime;

use crate::scoring::ScoringError;

/// Seconds in one day.
pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Default length of the decay window.
pub const DEFAULT_WINDOW_DAYS: f64 = 365.0;

/// Maps a modification time onto `[0, 1]`, decaying linearly across a window.
///
/// A timestamp of "now" scores `1.0`; anything at or beyond the window edge
/// scores `0.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecencyScorer {
	window_days: f64,
}

impl Default for RecencyScorer {
	fn default() -> Self {
		Self {
			window_days: DEFAULT_WINDOW_DAYS,
		}
	}
}

impl RecencyScorer {
	/// Create a scorer decaying over `window_days`.
	///
	/// # Errors
	///
	/// Returns [`ScoringError::InvalidWindow`] unless the window is finite and positive.
	pub fn new(window_days: f64) -> Result<Self, ScoringError> {
		if !window_days.is_finite() || window_days <= 0.0 {
			return Err(ScoringError::InvalidWindow { days: window_days });
		}
		Ok(Self { window_days })
	}

	/// Length of the decay window in days.
	#[must_use]
	pub fn window_days(&self) -> f64 {
		self.window_days
	}

	/// Score `modified` relative to `now`.
	///
	/// A missing timestamp scores `0.0`. Timestamps ahead of `now` count as
	/// zero days old.
	#[must_use]
	pub fn score(&self, modified: Option<SystemTime>, now: SystemTime) -> f64 {
		let Some(modified) = modified else {
			return 0.0;
		};

		let seconds = now
			.duration_since(modified)
			.map(|elapsed| elapsed.as_secs_f64())
			.unwrap_or(0.0);
		let days = (seconds / SECONDS_PER_DAY).clamp(0.0, self.window_days);

		1.0 - days / self.window_days
	}
}
