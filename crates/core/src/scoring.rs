//! Weighted blending of fuzzy, recency, and name-length signals.

use thiserror::Error;

use crate::recency::{DEFAULT_WINDOW_DAYS, RecencyScorer};

/// Largest bonus a very short name can earn before weighting.
pub const LENGTH_BONUS_MAX: f64 = 0.1;

/// Name length (in characters) at which the length bonus reaches zero.
pub const LENGTH_BONUS_SPAN: f64 = 50.0;

/// Errors raised while building a scoring configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ScoringError {
	/// A weight was negative, NaN, or infinite.
	#[error("{name} must be a finite, non-negative number (got {value})")]
	InvalidWeight { name: &'static str, value: f64 },

	/// The recency window was not a finite positive number of days.
	#[error("recency window must be a finite, positive number of days (got {days})")]
	InvalidWindow { days: f64 },
}

/// Tunable weights for the composite score.
///
/// Values are validated on construction, so a `ScoringConfig` in hand is
/// always usable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringConfig {
	fuzzy_weight: f64,
	recency_weight: f64,
	length_bonus_weight: f64,
	recency_window_days: f64,
}

impl Default for ScoringConfig {
	fn default() -> Self {
		Self {
			fuzzy_weight: 0.7,
			recency_weight: 0.3,
			length_bonus_weight: 0.1,
			recency_window_days: DEFAULT_WINDOW_DAYS,
		}
	}
}

impl ScoringConfig {
	/// Build a configuration with explicit weights and the default recency window.
	///
	/// # Errors
	///
	/// Returns [`ScoringError::InvalidWeight`] for any negative or non-finite weight.
	pub fn new(
		fuzzy_weight: f64,
		recency_weight: f64,
		length_bonus_weight: f64,
	) -> Result<Self, ScoringError> {
		Ok(Self {
			fuzzy_weight: check_weight("fuzzy_weight", fuzzy_weight)?,
			recency_weight: check_weight("recency_weight", recency_weight)?,
			length_bonus_weight: check_weight("length_bonus_weight", length_bonus_weight)?,
			recency_window_days: DEFAULT_WINDOW_DAYS,
		})
	}

	/// Replace the recency window.
	///
	/// # Errors
	///
	/// Returns [`ScoringError::InvalidWindow`] unless `days` is finite and positive.
	pub fn with_recency_window(self, days: f64) -> Result<Self, ScoringError> {
		let scorer = RecencyScorer::new(days)?;
		Ok(Self {
			recency_window_days: scorer.window_days(),
			..self
		})
	}

	#[must_use]
	pub fn fuzzy_weight(&self) -> f64 {
		self.fuzzy_weight
	}

	#[must_use]
	pub fn recency_weight(&self) -> f64 {
		self.recency_weight
	}

	#[must_use]
	pub fn length_bonus_weight(&self) -> f64 {
		self.length_bonus_weight
	}

	#[must_use]
	pub fn recency_window_days(&self) -> f64 {
		self.recency_window_days
	}

	/// Recency scorer matching this configuration's window.
	#[must_use]
	pub fn recency_scorer(&self) -> RecencyScorer {
		// The window was validated when it was set.
		RecencyScorer::new(self.recency_window_days).unwrap_or_default()
	}
}

fn check_weight(name: &'static str, value: f64) -> Result<f64, ScoringError> {
	if value.is_finite() && value >= 0.0 {
		Ok(value)
	} else {
		Err(ScoringError::InvalidWeight { name, value })
	}
}

/// Combines per-signal scores into the single value used for ranking.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompositeScorer {
	config: ScoringConfig,
}

impl CompositeScorer {
	#[must_use]
	pub fn new(config: ScoringConfig) -> Self {
		Self { config }
	}

	#[must_use]
	pub fn config(&self) -> &ScoringConfig {
		&self.config
	}

	/// Blend `fuzzy` and `recency` with the length bonus for `name_len`
	/// characters, clamped to `[0, 1]`.
	#[must_use]
	pub fn score(&self, fuzzy: f64, recency: f64, name_len: usize) -> f64 {
		let blended = fuzzy * self.config.fuzzy_weight
			+ recency * self.config.recency_weight
			+ length_bonus(name_len) * self.config.length_bonus_weight;
		blended.clamp(0.0, 1.0)
	}
}

/// Unweighted bonus rewarding short names, falling linearly to zero at
/// [`LENGTH_BONUS_SPAN`] characters.
#[must_use]
pub fn length_bonus(name_len: usize) -> f64 {
	LENGTH_BONUS_MAX * (1.0 - (name_len as f64 / LENGTH_BONUS_SPAN).min(1.0))
}
