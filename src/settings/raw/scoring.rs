use serde::Deserialize;
use tries::{ScoringConfig, ScoringError};

use super::super::resolved::{ConfigError, ConfigSources};

/// `[scoring]` table; unset keys keep the built-in weights.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct ScoringSection {
	pub(super) fuzzy_weight: Option<f64>,
	pub(super) recency_weight: Option<f64>,
	pub(super) length_bonus_weight: Option<f64>,
	pub(super) recency_window_days: Option<f64>,
}

impl ScoringSection {
	pub(super) fn resolve(&self, sources: &ConfigSources) -> Result<ScoringConfig, ConfigError> {
		let defaults = ScoringConfig::default();
		let config = ScoringConfig::new(
			self.fuzzy_weight.unwrap_or(defaults.fuzzy_weight()),
			self.recency_weight.unwrap_or(defaults.recency_weight()),
			self.length_bonus_weight
				.unwrap_or(defaults.length_bonus_weight()),
		)
		.map_err(|err| invalid(err, sources))?;

		match self.recency_window_days {
			Some(days) => config
				.with_recency_window(days)
				.map_err(|err| invalid(err, sources)),
			None => Ok(config),
		}
	}
}

fn invalid(err: ScoringError, sources: &ConfigSources) -> ConfigError {
	let (key, value, reason) = match err {
		ScoringError::InvalidWeight { name, value } => (
			weight_key(name),
			value,
			"must be a finite, non-negative number",
		),
		ScoringError::InvalidWindow { days } => (
			"scoring.recency_window_days",
			days,
			"must be a finite, positive number of days",
		),
	};
	ConfigError::invalid(key, value.to_string(), sources.source_for(key), reason)
}

fn weight_key(name: &str) -> &'static str {
	match name {
		"fuzzy_weight" => "scoring.fuzzy_weight",
		"recency_weight" => "scoring.recency_weight",
		"length_bonus_weight" => "scoring.length_bonus_weight",
		_ => "scoring",
	}
}
