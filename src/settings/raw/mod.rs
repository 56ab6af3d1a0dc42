use std::env;
use std::path::PathBuf;

use anyhow::Result;
use serde::Deserialize;
use tries::app_dirs;

use crate::cli::CliArgs;

use super::resolved::{ConfigError, ConfigSources, ResolvedConfig, SettingSource};
use super::sources::env_var_for;
use super::util::{TRY_PATH_ENV, display_path, resolve_experiments_dir};

mod scoring;
mod ui;

use scoring::ScoringSection;
use ui::UiSection;

/// Mirror of the configuration file representation before CLI overrides and
/// validation are applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(super) struct RawConfig {
	experiments_dir: Option<PathBuf>,
	scoring: ScoringSection,
	ui: UiSection,
}

impl RawConfig {
	/// Apply CLI overrides on top of the raw configuration values.
	pub(super) fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		self.ui.apply_cli_overrides(cli);
	}

	/// Convert the raw configuration into a [`ResolvedConfig`], validating and
	/// filling defaults where required.
	pub(super) fn resolve(self, cli: &CliArgs) -> Result<ResolvedConfig> {
		let sources = ConfigSources {
			fuzzy_weight: detect_source(
				self.scoring.fuzzy_weight.is_some(),
				"scoring.fuzzy_weight",
			),
			recency_weight: detect_source(
				self.scoring.recency_weight.is_some(),
				"scoring.recency_weight",
			),
			length_bonus_weight: detect_source(
				self.scoring.length_bonus_weight.is_some(),
				"scoring.length_bonus_weight",
			),
			recency_window_days: detect_source(
				self.scoring.recency_window_days.is_some(),
				"scoring.recency_window_days",
			),
		};

		let home = app_dirs::home_dir();
		let configured = self
			.experiments_dir
			.map(|path| (path, configured_source("experiments_dir")));
		let (experiments_dir, experiments_dir_source) = resolve_experiments_dir(
			cli.path.as_deref(),
			env::var_os(TRY_PATH_ENV),
			configured,
			home.as_deref(),
		)?;
		if experiments_dir.exists() && !experiments_dir.is_dir() {
			return Err(ConfigError::invalid(
				"experiments_dir",
				experiments_dir.display().to_string(),
				experiments_dir_source,
				"must be a directory",
			)
			.into());
		}

		let scoring = self.scoring.resolve(&sources)?;
		let title = display_path(&experiments_dir, home.as_deref());

		Ok(ResolvedConfig {
			experiments_dir,
			experiments_dir_source,
			title,
			scoring,
			show_scores: self.ui.show_scores.unwrap_or(false),
		})
	}
}

fn detect_source(value_present: bool, key: &'static str) -> Option<SettingSource> {
	value_present.then(|| configured_source(key))
}

/// A set key came from its `TRIES__` variable if one exists, else a file.
fn configured_source(key: &'static str) -> SettingSource {
	let env_var = env_var_for(key);
	if env::var_os(&env_var).is_some() {
		SettingSource::Environment(env_var)
	} else {
		SettingSource::ConfigKey(key)
	}
}

#[cfg(test)]
mod tests;
