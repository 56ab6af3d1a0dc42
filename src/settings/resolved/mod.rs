use std::path::PathBuf;

use tries::ScoringConfig;

mod errors;
mod sources;
mod summary;

pub(crate) use errors::ConfigError;
pub(crate) use sources::{ConfigSources, SettingSource};

/// Application-ready configuration derived from user input, config files and
/// defaults.
#[derive(Debug, Clone)]
pub(crate) struct ResolvedConfig {
	pub(crate) experiments_dir: PathBuf,
	pub(crate) experiments_dir_source: SettingSource,
	/// Experiments directory as shown in the prompt, `~`-abbreviated.
	pub(crate) title: String,
	pub(crate) scoring: ScoringConfig,
	pub(crate) show_scores: bool,
}

impl ResolvedConfig {
	/// Print a human readable summary of the effective configuration to stderr.
	pub(crate) fn print_summary(&self) {
		eprint!("{}", summary::render_summary(self));
	}
}
