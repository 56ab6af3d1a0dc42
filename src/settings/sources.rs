use std::path::PathBuf;

use anyhow::{Result, anyhow};
use config::{Config, ConfigError, File};
use tracing::debug;
use tries::app_dirs;

use crate::cli::CliArgs;

/// Prefix of environment variables read as configuration keys,
/// e.g. `TRIES__SCORING__FUZZY_WEIGHT`.
pub(super) const ENV_PREFIX: &str = "TRIES";
pub(super) const ENV_SEPARATOR: &str = "__";

/// Build a [`Config`] instance by combining default locations with CLI overrides.
pub(super) fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			debug!(path = %path.display(), "considering config file");
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix(ENV_PREFIX)
			.separator(ENV_SEPARATOR)
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Default configuration files, lowest precedence first.
///
/// The legacy JSON file is read before `config.toml` so the newer file wins.
pub(super) fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Some(legacy) = app_dirs::legacy_config_file() {
		files.push(legacy);
	}

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	files
}

/// Name of the environment variable that sets `key`.
pub(super) fn env_var_for(key: &str) -> String {
	let suffix = key.replace('.', ENV_SEPARATOR).to_ascii_uppercase();
	format!("{ENV_PREFIX}{ENV_SEPARATOR}{suffix}")
}
