//! Resolve configuration and data directories for `tries`.
//!
//! Environment overrides win; otherwise the platform locations from the
//! `directories` crate are used.

use std::env;
use std::path::PathBuf;

use anyhow::{Result, anyhow};
use directories::{BaseDirs, ProjectDirs};

const QUALIFIER: &str = "io";
const ORGANIZATION: &str = "albo";
const APPLICATION: &str = "tries";

const CONFIG_DIR_ENV: &str = "TRIES_CONFIG_DIR";
const DATA_DIR_ENV: &str = "TRIES_DATA_DIR";

/// Directory name under `$HOME` used by earlier releases for `config.json`.
const LEGACY_DIR: &str = ".tries";

fn project_dirs() -> Result<ProjectDirs> {
	ProjectDirs::from(QUALIFIER, ORGANIZATION, APPLICATION)
		.ok_or_else(|| anyhow!("unable to determine project directories for tries"))
}

/// Read a directory override, treating an empty value as unset.
fn dir_from_env(name: &str) -> Option<PathBuf> {
	let value = env::var_os(name)?;
	if value.is_empty() {
		None
	} else {
		Some(PathBuf::from(value))
	}
}

/// Directory holding `config.toml`.
pub fn get_config_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(CONFIG_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.config_local_dir().to_path_buf())
}

/// Directory holding the log file.
pub fn get_data_dir() -> Result<PathBuf> {
	if let Some(dir) = dir_from_env(DATA_DIR_ENV) {
		return Ok(dir);
	}

	Ok(project_dirs()?.data_local_dir().to_path_buf())
}

/// The user's home directory, if one can be determined.
pub fn home_dir() -> Option<PathBuf> {
	BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Location of the legacy `~/.tries/config.json` file.
pub fn legacy_config_file() -> Option<PathBuf> {
	home_dir().map(|home| home.join(LEGACY_DIR).join("config.json"))
}
