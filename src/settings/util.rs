use std::ffi::OsString;
use std::path::{MAIN_SEPARATOR, Path, PathBuf};

use anyhow::{Context, Result};

use super::resolved::SettingSource;

/// Environment variable naming the experiments directory.
pub(super) const TRY_PATH_ENV: &str = "TRY_PATH";

/// Experiments directory relative to `$HOME` when nothing else is set.
const DEFAULT_EXPERIMENTS_DIR: &str = "src/tries";

/// Pick the experiments directory: `--path`, then `TRY_PATH`, then the
/// configured value, then `~/src/tries`.
pub(super) fn resolve_experiments_dir(
	cli_path: Option<&Path>,
	env_value: Option<OsString>,
	configured: Option<(PathBuf, SettingSource)>,
	home: Option<&Path>,
) -> Result<(PathBuf, SettingSource)> {
	let (path, source) = if let Some(path) = cli_path {
		(path.to_path_buf(), SettingSource::CliFlag("--path"))
	} else if let Some(value) = env_value.filter(|value| !value.is_empty()) {
		(
			PathBuf::from(value),
			SettingSource::Environment(TRY_PATH_ENV.to_string()),
		)
	} else if let Some(configured) = configured {
		configured
	} else {
		let home = home.context("cannot determine the home directory; set TRY_PATH or pass --path")?;
		return Ok((home.join(DEFAULT_EXPERIMENTS_DIR), SettingSource::Default));
	};

	Ok((expand_tilde(&path, home), source))
}

/// Replace a leading `~` component with `home`.
pub(super) fn expand_tilde(path: &Path, home: Option<&Path>) -> PathBuf {
	let (Some(home), Ok(rest)) = (home, path.strip_prefix("~")) else {
		return path.to_path_buf();
	};
	if rest.as_os_str().is_empty() {
		home.to_path_buf()
	} else {
		home.join(rest)
	}
}

/// Show `path` relative to `home` as `~/...` when it lives there.
pub(super) fn display_path(path: &Path, home: Option<&Path>) -> String {
	if let Some(rel) = home.and_then(|home| path.strip_prefix(home).ok()) {
		if rel.components().next().is_none() {
			return "~".to_string();
		}
		return format!("~{MAIN_SEPARATOR}{}", rel.display());
	}
	path.display().to_string()
}
