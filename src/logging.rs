//! File-backed `tracing` setup.
//!
//! The selector owns the terminal while it runs, so log output never goes to
//! stdout or stderr. Events are appended to `tries.log` in the data directory.

use std::env;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::app_dirs;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "TRIES_LOG";

const LOG_FILE: &str = "tries.log";

/// Install the global subscriber when logging was asked for.
///
/// Logging is enabled by `--verbose` or by setting [`LOG_ENV`]. Returns the
/// path of the log file when a subscriber was installed.
pub fn initialize(verbose: bool) -> Result<Option<PathBuf>> {
	let directive = env::var(LOG_ENV).ok().filter(|value| !value.trim().is_empty());
	if directive.is_none() && !verbose {
		return Ok(None);
	}

	let dir = app_dirs::get_data_dir()?;
	fs::create_dir_all(&dir)
		.with_context(|| format!("failed to create log directory {}", dir.display()))?;
	let path = dir.join(LOG_FILE);
	let file = OpenOptions::new()
		.create(true)
		.append(true)
		.open(&path)
		.with_context(|| format!("failed to open log file {}", path.display()))?;

	let filter = match directive {
		Some(directive) => EnvFilter::try_new(&directive)
			.with_context(|| format!("invalid {LOG_ENV} directive `{directive}`"))?,
		None => EnvFilter::new(default_directive(verbose)),
	};

	let file_layer = tracing_subscriber::fmt::layer()
		.with_writer(file)
		.with_ansi(false)
		.with_target(true);

	tracing_subscriber::registry()
		.with(filter)
		.with(file_layer)
		.try_init()
		.context("failed to install tracing subscriber")?;

	tracing::info!(path = %path.display(), "tracing initialized");
	Ok(Some(path))
}

fn default_directive(verbose: bool) -> &'static str {
	if verbose {
		"tries=debug,tries_core=debug"
	} else {
		"tries=info,tries_core=info"
	}
}
