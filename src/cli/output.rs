use std::path::{Path, PathBuf};
use std::time::SystemTime;

use anyhow::Result;
use serde_json::json;
use tries::Shell;
use tries::stats::StatsReport;

use super::OutputFormat;

/// Where the caller's shell should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Navigation {
	/// An existing experiment picked in the selector.
	Selected(PathBuf),
	/// A directory created by this invocation.
	Created(PathBuf),
}

impl Navigation {
	fn path(&self) -> &Path {
		match self {
			Navigation::Selected(path) | Navigation::Created(path) => path,
		}
	}

	fn action(&self) -> &'static str {
		match self {
			Navigation::Selected(_) => "selected",
			Navigation::Created(_) => "created",
		}
	}
}

/// Format the navigation result as a JSON string.
pub(crate) fn format_navigation_json(navigation: &Navigation, shell: Shell) -> Result<String> {
	let path = navigation.path();
	let payload = json!({
		"action": navigation.action(),
		"path": path.display().to_string(),
		"command": shell.cd_command(path),
	});
	Ok(serde_json::to_string_pretty(&payload)?)
}

/// The text printed for `navigation`: a `cd` command, or the JSON payload.
pub(crate) fn format_navigation(
	navigation: &Navigation,
	shell: Shell,
	format: OutputFormat,
) -> Result<String> {
	match format {
		OutputFormat::Plain => Ok(shell.cd_command(navigation.path())),
		OutputFormat::Json => format_navigation_json(navigation, shell),
	}
}

/// Print the navigation result on stdout, where the shell function picks it up.
pub(crate) fn print_navigation(
	navigation: &Navigation,
	shell: Shell,
	format: OutputFormat,
) -> Result<()> {
	println!("{}", format_navigation(navigation, shell, format)?);
	Ok(())
}

pub(crate) fn print_stats(report: &StatsReport, format: OutputFormat) -> Result<()> {
	match format {
		OutputFormat::Plain => print!("{}", report.render_plain(SystemTime::now())),
		OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
	}
	Ok(())
}
