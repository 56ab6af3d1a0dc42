//! Shell integration: detecting the user's shell, quoting the `cd` command
//! printed on selection, and the `init` snippet that evaluates it.

use std::env;
use std::fmt;
use std::path::Path;

use clap::ValueEnum;

/// Shells with a generated `try` function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
	Bash,
	Zsh,
	Fish,
}

impl fmt::Display for Shell {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(match self {
			Self::Bash => "bash",
			Self::Zsh => "zsh",
			Self::Fish => "fish",
		})
	}
}

impl Shell {
	/// Guess the shell from a `$SHELL` value or a parent process name.
	#[must_use]
	pub fn from_hint(hint: &str) -> Option<Self> {
		let name = Path::new(hint.trim())
			.file_name()
			.map(|name| name.to_string_lossy().to_ascii_lowercase())?;
		let name = name.trim_start_matches('-');
		if name.contains("fish") {
			Some(Self::Fish)
		} else if name.contains("zsh") {
			Some(Self::Zsh)
		} else if name.contains("bash") {
			Some(Self::Bash)
		} else {
			None
		}
	}

	/// Detect the invoking shell from `$SHELL`, then the parent process,
	/// falling back to bash.
	#[must_use]
	pub fn detect() -> Self {
		env::var("SHELL")
			.ok()
			.and_then(|value| Self::from_hint(&value))
			.or_else(|| parent_process_name().and_then(|name| Self::from_hint(&name)))
			.unwrap_or(Self::Bash)
	}

	/// Quote `path` so this shell reads it back as a single word.
	#[must_use]
	pub fn quote_path(self, path: &Path) -> String {
		let raw = path.to_string_lossy();
		if !raw.is_empty() && raw.chars().all(is_plain) && !raw.starts_with('~') {
			return raw.into_owned();
		}

		match self {
			Self::Bash | Self::Zsh => format!("'{}'", raw.replace('\'', r"'\''")),
			Self::Fish => format!("'{}'", raw.replace('\\', r"\\").replace('\'', r"\'")),
		}
	}

	/// Command that changes into `path`.
	#[must_use]
	pub fn cd_command(self, path: &Path) -> String {
		format!("cd {}", self.quote_path(path))
	}

	/// Function definition that runs `program` and evaluates its output.
	///
	/// Subcommands that only print information are passed straight through.
	#[must_use]
	pub fn init_script(self, program: &str) -> String {
		match self {
			Self::Bash | Self::Zsh => format!(
				r#"try() {{
	case "$1" in
		{PASSTHROUGH_POSIX})
			command {program} "$@"
			;;
		*)
			local output
			output=$(command {program} "$@") || return $?
			eval "$output"
			;;
	esac
}}
"#
			),
			Self::Fish => format!(
				r#"function try
	switch "$argv[1]"
		case {PASSTHROUGH_FISH}
			command {program} $argv
		case '*'
			set -l output (command {program} $argv)
			or return $status
			eval $output
	end
end
"#
			),
		}
	}
}

const PASSTHROUGH_POSIX: &str = "init|stats|help|-h|--help|-V|--version|-p|--print-config";
const PASSTHROUGH_FISH: &str = "init stats help -h --help -V --version -p --print-config";

fn is_plain(ch: char) -> bool {
	ch.is_ascii_alphanumeric() || matches!(ch, '/' | '.' | '_' | '-' | '+' | ',' | ':' | '@' | '%' | '~')
}

#[cfg(target_os = "linux")]
fn parent_process_name() -> Option<String> {
	let ppid = std::os::unix::process::parent_id();
	std::fs::read_to_string(format!("/proc/{ppid}/comm"))
		.ok()
		.map(|name| name.trim().to_string())
}

#[cfg(not(target_os = "linux"))]
fn parent_process_name() -> Option<String> {
	None
}
