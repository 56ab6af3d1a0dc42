use std::path::PathBuf;

use clap::{ArgAction, ColorChoice, Parser, Subcommand};
use tries::Shell;

use super::options::OutputFormat;
use super::styles::{cli_styles, long_version};

/// Command-line arguments accepted by the `tries` binary.
#[derive(Parser, Debug)]
#[command(
	name = "tries",
	version,
	long_version = long_version(),
	about = "Fuzzy navigator for dated experiment directories",
	color = ColorChoice::Auto,
	styles = cli_styles()
)]
pub(crate) struct CliArgs {
	#[command(subcommand)]
	pub(crate) command: Option<Command>,
	#[arg(
		value_name = "QUERY",
		help = "Initial query; creates a new experiment when nothing matches (default: empty)"
	)]
	pub(crate) query: Option<String>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "TRIES_CONFIG",
		action = ArgAction::Append,
		global = true,
		help = "Additional configuration file to merge (default: none)"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		global = true,
		help = "Skip loading default configuration files (default: disabled)"
	)]
	pub(crate) no_config: bool,
	#[arg(
		long,
		value_name = "DIR",
		global = true,
		help = "Experiments directory (default: $TRY_PATH or ~/src/tries)"
	)]
	pub(crate) path: Option<PathBuf>,
	#[arg(
		short = 's',
		long = "scores",
		help = "Show the score of every entry in the selector (default: disabled)"
	)]
	pub(crate) show_scores: bool,
	#[arg(
		short = 'p',
		long = "print-config",
		global = true,
		help = "Print the resolved configuration before running (default: disabled)"
	)]
	pub(crate) print_config: bool,
	#[arg(
		short = 'o',
		long = "output",
		value_enum,
		default_value_t = OutputFormat::Plain,
		global = true,
		help = "Choose how to print the result"
	)]
	pub(crate) output: OutputFormat,
	#[arg(
		short = 'v',
		long,
		global = true,
		help = "Write debug logs to the data directory (default: disabled)"
	)]
	pub(crate) verbose: bool,
}

/// Subcommands besides the interactive selector.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
	/// Create a dated experiment directory and print the command to enter it
	New {
		#[arg(value_name = "NAME", help = "Experiment name (default: date only)")]
		name: Option<String>,
	},
	/// Clone a git repository into a dated experiment directory
	Clone {
		#[arg(value_name = "URL")]
		url: String,
		#[arg(
			long,
			value_name = "NAME",
			help = "Experiment name (default: repository name)"
		)]
		name: Option<String>,
	},
	/// Add a git worktree of an existing repository as an experiment
	Worktree {
		#[arg(value_name = "REPO")]
		repo: PathBuf,
		#[arg(
			long,
			value_name = "NAME",
			help = "Experiment name (default: repository directory name)"
		)]
		name: Option<String>,
		#[arg(
			short,
			long,
			value_name = "BRANCH",
			help = "Branch or commit to check out (default: new branch named after the directory)"
		)]
		branch: Option<String>,
	},
	/// Print the shell function that lets `tries` change directory
	Init {
		#[arg(value_enum, help = "Target shell (default: detected from $SHELL)")]
		shell: Option<Shell>,
	},
	/// Summarise disk usage of the experiments directory
	Stats,
}
