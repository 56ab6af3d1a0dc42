mod cli;
mod settings;
mod workflow;

use std::process::ExitCode;

use anyhow::Result;
use cli::parse_cli;
use tries::logging;
use workflow::Workflow;

fn main() -> Result<ExitCode> {
	let cli = parse_cli();

	if let Err(err) = logging::initialize(cli.verbose) {
		eprintln!("warning: logging disabled: {err:#}");
	}

	let resolved = settings::load(&cli)?;

	if cli.print_config {
		resolved.print_summary();
	}

	Workflow::new(resolved, cli.output).run(&cli)
}
