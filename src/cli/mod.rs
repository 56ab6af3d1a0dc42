mod args;
mod output;

pub(crate) use args::{CliArgs, Command, OutputFormat, parse_cli};
#[cfg(test)]
pub(crate) use output::format_navigation;
pub(crate) use output::{Navigation, print_navigation, print_stats};
