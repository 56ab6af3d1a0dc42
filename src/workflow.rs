use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result, bail};
use tracing::info;
use tries::tui::{DrawOptions, KeyboardInput, TerminalSurface, Theme};
use tries::{ConfirmingDeleter, ExperimentStore, Outcome, Ranker, Session, Shell, git, stats};
use tries_core::{DeletionHandler, InputSource, Renderer};

use crate::cli::{CliArgs, Command, Navigation, OutputFormat, print_navigation, print_stats};
use crate::settings::ResolvedConfig;

/// Name the shell function invokes; also used in the generated `init` snippet.
const PROGRAM: &str = "tries";

/// Exit status when the selector is dismissed without a choice.
const CANCELLED: u8 = 1;

/// Runs one `tries` invocation against the resolved configuration.
pub(crate) struct Workflow {
	config: ResolvedConfig,
	store: ExperimentStore,
	format: OutputFormat,
}

impl Workflow {
	pub(crate) fn new(config: ResolvedConfig, format: OutputFormat) -> Self {
		let store = ExperimentStore::new(config.experiments_dir.clone());
		Self {
			config,
			store,
			format,
		}
	}

	pub(crate) fn run(&self, cli: &CliArgs) -> Result<ExitCode> {
		match &cli.command {
			None => self.browse(cli.query.as_deref().unwrap_or_default()),
			Some(Command::New { name }) => self.new_experiment(name.as_deref().unwrap_or_default()),
			Some(Command::Clone { url, name }) => self.clone_repository(url, name.as_deref()),
			Some(Command::Worktree { repo, name, branch }) => {
				self.add_worktree(repo, name.as_deref(), branch.as_deref())
			}
			Some(Command::Init { shell }) => {
				let shell = shell.unwrap_or_else(Shell::detect);
				print!("{}", shell.init_script(PROGRAM));
				Ok(ExitCode::SUCCESS)
			}
			Some(Command::Stats) => {
				let report = stats::collect(&self.store).with_context(|| {
					format!("failed to read {}", self.store.root().display())
				})?;
				print_stats(&report, self.format)?;
				Ok(ExitCode::SUCCESS)
			}
		}
	}

	/// Interactive selection, falling back to creating `query` when the
	/// selector ends without a choice.
	fn browse(&self, query: &str) -> Result<ExitCode> {
		let navigation = {
			let mut surface = TerminalSurface::new(DrawOptions {
				title: self.config.title.clone(),
				show_scores: self.config.show_scores,
				theme: Theme::default(),
			});
			self.select(
				query,
				&mut surface,
				&mut KeyboardInput::default(),
				ConfirmingDeleter,
			)?
		};
		self.finish(navigation)
	}

	/// Run one selector session and decide where the shell should go.
	///
	/// `None` means the user left without a choice and there is no query to
	/// fall back on.
	fn select<R, I, D>(
		&self,
		query: &str,
		renderer: &mut R,
		input: &mut I,
		deleter: D,
	) -> Result<Option<Navigation>>
	where
		R: Renderer,
		I: InputSource,
		D: DeletionHandler,
	{
		let mut session = Session::new(
			Ranker::new(self.config.scoring),
			self.store.clone(),
			self.store.clone(),
			deleter,
		);

		match session.run(query, renderer, input)? {
			Outcome::Selected(candidate) => Ok(Some(Navigation::Selected(candidate.path))),
			Outcome::NoMatch | Outcome::Cancelled if !query.is_empty() => {
				info!(query, "no experiment chosen; creating one");
				Ok(Some(Navigation::Created(self.create_experiment(query)?)))
			}
			Outcome::NoMatch | Outcome::Cancelled => Ok(None),
		}
	}

	fn finish(&self, navigation: Option<Navigation>) -> Result<ExitCode> {
		match navigation {
			Some(navigation) => {
				self.emit(&navigation)?;
				Ok(ExitCode::SUCCESS)
			}
			None => Ok(ExitCode::from(CANCELLED)),
		}
	}

	fn new_experiment(&self, name: &str) -> Result<ExitCode> {
		let path = self.create_experiment(name)?;
		self.finish(Some(Navigation::Created(path)))
	}

	fn create_experiment(&self, name: &str) -> Result<PathBuf> {
		self.store
			.create(name)
			.with_context(|| format!("failed to create experiment `{name}`"))
	}

	fn clone_repository(&self, url: &str, name: Option<&str>) -> Result<ExitCode> {
		let name = match name {
			Some(name) => name.to_string(),
			None => git::repo_name_from_url(url),
		};
		if name.is_empty() {
			bail!("cannot derive a directory name from `{url}`; pass --name");
		}

		let target = self.store.path_for(&name)?;
		self.store.ensure_root()?;
		eprintln!("Cloning {url}...");
		git::clone_repository(url, &target).with_context(|| format!("failed to clone {url}"))?;

		self.emit(&Navigation::Created(target))?;
		Ok(ExitCode::SUCCESS)
	}

	fn add_worktree(&self, repo: &Path, name: Option<&str>, branch: Option<&str>) -> Result<ExitCode> {
		let repo = fs::canonicalize(repo)
			.with_context(|| format!("invalid repository path {}", repo.display()))?;
		let name = match name {
			Some(name) => name.to_string(),
			None => repo
				.file_name()
				.map(|name| name.to_string_lossy().into_owned())
				.unwrap_or_default(),
		};

		let target = self.store.path_for(&name)?;
		self.store.ensure_root()?;
		eprintln!("Creating worktree in {}...", target.display());
		git::create_worktree(&repo, &target, branch).context("failed to create worktree")?;

		self.emit(&Navigation::Created(target))?;
		Ok(ExitCode::SUCCESS)
	}

	fn emit(&self, navigation: &Navigation) -> Result<()> {
		print_navigation(navigation, Shell::detect(), self.format)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::VecDeque;
	use std::io;
	use std::path::PathBuf;

	use tempfile::{TempDir, tempdir};
	use tries::ScoringConfig;
	use tries_core::{Candidate, SelectorEvent, SelectorView};

	use super::*;
	use crate::cli::format_navigation;
	use crate::settings::SettingSource;

	struct Frames(usize);

	impl Renderer for Frames {
		fn rows(&mut self) -> io::Result<usize> {
			Ok(10)
		}

		fn render(&mut self, _view: &SelectorView<'_>) -> io::Result<()> {
			self.0 += 1;
			Ok(())
		}
	}

	/// Replays events, then cancels.
	struct Keys(VecDeque<SelectorEvent>);

	impl Keys {
		fn new(events: &[SelectorEvent]) -> Self {
			Self(events.iter().copied().collect())
		}
	}

	impl InputSource for Keys {
		fn poll(&mut self) -> io::Result<Option<SelectorEvent>> {
			Ok(Some(self.0.pop_front().unwrap_or(SelectorEvent::Cancel)))
		}
	}

	#[derive(Default)]
	struct Deleted(Vec<PathBuf>);

	impl DeletionHandler for Deleted {
		fn delete(&mut self, candidate: &Candidate) -> io::Result<bool> {
			self.0.push(candidate.path.clone());
			Ok(true)
		}
	}

	fn workflow(experiments: &[&str]) -> (TempDir, Workflow) {
		let dir = tempdir().unwrap();
		let root = dir.path().join("tries");
		for name in experiments {
			fs::create_dir_all(root.join(name)).unwrap();
		}
		let config = ResolvedConfig {
			experiments_dir: root.clone(),
			experiments_dir_source: SettingSource::Default,
			title: root.display().to_string(),
			scoring: ScoringConfig::default(),
			show_scores: false,
		};
		(dir, Workflow::new(config, OutputFormat::Plain))
	}

	fn select(
		workflow: &Workflow,
		query: &str,
		events: &[SelectorEvent],
		frames: &mut Frames,
		deleted: &mut Deleted,
	) -> Option<Navigation> {
		workflow
			.select(query, frames, &mut Keys::new(events), deleted)
			.unwrap()
	}

	#[test]
	fn unmatched_query_creates_the_experiment() {
		let (_dir, workflow) = workflow(&["redis-server"]);
		let mut frames = Frames(0);

		let navigation = select(&workflow, "xyzzy", &[], &mut frames, &mut Deleted::default());

		let Some(Navigation::Created(path)) = navigation else {
			panic!("expected a created experiment, got {navigation:?}");
		};
		assert!(path.is_dir());
		assert!(path.starts_with(workflow.store.root()));
		assert!(path.file_name().unwrap().to_string_lossy().ends_with("-xyzzy"));
		assert_eq!(frames.0, 0);
	}

	#[test]
	fn confirmed_selection_becomes_a_cd_command() {
		let (_dir, workflow) = workflow(&["redis-server", "tokio-bench"]);
		let events = [
			SelectorEvent::Char('t'),
			SelectorEvent::Char('o'),
			SelectorEvent::Char('k'),
			SelectorEvent::Confirm,
		];

		let navigation = select(&workflow, "", &events, &mut Frames(0), &mut Deleted::default());

		let expected = workflow.store.root().join("tokio-bench");
		assert_eq!(navigation, Some(Navigation::Selected(expected.clone())));
		let printed = format_navigation(
			&Navigation::Selected(expected.clone()),
			Shell::Bash,
			OutputFormat::Plain,
		)
		.unwrap();
		assert_eq!(printed, Shell::Bash.cd_command(&expected));
		assert!(printed.starts_with("cd "));
	}

	#[test]
	fn cancelling_without_a_query_exits_with_status_one() {
		let (_dir, workflow) = workflow(&["redis-server"]);

		let navigation = select(&workflow, "", &[], &mut Frames(0), &mut Deleted::default());

		assert_eq!(navigation, None);
		let code = workflow.finish(navigation).unwrap();
		assert_eq!(format!("{code:?}"), format!("{:?}", ExitCode::from(CANCELLED)));
	}

	#[test]
	fn cancelling_with_a_query_creates_it() {
		let (_dir, workflow) = workflow(&["redis-server"]);
		let mut frames = Frames(0);

		// "esr" matches redis-server loosely, so the selector opens.
		let navigation = select(
			&workflow,
			"esr",
			&[SelectorEvent::Cancel],
			&mut frames,
			&mut Deleted::default(),
		);

		assert_eq!(frames.0, 1);
		let Some(Navigation::Created(path)) = navigation else {
			panic!("expected a created experiment, got {navigation:?}");
		};
		assert!(path.file_name().unwrap().to_string_lossy().ends_with("-esr"));
		assert!(path.is_dir());
	}

	#[test]
	fn delete_request_goes_to_the_deleter() {
		let (_dir, workflow) = workflow(&["redis-server"]);
		let mut deleted = Deleted::default();

		let navigation = select(
			&workflow,
			"",
			&[SelectorEvent::Delete],
			&mut Frames(0),
			&mut deleted,
		);

		assert_eq!(navigation, None);
		assert_eq!(deleted.0, [workflow.store.root().join("redis-server")]);
	}
}
