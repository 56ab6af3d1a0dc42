//! The experiments directory: listing, touching, creating and deleting the
//! dated directories the selector works over.

use std::cmp::Ordering;
use std::fs::{self, File};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{Local, NaiveDate};
use ignore::WalkBuilder;
use thiserror::Error;
use tracing::{debug, warn};
use tries_core::{AccessRecorder, Candidate, CandidateSource, DeletionHandler};

/// `strftime` pattern for the date prefix of new experiments.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error)]
pub enum ExperimentError {
	#[error("experiment name `{0}` must not contain path separators")]
	InvalidName(String),

	#[error("failed to {action} {}", path.display())]
	Io {
		action: &'static str,
		path: PathBuf,
		#[source]
		source: io::Error,
	},
}

impl ExperimentError {
	fn io<'a>(action: &'static str, path: &'a Path) -> impl FnOnce(io::Error) -> Self + 'a {
		move |source| Self::Io {
			action,
			path: path.to_path_buf(),
			source,
		}
	}
}

/// Handle to the directory holding every experiment.
#[derive(Debug, Clone)]
pub struct ExperimentStore {
	root: PathBuf,
}

impl ExperimentStore {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	#[must_use]
	pub fn root(&self) -> &Path {
		&self.root
	}

	/// Immediate, non-hidden subdirectories, newest first.
	///
	/// A missing root yields an empty list. Entries whose metadata cannot be
	/// read are kept with no timestamp.
	pub fn list(&self) -> Result<Vec<Candidate>, ExperimentError> {
		if !self.root.is_dir() {
			debug!(root = %self.root.display(), "experiments directory does not exist yet");
			return Ok(Vec::new());
		}
		fs::read_dir(&self.root).map_err(ExperimentError::io("read", &self.root))?;

		let walker = WalkBuilder::new(&self.root)
			.max_depth(Some(1))
			.hidden(true)
			.ignore(false)
			.git_ignore(false)
			.git_global(false)
			.git_exclude(false)
			.parents(false)
			.follow_links(true)
			.build();

		let mut experiments = Vec::new();
		for entry in walker {
			let entry = match entry {
				Ok(entry) => entry,
				Err(err) => {
					warn!(error = %err, "skipping unreadable entry");
					continue;
				}
			};
			if entry.depth() == 0 || !entry.file_type().is_some_and(|kind| kind.is_dir()) {
				continue;
			}

			let name = entry.file_name().to_string_lossy().into_owned();
			let modified = entry.metadata().ok().and_then(|meta| meta.modified().ok());
			experiments.push(Candidate::new(entry.into_path(), name, modified));
		}

		experiments.sort_by(newest_first);
		Ok(experiments)
	}

	/// Create `YYYY-MM-DD-<name>` for today, or reuse it if it already exists.
	pub fn create(&self, name: &str) -> Result<PathBuf, ExperimentError> {
		self.create_on(name, Local::now().date_naive())
	}

	/// Create the experiment directory for `name` dated `date`.
	pub fn create_on(&self, name: &str, date: NaiveDate) -> Result<PathBuf, ExperimentError> {
		let path = self.root.join(dated_name(name, date)?);
		fs::create_dir_all(&path).map_err(ExperimentError::io("create", &path))?;
		debug!(path = %path.display(), "experiment ready");
		Ok(path)
	}

	/// Where today's experiment called `name` lives, without creating it.
	///
	/// Used when another tool (such as `git clone`) creates the directory.
	pub fn path_for(&self, name: &str) -> Result<PathBuf, ExperimentError> {
		Ok(self.root.join(dated_name(name, Local::now().date_naive())?))
	}

	/// Create the experiments directory itself if it is missing.
	pub fn ensure_root(&self) -> Result<(), ExperimentError> {
		fs::create_dir_all(&self.root).map_err(ExperimentError::io("create", &self.root))
	}

	/// Set the modification time of `path` to now.
	pub fn touch(&self, path: &Path) -> Result<(), ExperimentError> {
		let dir = File::open(path).map_err(ExperimentError::io("open", path))?;
		dir.set_modified(SystemTime::now())
			.map_err(ExperimentError::io("touch", path))
	}
}

impl CandidateSource for ExperimentStore {
	fn snapshot(&self) -> Vec<Candidate> {
		match self.list() {
			Ok(experiments) => experiments,
			Err(err) => {
				warn!(error = %err, "listing experiments failed");
				Vec::new()
			}
		}
	}
}

impl AccessRecorder for ExperimentStore {
	fn record_access(&mut self, path: &Path) -> io::Result<()> {
		self.touch(path).map_err(io::Error::other)
	}
}

/// Directory name for an experiment called `name` on `date`.
///
/// An empty name yields the bare date.
pub fn dated_name(name: &str, date: NaiveDate) -> Result<String, ExperimentError> {
	let name = name.trim();
	if name.contains(['/', '\\']) {
		return Err(ExperimentError::InvalidName(name.to_string()));
	}

	let prefix = date.format(DATE_FORMAT);
	Ok(if name.is_empty() {
		prefix.to_string()
	} else {
		format!("{prefix}-{name}")
	})
}

fn newest_first(a: &Candidate, b: &Candidate) -> Ordering {
	b.modified.cmp(&a.modified).then_with(|| a.name.cmp(&b.name))
}

/// Removes experiments after asking on the terminal.
#[derive(Debug, Default)]
pub struct ConfirmingDeleter;

impl ConfirmingDeleter {
	/// Ask whether `name` should be deleted, reading one line of answer.
	///
	/// Only `y` or `yes` (any case) confirms.
	pub fn confirm_with<R, W>(reader: &mut R, writer: &mut W, name: &str) -> io::Result<bool>
	where
		R: BufRead,
		W: Write,
	{
		write!(writer, "Delete {name}? [y/N]: ")?;
		writer.flush()?;

		let mut answer = String::new();
		reader.read_line(&mut answer)?;
		Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
	}
}

impl DeletionHandler for ConfirmingDeleter {
	fn delete(&mut self, candidate: &Candidate) -> io::Result<bool> {
		if !candidate.path.exists() {
			return Ok(false);
		}

		let confirmed = Self::confirm_with(
			&mut io::stdin().lock(),
			&mut io::stderr().lock(),
			&candidate.name,
		)?;
		if !confirmed {
			return Ok(false);
		}

		fs::remove_dir_all(&candidate.path)?;
		Ok(true)
	}
}

#[cfg(test)]
mod tests {
	use std::io::Cursor;
	use std::time::Duration;

	use tempfile::tempdir;

	use super::*;

	fn date() -> NaiveDate {
		NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date")
	}

	fn set_mtime(path: &Path, time: SystemTime) {
		File::open(path)
			.expect("open dir")
			.set_modified(time)
			.expect("set mtime");
	}

	#[test]
	fn dated_names_use_iso_prefix() {
		assert_eq!(dated_name("redis", date()).unwrap(), "2025-03-14-redis");
		assert_eq!(dated_name("  ", date()).unwrap(), "2025-03-14");
		assert!(matches!(
			dated_name("a/b", date()),
			Err(ExperimentError::InvalidName(_))
		));
	}

	#[test]
	fn missing_root_lists_nothing() {
		let dir = tempdir().unwrap();
		let store = ExperimentStore::new(dir.path().join("absent"));
		assert!(store.list().unwrap().is_empty());
		assert!(store.snapshot().is_empty());
	}

	#[test]
	fn listing_skips_files_and_hidden_dirs_and_sorts_newest_first() {
		let dir = tempdir().unwrap();
		let root = dir.path();
		for name in ["old", "new", "middle", ".hidden"] {
			fs::create_dir(root.join(name)).unwrap();
		}
		fs::write(root.join("notes.txt"), "not an experiment").unwrap();
		fs::create_dir(root.join("old").join("nested")).unwrap();

		let now = SystemTime::now();
		set_mtime(&root.join("old"), now - Duration::from_secs(3600));
		set_mtime(&root.join("middle"), now - Duration::from_secs(60));
		set_mtime(&root.join("new"), now);

		let names: Vec<String> = ExperimentStore::new(root)
			.list()
			.unwrap()
			.into_iter()
			.map(|candidate| candidate.name)
			.collect();
		assert_eq!(names, ["new", "middle", "old"]);
	}

	#[test]
	fn create_is_idempotent() {
		let dir = tempdir().unwrap();
		let store = ExperimentStore::new(dir.path().join("tries"));

		let first = store.create_on("redis", date()).unwrap();
		fs::write(first.join("keep.txt"), "data").unwrap();
		let second = store.create_on("redis", date()).unwrap();

		assert_eq!(first, second);
		assert!(second.join("keep.txt").exists());
		assert!(first.ends_with("2025-03-14-redis"));
	}

	#[test]
	fn io_failures_name_the_action_and_path() {
		let dir = tempdir().unwrap();
		let blocker = dir.path().join("tries");
		fs::write(&blocker, "not a directory").unwrap();
		let store = ExperimentStore::new(&blocker);

		let err = store.create_on("redis", date()).unwrap_err();
		assert!(matches!(err, ExperimentError::Io { action: "create", .. }));
		assert!(err.to_string().starts_with("failed to create "));
		assert!(err.to_string().contains("2025-03-14-redis"));
	}

	#[test]
	fn path_for_does_not_create_anything() {
		let dir = tempdir().unwrap();
		let store = ExperimentStore::new(dir.path().join("tries"));
		let path = store.path_for("clone-target").unwrap();
		assert!(path.starts_with(store.root()));
		assert!(path.file_name().unwrap().to_string_lossy().ends_with("-clone-target"));
		assert!(!store.root().exists());

		store.ensure_root().unwrap();
		assert!(store.root().is_dir());
		assert!(!path.exists());
	}

	#[test]
	fn record_access_bumps_mtime() {
		let dir = tempdir().unwrap();
		let mut store = ExperimentStore::new(dir.path());
		let target = store.create_on("stale", date()).unwrap();
		let long_ago = SystemTime::now() - Duration::from_secs(86_400 * 30);
		set_mtime(&target, long_ago);

		store.record_access(&target).unwrap();

		let modified = fs::metadata(&target).unwrap().modified().unwrap();
		assert!(modified > long_ago + Duration::from_secs(86_400));
	}

	#[test]
	fn record_access_on_missing_dir_fails() {
		let dir = tempdir().unwrap();
		let mut store = ExperimentStore::new(dir.path());
		assert!(store.record_access(&dir.path().join("gone")).is_err());
	}

	#[test]
	fn confirmation_requires_yes() {
		for (answer, expected) in [("y\n", true), ("YES\n", true), ("n\n", false), ("\n", false), ("", false)] {
			let mut out = Vec::new();
			let confirmed =
				ConfirmingDeleter::confirm_with(&mut Cursor::new(answer), &mut out, "2025-03-14-redis")
					.unwrap();
			assert_eq!(confirmed, expected, "{answer:?}");
			assert_eq!(String::from_utf8(out).unwrap(), "Delete 2025-03-14-redis? [y/N]: ");
		}
	}

	#[test]
	fn deleting_a_missing_experiment_is_a_no_op() {
		let candidate = Candidate::new("/definitely/not/here", "here", None);
		assert!(!ConfirmingDeleter.delete(&candidate).unwrap());
	}
}
