//! Thin wrappers around the `git` executable.

use std::fmt::Write as _;
use std::io::{self, Read as _};
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

const REV_PARSE_TIMEOUT: Duration = Duration::from_secs(5);
const WORKTREE_TIMEOUT: Duration = Duration::from_secs(60);
const CLONE_TIMEOUT: Duration = Duration::from_secs(300);

#[derive(Debug, Error)]
pub enum GitError {
	#[error("failed to run `{command}`")]
	Spawn {
		command: String,
		#[source]
		source: io::Error,
	},

	#[error("`{command}` failed ({status}){}", stderr_suffix(.stderr))]
	Failed {
		command: String,
		status: String,
		stderr: String,
	},

	#[error("`{command}` did not finish within {}s", .timeout.as_secs())]
	TimedOut { command: String, timeout: Duration },

	#[error("{} is not a git repository", .0.display())]
	NotARepository(PathBuf),
}

fn stderr_suffix(stderr: &str) -> String {
	let trimmed = stderr.trim();
	if trimmed.is_empty() {
		String::new()
	} else {
		format!(": {trimmed}")
	}
}

/// Clone `url` into `target`.
pub fn clone_repository(url: &str, target: &Path) -> Result<(), GitError> {
	let mut command = Command::new("git");
	command.arg("clone").arg(url).arg(target);
	run(command, CLONE_TIMEOUT)
}

/// Add a worktree of `repo` at `target`, optionally checking out `branch`.
pub fn create_worktree(repo: &Path, target: &Path, branch: Option<&str>) -> Result<(), GitError> {
	if !is_git_repository(repo) {
		return Err(GitError::NotARepository(repo.to_path_buf()));
	}

	let mut command = Command::new("git");
	command.arg("-C").arg(repo).args(["worktree", "add"]).arg(target);
	if let Some(branch) = branch {
		command.arg(branch);
	}
	run(command, WORKTREE_TIMEOUT)
}

/// Whether `path` is inside a git repository.
pub fn is_git_repository(path: &Path) -> bool {
	let mut command = Command::new("git");
	command.arg("-C").arg(path).args(["rev-parse", "--git-dir"]);
	run(command, REV_PARSE_TIMEOUT).is_ok()
}

/// Directory name for a clone of `url`: the last path segment without `.git`.
///
/// Handles both URL and scp-like (`git@host:owner/repo.git`) forms.
pub fn repo_name_from_url(url: &str) -> String {
	let trimmed = url.trim().trim_end_matches('/');
	let last = trimmed
		.rsplit(['/', ':'])
		.next()
		.unwrap_or(trimmed);
	last.strip_suffix(".git").unwrap_or(last).to_string()
}

/// Run `command` to completion, killing it once `timeout` elapses.
///
/// Stdin and stdout are detached; stderr is drained on a separate thread so a
/// chatty child cannot block on a full pipe.
fn run(mut command: Command, timeout: Duration) -> Result<(), GitError> {
	let rendered = render(&command);
	debug!(command = %rendered, ?timeout, "running git");

	command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::piped());
	let mut child = command.spawn().map_err(|source| GitError::Spawn {
		command: rendered.clone(),
		source,
	})?;

	let pipe = child.stderr.take();
	let reader = thread::spawn(move || {
		let mut stderr = String::new();
		if let Some(mut pipe) = pipe {
			let _ = pipe.read_to_string(&mut stderr);
		}
		stderr
	});

	let waited = child.wait_timeout(timeout).map_err(|source| GitError::Spawn {
		command: rendered.clone(),
		source,
	})?;
	let Some(status) = waited else {
		// Grandchildren may still hold the stderr pipe, so the reader is left detached.
		let _ = child.kill();
		let _ = child.wait();
		warn!(command = %rendered, ?timeout, "git timed out");
		return Err(GitError::TimedOut { command: rendered, timeout });
	};

	if status.success() {
		return Ok(());
	}
	Err(GitError::Failed {
		command: rendered,
		status: status.to_string(),
		stderr: reader.join().unwrap_or_default(),
	})
}

fn render(command: &Command) -> String {
	let mut rendered = command.get_program().to_string_lossy().into_owned();
	for arg in command.get_args() {
		let _ = write!(rendered, " {}", arg.to_string_lossy());
	}
	rendered
}

#[cfg(test)]
mod tests {
	use tempfile::tempdir;

	use super::*;

	#[test]
	fn repo_names_strip_git_suffix_and_slashes() {
		assert_eq!(repo_name_from_url("https://github.com/tokio-rs/tokio.git"), "tokio");
		assert_eq!(repo_name_from_url("https://github.com/tokio-rs/tokio/"), "tokio");
		assert_eq!(repo_name_from_url("git@github.com:tokio-rs/mio.git"), "mio");
		assert_eq!(repo_name_from_url("git@host:bare.git"), "bare");
		assert_eq!(repo_name_from_url("../local/repo"), "repo");
	}

	#[test]
	fn commands_render_for_messages() {
		let mut command = Command::new("git");
		command.args(["-C", "/tmp/repo", "worktree", "add", "/tmp/wt"]);
		assert_eq!(render(&command), "git -C /tmp/repo worktree add /tmp/wt");
	}

	#[test]
	fn failure_message_includes_stderr() {
		let err = GitError::Failed {
			command: "git clone x y".into(),
			status: "exit status: 128".into(),
			stderr: "fatal: repository 'x' does not exist\n".into(),
		};
		assert_eq!(
			err.to_string(),
			"`git clone x y` failed (exit status: 128): fatal: repository 'x' does not exist"
		);
	}

	#[cfg(unix)]
	#[test]
	fn slow_commands_are_killed_at_the_timeout() {
		let mut command = Command::new("sleep");
		command.arg("5");

		let started = std::time::Instant::now();
		let err = run(command, Duration::from_millis(100)).unwrap_err();

		assert!(started.elapsed() < Duration::from_secs(4));
		assert!(matches!(err, GitError::TimedOut { ref command, .. } if command == "sleep 5"));
	}

	#[cfg(unix)]
	#[test]
	fn failing_commands_report_their_stderr() {
		let mut command = Command::new("sh");
		command.args(["-c", "echo boom >&2; exit 3"]);

		let err = run(command, Duration::from_secs(5)).unwrap_err();
		let GitError::Failed { stderr, .. } = err else {
			panic!("expected a failure, got {err:?}");
		};
		assert_eq!(stderr.trim(), "boom");
	}

	#[test]
	fn timeout_message_names_the_limit() {
		let err = GitError::TimedOut {
			command: "git clone x y".into(),
			timeout: CLONE_TIMEOUT,
		};
		assert_eq!(err.to_string(), "`git clone x y` did not finish within 300s");
	}

	#[test]
	fn worktree_requires_a_repository() {
		let dir = tempdir().unwrap();
		let err = create_worktree(dir.path(), &dir.path().join("wt"), None).unwrap_err();
		assert!(matches!(err, GitError::NotARepository(_)));
	}
}
