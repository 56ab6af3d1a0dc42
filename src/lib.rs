//! Application side of `tries`: the experiments directory, git and shell
//! helpers, and the terminal front end that drives a [`tries_core::Session`].
//!
//! Scoring and the selection state machine live in `tries-core`; this crate
//! supplies the collaborators that touch the filesystem, the terminal and
//! external processes.

pub mod app_dirs;
pub mod experiments;
pub mod git;
pub mod logging;
pub mod shell;
pub mod stats;
pub mod tui;

pub use experiments::{ConfirmingDeleter, ExperimentError, ExperimentStore};
pub use shell::Shell;
pub use tries_core::{Outcome, Ranker, ScoringConfig, ScoringError, Session};
