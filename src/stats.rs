//! Disk usage and age summary of the experiments directory.

use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use chrono_humanize::HumanTime;
use ignore::WalkBuilder;
use serde_json::{Value, json};
use tracing::warn;

use crate::experiments::{ExperimentError, ExperimentStore};

/// Number of experiments listed in the size table.
pub const TOP_BY_SIZE: usize = 10;

const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentUsage {
	pub name: String,
	pub path: PathBuf,
	pub size_bytes: u64,
	pub modified: Option<SystemTime>,
}

/// Aggregate figures for every experiment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsReport {
	pub experiments: Vec<ExperimentUsage>,
	pub total_size_bytes: u64,
	pub oldest: Option<SystemTime>,
	pub newest: Option<SystemTime>,
}

impl StatsReport {
	/// Build a report from per-experiment usage, largest first.
	#[must_use]
	pub fn from_usage(mut experiments: Vec<ExperimentUsage>) -> Self {
		experiments.sort_by(|a, b| b.size_bytes.cmp(&a.size_bytes).then_with(|| a.name.cmp(&b.name)));
		let total_size_bytes = experiments.iter().map(|usage| usage.size_bytes).sum();
		let times = || experiments.iter().filter_map(|usage| usage.modified);
		let oldest = times().min();
		let newest = times().max();
		Self {
			experiments,
			total_size_bytes,
			oldest,
			newest,
		}
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.experiments.is_empty()
	}

	/// Human-readable report relative to `now`.
	#[must_use]
	pub fn render_plain(&self, now: SystemTime) -> String {
		if self.is_empty() {
			return "No experiments found.\n".to_string();
		}

		let mut out = String::new();
		let _ = writeln!(out, "Experiments: {}", self.experiments.len());
		let _ = writeln!(out, "Disk usage:  {}", format_size(self.total_size_bytes));
		let _ = writeln!(out, "Oldest:      {}", describe_time(self.oldest, now));
		let _ = writeln!(out, "Newest:      {}", describe_time(self.newest, now));
		let _ = writeln!(out);
		let _ = writeln!(out, "Top {TOP_BY_SIZE} by size:");

		let top = &self.experiments[..self.experiments.len().min(TOP_BY_SIZE)];
		let name_width = top
			.iter()
			.map(|usage| usage.name.chars().count())
			.max()
			.unwrap_or(0)
			.max("Name".len());
		let _ = writeln!(out, " #  {:<name_width$}  {:>9}  Last accessed", "Name", "Size");
		for (rank, usage) in top.iter().enumerate() {
			let _ = writeln!(
				out,
				"{:>2}  {:<name_width$}  {:>9}  {}",
				rank + 1,
				usage.name,
				format_size(usage.size_bytes),
				describe_time(usage.modified, now),
			);
		}
		out
	}

	/// Machine-readable report.
	#[must_use]
	pub fn to_json(&self) -> Value {
		let top: Vec<Value> = self
			.experiments
			.iter()
			.take(TOP_BY_SIZE)
			.map(|usage| {
				json!({
					"name": usage.name,
					"path": usage.path,
					"size_bytes": usage.size_bytes,
					"modified": usage.modified.map(rfc3339),
				})
			})
			.collect();

		json!({
			"total_experiments": self.experiments.len(),
			"total_size_bytes": self.total_size_bytes,
			"oldest": self.oldest.map(rfc3339),
			"newest": self.newest.map(rfc3339),
			"largest": top,
		})
	}
}

/// Measure every experiment in `store`.
pub fn collect(store: &ExperimentStore) -> Result<StatsReport, ExperimentError> {
	let usage = store
		.list()?
		.into_iter()
		.map(|candidate| ExperimentUsage {
			size_bytes: directory_size(&candidate.path),
			name: candidate.name,
			path: candidate.path,
			modified: candidate.modified,
		})
		.collect();
	Ok(StatsReport::from_usage(usage))
}

/// Total size of the regular files below `dir`, hidden ones included.
pub fn directory_size(dir: &Path) -> u64 {
	WalkBuilder::new(dir)
		.standard_filters(false)
		.follow_links(false)
		.build()
		.filter_map(|entry| match entry {
			Ok(entry) => Some(entry),
			Err(err) => {
				warn!(dir = %dir.display(), error = %err, "skipping entry while measuring");
				None
			}
		})
		.filter(|entry| entry.file_type().is_some_and(|kind| kind.is_file()))
		.filter_map(|entry| entry.metadata().ok())
		.map(|meta| meta.len())
		.sum()
}

/// Format a byte count with a binary unit, e.g. `1.5KB`.
#[must_use]
pub fn format_size(bytes: u64) -> String {
	const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
	let mut value = bytes as f64;
	for unit in UNITS {
		if value < 1024.0 {
			return format!("{value:.1}{unit}");
		}
		value /= 1024.0;
	}
	format!("{value:.1}TB")
}

fn describe_time(time: Option<SystemTime>, now: SystemTime) -> String {
	let Some(time) = time else {
		return "unknown".to_string();
	};
	let local = DateTime::<Local>::from(time);
	let relative = HumanTime::from(local.signed_duration_since(DateTime::<Local>::from(now)));
	format!("{} ({relative})", local.format(DATE_TIME_FORMAT))
}

fn rfc3339(time: SystemTime) -> String {
	DateTime::<Local>::from(time).to_rfc3339()
}

#[cfg(test)]
mod tests {
	use std::fs;
	use std::time::Duration;

	use tempfile::tempdir;

	use super::*;

	fn usage(name: &str, size_bytes: u64, age_days: u64, now: SystemTime) -> ExperimentUsage {
		ExperimentUsage {
			name: name.to_string(),
			path: PathBuf::from(format!("/tries/{name}")),
			size_bytes,
			modified: Some(now - Duration::from_secs(age_days * 86_400)),
		}
	}

	#[test]
	fn sizes_use_binary_units() {
		assert_eq!(format_size(0), "0.0B");
		assert_eq!(format_size(1023), "1023.0B");
		assert_eq!(format_size(1536), "1.5KB");
		assert_eq!(format_size(5 * 1024 * 1024), "5.0MB");
		assert_eq!(format_size(3 * 1024 * 1024 * 1024 * 1024), "3.0TB");
	}

	#[test]
	fn directory_size_counts_nested_and_hidden_files() {
		let dir = tempdir().unwrap();
		fs::create_dir_all(dir.path().join("a/b")).unwrap();
		fs::write(dir.path().join("top.txt"), vec![0u8; 100]).unwrap();
		fs::write(dir.path().join("a/b/deep.bin"), vec![0u8; 250]).unwrap();
		fs::write(dir.path().join(".env"), vec![0u8; 7]).unwrap();
		assert_eq!(directory_size(dir.path()), 357);
	}

	#[test]
	fn collect_measures_each_experiment() {
		let dir = tempdir().unwrap();
		let store = ExperimentStore::new(dir.path());
		fs::create_dir(dir.path().join("small")).unwrap();
		fs::create_dir(dir.path().join("large")).unwrap();
		fs::write(dir.path().join("small/x"), vec![0u8; 10]).unwrap();
		fs::write(dir.path().join("large/y"), vec![0u8; 4096]).unwrap();

		let report = collect(&store).unwrap();
		let names: Vec<&str> = report.experiments.iter().map(|usage| usage.name.as_str()).collect();
		assert_eq!(names, ["large", "small"]);
		assert_eq!(report.total_size_bytes, 4106);
		assert!(report.oldest.is_some());
	}

	#[test]
	fn report_tracks_extremes_and_limits_table() {
		let now = SystemTime::now();
		let experiments = (0..12)
			.map(|i| usage(&format!("exp-{i:02}"), 100 * (i + 1), i, now))
			.collect();
		let report = StatsReport::from_usage(experiments);

		assert_eq!(report.total_size_bytes, (1..=12).map(|i| 100 * i).sum::<u64>());
		assert_eq!(report.newest, Some(now));
		assert_eq!(report.oldest, Some(now - Duration::from_secs(11 * 86_400)));

		let text = report.render_plain(now);
		assert!(text.starts_with("Experiments: 12\n"));
		assert!(text.contains("Top 10 by size:"));
		assert!(text.contains("exp-11"));
		assert!(!text.contains("exp-00"));
		assert!(text.contains("ago"));

		let json = report.to_json();
		assert_eq!(json["total_experiments"], 12);
		assert_eq!(json["largest"].as_array().map(Vec::len), Some(10));
		assert_eq!(json["largest"][0]["name"], "exp-11");
	}

	#[test]
	fn empty_report_says_so() {
		let report = StatsReport::default();
		assert_eq!(report.render_plain(SystemTime::now()), "No experiments found.\n");
		assert_eq!(report.to_json()["total_experiments"], 0);
	}
}
