use std::fs;

use clap::Parser;
use tempfile::tempdir;
use tries::ScoringConfig;

use super::scoring::ScoringSection;
use super::ui::UiSection;
use super::RawConfig;
use crate::cli::CliArgs;
use crate::settings::resolved::SettingSource;

fn cli_with_path(path: &str) -> CliArgs {
	CliArgs::parse_from(["tries", "--path", path])
}

#[test]
fn cli_overrides_take_precedence() {
	let cli = CliArgs::parse_from(["tries", "--scores"]);
	let mut config = RawConfig {
		ui: UiSection {
			show_scores: Some(false),
		},
		..RawConfig::default()
	};
	config.apply_cli_overrides(&cli);
	assert_eq!(config.ui.show_scores, Some(true));
}

#[test]
fn defaults_resolve_to_default_scoring() {
	let dir = tempdir().unwrap();
	let cli = cli_with_path(dir.path().to_str().unwrap());

	let resolved = RawConfig::default().resolve(&cli).unwrap();
	assert_eq!(resolved.experiments_dir, dir.path());
	assert_eq!(resolved.experiments_dir_source, SettingSource::CliFlag("--path"));
	assert_eq!(resolved.scoring, ScoringConfig::default());
	assert!(!resolved.show_scores);
}

#[test]
fn configured_weights_are_applied() {
	let dir = tempdir().unwrap();
	let cli = cli_with_path(dir.path().to_str().unwrap());
	let config = RawConfig {
		scoring: ScoringSection {
			fuzzy_weight: Some(1.0),
			recency_weight: Some(0.0),
			length_bonus_weight: None,
			recency_window_days: Some(30.0),
		},
		..RawConfig::default()
	};

	let scoring = config.resolve(&cli).unwrap().scoring;
	assert_eq!(scoring.fuzzy_weight(), 1.0);
	assert_eq!(scoring.recency_weight(), 0.0);
	assert_eq!(scoring.length_bonus_weight(), 0.1);
	assert_eq!(scoring.recency_window_days(), 30.0);
}

#[test]
fn negative_weight_names_its_key() {
	let dir = tempdir().unwrap();
	let cli = cli_with_path(dir.path().to_str().unwrap());
	let config = RawConfig {
		scoring: ScoringSection {
			recency_weight: Some(-1.0),
			..ScoringSection::default()
		},
		..RawConfig::default()
	};

	let message = config.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("scoring.recency_weight"));
	assert!(message.contains("value: -1"));
	assert!(message.contains("non-negative"));
}

#[test]
fn zero_recency_window_is_rejected() {
	let dir = tempdir().unwrap();
	let cli = cli_with_path(dir.path().to_str().unwrap());
	let config = RawConfig {
		scoring: ScoringSection {
			recency_window_days: Some(0.0),
			..ScoringSection::default()
		},
		..RawConfig::default()
	};

	let message = config.resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("scoring.recency_window_days"));
	assert!(message.contains("positive number of days"));
}

#[test]
fn experiments_dir_must_not_be_a_file() {
	let dir = tempdir().unwrap();
	let file = dir.path().join("not-a-dir");
	fs::write(&file, "").unwrap();
	let cli = cli_with_path(file.to_str().unwrap());

	let message = RawConfig::default().resolve(&cli).unwrap_err().to_string();
	assert!(message.contains("experiments_dir"));
	assert!(message.contains("CLI flag `--path`"));
	assert!(message.contains("must be a directory"));
}

#[test]
fn missing_experiments_dir_is_fine() {
	let dir = tempdir().unwrap();
	let missing = dir.path().join("later");
	let cli = cli_with_path(missing.to_str().unwrap());

	let resolved = RawConfig::default().resolve(&cli).unwrap();
	assert_eq!(resolved.experiments_dir, missing);
}

#[test]
fn toml_tables_deserialize() {
	let raw: RawConfig = toml_config(
		"experiments_dir = \"~/scratch\"\n[scoring]\nfuzzy_weight = 0.9\n[ui]\nshow_scores = true\n",
	);
	assert_eq!(raw.experiments_dir.as_deref(), Some(std::path::Path::new("~/scratch")));
	assert_eq!(raw.scoring.fuzzy_weight, Some(0.9));
	assert_eq!(raw.ui.show_scores, Some(true));
}

fn toml_config(text: &str) -> RawConfig {
	config::Config::builder()
		.add_source(config::File::from_str(text, config::FileFormat::Toml))
		.build()
		.unwrap()
		.try_deserialize()
		.unwrap()
}
