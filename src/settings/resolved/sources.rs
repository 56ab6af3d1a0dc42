use std::fmt;

/// Where an effective setting came from, for error messages and the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SettingSource {
	CliFlag(&'static str),
	Environment(String),
	ConfigKey(&'static str),
	Default,
}

impl fmt::Display for SettingSource {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::CliFlag(flag) => write!(f, "CLI flag `{flag}`"),
			Self::Environment(var) => write!(f, "environment variable `{var}`"),
			Self::ConfigKey(key) => write!(f, "configuration key `{key}`"),
			Self::Default => f.write_str("built-in default"),
		}
	}
}

/// Origins of the scoring keys that were explicitly set.
#[derive(Debug, Default, Clone)]
pub(crate) struct ConfigSources {
	pub(crate) fuzzy_weight: Option<SettingSource>,
	pub(crate) recency_weight: Option<SettingSource>,
	pub(crate) length_bonus_weight: Option<SettingSource>,
	pub(crate) recency_window_days: Option<SettingSource>,
}

impl ConfigSources {
	/// Origin of the scoring `key`, falling back to the config key itself.
	pub(crate) fn source_for(&self, key: &'static str) -> SettingSource {
		let detected = match key {
			"scoring.fuzzy_weight" => self.fuzzy_weight.as_ref(),
			"scoring.recency_weight" => self.recency_weight.as_ref(),
			"scoring.length_bonus_weight" => self.length_bonus_weight.as_ref(),
			"scoring.recency_window_days" => self.recency_window_days.as_ref(),
			_ => None,
		};
		detected.cloned().unwrap_or(SettingSource::ConfigKey(key))
	}
}
