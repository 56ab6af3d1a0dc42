use std::fmt::Write;

use super::ResolvedConfig;

pub(super) fn render_summary(config: &ResolvedConfig) -> String {
	let scoring = &config.scoring;
	let mut out = String::from("Effective configuration:\n");
	let _ = writeln!(
		out,
		"  Experiments directory: {} ({})",
		config.experiments_dir.display(),
		config.experiments_dir_source
	);
	let _ = writeln!(out, "  Fuzzy weight: {:.2}", scoring.fuzzy_weight());
	let _ = writeln!(out, "  Recency weight: {:.2}", scoring.recency_weight());
	let _ = writeln!(
		out,
		"  Length bonus weight: {:.2}",
		scoring.length_bonus_weight()
	);
	let _ = writeln!(
		out,
		"  Recency window: {} days",
		scoring.recency_window_days()
	);
	let _ = writeln!(out, "  Show scores: {}", bool_to_word(config.show_scores));
	out
}

fn bool_to_word(value: bool) -> &'static str {
	if value { "yes" } else { "no" }
}
