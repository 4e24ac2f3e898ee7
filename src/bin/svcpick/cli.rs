use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueEnum};
use svcpick_core::SearchOutcome;

/// Command-line arguments accepted by the `svcpick` binary.
#[derive(Parser, Debug)]
#[command(
	name = "svcpick",
	version,
	about = "Interactive picker for service-marketplace listings"
)]
pub(crate) struct CliArgs {
	/// Path to the service catalog (JSON).
	#[arg(value_name = "CATALOG")]
	pub(crate) catalog: Option<PathBuf>,
	#[arg(
		short,
		long = "config",
		value_name = "FILE",
		env = "SVCPICK_CONFIG",
		action = ArgAction::Append,
		help = "Additional configuration file to merge"
	)]
	pub(crate) config: Vec<PathBuf>,
	#[arg(
		short = 'n',
		long = "no-config",
		help = "Skip loading default configuration files"
	)]
	pub(crate) no_config: bool,
	#[arg(
		short = 'q',
		long,
		value_name = "QUERY",
		help = "Provide an initial search query"
	)]
	pub(crate) initial_query: Option<String>,
	#[arg(
		long,
		value_name = "MS",
		help = "Quiet interval between the last keystroke and a lookup"
	)]
	pub(crate) debounce_ms: Option<u64>,
	#[arg(
		long,
		value_name = "N",
		help = "Minimum query length that triggers a lookup"
	)]
	pub(crate) min_query_len: Option<usize>,
	#[arg(
		long,
		value_name = "N",
		help = "Maximum number of results to display"
	)]
	pub(crate) max_results: Option<usize>,
	#[arg(long, value_name = "THEME", help = "Select a theme by name")]
	pub(crate) theme: Option<String>,
	#[arg(long, help = "List available themes and exit")]
	pub(crate) list_themes: bool,
	#[arg(
		short = 'o',
		long,
		value_enum,
		default_value_t = OutputFormat::Plain,
		help = "Output format for the selection"
	)]
	pub(crate) output: OutputFormat,
	#[arg(long, help = "Print the resolved configuration before launching")]
	pub(crate) print_config: bool,
}

/// How the final outcome is written to stdout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
	/// Print the selected service name, or nothing when cancelled.
	Plain,
	/// Print the full outcome as a JSON document.
	Json,
}

pub(crate) fn parse_cli() -> CliArgs {
	CliArgs::parse()
}

pub(crate) fn print_plain(outcome: &SearchOutcome) {
	if !outcome.accepted {
		return;
	}
	if let Some(record) = &outcome.selection {
		println!("{}", record.name);
	}
}

pub(crate) fn print_json(outcome: &SearchOutcome) -> Result<()> {
	println!("{}", serde_json::to_string_pretty(outcome)?);
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_catalog_and_tuning_flags() {
		let cli = CliArgs::try_parse_from([
			"svcpick",
			"services.json",
			"--debounce-ms",
			"150",
			"--max-results",
			"3",
			"-o",
			"json",
		])
		.expect("args should parse");

		assert_eq!(cli.catalog.as_deref(), Some(std::path::Path::new("services.json")));
		assert_eq!(cli.debounce_ms, Some(150));
		assert_eq!(cli.max_results, Some(3));
		assert_eq!(cli.output, OutputFormat::Json);
	}

	#[test]
	fn rejects_unknown_output_format() {
		assert!(CliArgs::try_parse_from(["svcpick", "-o", "xml"]).is_err());
	}
}
