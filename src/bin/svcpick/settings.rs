//! Layered configuration: default files, explicit files, environment, CLI.

use std::path::PathBuf;
use std::time::Duration;
use std::{env, fs};

use anyhow::{Context, Result, anyhow, ensure};
use config::{Config, ConfigError, File};
use serde::Deserialize;
use svcpick_core::ControllerOptions;
use svcpick_tui::UiLabels;

use crate::app_dirs;
use crate::cli::CliArgs;

/// On-disk configuration schema before validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RawConfig {
	catalog: Option<PathBuf>,
	initial_query: Option<String>,
	theme: Option<String>,
	search: RawSearch,
	ui: RawUi,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawSearch {
	debounce_ms: Option<u64>,
	min_query_len: Option<usize>,
	max_results: Option<usize>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RawUi {
	prompt: Option<String>,
	placeholder: Option<String>,
	table_title: Option<String>,
	empty_message: Option<String>,
}

/// Fully resolved configuration for one picker session.
#[derive(Debug)]
pub(crate) struct ResolvedConfig {
	pub(crate) catalog: PathBuf,
	pub(crate) initial_query: String,
	pub(crate) theme: Option<String>,
	pub(crate) controller: ControllerOptions,
	pub(crate) ui: UiLabels,
}

impl ResolvedConfig {
	pub(crate) fn print(&self) {
		println!("Catalog: {}", self.catalog.display());
		println!("Debounce: {:?}", self.controller.quiet_period);
		println!("Min query length: {}", self.controller.min_query_len);
		println!("Max results: {}", self.controller.max_results);
		println!("Theme: {:?}", self.theme);
		if !self.initial_query.is_empty() {
			println!("Initial query: {}", self.initial_query);
		}
	}
}

pub(crate) fn load(cli: &CliArgs) -> Result<ResolvedConfig> {
	let builder = build_config(cli)?;
	let mut raw: RawConfig = builder
		.try_deserialize()
		.map_err(|err| anyhow!("failed to deserialize configuration: {err}"))?;
	raw.apply_cli_overrides(cli);
	raw.resolve()
}

/// Combine default file locations, explicit files, and the environment.
fn build_config(cli: &CliArgs) -> Result<Config> {
	let mut builder = Config::builder();

	if !cli.no_config {
		for path in default_config_files() {
			builder = builder.add_source(File::from(path).required(false));
		}
	}

	for path in &cli.config {
		builder = builder.add_source(File::from(path.clone()).required(true));
	}

	builder = builder.add_source(
		config::Environment::with_prefix("svcpick")
			.separator("__")
			.try_parsing(true),
	);

	builder.build().map_err(|err| match err {
		ConfigError::Frozen => anyhow!("configuration builder is frozen"),
		other => other.into(),
	})
}

/// Discover the default configuration file locations.
fn default_config_files() -> Vec<PathBuf> {
	let mut files = Vec::new();

	if let Ok(dir) = app_dirs::get_config_dir() {
		files.push(dir.join("config.toml"));
	}

	if let Ok(current_dir) = env::current_dir() {
		files.push(current_dir.join(".svcpick.toml"));
		files.push(current_dir.join("svcpick.toml"));
	}

	files
}

impl RawConfig {
	fn apply_cli_overrides(&mut self, cli: &CliArgs) {
		if let Some(catalog) = cli.catalog.clone() {
			self.catalog = Some(catalog);
		}
		if let Some(query) = cli.initial_query.clone() {
			self.initial_query = Some(query);
		}
		if let Some(theme) = cli.theme.clone() {
			self.theme = Some(theme);
		}
		if let Some(value) = cli.debounce_ms {
			self.search.debounce_ms = Some(value);
		}
		if let Some(value) = cli.min_query_len {
			self.search.min_query_len = Some(value);
		}
		if let Some(value) = cli.max_results {
			self.search.max_results = Some(value);
		}
	}

	fn resolve(self) -> Result<ResolvedConfig> {
		let catalog = self
			.catalog
			.context("no catalog provided; pass a path or set `catalog` in configuration")?;
		let metadata = fs::metadata(&catalog)
			.with_context(|| format!("failed to inspect catalog {}", catalog.display()))?;
		ensure!(metadata.is_file(), "catalog must be a regular file");

		let debounce_ms = self.search.debounce_ms.unwrap_or(300);
		let min_query_len = self.search.min_query_len.unwrap_or(2);
		let max_results = self.search.max_results.unwrap_or(5);

		// Validate
		ensure!(debounce_ms > 0, "debounce-ms must be greater than zero");
		ensure!(min_query_len >= 1, "min-query-len must be at least 1");
		ensure!(max_results >= 1, "max-results must be at least 1");

		let mut ui = UiLabels::default();
		if let Some(prompt) = self.ui.prompt {
			ui.prompt = prompt;
		}
		if let Some(placeholder) = self.ui.placeholder {
			ui.placeholder = placeholder;
		}
		if let Some(table_title) = self.ui.table_title {
			ui.table_title = table_title;
		}
		if let Some(empty_message) = self.ui.empty_message {
			ui.empty_message = empty_message;
		}

		Ok(ResolvedConfig {
			catalog,
			initial_query: self.initial_query.unwrap_or_default(),
			theme: self.theme,
			controller: ControllerOptions {
				quiet_period: Duration::from_millis(debounce_ms),
				min_query_len,
				max_results,
			},
			ui,
		})
	}
}
