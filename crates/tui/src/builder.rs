//! Builder for interactive picker sessions.

use anyhow::{Result, bail};
use svcpick_core::{ControllerOptions, QueryService, SearchOutcome};

use crate::app::App;
use crate::config::UiLabels;
use crate::style;

/// Configures and runs one interactive picker session.
pub struct Picker<S> {
	service: S,
	options: ControllerOptions,
	initial_query: String,
	labels: UiLabels,
	theme: Option<String>,
}

impl<S> Picker<S>
where
	S: QueryService + Send + 'static,
{
	/// Start building a picker over the given query backend.
	#[must_use]
	pub fn new(service: S) -> Self {
		Self {
			service,
			options: ControllerOptions::default(),
			initial_query: String::new(),
			labels: UiLabels::default(),
			theme: None,
		}
	}

	/// Override the controller's debounce and result-cap options.
	#[must_use]
	pub fn with_options(mut self, options: ControllerOptions) -> Self {
		self.options = options;
		self
	}

	/// Pre-fill the query as if the user had typed it.
	#[must_use]
	pub fn with_initial_query(mut self, query: impl Into<String>) -> Self {
		self.initial_query = query.into();
		self
	}

	/// Override the labels rendered around the search experience.
	#[must_use]
	pub fn with_labels(mut self, labels: UiLabels) -> Self {
		self.labels = labels;
		self
	}

	/// Select a builtin theme by name; resolution happens at run time.
	#[must_use]
	pub fn with_theme_name(mut self, name: impl Into<String>) -> Self {
		self.theme = Some(name.into());
		self
	}

	/// Run the session to completion on the current terminal.
	pub fn run(self) -> Result<SearchOutcome> {
		let mut app = App::new(self.service, self.options);
		app.ui = self.labels;
		if let Some(name) = self.theme {
			match style::by_name(&name) {
				Some(theme) => app.theme = theme,
				None => bail!("unknown theme '{name}'"),
			}
		}
		if !self.initial_query.is_empty() {
			app.apply_initial_query(&self.initial_query);
		}
		app.run()
	}
}
