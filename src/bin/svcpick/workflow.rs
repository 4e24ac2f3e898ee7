use anyhow::{Context, Result};
use svcpick_core::{Catalog, CatalogIndex, SearchOutcome};
use svcpick_tui::Picker;

use crate::settings::ResolvedConfig;

/// Coordinates building and running the interactive picker.
pub(crate) struct PickerWorkflow {
	picker: Picker<CatalogIndex>,
}

impl PickerWorkflow {
	/// Build the workflow from resolved configuration.
	pub(crate) fn from_config(config: ResolvedConfig) -> Result<Self> {
		let ResolvedConfig {
			catalog,
			initial_query,
			theme,
			controller,
			ui,
		} = config;

		let listing = Catalog::load(&catalog)
			.with_context(|| format!("failed to load catalog {}", catalog.display()))?;

		let mut picker = Picker::new(CatalogIndex::new(listing))
			.with_options(controller)
			.with_labels(ui)
			.with_initial_query(initial_query);

		if let Some(theme) = theme {
			picker = picker.with_theme_name(theme);
		}

		Ok(Self { picker })
	}

	/// Run the interactive picker and return the final outcome.
	pub(crate) fn run(self) -> Result<SearchOutcome> {
		self.picker.run()
	}
}
