//! Textual configuration for the picker chrome.

/// Labels and messages rendered around the search experience.
#[derive(Debug, Clone)]
pub struct UiLabels {
	/// Prompt glyph rendered before the query text.
	pub prompt: String,
	/// Placeholder shown while the query is empty.
	pub placeholder: String,
	/// Title rendered above the results dropdown.
	pub table_title: String,
	/// Message shown when a settled query matched nothing.
	pub empty_message: String,
}

impl Default for UiLabels {
	fn default() -> Self {
		Self {
			prompt: "> ".to_string(),
			placeholder: "Search services".to_string(),
			table_title: "Services".to_string(),
			empty_message: "No matching services".to_string(),
		}
	}
}
