//! Core state container for the picker's terminal front end.

use ratatui::widgets::TableState;
use svcpick_core::{
	ControllerOptions, LastSelection, QueryService, SearchController, ServiceRecord,
};
use throbber_widgets_tui::ThrobberState;

use crate::config::UiLabels;
use crate::input::QueryInput;
use crate::style::{Theme, default_theme};

/// Aggregate state for one interactive picker session.
///
/// The `App` owns the search controller, the query input widget, and the
/// UI affordances around them. All mutation happens from the event loop
/// thread: key events through [`handle_key`](App::handle_key) and one
/// [`advance`](App::advance) per frame.
pub struct App {
	pub(crate) input: QueryInput,
	pub(crate) controller: SearchController,
	pub(crate) table_state: TableState,
	pub(crate) throbber_state: ThrobberState,
	pub(crate) ui: UiLabels,
	pub(crate) theme: Theme,
	pub(crate) sink: LastSelection,
}

impl App {
	/// Build an app over a freshly spawned worker for `service`.
	pub fn new<S>(service: S, options: ControllerOptions) -> Self
	where
		S: QueryService + Send + 'static,
	{
		Self {
			input: QueryInput::default(),
			controller: SearchController::with_service(service, options),
			table_state: TableState::default(),
			throbber_state: ThrobberState::default(),
			ui: UiLabels::default(),
			theme: default_theme(),
			sink: LastSelection::default(),
		}
	}

	/// Pre-fill the query as if the user had typed it.
	pub fn apply_initial_query(&mut self, query: &str) {
		self.input = QueryInput::new(query);
		self.controller.set_query(query);
	}

	/// Run one frame of background progress: debounce clock, response
	/// draining, selection bounds, spinner animation.
	pub(crate) fn advance(&mut self) {
		self.controller.tick();
		self.controller.pump();
		self.ensure_selection();
		self.throbber_state.calc_next();
	}

	/// Record currently highlighted in the dropdown.
	pub(crate) fn current_selection(&self) -> Option<ServiceRecord> {
		let selected = self.table_state.selected()?;
		self.controller.results().get(selected).cloned()
	}

	/// Keep the row selection valid for the current result set.
	pub(crate) fn ensure_selection(&mut self) {
		let len = self.controller.results().len();
		if len == 0 {
			self.table_state.select(None);
			return;
		}
		let selected = self.table_state.selected().unwrap_or(0).min(len - 1);
		self.table_state.select(Some(selected));
	}

	pub(crate) fn move_selection_up(&mut self) {
		if let Some(selected) = self.table_state.selected()
			&& selected > 0
		{
			self.table_state.select(Some(selected - 1));
		}
	}

	pub(crate) fn move_selection_down(&mut self) {
		if let Some(selected) = self.table_state.selected() {
			let len = self.controller.results().len();
			if selected + 1 < len {
				self.table_state.select(Some(selected + 1));
			}
		}
	}

	/// The name most recently handed to the selection sink.
	pub fn last_selected_name(&mut self) -> Option<String> {
		self.sink.take()
	}
}

#[cfg(test)]
mod tests {
	use std::time::{Duration, Instant};

	use svcpick_core::{Catalog, CatalogIndex};

	use super::*;

	fn sample_catalog() -> Catalog {
		Catalog::new(vec![
			ServiceRecord::new("1", "Cleaning", "Home"),
			ServiceRecord::new("2", "Plumbing", "Home"),
			ServiceRecord::new("3", "Dog walking", "Pets"),
		])
	}

	fn fast_options() -> ControllerOptions {
		ControllerOptions {
			quiet_period: Duration::from_millis(5),
			..ControllerOptions::default()
		}
	}

	fn settle(app: &mut App) {
		let deadline = Instant::now() + Duration::from_secs(1);
		while Instant::now() < deadline {
			app.advance();
			if !app.controller.is_debouncing() && !app.controller.is_searching() {
				break;
			}
			std::thread::sleep(Duration::from_millis(5));
		}
		app.advance();
	}

	#[test]
	fn typed_query_populates_results_through_the_worker() {
		let mut app = App::new(CatalogIndex::new(sample_catalog()), fast_options());
		app.apply_initial_query("clean");
		settle(&mut app);

		assert!(
			app.controller
				.results()
				.iter()
				.any(|record| record.name == "Cleaning")
		);
		assert_eq!(app.table_state.selected(), Some(0));
	}

	#[test]
	fn selection_stays_within_result_bounds() {
		let mut app = App::new(CatalogIndex::new(sample_catalog()), fast_options());
		app.apply_initial_query("clean");
		settle(&mut app);

		let len = app.controller.results().len();
		assert!(len >= 1);
		for _ in 0..10 {
			app.move_selection_down();
		}
		assert_eq!(app.table_state.selected(), Some(len - 1));
		for _ in 0..10 {
			app.move_selection_up();
		}
		assert_eq!(app.table_state.selected(), Some(0));
	}

	#[test]
	fn short_query_leaves_the_dropdown_empty() {
		let mut app = App::new(CatalogIndex::new(sample_catalog()), fast_options());
		app.apply_initial_query("c");
		settle(&mut app);

		assert!(app.controller.results().is_empty());
		assert_eq!(app.table_state.selected(), None);
	}
}
