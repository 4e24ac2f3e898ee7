//! Keyboard handling for the picker.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use svcpick_core::SearchOutcome;

use crate::app::App;

impl App {
	/// Process a key press, returning an outcome once the session ends.
	pub(crate) fn handle_key(&mut self, key: KeyEvent) -> Option<SearchOutcome> {
		match key.code {
			KeyCode::Esc => Some(self.cancel_outcome()),
			KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
				Some(self.cancel_outcome())
			}
			KeyCode::Enter => self.confirm_selection(),
			KeyCode::Up => {
				self.move_selection_up();
				None
			}
			KeyCode::Down => {
				self.move_selection_down();
				None
			}
			_ => {
				if self.input.input(key) {
					self.controller.set_query(self.input.text());
				}
				None
			}
		}
	}

	fn cancel_outcome(&self) -> SearchOutcome {
		SearchOutcome {
			accepted: false,
			selection: None,
			query: self.input.text().to_string(),
		}
	}

	fn confirm_selection(&mut self) -> Option<SearchOutcome> {
		let record = self.current_selection()?;
		let query = self.input.text().to_string();

		self.controller.select(&record, &mut self.sink);
		self.input.clear();
		self.table_state.select(None);

		Some(SearchOutcome {
			accepted: true,
			selection: Some(record),
			query,
		})
	}
}
