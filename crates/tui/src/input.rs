//! Single-line text input for the search query.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Cursor-addressable single-line input widget state.
///
/// The cursor is tracked as a character offset; conversion to a byte index
/// happens only at edit time so multi-byte input behaves correctly.
#[derive(Debug, Default)]
pub struct QueryInput {
	text: String,
	cursor: usize,
}

impl QueryInput {
	/// Create an input pre-filled with `text`, cursor at the end.
	#[must_use]
	pub fn new(text: impl Into<String>) -> Self {
		let text = text.into();
		let cursor = text.chars().count();
		Self { text, cursor }
	}

	/// Current text.
	#[must_use]
	pub fn text(&self) -> &str {
		&self.text
	}

	/// Cursor position in characters.
	#[must_use]
	pub fn cursor(&self) -> usize {
		self.cursor
	}

	/// Remove all text and reset the cursor.
	pub fn clear(&mut self) {
		self.text.clear();
		self.cursor = 0;
	}

	/// Apply a key event, returning `true` when the text changed.
	pub fn input(&mut self, key: KeyEvent) -> bool {
		match key.code {
			KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
				let at = self.byte_index(self.cursor);
				self.text.insert(at, ch);
				self.cursor += 1;
				true
			}
			KeyCode::Backspace => {
				if self.cursor == 0 {
					return false;
				}
				let at = self.byte_index(self.cursor - 1);
				self.text.remove(at);
				self.cursor -= 1;
				true
			}
			KeyCode::Delete => {
				if self.cursor >= self.text.chars().count() {
					return false;
				}
				let at = self.byte_index(self.cursor);
				self.text.remove(at);
				true
			}
			KeyCode::Left => {
				self.cursor = self.cursor.saturating_sub(1);
				false
			}
			KeyCode::Right => {
				self.cursor = (self.cursor + 1).min(self.text.chars().count());
				false
			}
			KeyCode::Home => {
				self.cursor = 0;
				false
			}
			KeyCode::End => {
				self.cursor = self.text.chars().count();
				false
			}
			_ => false,
		}
	}

	/// Text up to the cursor, used to position the rendered caret.
	#[must_use]
	pub fn before_cursor(&self) -> &str {
		&self.text[..self.byte_index(self.cursor)]
	}

	fn byte_index(&self, char_offset: usize) -> usize {
		self.text
			.char_indices()
			.nth(char_offset)
			.map_or(self.text.len(), |(index, _)| index)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn key(code: KeyCode) -> KeyEvent {
		KeyEvent::from(code)
	}

	#[test]
	fn typing_appends_at_the_cursor() {
		let mut input = QueryInput::default();
		assert!(input.input(key(KeyCode::Char('c'))));
		assert!(input.input(key(KeyCode::Char('l'))));
		assert!(input.input(key(KeyCode::Char('e'))));
		assert_eq!(input.text(), "cle");
		assert_eq!(input.cursor(), 3);
	}

	#[test]
	fn backspace_removes_before_the_cursor() {
		let mut input = QueryInput::new("clean");
		assert!(input.input(key(KeyCode::Backspace)));
		assert_eq!(input.text(), "clea");

		let mut empty = QueryInput::default();
		assert!(!empty.input(key(KeyCode::Backspace)));
	}

	#[test]
	fn editing_in_the_middle_respects_char_boundaries() {
		let mut input = QueryInput::new("héllo");
		input.input(key(KeyCode::Home));
		input.input(key(KeyCode::Right));
		input.input(key(KeyCode::Right));
		assert!(input.input(key(KeyCode::Char('x'))));
		assert_eq!(input.text(), "héxllo");
		assert!(input.input(key(KeyCode::Delete)));
		assert_eq!(input.text(), "héxlo");
	}

	#[test]
	fn movement_keys_do_not_report_changes() {
		let mut input = QueryInput::new("spa");
		assert!(!input.input(key(KeyCode::Left)));
		assert!(!input.input(key(KeyCode::End)));
		assert_eq!(input.text(), "spa");
	}

	#[test]
	fn clear_resets_text_and_cursor() {
		let mut input = QueryInput::new("clean");
		input.clear();
		assert_eq!(input.text(), "");
		assert_eq!(input.cursor(), 0);
	}
}
