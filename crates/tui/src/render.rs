//! Frame rendering for the picker.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Position, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, HighlightSpacing, Paragraph, Row, Table};
use throbber_widgets_tui::Throbber;
use unicode_width::UnicodeWidthStr;

use crate::app::App;

const HIGHLIGHT_SYMBOL: &str = "> ";

impl App {
	pub(crate) fn draw(&mut self, frame: &mut Frame) {
		let layout = Layout::default()
			.direction(Direction::Vertical)
			.constraints([Constraint::Length(1), Constraint::Min(1)])
			.split(frame.area());

		self.render_query_line(frame, layout[0]);
		self.render_results(frame, layout[1]);
	}

	fn render_query_line(&mut self, frame: &mut Frame, area: Rect) {
		let mut line = Line::default();
		line.spans
			.push(Span::styled(self.ui.prompt.clone(), self.theme.prompt));

		if self.input.text().is_empty() {
			line.spans
				.push(Span::styled(self.ui.placeholder.clone(), self.theme.muted));
		} else {
			line.spans.push(Span::raw(self.input.text().to_string()));
		}

		if self.controller.is_searching() {
			let spinner = Throbber::default()
				.style(self.theme.muted)
				.throbber_style(self.theme.muted);
			line.spans.push(Span::raw(" "));
			line.spans.push(spinner.to_symbol_span(&self.throbber_state));
		}

		frame.render_widget(Paragraph::new(line), area);

		let cursor_x = area.x
			+ self.ui.prompt.width() as u16
			+ self.input.before_cursor().width() as u16;
		frame.set_cursor_position(Position::new(cursor_x.min(area.right()), area.y));
	}

	fn render_results(&mut self, frame: &mut Frame, area: Rect) {
		let results = self.controller.results();

		if results.is_empty() {
			if self.query_settled_empty() {
				let message = Paragraph::new(Span::styled(
					self.ui.empty_message.clone(),
					self.theme.muted,
				))
				.alignment(Alignment::Center);
				frame.render_widget(message, area);
			}
			return;
		}

		let header = Row::new(vec![
			Cell::from("Service"),
			Cell::from("Category"),
			Cell::from("Details"),
		])
		.style(self.theme.header);

		let rows: Vec<Row> = results
			.iter()
			.map(|record| {
				Row::new(vec![
					Cell::from(record.name.clone()).style(self.theme.row),
					Cell::from(record.category.clone()).style(self.theme.muted),
					Cell::from(record.description.clone().unwrap_or_default())
						.style(self.theme.muted),
				])
			})
			.collect();

		let table = Table::new(
			rows,
			[
				Constraint::Min(16),
				Constraint::Length(14),
				Constraint::Min(20),
			],
		)
		.header(header)
		.block(
			Block::default()
				.borders(Borders::ALL)
				.title(self.ui.table_title.clone()),
		)
		.row_highlight_style(self.theme.row_highlight)
		.highlight_symbol(HIGHLIGHT_SYMBOL)
		.highlight_spacing(HighlightSpacing::Always);

		frame.render_stateful_widget(table, area, &mut self.table_state);
	}

	/// Whether the current query ran to completion and matched nothing.
	fn query_settled_empty(&self) -> bool {
		let trimmed = self.controller.query().trim();
		trimmed.chars().count() >= self.controller.options().min_query_len
			&& !self.controller.is_searching()
			&& !self.controller.is_debouncing()
	}
}
