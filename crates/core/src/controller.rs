//! Debounced search coordination with stale-response suppression.
//!
//! The [`SearchController`] sits between a text input and a
//! [`QueryService`] worker. It collapses keystroke bursts into single
//! dispatches, tags every dispatch with a monotonically increasing sequence
//! token, and commits a response to visible state only when its token is
//! the highest dispatched so far. Responses therefore apply in dispatch
//! order ("last request wins") no matter how the backend reorders them.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{Receiver, Sender, TryRecvError};
use std::time::{Duration, Instant};

use crate::catalog::ServiceRecord;
use crate::debounce::Debouncer;
use crate::query::QueryService;
use crate::runtime::{self, SearchCommand, SearchResponse};
use crate::selection::SelectionSink;

/// Default quiet interval between the last keystroke and a dispatch.
pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);

/// Default minimum trimmed query length that triggers a lookup.
pub const DEFAULT_MIN_QUERY_LEN: usize = 2;

/// Default cap on the number of records kept for display.
pub const DEFAULT_MAX_RESULTS: usize = 5;

/// Tunable knobs for one [`SearchController`] instance.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
	/// Quiet interval that must elapse after a keystroke before dispatch.
	pub quiet_period: Duration,
	/// Minimum trimmed query length that triggers a lookup.
	pub min_query_len: usize,
	/// Maximum number of records committed to the visible result set.
	pub max_results: usize,
}

impl Default for ControllerOptions {
	fn default() -> Self {
		Self {
			quiet_period: DEFAULT_QUIET_PERIOD,
			min_query_len: DEFAULT_MIN_QUERY_LEN,
			max_results: DEFAULT_MAX_RESULTS,
		}
	}
}

/// Converts noisy keystrokes into a minimal set of backend lookups and
/// presents only the freshest result set.
///
/// Every instance owns its own debounce timer and sequence counter, so
/// multiple pickers never interfere with one another. All state mutation
/// happens on the owning thread: keystrokes via [`set_query`], timer
/// expiry via [`tick`], and response application via [`pump`], which the
/// surrounding event loop calls once per frame.
///
/// [`set_query`]: SearchController::set_query
/// [`tick`]: SearchController::tick
/// [`pump`]: SearchController::pump
pub struct SearchController {
	tx: Sender<SearchCommand>,
	rx: Receiver<SearchResponse>,
	latest_query_id: Arc<AtomicU64>,
	next_query_id: u64,
	current_query_id: Option<u64>,
	debounce: Debouncer,
	query: String,
	results: Vec<ServiceRecord>,
	searching: bool,
	options: ControllerOptions,
}

impl Drop for SearchController {
	fn drop(&mut self) {
		self.shutdown();
	}
}

impl SearchController {
	/// Create a controller over existing worker channels.
	#[must_use]
	pub fn new(
		tx: Sender<SearchCommand>,
		rx: Receiver<SearchResponse>,
		latest_query_id: Arc<AtomicU64>,
		options: ControllerOptions,
	) -> Self {
		let quiet_period = options.quiet_period;
		Self {
			tx,
			rx,
			latest_query_id,
			next_query_id: 0,
			current_query_id: None,
			debounce: Debouncer::new(quiet_period),
			query: String::new(),
			results: Vec::new(),
			searching: false,
			options,
		}
	}

	/// Spawn a worker thread for `service` and build a controller over it.
	#[must_use]
	pub fn with_service<S>(service: S, options: ControllerOptions) -> Self
	where
		S: QueryService + Send + 'static,
	{
		let (tx, rx, latest_query_id) = runtime::spawn(service);
		Self::new(tx, rx, latest_query_id, options)
	}

	/// Record a keystroke, restarting the quiet-interval timer.
	pub fn set_query(&mut self, text: &str) {
		self.set_query_at(text, Instant::now());
	}

	/// Record a keystroke observed at `now`.
	pub fn set_query_at(&mut self, text: &str, now: Instant) {
		self.query.clear();
		self.query.push_str(text);
		self.debounce.note(self.query.clone(), now);
	}

	/// Drive the debounce clock, dispatching a lookup when it fires.
	pub fn tick(&mut self) {
		self.tick_at(Instant::now());
	}

	/// Drive the debounce clock as of `now`.
	pub fn tick_at(&mut self, now: Instant) {
		let Some(text) = self.debounce.poll(now) else {
			return;
		};
		let trimmed = text.trim();
		if trimmed.chars().count() < self.options.min_query_len {
			// Below the minimum length there is nothing to search for. Any
			// lookup still in flight is invalidated as well, so a late
			// response cannot resurrect the dropdown we just cleared.
			self.results.clear();
			self.searching = false;
			self.invalidate_in_flight();
			return;
		}
		self.dispatch(trimmed.to_string());
	}

	fn dispatch(&mut self, text: String) {
		self.next_query_id = self.next_query_id.saturating_add(1);
		let id = self.next_query_id;
		self.current_query_id = Some(id);
		self.searching = true;
		self.latest_query_id.store(id, AtomicOrdering::Release);
		let _ = self.tx.send(SearchCommand::Query {
			id,
			text,
			limit: self.options.max_results,
		});
	}

	/// Drain completed responses, committing only the freshest one.
	pub fn pump(&mut self) {
		loop {
			match self.rx.try_recv() {
				Ok(response) => self.apply_response(response),
				Err(TryRecvError::Empty | TryRecvError::Disconnected) => break,
			}
		}
	}

	fn apply_response(&mut self, response: SearchResponse) {
		// Stale responses vanish without touching visible state.
		if Some(response.id) != self.current_query_id {
			return;
		}
		self.searching = false;
		match response.outcome {
			Ok(mut records) => {
				records.truncate(self.options.max_results);
				self.results = records;
			}
			// Failures read as "no results"; the next keystroke re-queries.
			Err(_) => self.results.clear(),
		}
	}

	/// Hand the chosen record's name to `sink` and reset search state.
	///
	/// The pending debounce timer is cancelled and in-flight token tracking
	/// invalidated, so responses that resolve after the selection are
	/// dropped by the usual staleness check.
	pub fn select(&mut self, record: &ServiceRecord, sink: &mut dyn SelectionSink) {
		sink.accept(&record.name);
		self.query.clear();
		self.results.clear();
		self.searching = false;
		self.debounce.cancel();
		self.invalidate_in_flight();
	}

	fn invalidate_in_flight(&mut self) {
		self.current_query_id = None;
		// Move the shared token past every dispatched id so the worker can
		// skip lookups nobody will consume.
		self.next_query_id = self.next_query_id.saturating_add(1);
		self.latest_query_id
			.store(self.next_query_id, AtomicOrdering::Release);
	}

	/// Ask the worker thread to stop.
	pub fn shutdown(&self) {
		let _ = self.tx.send(SearchCommand::Shutdown);
	}

	/// Current raw query text.
	#[must_use]
	pub fn query(&self) -> &str {
		&self.query
	}

	/// The committed result set, freshest response only.
	#[must_use]
	pub fn results(&self) -> &[ServiceRecord] {
		&self.results
	}

	/// Whether a dispatched lookup is awaiting its response.
	#[must_use]
	pub fn is_searching(&self) -> bool {
		self.searching
	}

	/// Whether a keystroke is still waiting out its quiet interval.
	#[must_use]
	pub fn is_debouncing(&self) -> bool {
		self.debounce.is_pending()
	}

	/// The options this controller was built with.
	#[must_use]
	pub fn options(&self) -> &ControllerOptions {
		&self.options
	}
}

#[cfg(test)]
mod tests {
	use std::sync::mpsc;

	use super::*;
	use crate::query::QueryError;
	use crate::selection::SelectionSink;

	struct RecordingSink {
		names: Vec<String>,
	}

	impl RecordingSink {
		fn new() -> Self {
			Self { names: Vec::new() }
		}
	}

	impl SelectionSink for RecordingSink {
		fn accept(&mut self, name: &str) {
			self.names.push(name.to_string());
		}
	}

	struct Harness {
		controller: SearchController,
		commands: Receiver<SearchCommand>,
		responses: Sender<SearchResponse>,
		clock: Instant,
	}

	impl Harness {
		fn new() -> Self {
			Self::with_options(ControllerOptions::default())
		}

		fn with_options(options: ControllerOptions) -> Self {
			let (command_tx, command_rx) = mpsc::channel();
			let (response_tx, response_rx) = mpsc::channel();
			let latest = Arc::new(AtomicU64::new(0));
			Self {
				controller: SearchController::new(command_tx, response_rx, latest, options),
				commands: command_rx,
				responses: response_tx,
				clock: Instant::now(),
			}
		}

		fn type_text(&mut self, text: &str) {
			self.controller.set_query_at(text, self.clock);
		}

		fn advance(&mut self, millis: u64) {
			self.clock += Duration::from_millis(millis);
			self.controller.tick_at(self.clock);
		}

		/// Drain every command the controller has sent so far, dropping
		/// shutdown notices.
		fn dispatched(&mut self) -> Vec<(u64, String)> {
			let mut dispatched = Vec::new();
			while let Ok(command) = self.commands.try_recv() {
				if let SearchCommand::Query { id, text, .. } = command {
					dispatched.push((id, text));
				}
			}
			dispatched
		}

		fn resolve(&mut self, id: u64, records: Vec<ServiceRecord>) {
			self.responses
				.send(SearchResponse {
					id,
					outcome: Ok(records),
				})
				.expect("controller still listening");
		}

		fn fail(&mut self, id: u64) {
			self.responses
				.send(SearchResponse {
					id,
					outcome: Err(QueryError::Unavailable {
						reason: "backend offline".into(),
					}),
				})
				.expect("controller still listening");
		}
	}

	fn record(id: &str, name: &str, category: &str) -> ServiceRecord {
		ServiceRecord::new(id, name, category)
	}

	#[test]
	fn burst_of_keystrokes_dispatches_once_with_final_text() {
		let mut harness = Harness::new();
		harness.type_text("c");
		harness.advance(50);
		harness.type_text("cl");
		harness.advance(50);
		harness.type_text("cle");

		// Still inside the quiet interval of the last keystroke.
		harness.advance(150);
		assert!(harness.dispatched().is_empty());
		assert!(!harness.controller.is_searching());

		harness.advance(200);
		let dispatched = harness.dispatched();
		assert_eq!(dispatched.len(), 1);
		assert_eq!(dispatched[0].1, "cle");
		assert!(harness.controller.is_searching());
	}

	#[test]
	fn short_queries_never_dispatch_and_clear_results() {
		let mut harness = Harness::new();

		// Seed a committed result set first.
		harness.type_text("spa");
		harness.advance(300);
		let dispatched = harness.dispatched();
		harness.resolve(dispatched[0].0, vec![record("1", "Spa day", "Wellness")]);
		harness.controller.pump();
		assert_eq!(harness.controller.results().len(), 1);

		harness.type_text(" a ");
		harness.advance(300);
		assert!(harness.dispatched().is_empty());
		assert!(harness.controller.results().is_empty());
		assert!(!harness.controller.is_searching());
	}

	#[test]
	fn stale_response_never_overwrites_a_newer_one() {
		let mut harness = Harness::new();
		harness.type_text("ab");
		harness.advance(300);
		harness.type_text("abc");
		harness.advance(300);

		let dispatched = harness.dispatched();
		assert_eq!(dispatched.len(), 2);
		let (first, second) = (dispatched[0].0, dispatched[1].0);

		let newer = vec![record("2", "Abc Repairs", "Home")];
		let older = vec![record("1", "Ab Cleaning", "Home")];

		// The newer request resolves first; the older one arrives late.
		harness.resolve(second, newer.clone());
		harness.resolve(first, older);
		harness.controller.pump();

		assert_eq!(harness.controller.results(), newer.as_slice());
		assert!(!harness.controller.is_searching());
	}

	#[test]
	fn selection_clears_state_and_notifies_sink_once() {
		let mut harness = Harness::new();
		harness.type_text("clean");
		harness.advance(300);
		let dispatched = harness.dispatched();
		let chosen = record("1", "Cleaning", "Home");
		harness.resolve(dispatched[0].0, vec![chosen.clone()]);
		harness.controller.pump();

		// A fresh keystroke is pending when the user picks a result.
		harness.type_text("cleani");
		let mut sink = RecordingSink::new();
		harness.controller.select(&chosen, &mut sink);

		assert_eq!(sink.names, vec!["Cleaning".to_string()]);
		assert_eq!(harness.controller.query(), "");
		assert!(harness.controller.results().is_empty());
		assert!(!harness.controller.is_debouncing());

		// The cancelled keystroke never fires.
		harness.advance(600);
		assert!(harness.dispatched().is_empty());
	}

	#[test]
	fn late_response_after_selection_is_dropped() {
		let mut harness = Harness::new();
		harness.type_text("plumb");
		harness.advance(300);
		let dispatched = harness.dispatched();

		let mut sink = RecordingSink::new();
		harness
			.controller
			.select(&record("2", "Plumbing", "Home"), &mut sink);

		harness.resolve(dispatched[0].0, vec![record("2", "Plumbing", "Home")]);
		harness.controller.pump();
		assert!(harness.controller.results().is_empty());
	}

	#[test]
	fn backend_failure_yields_empty_results() {
		let mut harness = Harness::new();
		harness.type_text("clean");
		harness.advance(300);
		let dispatched = harness.dispatched();

		harness.fail(dispatched[0].0);
		harness.controller.pump();

		assert!(harness.controller.results().is_empty());
		assert!(!harness.controller.is_searching());

		// The controller stays interactive afterwards.
		harness.type_text("plumb");
		harness.advance(300);
		assert_eq!(harness.dispatched().len(), 1);
	}

	#[test]
	fn fast_typing_end_to_end_commits_the_final_query() {
		let mut harness = Harness::new();
		harness.type_text("c");
		harness.advance(25);
		harness.type_text("cl");
		harness.advance(25);
		harness.type_text("cle");
		harness.advance(300);

		let dispatched = harness.dispatched();
		assert_eq!(dispatched.len(), 1);
		assert_eq!(dispatched[0].1, "cle");

		let cleaning = vec![record("1", "Cleaning", "Home")];
		harness.resolve(dispatched[0].0, cleaning.clone());
		harness.controller.pump();

		assert_eq!(harness.controller.results(), cleaning.as_slice());
		assert!(!harness.controller.is_searching());
	}

	#[test]
	fn repeated_identical_queries_commit_identical_results() {
		let mut harness = Harness::new();
		let answer = vec![record("1", "Cleaning", "Home")];

		harness.type_text("clean");
		harness.advance(300);
		let first = harness.dispatched();
		harness.resolve(first[0].0, answer.clone());
		harness.controller.pump();
		let first_results = harness.controller.results().to_vec();

		harness.type_text("clean");
		harness.advance(300);
		let second = harness.dispatched();
		harness.resolve(second[0].0, answer.clone());
		harness.controller.pump();

		assert_eq!(harness.controller.results(), first_results.as_slice());
	}

	#[test]
	fn committed_results_are_capped_to_max_results() {
		let mut harness = Harness::with_options(ControllerOptions {
			max_results: 2,
			..ControllerOptions::default()
		});
		harness.type_text("home");
		harness.advance(300);
		let dispatched = harness.dispatched();

		harness.resolve(
			dispatched[0].0,
			vec![
				record("1", "Cleaning", "Home"),
				record("2", "Plumbing", "Home"),
				record("3", "Painting", "Home"),
			],
		);
		harness.controller.pump();
		assert_eq!(harness.controller.results().len(), 2);
	}

	#[test]
	fn clearing_below_min_length_invalidates_in_flight_lookup() {
		let mut harness = Harness::new();
		harness.type_text("ab");
		harness.advance(300);
		let dispatched = harness.dispatched();

		// The user deletes back below the threshold before the response lands.
		harness.type_text("a");
		harness.advance(300);
		assert!(!harness.controller.is_searching());

		harness.resolve(dispatched[0].0, vec![record("1", "Ab Cleaning", "Home")]);
		harness.controller.pump();
		assert!(harness.controller.results().is_empty());
	}
}
