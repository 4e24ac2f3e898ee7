//! Background query worker and command infrastructure.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use crate::catalog::ServiceRecord;
use crate::query::{QueryError, QueryService};

/// Commands understood by the background query worker.
#[derive(Debug)]
pub enum SearchCommand {
	/// Look up records for a debounced query.
	Query {
		/// Sequence token correlating the response with its dispatch.
		id: u64,
		/// Trimmed query text.
		text: String,
		/// Maximum number of records the caller will display.
		limit: usize,
	},
	/// Stop the worker thread.
	Shutdown,
}

/// Resolution of one dispatched query.
#[derive(Debug)]
pub struct SearchResponse {
	/// Token assigned when the query was dispatched.
	pub id: u64,
	/// Ranked records, or the failure the backend reported.
	pub outcome: Result<Vec<ServiceRecord>, QueryError>,
}

/// Launch the background query worker and return its communication channels.
///
/// The returned atomic holds the most recently dispatched sequence token.
/// The worker consults it to skip lookups that are already superseded; the
/// controller performs the authoritative staleness check on every response
/// regardless, so the skip is purely a resource-usage optimization.
pub fn spawn<S>(service: S) -> (Sender<SearchCommand>, Receiver<SearchResponse>, Arc<AtomicU64>)
where
	S: QueryService + Send + 'static,
{
	let (command_tx, command_rx) = mpsc::channel();
	let (response_tx, response_rx) = mpsc::channel();
	let latest_query_id = Arc::new(AtomicU64::new(0));
	let thread_latest = Arc::clone(&latest_query_id);

	thread::spawn(move || worker_loop(&service, &command_rx, &response_tx, &thread_latest));

	(command_tx, response_rx, latest_query_id)
}

fn worker_loop<S: QueryService>(
	service: &S,
	command_rx: &Receiver<SearchCommand>,
	response_tx: &Sender<SearchResponse>,
	latest_query_id: &AtomicU64,
) {
	while let Ok(command) = command_rx.recv() {
		match command {
			SearchCommand::Query { id, text, limit } => {
				if latest_query_id.load(AtomicOrdering::Acquire) != id {
					// Already superseded; the consumer would drop the
					// response anyway.
					continue;
				}
				let outcome = service.search(&text, limit);
				if response_tx.send(SearchResponse { id, outcome }).is_err() {
					break;
				}
			}
			SearchCommand::Shutdown => break,
		}
	}
}
