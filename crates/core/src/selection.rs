//! Selection hand-off between the controller and its surrounding flow.

use serde::Serialize;

use crate::catalog::ServiceRecord;

/// Receives the chosen record's display name at the moment of selection.
///
/// The hand-off is synchronous and fire-and-forget; the controller clears
/// its own query and result state immediately after calling [`accept`].
///
/// [`accept`]: SelectionSink::accept
pub trait SelectionSink {
	/// Accept the display name of the selected record.
	fn accept(&mut self, name: &str);
}

/// Sink that remembers the most recent selection.
#[derive(Debug, Default)]
pub struct LastSelection {
	name: Option<String>,
}

impl LastSelection {
	/// The most recently accepted name, if any.
	#[must_use]
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Take the most recently accepted name, leaving the sink empty.
	pub fn take(&mut self) -> Option<String> {
		self.name.take()
	}
}

impl SelectionSink for LastSelection {
	fn accept(&mut self, name: &str) {
		self.name = Some(name.to_string());
	}
}

/// Final state handed back when an interactive picker session closes.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
	/// Whether the user confirmed a selection rather than cancelling.
	pub accepted: bool,
	/// The confirmed record, when one was highlighted.
	pub selection: Option<ServiceRecord>,
	/// Query text at the moment the session closed.
	pub query: String,
}
