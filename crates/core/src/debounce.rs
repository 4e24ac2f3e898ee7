//! Quiet-interval collapsing of keystroke bursts.

use std::time::{Duration, Instant};

#[derive(Debug)]
struct Pending {
	text: String,
	noted_at: Instant,
}

/// Collapses a burst of keystrokes into a single effective query.
///
/// The debouncer is poll driven: the owner records every keystroke with
/// [`Debouncer::note`] and calls [`Debouncer::poll`] from its event loop.
/// A pending entry is released only once the quiet period has elapsed
/// without a newer keystroke replacing it, so an arbitrarily fast burst
/// yields exactly one released value, carrying the final text.
#[derive(Debug)]
pub struct Debouncer {
	quiet_period: Duration,
	pending: Option<Pending>,
}

impl Debouncer {
	/// Create a debouncer with the given quiet period.
	#[must_use]
	pub fn new(quiet_period: Duration) -> Self {
		Self {
			quiet_period,
			pending: None,
		}
	}

	/// Record a keystroke observed at `now`, restarting the quiet interval.
	///
	/// Any previously pending text is superseded, never merged.
	pub fn note(&mut self, text: String, now: Instant) {
		self.pending = Some(Pending {
			text,
			noted_at: now,
		});
	}

	/// Release the pending text if the quiet period has elapsed at `now`.
	pub fn poll(&mut self, now: Instant) -> Option<String> {
		let pending = self.pending.as_ref()?;
		if now.duration_since(pending.noted_at) < self.quiet_period {
			return None;
		}
		self.pending.take().map(|pending| pending.text)
	}

	/// Drop any pending text without releasing it.
	pub fn cancel(&mut self) {
		self.pending = None;
	}

	/// Whether a keystroke is waiting out its quiet interval.
	#[must_use]
	pub fn is_pending(&self) -> bool {
		self.pending.is_some()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	const QUIET: Duration = Duration::from_millis(300);

	#[test]
	fn holds_text_until_quiet_period_elapses() {
		let start = Instant::now();
		let mut debounce = Debouncer::new(QUIET);
		debounce.note("cle".into(), start);

		assert_eq!(debounce.poll(start + Duration::from_millis(299)), None);
		assert!(debounce.is_pending());
		assert_eq!(debounce.poll(start + QUIET), Some("cle".into()));
		assert!(!debounce.is_pending());
	}

	#[test]
	fn burst_releases_only_the_final_text() {
		let start = Instant::now();
		let mut debounce = Debouncer::new(QUIET);
		debounce.note("c".into(), start);
		debounce.note("cl".into(), start + Duration::from_millis(50));
		debounce.note("cle".into(), start + Duration::from_millis(100));

		// The earlier keystrokes' intervals never fire; only the last one does.
		assert_eq!(debounce.poll(start + Duration::from_millis(350)), None);
		assert_eq!(
			debounce.poll(start + Duration::from_millis(400)),
			Some("cle".into())
		);
		assert_eq!(debounce.poll(start + Duration::from_millis(800)), None);
	}

	#[test]
	fn cancel_discards_pending_text() {
		let start = Instant::now();
		let mut debounce = Debouncer::new(QUIET);
		debounce.note("spa".into(), start);
		debounce.cancel();
		assert_eq!(debounce.poll(start + QUIET), None);
	}
}
