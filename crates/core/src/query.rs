//! Query capabilities consumed by the search controller.

use std::cmp::{Ordering as CmpOrdering, Reverse};
use std::collections::BinaryHeap;

use frizbee::{Config, match_list};
use thiserror::Error;

use crate::catalog::{Catalog, ServiceRecord};

/// Failure reported by a [`QueryService`] backend.
///
/// The controller absorbs every variant uniformly as "no results"; the
/// distinction only matters to callers that want to report diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
	/// The backend could not be reached or did not respond.
	#[error("query backend unavailable: {reason}")]
	Unavailable {
		/// Human-readable cause.
		reason: String,
	},
	/// The backend refused the query.
	#[error("query rejected: {reason}")]
	Rejected {
		/// Human-readable cause.
		reason: String,
	},
}

/// Read-only lookup capability: given free text, return ranked records.
///
/// Implementations must be side-effect free and may return zero records.
/// No pagination is expected; callers cap the result count via `limit`.
pub trait QueryService {
	/// Return up to `limit` records ranked by relevance for `query`.
	fn search(&self, query: &str, limit: usize) -> Result<Vec<ServiceRecord>, QueryError>;
}

#[derive(Clone, Eq, PartialEq)]
struct RankedMatch {
	index: usize,
	score: u16,
}

impl Ord for RankedMatch {
	fn cmp(&self, other: &Self) -> CmpOrdering {
		// Higher score wins; ties resolve to the earlier catalog entry.
		self.score
			.cmp(&other.score)
			.then_with(|| other.index.cmp(&self.index))
	}
}

impl PartialOrd for RankedMatch {
	fn partial_cmp(&self, other: &Self) -> Option<CmpOrdering> {
		Some(self.cmp(other))
	}
}

/// Fuzzy-matching [`QueryService`] over an in-memory [`Catalog`].
pub struct CatalogIndex {
	catalog: Catalog,
	keys: Vec<String>,
}

impl CatalogIndex {
	/// Index a catalog for fuzzy lookups over name and category.
	#[must_use]
	pub fn new(catalog: Catalog) -> Self {
		let keys = catalog
			.services
			.iter()
			.map(|service| format!("{} {}", service.name, service.category))
			.collect();
		Self { catalog, keys }
	}

	/// The catalog backing this index.
	#[must_use]
	pub fn catalog(&self) -> &Catalog {
		&self.catalog
	}
}

/// Builds fuzzy matching options for the provided query.
fn config_for_query(query: &str) -> Config {
	let length = query.chars().count();
	let max_typos: u16 = match length {
		0..=1 => 0,
		2..=4 => 1,
		5..=8 => 2,
		_ => 3,
	};

	Config {
		max_typos: Some(max_typos),
		sort: false,
		..Config::default()
	}
}

impl QueryService for CatalogIndex {
	fn search(&self, query: &str, limit: usize) -> Result<Vec<ServiceRecord>, QueryError> {
		let trimmed = query.trim();
		if trimmed.is_empty() || limit == 0 {
			return Ok(Vec::new());
		}

		let haystacks: Vec<&str> = self.keys.iter().map(String::as_str).collect();
		let config = config_for_query(trimmed);
		let matches = match_list(trimmed, &haystacks, &config);

		// Keep only the `limit` best matches, smallest at the heap root.
		let mut heap: BinaryHeap<Reverse<RankedMatch>> = BinaryHeap::with_capacity(limit + 1);
		for entry in matches {
			if entry.score == 0 {
				continue;
			}
			heap.push(Reverse(RankedMatch {
				index: entry.index as usize,
				score: entry.score,
			}));
			if heap.len() > limit {
				heap.pop();
			}
		}

		let mut ranked: Vec<RankedMatch> = heap.into_iter().map(|entry| entry.0).collect();
		ranked.sort_unstable_by(|a, b| b.score.cmp(&a.score).then_with(|| a.index.cmp(&b.index)));

		Ok(ranked
			.into_iter()
			.map(|entry| self.catalog.services[entry.index].clone())
			.collect())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_index() -> CatalogIndex {
		CatalogIndex::new(Catalog::new(vec![
			ServiceRecord::new("1", "Cleaning", "Home"),
			ServiceRecord::new("2", "Plumbing", "Home"),
			ServiceRecord::new("3", "Dog walking", "Pets"),
			ServiceRecord::new("4", "Deep cleaning", "Home"),
			ServiceRecord::new("5", "Car detailing", "Auto"),
		]))
	}

	#[test]
	fn finds_matching_services() {
		let index = sample_index();
		let results = index.search("clean", 5).expect("search succeeds");
		let names: Vec<&str> = results.iter().map(|record| record.name.as_str()).collect();
		assert!(names.contains(&"Cleaning"));
		assert!(names.contains(&"Deep cleaning"));
		assert!(!names.contains(&"Plumbing"));
	}

	#[test]
	fn respects_the_result_limit() {
		let index = sample_index();
		let results = index.search("ing", 2).expect("search succeeds");
		assert!(results.len() <= 2);
	}

	#[test]
	fn empty_query_returns_nothing() {
		let index = sample_index();
		assert!(index.search("   ", 5).expect("search succeeds").is_empty());
		assert!(index.search("clean", 0).expect("search succeeds").is_empty());
	}

	#[test]
	fn matches_against_category_text() {
		let index = sample_index();
		let results = index.search("pets", 5).expect("search succeeds");
		assert!(results.iter().any(|record| record.name == "Dog walking"));
	}

	#[test]
	fn unmatched_query_yields_zero_records() {
		let index = sample_index();
		let results = index.search("zzzzzz", 5).expect("search succeeds");
		assert!(results.is_empty());
	}
}
