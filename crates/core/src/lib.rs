//! Core search machinery for the `svcpick` service picker.
//!
//! The crate revolves around the [`SearchController`], which turns noisy
//! keystrokes into a minimal set of backend lookups and guarantees that only
//! the freshest response ever reaches visible state, even when the backend
//! resolves requests out of order. Lookups run on a background worker thread
//! managed by the [`runtime`] module and are served by any [`QueryService`]
//! implementation; [`CatalogIndex`] provides one over an in-memory
//! [`Catalog`].

pub mod catalog;
pub mod controller;
mod debounce;
pub mod query;
pub mod runtime;
pub mod selection;

pub use catalog::{Catalog, CatalogError, ServiceRecord};
pub use controller::{ControllerOptions, SearchController};
pub use debounce::Debouncer;
pub use query::{CatalogIndex, QueryError, QueryService};
pub use runtime::{SearchCommand, SearchResponse};
pub use selection::{LastSelection, SearchOutcome, SelectionSink};
