//! Service listings and the catalog document they are loaded from.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single bookable listing offered on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRecord {
	/// Stable identifier assigned by the catalog.
	pub id: String,
	/// Display name shown in the results dropdown and handed to the
	/// selection sink.
	pub name: String,
	/// Category the service is listed under.
	pub category: String,
	/// Optional longer blurb shown alongside the name.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub description: Option<String>,
}

impl ServiceRecord {
	/// Build a record without a description.
	pub fn new(id: impl Into<String>, name: impl Into<String>, category: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			category: category.into(),
			description: None,
		}
	}

	/// Attach a description to the record.
	#[must_use]
	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = Some(description.into());
		self
	}
}

/// Errors raised while loading a catalog document.
#[derive(Debug, Error)]
pub enum CatalogError {
	/// The catalog file could not be read.
	#[error("failed to read catalog: {0}")]
	Io(#[from] std::io::Error),
	/// The catalog document is not valid JSON or does not match the schema.
	#[error("failed to parse catalog: {0}")]
	Parse(#[from] serde_json::Error),
}

/// In-memory listing of every service offered on the marketplace.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Catalog {
	/// All listings, in catalog order.
	pub services: Vec<ServiceRecord>,
}

impl Catalog {
	/// Build a catalog directly from records.
	#[must_use]
	pub fn new(services: Vec<ServiceRecord>) -> Self {
		Self { services }
	}

	/// Load a catalog from a JSON document on disk.
	pub fn load(path: &Path) -> Result<Self, CatalogError> {
		let file = File::open(path)?;
		Self::from_reader(BufReader::new(file))
	}

	/// Parse a catalog from any JSON reader.
	pub fn from_reader(reader: impl Read) -> Result<Self, CatalogError> {
		Ok(serde_json::from_reader(reader)?)
	}

	/// Number of listings in the catalog.
	#[must_use]
	pub fn len(&self) -> usize {
		self.services.len()
	}

	/// Whether the catalog holds no listings at all.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.services.is_empty()
	}
}
