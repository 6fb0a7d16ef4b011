//! Collection resources.
//!
//! A collection is a named, static snapshot of an index's vectors, usable
//! as the source when creating a new index.

use serde::{Deserialize, Serialize};

/// A collection as described by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionInfo {
    pub name: String,
    /// Size of the collection in bytes.
    pub size: u64,
    pub status: String,
}

/// The payload for creating a collection from an existing index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCollection {
    name: String,
    source: String,
}

impl NewCollection {
    /// A collection named `name` snapshotting the index `source`.
    pub fn new(name: impl Into<String>, source: impl Into<String>) -> Self {
        Self { name: name.into(), source: source.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
