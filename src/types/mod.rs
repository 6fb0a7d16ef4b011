//! Domain value types mirroring the service's JSON resource shapes.
//!
//! Each type is a plain immutable record independently constructed from a
//! parsed response body; request payloads with many optional fields carry a
//! builder that finalizes into an immutable value.

pub mod api;
pub mod collection;
pub mod index;
pub mod vector;

pub use api::ApiMetadata;
pub use collection::{CollectionInfo, NewCollection};
pub use index::{Database, IndexConfiguration, IndexDescription, IndexState, IndexStatus, NewIndex};
pub use vector::{
    Accepted, DeleteRequest, FetchResponse, IndexStats, NamespaceSummary, QueryRequest,
    QueryResponse, ScoredVector, UpdateRequest, UpsertRequest, UpsertResponse, Vector,
};
