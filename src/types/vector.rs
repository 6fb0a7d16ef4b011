//! Vector records and the data-plane request/response payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::filter::{Filter, Metadata};

/// A single vector record: identifier, components, and optional metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector {
    pub id: String,
    pub values: Vec<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

impl Vector {
    pub fn new(id: impl Into<String>, values: Vec<f32>) -> Self {
        Self { id: id.into(), values, metadata: None }
    }

    pub fn with_metadata(id: impl Into<String>, values: Vec<f32>, metadata: Metadata) -> Self {
        Self { id: id.into(), values, metadata: Some(metadata) }
    }
}

/// The acknowledgment returned by asynchronously accepted operations
/// (index/collection deletion, configuration, vector updates).
///
/// The service responds with a short plain-text body rather than a JSON
/// document; the text is kept as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accepted {
    pub message: String,
}

impl Accepted {
    pub(crate) fn from_body(body: &[u8]) -> Self {
        Self { message: String::from_utf8_lossy(body).into_owned() }
    }
}

/// The upsert payload: one or more vectors, optionally scoped to a
/// namespace. Built via [`UpsertRequest::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpsertRequest {
    vectors: Vec<Vector>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl UpsertRequest {
    pub fn builder(vectors: Vec<Vector>) -> UpsertRequestBuilder {
        UpsertRequestBuilder { vectors, namespace: None }
    }
}

/// Builder for [`UpsertRequest`].
#[derive(Debug, Clone)]
pub struct UpsertRequestBuilder {
    vectors: Vec<Vector>,
    namespace: Option<String>,
}

impl UpsertRequestBuilder {
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Finalize the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when no vectors were supplied.
    pub fn build(self) -> Result<UpsertRequest> {
        if self.vectors.is_empty() {
            return Err(Error::InvalidArguments {
                message: "upsert requires at least one vector".to_string(),
            });
        }
        Ok(UpsertRequest { vectors: self.vectors, namespace: self.namespace })
    }
}

/// The upsert response: how many vectors the service wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertResponse {
    #[serde(rename = "upsertedCount")]
    pub upserted_count: u64,
}

/// The update payload: a partial modification of one stored vector.
/// Built via [`UpdateRequest::builder`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateRequest {
    id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    values: Option<Vec<f32>>,
    #[serde(rename = "setMetadata", default, skip_serializing_if = "Option::is_none")]
    set_metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl UpdateRequest {
    pub fn builder(id: impl Into<String>) -> UpdateRequestBuilder {
        UpdateRequestBuilder { id: id.into(), values: None, set_metadata: None, namespace: None }
    }
}

/// Builder for [`UpdateRequest`].
#[derive(Debug, Clone)]
pub struct UpdateRequestBuilder {
    id: String,
    values: Option<Vec<f32>>,
    set_metadata: Option<Metadata>,
    namespace: Option<String>,
}

impl UpdateRequestBuilder {
    /// Replace the vector's components.
    pub fn values(mut self, values: Vec<f32>) -> Self {
        self.values = Some(values);
        self
    }

    /// Merge the given keys into the vector's metadata.
    pub fn set_metadata(mut self, metadata: Metadata) -> Self {
        self.set_metadata = Some(metadata);
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Finalize the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] when the update would change
    /// neither values nor metadata.
    pub fn build(self) -> Result<UpdateRequest> {
        if self.values.is_none() && self.set_metadata.is_none() {
            return Err(Error::InvalidArguments {
                message: "update requires new values or metadata to set".to_string(),
            });
        }
        Ok(UpdateRequest {
            id: self.id,
            values: self.values,
            set_metadata: self.set_metadata,
            namespace: self.namespace,
        })
    }
}

/// The query payload: a top-k similarity search seeded by either a raw
/// vector or the id of a stored vector, exclusively.
/// Built via [`QueryRequest::builder`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryRequest {
    #[serde(rename = "topK")]
    top_k: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    vector: Option<Vec<f32>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Filter::is_none")]
    filter: Filter,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
    #[serde(rename = "includeValues", skip_serializing_if = "Option::is_none")]
    include_values: Option<bool>,
    #[serde(rename = "includeMetadata", skip_serializing_if = "Option::is_none")]
    include_metadata: Option<bool>,
}

impl QueryRequest {
    pub fn builder(top_k: u64) -> QueryRequestBuilder {
        QueryRequestBuilder {
            top_k,
            vector: None,
            id: None,
            filter: Filter::None,
            namespace: None,
            include_values: None,
            include_metadata: None,
        }
    }
}

/// Builder for [`QueryRequest`].
#[derive(Debug, Clone)]
pub struct QueryRequestBuilder {
    top_k: u64,
    vector: Option<Vec<f32>>,
    id: Option<String>,
    filter: Filter,
    namespace: Option<String>,
    include_values: Option<bool>,
    include_metadata: Option<bool>,
}

impl QueryRequestBuilder {
    /// Seed the search with a raw query vector.
    pub fn vector(mut self, vector: Vec<f32>) -> Self {
        self.vector = Some(vector);
        self
    }

    /// Seed the search with the id of a stored vector.
    pub fn by_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Restrict matches to vectors whose metadata satisfies `filter`.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = filter;
        self
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Return each match's components alongside its score.
    pub fn include_values(mut self, include: bool) -> Self {
        self.include_values = Some(include);
        self
    }

    /// Return each match's metadata alongside its score.
    pub fn include_metadata(mut self, include: bool) -> Self {
        self.include_metadata = Some(include);
        self
    }

    /// Finalize the payload.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArguments`] unless exactly one of a query
    /// vector and a query id was set.
    pub fn build(self) -> Result<QueryRequest> {
        match (&self.vector, &self.id) {
            (None, None) => Err(Error::InvalidArguments {
                message: "query requires a vector or a vector id".to_string(),
            }),
            (Some(_), Some(_)) => Err(Error::InvalidArguments {
                message: "query accepts a vector or a vector id, not both".to_string(),
            }),
            _ => Ok(QueryRequest {
                top_k: self.top_k,
                vector: self.vector,
                id: self.id,
                filter: self.filter,
                namespace: self.namespace,
                include_values: self.include_values,
                include_metadata: self.include_metadata,
            }),
        }
    }
}

/// One query match: the stored vector's id and its similarity score, plus
/// components and metadata when the query asked for them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredVector {
    pub id: String,
    pub score: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Metadata>,
}

/// The query response. `matches` is required: a body without it is a
/// parsing failure, never an empty success.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub matches: Vec<ScoredVector>,
    #[serde(default)]
    pub namespace: String,
}

/// The fetch response: requested vectors keyed by id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchResponse {
    pub vectors: BTreeMap<String, Vector>,
    #[serde(default)]
    pub namespace: String,
}

/// The delete payload. The three deletion modes (by id list, everything in
/// a namespace, by metadata filter) are mutually exclusive by construction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    ids: Option<Vec<String>>,
    #[serde(rename = "deleteAll", skip_serializing_if = "Option::is_none")]
    delete_all: Option<bool>,
    #[serde(skip_serializing_if = "Filter::is_none")]
    filter: Filter,
    #[serde(skip_serializing_if = "Option::is_none")]
    namespace: Option<String>,
}

impl DeleteRequest {
    /// Delete the vectors with the given ids.
    pub fn by_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            ids: Some(ids.into_iter().map(Into::into).collect()),
            delete_all: None,
            filter: Filter::None,
            namespace: None,
        }
    }

    /// Delete every vector in the target namespace.
    pub fn all() -> Self {
        Self { ids: None, delete_all: Some(true), filter: Filter::None, namespace: None }
    }

    /// Delete the vectors whose metadata satisfies `filter`.
    pub fn by_filter(filter: Filter) -> Self {
        Self { ids: None, delete_all: None, filter, namespace: None }
    }

    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }
}

/// Per-namespace statistics within [`IndexStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceSummary {
    #[serde(rename = "vectorCount")]
    pub vector_count: u64,
}

/// The describe-index-stats response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub namespaces: BTreeMap<String, NamespaceSummary>,
    pub dimension: u64,
    #[serde(rename = "indexFullness")]
    pub index_fullness: f64,
    #[serde(rename = "totalVectorCount")]
    pub total_vector_count: u64,
}
