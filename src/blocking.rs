//! A blocking facade over the async client.
//!
//! Enabled by the `blocking` cargo feature. [`Pinecone`] here owns a
//! current-thread tokio runtime and drives the async client to completion
//! on the calling thread; operation, request, and result types are shared
//! with the async mode.

use tokio::runtime::Runtime;

use crate::client::{FromResponse, PineconeBuilder};
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::operation::Operation;
use crate::types::{
    Accepted, ApiMetadata, CollectionInfo, DeleteRequest, FetchResponse, IndexConfiguration,
    IndexDescription, IndexStats, NewCollection, NewIndex, QueryRequest, QueryResponse,
    UpdateRequest, UpsertRequest, UpsertResponse,
};

/// A blocking Pinecone client. Each method does not return until the HTTP
/// exchange completes on the calling thread.
pub struct Pinecone {
    inner: crate::client::Pinecone,
    runtime: Runtime,
}

impl Pinecone {
    /// A blocking client with default transport and hosts.
    pub fn new(api_key: impl Into<String>, environment: impl Into<String>) -> Result<Self> {
        Self::from_builder(PineconeBuilder::new(api_key, environment))
    }

    /// A blocking client from a configured [`PineconeBuilder`].
    pub fn from_builder(builder: PineconeBuilder) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|source| Error::Runtime { source })?;
        Ok(Self { inner: builder.build()?, runtime })
    }

    /// Execute one operation descriptor synchronously.
    pub fn execute<T: FromResponse>(&self, operation: Operation) -> Result<T> {
        self.runtime.block_on(self.inner.execute(operation))
    }

    pub fn whoami(&self) -> Result<ApiMetadata> {
        self.runtime.block_on(self.inner.whoami())
    }

    pub fn list_indexes(&self) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.list_indexes())
    }

    pub fn create_index(&self, request: NewIndex) -> Result<Accepted> {
        self.runtime.block_on(self.inner.create_index(request))
    }

    pub fn describe_index(&self, name: &str) -> Result<IndexDescription> {
        self.runtime.block_on(self.inner.describe_index(name))
    }

    pub fn configure_index(&self, name: &str, config: IndexConfiguration) -> Result<Accepted> {
        self.runtime.block_on(self.inner.configure_index(name, config))
    }

    pub fn delete_index(&self, name: &str) -> Result<Accepted> {
        self.runtime.block_on(self.inner.delete_index(name))
    }

    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.list_collections())
    }

    pub fn create_collection(&self, request: NewCollection) -> Result<Accepted> {
        self.runtime.block_on(self.inner.create_collection(request))
    }

    pub fn describe_collection(&self, name: &str) -> Result<CollectionInfo> {
        self.runtime.block_on(self.inner.describe_collection(name))
    }

    pub fn delete_collection(&self, name: &str) -> Result<Accepted> {
        self.runtime.block_on(self.inner.delete_collection(name))
    }

    pub fn upsert(&self, index: &str, request: UpsertRequest) -> Result<UpsertResponse> {
        self.runtime.block_on(self.inner.upsert(index, request))
    }

    pub fn update(&self, index: &str, request: UpdateRequest) -> Result<Accepted> {
        self.runtime.block_on(self.inner.update(index, request))
    }

    pub fn fetch(
        &self,
        index: &str,
        ids: Vec<String>,
        namespace: Option<String>,
    ) -> Result<FetchResponse> {
        self.runtime.block_on(self.inner.fetch(index, ids, namespace))
    }

    pub fn query(&self, index: &str, request: QueryRequest) -> Result<QueryResponse> {
        self.runtime.block_on(self.inner.query(index, request))
    }

    pub fn delete_vectors(&self, index: &str, request: DeleteRequest) -> Result<Accepted> {
        self.runtime.block_on(self.inner.delete_vectors(index, request))
    }

    pub fn describe_index_stats(&self, index: &str, filter: Filter) -> Result<IndexStats> {
        self.runtime.block_on(self.inner.describe_index_stats(index, filter))
    }
}
