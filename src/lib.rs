//! Typed Rust client for the [Pinecone](https://www.pinecone.io/) vector
//! database REST API.
//!
//! The crate covers the control plane (index and collection management) and
//! the data plane (vector upsert/update/fetch/query/delete, index
//! statistics), with a composable metadata [`Filter`] grammar for
//! restricting queries. Every API call returns a [`Result`]; failures are
//! values carrying the HTTP status and the service's structured error body,
//! never panics.
//!
//! # Example
//!
//! ```no_run
//! use pinecone_client::{Filter, Pinecone, QueryRequest};
//!
//! # async fn run() -> Result<(), pinecone_client::Error> {
//! let client = Pinecone::new("YOUR_API_KEY", "us-west1-gcp")?;
//!
//! let index = client.describe_index("my-index").await?;
//! println!("{} ({}d)", index.database.name, index.database.dimension);
//!
//! let request = QueryRequest::builder(3)
//!     .vector(vec![0.1, 0.2, 0.3])
//!     .filter(Filter::eq("genre", "drama"))
//!     .include_metadata(true)
//!     .build()?;
//! for matched in client.query("my-index", request).await?.matches {
//!     println!("{} scored {}", matched.id, matched.score);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Blocking mode
//!
//! With the `blocking` cargo feature, [`blocking::Pinecone`] exposes the
//! same surface synchronously.

#[cfg(feature = "blocking")]
pub mod blocking;
pub mod client;
pub mod error;
pub mod filter;
pub mod operation;
pub mod transport;
pub mod types;


pub use client::{FromResponse, Pinecone, PineconeBuilder};
pub use error::{ApiError, Error, ErrorDetail, Result};
pub use filter::{Filter, Metadata, MetadataValue};
pub use operation::Operation;
pub use transport::{HttpRequest, HttpResponse, HttpTransport, Method, ReqwestTransport};
pub use types::{
    Accepted, ApiMetadata, CollectionInfo, Database, DeleteRequest, FetchResponse,
    IndexConfiguration, IndexDescription, IndexState, IndexStats, IndexStatus, NamespaceSummary,
    NewCollection, NewIndex, QueryRequest, QueryResponse, ScoredVector, UpdateRequest,
    UpsertRequest, UpsertResponse, Vector,
};
