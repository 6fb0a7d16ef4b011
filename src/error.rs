//! Error types for the `pinecone-client` crate.
//!
//! Every fallible operation in this crate returns [`Result`]; nothing in the
//! request path panics on wire conditions. The variants of [`Error`] split
//! failures by what the caller can do about them: a rejected request carries
//! the service's structured error body when one was returned, a failed
//! request carries the transport error, and a parsing failure carries the
//! raw body that did not match the expected shape.

use serde::{Deserialize, Serialize};
use snafu::Snafu;

/// A boxed transport-level error (connection refused, timeout, TLS failure).
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// A convenience result type for Pinecone operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// A single detail entry within an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDetail {
    /// Type URL identifying the detail payload.
    #[serde(rename = "typeUrl")]
    pub type_url: String,
    /// The detail payload itself.
    pub value: String,
}

/// An error response body returned by the Pinecone API.
///
/// This is the structure the service documents for non-2xx responses. When a
/// rejected request's body parses into this shape it is attached to
/// [`Error::RequestRejected`]; when it does not, the raw body is kept
/// instead and no formatting guarantees are made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    /// Service-assigned error code.
    pub code: i32,
    /// Human-readable error message.
    pub message: String,
    /// Optional per-field error details.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<ErrorDetail>,
}

/// Errors produced by the Pinecone client.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// The API key contains characters that cannot appear in an HTTP header.
    #[snafu(display("API key contains invalid header characters"))]
    InvalidApiKey,

    /// A host URL could not be parsed from the configured environment or
    /// index name.
    #[snafu(display("failed to construct a URL for host '{host}'"))]
    InvalidHost { source: url::ParseError, host: String },

    /// The base URL cannot carry request paths (not a hierarchical URL).
    #[snafu(display("URL '{url}' cannot carry request paths"))]
    ConstructUrl { url: String },

    /// A request payload failed to serialize to JSON.
    #[snafu(display("failed to serialize request body"))]
    SerializeRequest { source: serde_json::Error },

    /// The transport completed the exchange but the server returned a
    /// non-2xx status.
    #[snafu(display(
        "request rejected with status {status}: {}",
        error.as_ref().map(|e| e.message.as_str()).unwrap_or(body.as_str())
    ))]
    RequestRejected {
        /// HTTP status code returned by the server.
        status: u16,
        /// The parsed error body, when the server returned one in the
        /// documented shape.
        error: Option<ApiError>,
        /// The raw response body.
        body: String,
    },

    /// The transport could not complete the exchange.
    #[snafu(display("request could not be completed"))]
    RequestFailed { source: BoxError },

    /// A 2xx response body did not match the expected result shape.
    #[snafu(display("failed to parse response body: {body}"))]
    ParsingFailed { source: serde_json::Error, body: String },

    /// A request payload was finalized with a required field unset or an
    /// inconsistent combination of fields. Surfaced before any request is
    /// constructed.
    #[snafu(display("invalid request arguments: {message}"))]
    InvalidArguments { message: String },

    /// The blocking facade could not start its internal async runtime.
    #[snafu(display("failed to start the blocking runtime"))]
    Runtime { source: std::io::Error },
}

impl Error {
    /// The HTTP status code, when this error came from a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RequestRejected { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The service's error message, when the rejection body parsed.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Error::RequestRejected { error: Some(err), .. } => Some(&err.message),
            _ => None,
        }
    }
}
