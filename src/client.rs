//! The Pinecone client facade.
//!
//! [`PineconeBuilder`] assembles connection configuration; [`Pinecone`] is
//! the cheaply cloneable handle that executes operations. Each call is a
//! single request/response transaction: the facade keeps no cross-call
//! state, performs no caching of results, and never retries — backoff
//! policy belongs to the transport or the caller.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use snafu::ResultExt;
use tokio::sync::Mutex;
use tracing::instrument;
use url::Url;

use crate::error::{
    ApiError, Error, InvalidHostSnafu, ParsingFailedSnafu, RequestFailedSnafu, Result,
    SerializeRequestSnafu,
};
use crate::filter::Filter;
use crate::operation::{Operation, Target};
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{
    Accepted, ApiMetadata, CollectionInfo, DeleteRequest, FetchResponse, IndexConfiguration,
    IndexDescription, IndexStats, NewCollection, NewIndex, QueryRequest, QueryResponse,
    UpdateRequest, UpsertRequest, UpsertResponse,
};

/// Maps a successful response body to an operation's declared result type.
pub trait FromResponse: Sized {
    fn from_response(body: &[u8]) -> Result<Self>;
}

fn parse_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    serde_json::from_slice(body)
        .context(ParsingFailedSnafu { body: String::from_utf8_lossy(body).into_owned() })
}

macro_rules! json_response {
    ($($ty:ty),+ $(,)?) => {$(
        impl FromResponse for $ty {
            fn from_response(body: &[u8]) -> Result<Self> {
                parse_json(body)
            }
        }
    )+};
}

json_response!(
    ApiMetadata,
    IndexDescription,
    CollectionInfo,
    Vec<String>,
    UpsertResponse,
    QueryResponse,
    FetchResponse,
    IndexStats,
);

impl FromResponse for Accepted {
    // Acknowledgment bodies are short plain text, not JSON.
    fn from_response(body: &[u8]) -> Result<Self> {
        Ok(Accepted::from_body(body))
    }
}

/// A builder for [`Pinecone`].
///
/// # Examples
///
/// ```no_run
/// use pinecone_client::PineconeBuilder;
///
/// # fn run() -> Result<(), pinecone_client::Error> {
/// let client = PineconeBuilder::new("YOUR_API_KEY", "us-west1-gcp").build()?;
/// # Ok(())
/// # }
/// ```
pub struct PineconeBuilder {
    api_key: String,
    environment: String,
    project_id: Option<String>,
    controller_url: Option<Url>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl PineconeBuilder {
    /// Start building a client for the given API key and environment.
    pub fn new(api_key: impl Into<String>, environment: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            environment: environment.into(),
            project_id: None,
            controller_url: None,
            transport: None,
        }
    }

    /// Supply the project id up front instead of resolving it via `whoami`
    /// on the first data-plane call.
    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    /// Override the controller host. Mainly useful for tests and proxies.
    pub fn with_controller_url(mut self, url: Url) -> Self {
        self.controller_url = Some(url);
        self
    }

    /// Substitute the HTTP transport. The default is [`ReqwestTransport`].
    pub fn with_transport(mut self, transport: impl HttpTransport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Build the client, validating the configuration.
    pub fn build(self) -> Result<Pinecone> {
        if self.api_key.is_empty() || !self.api_key.bytes().all(|b| (0x20..0x7f).contains(&b)) {
            return Err(Error::InvalidApiKey);
        }

        let controller_url = match self.controller_url {
            Some(url) => url,
            None => {
                let host = format!("https://controller.{}.pinecone.io", self.environment);
                Url::parse(&host).context(InvalidHostSnafu { host })?
            }
        };

        let transport =
            self.transport.unwrap_or_else(|| Arc::new(ReqwestTransport::default()));

        Ok(Pinecone {
            inner: Arc::new(ClientInner {
                api_key: self.api_key,
                environment: self.environment,
                controller_url,
                transport,
                project_id: Mutex::new(self.project_id),
            }),
        })
    }
}

struct ClientInner {
    api_key: String,
    environment: String,
    controller_url: Url,
    transport: Arc<dyn HttpTransport>,
    /// Resolved lazily via `whoami` and then reused for every index host.
    project_id: Mutex<Option<String>>,
}

/// The Pinecone REST API client.
///
/// `Clone` is cheap (the configuration is shared behind an `Arc`) and the
/// client is safe to use from concurrent tasks. Every method is a single
/// request/response exchange returning `Result`; see [`crate::error::Error`]
/// for the failure taxonomy.
#[derive(Clone)]
pub struct Pinecone {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for Pinecone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pinecone").finish_non_exhaustive()
    }
}

impl Pinecone {
    /// A client with default transport and hosts.
    pub fn new(api_key: impl Into<String>, environment: impl Into<String>) -> Result<Self> {
        PineconeBuilder::new(api_key, environment).build()
    }

    /// Execute one operation descriptor, parsing the response into its
    /// declared result type.
    #[instrument(skip_all, fields(request.method = %operation.method()))]
    pub async fn execute<T: FromResponse>(&self, operation: Operation) -> Result<T> {
        let base = self.base_url_for(&operation).await?;
        let url = operation.url(&base)?;
        let body = operation
            .body()?
            .map(|value| serde_json::to_vec(&value))
            .transpose()
            .context(SerializeRequestSnafu)?;

        let mut headers = vec![
            ("Api-Key".to_string(), self.inner.api_key.clone()),
            ("Accept".to_string(), "application/json".to_string()),
        ];
        if body.is_some() {
            headers.push((
                "Content-Type".to_string(),
                "application/json; charset=utf-8".to_string(),
            ));
        }

        let request = HttpRequest { method: operation.method(), url, headers, body };
        tracing::debug!(url = %request.url, "request built");

        let response =
            self.inner.transport.send(request).await.context(RequestFailedSnafu)?;
        tracing::debug!(status = response.status, "response received");

        let response = Self::check_response(response)?;
        T::from_response(&response.body)
    }

    /// Reject non-2xx responses, attaching the parsed error body when the
    /// server returned one in the documented shape.
    fn check_response(response: HttpResponse) -> Result<HttpResponse> {
        if response.is_success() {
            return Ok(response);
        }
        let error = serde_json::from_slice::<ApiError>(&response.body).ok();
        let body = String::from_utf8_lossy(&response.body).into_owned();
        Err(Error::RequestRejected { status: response.status, error, body })
    }

    async fn base_url_for(&self, operation: &Operation) -> Result<Url> {
        match operation.target() {
            Target::Controller => Ok(self.inner.controller_url.clone()),
            Target::Index(index) => self.index_url(index).await,
        }
    }

    /// The data-plane host for one index:
    /// `https://{index}-{project}.svc.{environment}.pinecone.io`.
    async fn index_url(&self, index: &str) -> Result<Url> {
        let project = self.project_id().await?;
        let host = format!(
            "https://{index}-{project}.svc.{}.pinecone.io",
            self.inner.environment
        );
        Url::parse(&host).context(InvalidHostSnafu { host })
    }

    async fn project_id(&self) -> Result<String> {
        {
            let cached = self.inner.project_id.lock().await;
            if let Some(id) = cached.as_ref() {
                return Ok(id.clone());
            }
        }

        let metadata = Box::pin(self.whoami()).await?;

        let mut cached = self.inner.project_id.lock().await;
        *cached = Some(metadata.project_name.clone());
        Ok(metadata.project_name)
    }

    /// The project and user behind the configured API key.
    #[instrument(skip_all)]
    pub async fn whoami(&self) -> Result<ApiMetadata> {
        self.execute(Operation::WhoAmI).await
    }

    /// List the names of all indexes in the project.
    #[instrument(skip_all)]
    pub async fn list_indexes(&self) -> Result<Vec<String>> {
        self.execute(Operation::ListIndexes).await
    }

    /// Create a new index. Creation is asynchronous on the service side;
    /// poll [`describe_index`](Self::describe_index) for readiness.
    #[instrument(skip_all, fields(index.name = request.name(), index.dimension = request.dimension()))]
    pub async fn create_index(&self, request: NewIndex) -> Result<Accepted> {
        self.execute(Operation::CreateIndex(request)).await
    }

    /// Describe one index: static configuration plus readiness status.
    #[instrument(skip_all, fields(index.name = name))]
    pub async fn describe_index(&self, name: &str) -> Result<IndexDescription> {
        self.execute(Operation::DescribeIndex { name: name.to_string() }).await
    }

    /// Reconfigure a live index's replicas and pod type.
    #[instrument(skip_all, fields(index.name = name))]
    pub async fn configure_index(
        &self,
        name: &str,
        config: IndexConfiguration,
    ) -> Result<Accepted> {
        self.execute(Operation::ConfigureIndex { name: name.to_string(), config }).await
    }

    /// Delete an index and all of its data.
    #[instrument(skip_all, fields(index.name = name))]
    pub async fn delete_index(&self, name: &str) -> Result<Accepted> {
        self.execute(Operation::DeleteIndex { name: name.to_string() }).await
    }

    /// List the names of all collections in the project.
    #[instrument(skip_all)]
    pub async fn list_collections(&self) -> Result<Vec<String>> {
        self.execute(Operation::ListCollections).await
    }

    /// Snapshot an index into a new collection.
    #[instrument(skip_all, fields(collection.name = request.name()))]
    pub async fn create_collection(&self, request: NewCollection) -> Result<Accepted> {
        self.execute(Operation::CreateCollection(request)).await
    }

    /// Describe one collection.
    #[instrument(skip_all, fields(collection.name = name))]
    pub async fn describe_collection(&self, name: &str) -> Result<CollectionInfo> {
        self.execute(Operation::DescribeCollection { name: name.to_string() }).await
    }

    /// Delete a collection.
    #[instrument(skip_all, fields(collection.name = name))]
    pub async fn delete_collection(&self, name: &str) -> Result<Accepted> {
        self.execute(Operation::DeleteCollection { name: name.to_string() }).await
    }

    /// Write vectors into an index, overwriting records with matching ids.
    #[instrument(skip_all, fields(index.name = index))]
    pub async fn upsert(&self, index: &str, request: UpsertRequest) -> Result<UpsertResponse> {
        self.execute(Operation::Upsert { index: index.to_string(), request }).await
    }

    /// Partially modify one stored vector.
    #[instrument(skip_all, fields(index.name = index))]
    pub async fn update(&self, index: &str, request: UpdateRequest) -> Result<Accepted> {
        self.execute(Operation::Update { index: index.to_string(), request }).await
    }

    /// Fetch stored vectors by id.
    #[instrument(skip_all, fields(index.name = index, ids.count = ids.len()))]
    pub async fn fetch(
        &self,
        index: &str,
        ids: Vec<String>,
        namespace: Option<String>,
    ) -> Result<FetchResponse> {
        self.execute(Operation::Fetch { index: index.to_string(), ids, namespace }).await
    }

    /// Run a top-k similarity query against an index.
    #[instrument(skip_all, fields(index.name = index))]
    pub async fn query(&self, index: &str, request: QueryRequest) -> Result<QueryResponse> {
        self.execute(Operation::Query { index: index.to_string(), request }).await
    }

    /// Delete stored vectors by id list, namespace, or metadata filter.
    #[instrument(skip_all, fields(index.name = index))]
    pub async fn delete_vectors(&self, index: &str, request: DeleteRequest) -> Result<Accepted> {
        self.execute(Operation::DeleteVectors { index: index.to_string(), request }).await
    }

    /// Summarize an index's contents, optionally restricted to vectors
    /// matching a metadata filter. Pass [`Filter::None`] for the whole
    /// index.
    #[instrument(skip_all, fields(index.name = index, filter.present = !filter.is_none()))]
    pub async fn describe_index_stats(&self, index: &str, filter: Filter) -> Result<IndexStats> {
        self.execute(Operation::DescribeIndexStats { index: index.to_string(), filter }).await
    }
}
