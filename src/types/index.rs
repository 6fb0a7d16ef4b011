//! Index (database) resources and their creation/configuration payloads.

use serde::{Deserialize, Serialize};

/// Pod states an index moves through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexState {
    Initializing,
    ScalingUp,
    ScalingDown,
    Terminating,
    Ready,
    /// A state this client does not know about. New service-side states
    /// parse into this rather than failing the whole response.
    #[serde(other)]
    Unknown,
}

/// The readiness status of an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStatus {
    pub ready: bool,
    pub state: IndexState,
}

/// The static description of an index.
///
/// Pod-related fields are absent on responses that do not report pod
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub dimension: u32,
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pod_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pods: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shards: Option<u16>,
}

/// The complete describe-index response: static description plus status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDescription {
    pub database: Database,
    pub status: IndexStatus,
}

/// The partial-update payload for reconfiguring a live index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfiguration {
    replicas: u16,
    pod_type: String,
}

impl IndexConfiguration {
    pub fn new(replicas: u16, pod_type: impl Into<String>) -> Self {
        Self { replicas, pod_type: pod_type.into() }
    }
}

/// The creation payload for a new index.
///
/// `name` and `dimension` are required; everything else is optional and
/// omitted from the body when unset so the service applies its documented
/// defaults. Built via [`NewIndex::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIndex {
    name: String,
    dimension: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metric: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pods: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pod_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    shards: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    replicas: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata_config: Option<MetadataConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    source_collection: Option<String>,
}

/// Restricts which metadata keys the service indexes for filtering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataConfig {
    pub indexed: Vec<String>,
}

impl NewIndex {
    /// Start building an index creation payload.
    pub fn builder(name: impl Into<String>, dimension: u32) -> NewIndexBuilder {
        NewIndexBuilder {
            index: NewIndex {
                name: name.into(),
                dimension,
                metric: None,
                pods: None,
                pod_type: None,
                shards: None,
                replicas: None,
                metadata_config: None,
                source_collection: None,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dimension(&self) -> u32 {
        self.dimension
    }
}

/// Builder for [`NewIndex`].
#[derive(Debug, Clone)]
pub struct NewIndexBuilder {
    index: NewIndex,
}

impl NewIndexBuilder {
    /// Similarity metric (`cosine`, `dotproduct`, or `euclidean`).
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.index.metric = Some(metric.into());
        self
    }

    pub fn pods(mut self, pods: u16) -> Self {
        self.index.pods = Some(pods);
        self
    }

    pub fn pod_type(mut self, pod_type: impl Into<String>) -> Self {
        self.index.pod_type = Some(pod_type.into());
        self
    }

    pub fn shards(mut self, shards: u16) -> Self {
        self.index.shards = Some(shards);
        self
    }

    pub fn replicas(mut self, replicas: u16) -> Self {
        self.index.replicas = Some(replicas);
        self
    }

    /// Only index the named metadata keys for filtering.
    pub fn metadata_config(mut self, indexed: Vec<String>) -> Self {
        self.index.metadata_config = Some(MetadataConfig { indexed });
        self
    }

    /// Seed the index from an existing collection.
    pub fn source_collection(mut self, source: impl Into<String>) -> Self {
        self.index.source_collection = Some(source.into());
        self
    }

    pub fn build(self) -> NewIndex {
        self.index
    }
}
