//! Account-level API metadata.

use serde::{Deserialize, Serialize};

/// The response of the `whoami` action: the project and user the supplied
/// API key belongs to.
///
/// The project name is also what the client needs to address an index's
/// data-plane host, so the facade resolves this once and caches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiMetadata {
    pub project_name: String,
    pub user_label: String,
    pub user_name: String,
}
