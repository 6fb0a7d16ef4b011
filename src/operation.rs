//! Operation descriptors for the Pinecone REST API.
//!
//! [`Operation`] is a sum type over every API action. Each variant carries
//! exactly the arguments its endpoint requires and knows how to render
//! itself: HTTP method, target host, URL path, query parameters, and JSON
//! body. The facade dispatches on the variant; it never special-cases
//! individual actions.
//!
//! Identifier interpolation goes through [`Url::path_segments_mut`], so a
//! separator inside an index or collection name is percent-encoded rather
//! than splitting the path.

use serde_json::{json, Value};
use snafu::ResultExt;
use url::Url;

use crate::error::{Error, Result, SerializeRequestSnafu};
use crate::filter::Filter;
use crate::transport::Method;
use crate::types::collection::NewCollection;
use crate::types::index::{IndexConfiguration, NewIndex};
use crate::types::vector::{DeleteRequest, QueryRequest, UpdateRequest, UpsertRequest};

/// Which host an operation addresses.
///
/// Control-plane actions go to the per-environment controller host;
/// data-plane actions go to the per-index service host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target<'a> {
    Controller,
    Index(&'a str),
}

/// One API action with its required arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    /// Resolve the project and user behind the API key.
    WhoAmI,
    ListIndexes,
    CreateIndex(NewIndex),
    DescribeIndex { name: String },
    ConfigureIndex { name: String, config: IndexConfiguration },
    DeleteIndex { name: String },
    ListCollections,
    CreateCollection(NewCollection),
    DescribeCollection { name: String },
    DeleteCollection { name: String },
    Upsert { index: String, request: UpsertRequest },
    Update { index: String, request: UpdateRequest },
    Fetch { index: String, ids: Vec<String>, namespace: Option<String> },
    Query { index: String, request: QueryRequest },
    DeleteVectors { index: String, request: DeleteRequest },
    DescribeIndexStats { index: String, filter: Filter },
}

impl Operation {
    /// The HTTP method for this action.
    pub fn method(&self) -> Method {
        match self {
            Operation::WhoAmI
            | Operation::ListIndexes
            | Operation::DescribeIndex { .. }
            | Operation::ListCollections
            | Operation::DescribeCollection { .. }
            | Operation::Fetch { .. } => Method::Get,
            Operation::CreateIndex(_)
            | Operation::CreateCollection(_)
            | Operation::Upsert { .. }
            | Operation::Update { .. }
            | Operation::Query { .. }
            | Operation::DeleteVectors { .. } => Method::Post,
            Operation::ConfigureIndex { .. } => Method::Patch,
            Operation::DeleteIndex { .. } | Operation::DeleteCollection { .. } => Method::Delete,
            // Unfiltered stats are a plain GET; a filter moves the request
            // into a POST body.
            Operation::DescribeIndexStats { filter, .. } => {
                if filter.is_none() {
                    Method::Get
                } else {
                    Method::Post
                }
            }
        }
    }

    /// The host this action addresses.
    pub fn target(&self) -> Target<'_> {
        match self {
            Operation::WhoAmI
            | Operation::ListIndexes
            | Operation::CreateIndex(_)
            | Operation::DescribeIndex { .. }
            | Operation::ConfigureIndex { .. }
            | Operation::DeleteIndex { .. }
            | Operation::ListCollections
            | Operation::CreateCollection(_)
            | Operation::DescribeCollection { .. }
            | Operation::DeleteCollection { .. } => Target::Controller,
            Operation::Upsert { index, .. }
            | Operation::Update { index, .. }
            | Operation::Fetch { index, .. }
            | Operation::Query { index, .. }
            | Operation::DeleteVectors { index, .. }
            | Operation::DescribeIndexStats { index, .. } => Target::Index(index),
        }
    }

    fn path_segments(&self) -> Vec<&str> {
        match self {
            Operation::WhoAmI => vec!["actions", "whoami"],
            Operation::ListIndexes | Operation::CreateIndex(_) => vec!["databases"],
            Operation::DescribeIndex { name }
            | Operation::ConfigureIndex { name, .. }
            | Operation::DeleteIndex { name } => vec!["databases", name],
            Operation::ListCollections | Operation::CreateCollection(_) => vec!["collections"],
            Operation::DescribeCollection { name } | Operation::DeleteCollection { name } => {
                vec!["collections", name]
            }
            Operation::Upsert { .. } => vec!["vectors", "upsert"],
            Operation::Update { .. } => vec!["vectors", "update"],
            Operation::Fetch { .. } => vec!["vectors", "fetch"],
            Operation::Query { .. } => vec!["query"],
            Operation::DeleteVectors { .. } => vec!["vectors", "delete"],
            Operation::DescribeIndexStats { .. } => vec!["describe_index_stats"],
        }
    }

    fn query_pairs(&self) -> Vec<(&str, &str)> {
        match self {
            Operation::Fetch { ids, namespace, .. } => {
                let mut pairs: Vec<(&str, &str)> =
                    ids.iter().map(|id| ("ids", id.as_str())).collect();
                if let Some(ns) = namespace {
                    pairs.push(("namespace", ns.as_str()));
                }
                pairs
            }
            _ => Vec::new(),
        }
    }

    /// The full request URL against the given base host.
    pub fn url(&self, base: &Url) -> Result<Url> {
        let mut url = base.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|()| Error::ConstructUrl { url: base.to_string() })?;
            // Keeps rendering stable when the base carries a trailing slash.
            segments.pop_if_empty();
            for segment in self.path_segments() {
                segments.push(segment);
            }
        }
        let pairs = self.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    /// The JSON body, when this action carries one.
    pub fn body(&self) -> Result<Option<Value>> {
        let body = match self {
            Operation::CreateIndex(request) => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::ConfigureIndex { config, .. } => {
                Some(serde_json::to_value(config).context(SerializeRequestSnafu)?)
            }
            Operation::CreateCollection(request) => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::Upsert { request, .. } => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::Update { request, .. } => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::Query { request, .. } => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::DeleteVectors { request, .. } => {
                Some(serde_json::to_value(request).context(SerializeRequestSnafu)?)
            }
            Operation::DescribeIndexStats { filter, .. } => {
                filter.to_wire().map(|wire| json!({ "filter": wire }))
            }
            _ => None,
        };
        Ok(body)
    }
}
