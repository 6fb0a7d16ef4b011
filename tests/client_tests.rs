//! End-to-end client tests against a stub transport.
//!
//! The stub implements [`HttpTransport`], records every rendered request,
//! and replays canned responses, so these tests exercise the full path
//! from typed arguments to wire bytes and back without a network.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};

use pinecone_client::error::BoxError;
use pinecone_client::{
    DeleteRequest, Error, Filter, HttpRequest, HttpResponse, HttpTransport, Method, Pinecone,
    PineconeBuilder, QueryRequest, UpsertRequest, Vector,
};

#[derive(Clone, Default)]
struct StubTransport {
    requests: Arc<Mutex<Vec<HttpRequest>>>,
    responses: Arc<Mutex<VecDeque<Result<HttpResponse, String>>>>,
}

impl StubTransport {
    fn new() -> Self {
        Self::default()
    }

    fn push_response(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            headers: vec![],
            body: body.as_bytes().to_vec(),
        }));
    }

    fn push_json(&self, status: u16, body: Value) {
        self.push_response(status, &body.to_string());
    }

    fn push_failure(&self, message: &str) {
        self.responses.lock().unwrap().push_back(Err(message.to_string()));
    }

    fn sent(&self) -> Vec<HttpRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> HttpRequest {
        self.sent().last().expect("no request was sent").clone()
    }
}

#[async_trait]
impl HttpTransport for StubTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        self.requests.lock().unwrap().push(request);
        match self.responses.lock().unwrap().pop_front().expect("no stubbed response left") {
            Ok(response) => Ok(response),
            Err(message) => {
                Err(Box::new(std::io::Error::new(std::io::ErrorKind::ConnectionRefused, message)))
            }
        }
    }
}

fn client_with(stub: &StubTransport) -> Pinecone {
    PineconeBuilder::new("test-api-key", "us-west1-gcp")
        .with_project_id("proj")
        .with_transport(stub.clone())
        .build()
        .unwrap()
}

fn body_json(request: &HttpRequest) -> Value {
    serde_json::from_slice(request.body.as_ref().expect("request has no body")).unwrap()
}

#[tokio::test]
async fn describe_index_parses_the_database_description() {
    let stub = StubTransport::new();
    stub.push_json(
        200,
        json!({
            "database": {"name": "idx1", "dimension": 8, "metric": "cosine"},
            "status": {"ready": true, "state": "Ready"}
        }),
    );
    let client = client_with(&stub);

    let description = client.describe_index("idx1").await.unwrap();
    assert_eq!(description.database.name, "idx1");
    assert_eq!(description.database.dimension, 8);
    assert!(description.status.ready);

    let request = stub.last();
    assert_eq!(request.method, Method::Get);
    assert_eq!(
        request.url.as_str(),
        "https://controller.us-west1-gcp.pinecone.io/databases/idx1"
    );
    assert!(request
        .headers
        .iter()
        .any(|(name, value)| name == "Api-Key" && value == "test-api-key"));
    assert!(request.body.is_none());
}

#[tokio::test]
async fn query_renders_top_k_vector_and_filter() {
    let stub = StubTransport::new();
    stub.push_json(200, json!({"matches": [], "namespace": ""}));
    let client = client_with(&stub);

    let request = QueryRequest::builder(3)
        .vector(vec![0.1, 0.2, 0.3])
        .filter(Filter::eq("genre", "drama"))
        .build()
        .unwrap();
    let response = client.query("idx1", request).await.unwrap();
    assert!(response.matches.is_empty());

    let sent = stub.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(
        sent.url.as_str(),
        "https://idx1-proj.svc.us-west1-gcp.pinecone.io/query"
    );
    let body = body_json(&sent);
    assert_eq!(body["topK"], json!(3));
    assert_eq!(body["vector"], serde_json::to_value(vec![0.1f32, 0.2, 0.3]).unwrap());
    assert_eq!(body["filter"], json!({"genre": {"$eq": "drama"}}));
}

#[tokio::test]
async fn rejected_request_carries_status_and_parsed_error_body() {
    let stub = StubTransport::new();
    stub.push_json(404, json!({"code": 5, "message": "not found"}));
    let client = client_with(&stub);

    let err = client.delete_index("missing").await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.api_message(), Some("not found"));
    match err {
        Error::RequestRejected { status, error, .. } => {
            assert_eq!(status, 404);
            assert_eq!(error.unwrap().code, 5);
        }
        other => panic!("expected RequestRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn rejected_request_with_unparseable_body_keeps_the_raw_text() {
    let stub = StubTransport::new();
    stub.push_response(500, "internal server error");
    let client = client_with(&stub);

    let err = client.list_indexes().await.unwrap_err();
    match err {
        Error::RequestRejected { status, error, body } => {
            assert_eq!(status, 500);
            assert!(error.is_none());
            assert_eq!(body, "internal server error");
        }
        other => panic!("expected RequestRejected, got {other:?}"),
    }
}

#[tokio::test]
async fn success_body_with_missing_matches_is_a_parsing_failure() {
    let stub = StubTransport::new();
    stub.push_json(200, json!({"namespace": ""}));
    let client = client_with(&stub);

    let request = QueryRequest::builder(1).by_id("v1").build().unwrap();
    let err = client.query("idx1", request).await.unwrap_err();
    assert!(matches!(err, Error::ParsingFailed { .. }));
}

#[tokio::test]
async fn transport_failure_surfaces_as_request_failed() {
    let stub = StubTransport::new();
    stub.push_failure("connection refused");
    let client = client_with(&stub);

    let err = client.list_collections().await.unwrap_err();
    assert!(matches!(err, Error::RequestFailed { .. }));
}

#[tokio::test]
async fn unfiltered_stats_use_get_with_no_body() {
    let stub = StubTransport::new();
    stub.push_json(
        200,
        json!({
            "namespaces": {"": {"vectorCount": 3}},
            "dimension": 3,
            "indexFullness": 0.0,
            "totalVectorCount": 3
        }),
    );
    let client = client_with(&stub);

    let stats = client.describe_index_stats("idx1", Filter::None).await.unwrap();
    assert_eq!(stats.total_vector_count, 3);

    let sent = stub.last();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(
        sent.url.as_str(),
        "https://idx1-proj.svc.us-west1-gcp.pinecone.io/describe_index_stats"
    );
    assert!(sent.body.is_none());
}

#[tokio::test]
async fn filtered_stats_post_the_filter_body() {
    let stub = StubTransport::new();
    stub.push_json(
        200,
        json!({
            "namespaces": {},
            "dimension": 3,
            "indexFullness": 0.0,
            "totalVectorCount": 0
        }),
    );
    let client = client_with(&stub);

    client
        .describe_index_stats("idx1", Filter::eq("title", "Nutrition"))
        .await
        .unwrap();

    let sent = stub.last();
    assert_eq!(sent.method, Method::Post);
    assert_eq!(body_json(&sent), json!({"filter": {"title": {"$eq": "Nutrition"}}}));
}

#[tokio::test]
async fn upsert_and_delete_round_trip_through_the_index_host() {
    let stub = StubTransport::new();
    stub.push_json(200, json!({"upsertedCount": 2}));
    stub.push_response(200, "{}");
    let client = client_with(&stub);

    let upsert = UpsertRequest::builder(vec![
        Vector::new("1", vec![0.0, 0.0, 0.0]),
        Vector::new("2", vec![1.0, 1.0, 1.0]),
    ])
    .build()
    .unwrap();
    let response = client.upsert("idx1", upsert).await.unwrap();
    assert_eq!(response.upserted_count, 2);

    client.delete_vectors("idx1", DeleteRequest::by_ids(["1"])).await.unwrap();

    let sent = stub.sent();
    assert_eq!(sent[0].url.path(), "/vectors/upsert");
    assert_eq!(sent[1].url.path(), "/vectors/delete");
    assert_eq!(body_json(&sent[1]), json!({"ids": ["1"]}));
}

#[tokio::test]
async fn fetch_passes_ids_as_query_parameters() {
    let stub = StubTransport::new();
    stub.push_json(
        200,
        json!({"vectors": {"1": {"id": "1", "values": [0.0]}}, "namespace": "ns"}),
    );
    let client = client_with(&stub);

    let response = client
        .fetch("idx1", vec!["1".to_string(), "2".to_string()], Some("ns".to_string()))
        .await
        .unwrap();
    assert_eq!(response.namespace, "ns");
    assert_eq!(response.vectors["1"].id, "1");

    let sent = stub.last();
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url.query(), Some("ids=1&ids=2&namespace=ns"));
}

#[tokio::test]
async fn project_id_is_resolved_once_via_whoami() {
    let stub = StubTransport::new();
    stub.push_json(
        200,
        json!({"project_name": "7c6ab97", "user_label": "default", "user_name": "e2ff7f9"}),
    );
    stub.push_json(200, json!({"matches": [], "namespace": ""}));
    stub.push_json(200, json!({"matches": [], "namespace": ""}));

    // No project id configured: the first data-plane call resolves it.
    let client = PineconeBuilder::new("test-api-key", "us-west1-gcp")
        .with_transport(stub.clone())
        .build()
        .unwrap();

    let request = QueryRequest::builder(1).by_id("v1").build().unwrap();
    client.query("idx1", request.clone()).await.unwrap();
    client.query("idx1", request).await.unwrap();

    let sent = stub.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(
        sent[0].url.as_str(),
        "https://controller.us-west1-gcp.pinecone.io/actions/whoami"
    );
    assert_eq!(
        sent[1].url.as_str(),
        "https://idx1-7c6ab97.svc.us-west1-gcp.pinecone.io/query"
    );
    // The cached project id is reused; no second whoami.
    assert_eq!(sent[2].url.host_str(), sent[1].url.host_str());
}

#[tokio::test]
async fn accepted_operations_keep_the_raw_acknowledgment() {
    let stub = StubTransport::new();
    stub.push_response(202, "accepted");
    let client = client_with(&stub);

    let accepted = client.delete_index("idx1").await.unwrap();
    assert_eq!(accepted.message, "accepted");
}

#[tokio::test]
async fn concurrent_calls_share_one_client() {
    let stub = StubTransport::new();
    for _ in 0..4 {
        stub.push_json(200, json!(["a", "b"]));
    }
    let client = client_with(&stub);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.list_indexes().await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), vec!["a", "b"]);
    }
    assert_eq!(stub.sent().len(), 4);
}

#[test]
fn invalid_api_key_is_rejected_at_build_time() {
    let err = PineconeBuilder::new("bad\nkey", "us-west1-gcp").build().unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));

    let err = PineconeBuilder::new("", "us-west1-gcp").build().unwrap_err();
    assert!(matches!(err, Error::InvalidApiKey));
}
