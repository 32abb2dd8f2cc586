//! Local HTTP server standing in for the recipe catalog

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Canned reply for one query
#[derive(Clone)]
pub enum MockResponse {
    Json(Value),
    Status(u16, String),
    Raw(String),
}

/// Request as seen by the mock
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub api_key: Option<String>,
    pub host: Option<String>,
    pub params: HashMap<String, String>,
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<HashMap<String, MockResponse>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Running mock catalog; the server task lives as long as the test runtime
pub struct MockCatalog {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockCatalog {
    /// Serve `responses` keyed by the `q` parameter; unknown queries get `{"results": []}`
    pub async fn start(responses: Vec<(&str, MockResponse)>) -> Self {
        let state = MockState {
            responses: Arc::new(
                responses
                    .into_iter()
                    .map(|(q, r)| (q.to_string(), r))
                    .collect(),
            ),
            requests: Arc::new(Mutex::new(Vec::new())),
        };
        let requests = state.requests.clone();

        let app = Router::new()
            .route("/recipes/list", get(list_recipes))
            .with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock catalog");
        let addr = listener.local_addr().expect("Mock catalog has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock catalog failed");
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn list_recipes(
    State(state): State<MockState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
    };
    state.requests.lock().unwrap().push(RecordedRequest {
        api_key: header("x-rapidapi-key"),
        host: header("x-rapidapi-host"),
        params: params.clone(),
    });

    let query = params.get("q").cloned().unwrap_or_default();
    match state.responses.get(&query) {
        Some(MockResponse::Json(body)) => Json(body.clone()).into_response(),
        Some(MockResponse::Status(code, body)) => (
            StatusCode::from_u16(*code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body.clone(),
        )
            .into_response(),
        Some(MockResponse::Raw(body)) => (
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.clone(),
        )
            .into_response(),
        None => Json(serde_json::json!({"count": 0, "results": []})).into_response(),
    }
}
