// Fake upstream servers for integration tests.
// Each server records what it receives and replays canned responses.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

/// Bind `router` to an ephemeral local port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Fake GitHub API keyed by request path. Unknown paths answer 404.
#[derive(Default)]
pub struct FakeGitHub {
    responses: Mutex<HashMap<String, (StatusCode, String)>>,
    requests: Mutex<Vec<Uri>>,
}

impl FakeGitHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, path: &str, status: StatusCode, body: impl Into<String>) {
        self.responses
            .lock()
            .unwrap()
            .insert(path.to_string(), (status, body.into()));
    }

    pub fn requests(&self) -> Vec<Uri> {
        self.requests.lock().unwrap().clone()
    }

    pub fn paths(&self) -> Vec<String> {
        self.requests()
            .iter()
            .map(|uri| uri.path().to_string())
            .collect()
    }

    pub fn hits(&self, path: &str) -> usize {
        self.paths().iter().filter(|p| p.as_str() == path).count()
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        spawn(Router::new().fallback(github_handler).with_state(self.clone())).await
    }
}

async fn github_handler(State(fake): State<Arc<FakeGitHub>>, uri: Uri) -> Response {
    let canned = fake.responses.lock().unwrap().get(uri.path()).cloned();
    fake.requests.lock().unwrap().push(uri);

    let rate_headers = [
        ("x-ratelimit-limit", "60"),
        ("x-ratelimit-remaining", "59"),
        ("x-ratelimit-reset", "1700000000"),
    ];
    match canned {
        Some((status, body)) => (status, rate_headers, body).into_response(),
        None => (
            StatusCode::NOT_FOUND,
            rate_headers,
            r#"{"message":"Not Found"}"#,
        )
            .into_response(),
    }
}

/// Decoded query parameters of a recorded request.
pub fn query_params(uri: &Uri) -> HashMap<String, String> {
    let url = reqwest::Url::parse(&format!("http://fake{}", uri)).unwrap();
    url.query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Fake JSON endpoint that records POSTed bodies and headers.
pub struct FakeJsonEndpoint {
    status: StatusCode,
    reply: Value,
    bodies: Mutex<Vec<Value>>,
    authorizations: Mutex<Vec<Option<String>>>,
}

impl FakeJsonEndpoint {
    pub fn new(status: StatusCode, reply: Value) -> Arc<Self> {
        Arc::new(Self {
            status,
            reply,
            bodies: Mutex::new(Vec::new()),
            authorizations: Mutex::new(Vec::new()),
        })
    }

    /// A relay or model answering with a single summary.
    pub fn summary(text: &str) -> Arc<Self> {
        Self::new(StatusCode::OK, json!([{ "summary_text": text }]))
    }

    pub fn failing() -> Arc<Self> {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "Failed to summarize text" }),
        )
    }

    pub fn bodies(&self) -> Vec<Value> {
        self.bodies.lock().unwrap().clone()
    }

    pub fn authorizations(&self) -> Vec<Option<String>> {
        self.authorizations.lock().unwrap().clone()
    }

    pub async fn serve(self: &Arc<Self>) -> String {
        spawn(Router::new().fallback(json_handler).with_state(self.clone())).await
    }
}

async fn json_handler(
    State(fake): State<Arc<FakeJsonEndpoint>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    fake.bodies.lock().unwrap().push(body);
    fake.authorizations.lock().unwrap().push(
        headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string),
    );
    (fake.status, Json(fake.reply.clone())).into_response()
}

pub fn repository_json(id: u64, owner: &str, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "full_name": format!("{}/{}", owner, name),
        "owner": { "id": id + 1000, "login": owner, "avatar_url": null },
        "html_url": format!("https://github.com/{}/{}", owner, name),
        "description": "A repository",
        "stargazers_count": 1200,
        "forks_count": 80,
        "open_issues_count": 4,
        "language": "Rust",
        "updated_at": "2024-05-01T12:00:00Z"
    })
}

pub fn search_json(items: Vec<Value>) -> String {
    json!({
        "total_count": items.len(),
        "incomplete_results": false,
        "items": items
    })
    .to_string()
}

pub fn issue_json(number: u64, title: &str) -> Value {
    json!({
        "id": number + 5000,
        "number": number,
        "title": title,
        "html_url": format!("https://github.com/o/r/issues/{}", number),
        "user": { "login": "octocat" },
        "comments": 3,
        "created_at": "2024-05-01T12:00:00Z"
    })
}
