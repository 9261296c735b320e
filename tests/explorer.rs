// Explorer operations against fake GitHub and relay servers.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tempfile::TempDir;

use common::{FakeGitHub, FakeJsonEndpoint, issue_json, query_params, repository_json, search_json};
use repolens::cache::Cache;
use repolens::github::{GitHubClient, SearchQuery, SortMode};
use repolens::summarize::{SUMMARY_FALLBACK, Summarizer};
use repolens::{Document, Explorer};

const SEARCH_PATH: &str = "/search/repositories";

struct Harness {
    github: Arc<FakeGitHub>,
    relay: Arc<FakeJsonEndpoint>,
    explorer: Explorer,
    _dir: TempDir,
}

async fn harness(relay: Arc<FakeJsonEndpoint>, cached: bool) -> Harness {
    let github = FakeGitHub::new();
    let github_url = github.serve().await;
    let relay_url = relay.serve().await;

    let dir = TempDir::new().unwrap();
    let cache = cached.then(|| Cache::new(dir.path()));
    let client = GitHubClient::new(github_url, None).unwrap();
    let explorer = Explorer::new(client, cache, Summarizer::new(&relay_url));

    Harness {
        github,
        relay,
        explorer,
        _dir: dir,
    }
}

#[tokio::test]
async fn test_search_is_served_from_cache() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;
    h.github.respond(
        SEARCH_PATH,
        StatusCode::OK,
        search_json(vec![
            repository_json(1, "tokio-rs", "tokio"),
            repository_json(2, "serde-rs", "serde"),
        ]),
    );
    let query = SearchQuery::new("rust", SortMode::Stars, false);

    let first = h.explorer.search_repositories(&query).await.unwrap();
    let second = h.explorer.search_repositories(&query).await.unwrap();

    assert_eq!(first.items.len(), 2);
    assert_eq!(first, second);
    assert_eq!(h.github.hits(SEARCH_PATH), 1);

    let params = query_params(&h.github.requests()[0]);
    assert_eq!(params["q"], "language:rust");
    assert_eq!(params["sort"], "stars");
    assert_eq!(params["order"], "desc");
    assert_eq!(h.explorer.rate_limit().remaining, 59);
}

#[tokio::test]
async fn test_search_variants_are_cached_separately() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;
    h.github.respond(
        SEARCH_PATH,
        StatusCode::OK,
        search_json(vec![repository_json(1, "o", "r")]),
    );

    let plain = SearchQuery::new("rust", SortMode::Forks, false);
    let labelled = SearchQuery::new("rust", SortMode::Forks, true);
    h.explorer.search_repositories(&plain).await.unwrap();
    h.explorer.search_repositories(&labelled).await.unwrap();
    h.explorer.search_repositories(&labelled).await.unwrap();

    assert_eq!(h.github.hits(SEARCH_PATH), 2);
    let params = query_params(&h.github.requests()[1]);
    assert_eq!(params["q"], "language:rust label:\"good first issue\"");
    assert_eq!(params["sort"], "forks");
}

#[tokio::test]
async fn test_search_without_cache_always_fetches() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), false).await;
    h.github
        .respond(SEARCH_PATH, StatusCode::OK, search_json(Vec::new()));
    let query = SearchQuery::new("zig", SortMode::Updated, false);

    let results = h.explorer.search_repositories(&query).await.unwrap();
    h.explorer.search_repositories(&query).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(h.github.hits(SEARCH_PATH), 2);
}

#[tokio::test]
async fn test_failed_search_is_not_cached() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;
    h.github.respond(
        SEARCH_PATH,
        StatusCode::UNPROCESSABLE_ENTITY,
        r#"{"message":"Validation Failed"}"#,
    );
    let query = SearchQuery::new("rust", SortMode::Stars, false);

    assert!(h.explorer.search_repositories(&query).await.is_err());
    assert!(h.explorer.search_repositories(&query).await.is_err());
    assert_eq!(h.github.hits(SEARCH_PATH), 2);
}

#[tokio::test]
async fn test_random_search_uses_a_popular_language() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), false).await;
    h.github.respond(
        SEARCH_PATH,
        StatusCode::OK,
        search_json(vec![repository_json(1, "o", "r")]),
    );

    let (query, results) = h.explorer.fetch_random_repositories().await.unwrap();

    assert_eq!(results.items.len(), 1);
    assert_eq!(query.sort, SortMode::Stars);
    assert!(!query.good_first_issue);
    let params = query_params(&h.github.requests()[0]);
    assert_eq!(params["q"], format!("language:{}", query.language));
}

#[tokio::test]
async fn test_readme_is_summarized_and_cached() {
    let mut h = harness(FakeJsonEndpoint::summary("An async runtime."), true).await;
    h.github.respond(
        "/repos/tokio-rs/tokio/readme",
        StatusCode::OK,
        "# Tokio\nA runtime for writing reliable applications.",
    );

    let first = h.explorer.fetch_readme("tokio-rs", "tokio").await.unwrap();
    let second = h.explorer.fetch_readme("tokio-rs", "tokio").await.unwrap();

    let expected = Document {
        content: "# Tokio\nA runtime for writing reliable applications.".to_string(),
        summary: "An async runtime.".to_string(),
    };
    assert_eq!(first, Some(expected.clone()));
    assert_eq!(second, Some(expected));
    assert_eq!(h.github.hits("/repos/tokio-rs/tokio/readme"), 1);
    assert_eq!(
        h.relay.bodies(),
        vec![json!({
            "text": "# Tokio\nA runtime for writing reliable applications.",
            "isContributing": false
        })]
    );
}

#[tokio::test]
async fn test_readme_text_is_truncated_before_summarizing() {
    let mut h = harness(FakeJsonEndpoint::summary("long"), false).await;
    h.github
        .respond("/repos/o/r/readme", StatusCode::OK, "x".repeat(5000));

    let document = h.explorer.fetch_readme("o", "r").await.unwrap().unwrap();

    assert_eq!(document.content.len(), 5000);
    let sent = h.relay.bodies();
    assert_eq!(sent[0]["text"].as_str().unwrap().len(), 1024);
}

#[tokio::test]
async fn test_missing_readme_is_none() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;

    let readme = h.explorer.fetch_readme("o", "empty").await.unwrap();

    assert!(readme.is_none());
    assert!(h.relay.bodies().is_empty());
}

#[tokio::test]
async fn test_readme_server_error_is_err() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;
    h.github.respond(
        "/repos/o/r/readme",
        StatusCode::INTERNAL_SERVER_ERROR,
        "boom",
    );

    assert!(h.explorer.fetch_readme("o", "r").await.is_err());
}

#[tokio::test]
async fn test_readme_summary_falls_back_when_relay_fails() {
    let mut h = harness(FakeJsonEndpoint::failing(), true).await;
    h.github
        .respond("/repos/o/r/readme", StatusCode::OK, "# Project");

    let document = h.explorer.fetch_readme("o", "r").await.unwrap().unwrap();

    assert_eq!(document.content, "# Project");
    assert_eq!(document.summary, SUMMARY_FALLBACK);
}

#[tokio::test]
async fn test_contributing_prefers_repository_root() {
    let mut h = harness(FakeJsonEndpoint::summary("Open a PR."), true).await;
    h.github.respond(
        "/repos/o/r/contents/CONTRIBUTING.md",
        StatusCode::OK,
        "Fork and open a pull request.",
    );

    let document = h.explorer.fetch_contributing("o", "r").await.unwrap().unwrap();

    assert_eq!(document.content, "Fork and open a pull request.");
    assert_eq!(document.summary, "Open a PR.");
    assert_eq!(h.github.paths(), vec!["/repos/o/r/contents/CONTRIBUTING.md"]);
    assert_eq!(h.relay.bodies()[0]["isContributing"], true);
}

#[tokio::test]
async fn test_contributing_falls_back_to_github_dir() {
    let mut h = harness(FakeJsonEndpoint::summary("Open a PR."), true).await;
    h.github.respond(
        "/repos/o/r/contents/.github/CONTRIBUTING.md",
        StatusCode::OK,
        "Guidelines",
    );

    let document = h.explorer.fetch_contributing("o", "r").await.unwrap().unwrap();

    assert_eq!(document.content, "Guidelines");
    assert_eq!(
        h.github.paths(),
        vec![
            "/repos/o/r/contents/CONTRIBUTING.md",
            "/repos/o/r/contents/.github/CONTRIBUTING.md",
        ]
    );
}

#[tokio::test]
async fn test_contributing_missing_everywhere_is_none() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;

    let document = h.explorer.fetch_contributing("o", "r").await.unwrap();

    assert!(document.is_none());
    assert_eq!(h.github.paths().len(), 2);
    assert!(h.relay.bodies().is_empty());
}

#[tokio::test]
async fn test_contributing_is_not_cached() {
    let mut h = harness(FakeJsonEndpoint::summary("s"), true).await;
    h.github.respond(
        "/repos/o/r/contents/CONTRIBUTING.md",
        StatusCode::OK,
        "Guidelines",
    );

    h.explorer.fetch_contributing("o", "r").await.unwrap();
    h.explorer.fetch_contributing("o", "r").await.unwrap();

    assert_eq!(h.github.hits("/repos/o/r/contents/CONTRIBUTING.md"), 2);
}

#[tokio::test]
async fn test_issues_request_five_open() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;
    h.github.respond(
        "/repos/o/r/issues",
        StatusCode::OK,
        json!([issue_json(12, "Crash on start"), issue_json(9, "Docs typo")]).to_string(),
    );

    let issues = h.explorer.fetch_repo_issues("o", "r").await.unwrap();

    assert_eq!(issues.len(), 2);
    assert_eq!(issues[0].number, 12);
    assert_eq!(issues[0].user.login, "octocat");
    let params = query_params(&h.github.requests()[0]);
    assert_eq!(params["state"], "open");
    assert_eq!(params["per_page"], "5");
}

#[tokio::test]
async fn test_issues_failure_is_err() {
    let mut h = harness(FakeJsonEndpoint::summary("unused"), true).await;

    assert!(h.explorer.fetch_repo_issues("o", "missing").await.is_err());
}
