// Repository exploration service.
// Combines the GitHub client, the local cache and the summarizer into the operations the UI calls.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};

use crate::cache::{Cache, DocumentKey, SearchKey};
use crate::error::Result;
use crate::github::{GitHubClient, Issue, POPULAR_LANGUAGES, RateLimit, SearchQuery, SearchResponse, SortMode};
use crate::summarize::{DocumentKind, Summarizer};

/// Number of open issues shown per repository.
pub const ISSUES_PER_PAGE: u32 = 5;

/// Where CONTRIBUTING guidelines are looked up, in order.
pub const CONTRIBUTING_PATHS: [&str; 2] = ["CONTRIBUTING.md", ".github/CONTRIBUTING.md"];

/// A fetched document together with its generated summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub summary: String,
}

/// Pick one of the popular languages uniformly at random and build a stars-sorted query.
pub fn random_query<R: Rng + ?Sized>(rng: &mut R) -> SearchQuery {
    let language = POPULAR_LANGUAGES.choose(rng).copied().unwrap_or("javascript");
    SearchQuery::new(language, SortMode::Stars, false)
}

/// Cache-backed access to repositories, documents and issues.
pub struct Explorer {
    github: GitHubClient,
    cache: Option<Cache>,
    summarizer: Summarizer,
}

impl Explorer {
    pub fn new(github: GitHubClient, cache: Option<Cache>, summarizer: Summarizer) -> Self {
        Self {
            github,
            cache,
            summarizer,
        }
    }

    pub fn rate_limit(&self) -> &RateLimit {
        self.github.rate_limit()
    }

    pub fn cache(&self) -> Option<&Cache> {
        self.cache.as_ref()
    }

    /// Search repositories, serving identical searches from the cache within its TTL.
    pub async fn search_repositories(&mut self, query: &SearchQuery) -> Result<SearchResponse> {
        let key = SearchKey::from(query);
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            tracing::debug!(%key, "Search cache hit");
            return Ok(cached);
        }

        let results = self
            .github
            .search_repositories(&query.query_string(), query.sort)
            .await
            .inspect_err(|e| tracing::error!(%key, error = %e, "Repository search failed"))?;

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set(&key, &results) {
                tracing::warn!(%key, error = %e, "Cache storage failed");
            }
        }

        Ok(results)
    }

    /// Search a randomly chosen popular language, sorted by stars.
    pub async fn fetch_random_repositories(&mut self) -> Result<(SearchQuery, SearchResponse)> {
        let query = random_query(&mut rand::rng());
        let results = self.search_repositories(&query).await?;
        Ok((query, results))
    }

    /// Fetch and summarize a README. `Ok(None)` means the repository has none.
    pub async fn fetch_readme(&mut self, owner: &str, repo: &str) -> Result<Option<Document>> {
        let key = DocumentKey::new(owner, repo);
        if let Some(cached) = self.cache.as_ref().and_then(|cache| cache.get_document(&key)) {
            tracing::debug!(%key, "README cache hit");
            return Ok(Some(cached));
        }

        let content = match self.github.get_readme(owner, repo).await {
            Ok(content) => content,
            Err(e) if e.is_not_found() => return Ok(None),
            Err(e) => {
                tracing::error!(%key, error = %e, "Error fetching README");
                return Err(e);
            }
        };

        let summary = self
            .summarizer
            .summarize_or_fallback(&content, DocumentKind::Readme)
            .await;
        let document = Document { content, summary };

        if let Some(cache) = &self.cache {
            if let Err(e) = cache.set_document(&key, &document) {
                tracing::warn!(%key, error = %e, "Failed to cache README");
            }
        }

        Ok(Some(document))
    }

    /// Fetch and summarize CONTRIBUTING guidelines from the repository root or `.github/`.
    pub async fn fetch_contributing(&mut self, owner: &str, repo: &str) -> Result<Option<Document>> {
        let [root, fallback] = CONTRIBUTING_PATHS;

        let content = match self.github.get_contents_raw(owner, repo, root).await {
            Ok(content) => content,
            Err(e) if e.is_status() => {
                tracing::debug!(owner, repo, error = %e, "No root CONTRIBUTING.md, trying .github/");
                match self.github.get_contents_raw(owner, repo, fallback).await {
                    Ok(content) => content,
                    Err(e) if e.is_not_found() => return Ok(None),
                    Err(e) => return Err(e),
                }
            }
            Err(e) => {
                tracing::error!(owner, repo, error = %e, "Error fetching CONTRIBUTING.md");
                return Err(e);
            }
        };

        let summary = self
            .summarizer
            .summarize_or_fallback(&content, DocumentKind::Contributing)
            .await;
        Ok(Some(Document { content, summary }))
    }

    /// Fetch the most recent open issues.
    pub async fn fetch_repo_issues(&mut self, owner: &str, repo: &str) -> Result<Vec<Issue>> {
        self.github
            .get_issues(owner, repo, ISSUES_PER_PAGE)
            .await
            .inspect_err(|e| tracing::error!(owner, repo, error = %e, "Error fetching issues"))
    }
}
