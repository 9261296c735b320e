// GitHub API endpoint functions.
// Provides typed methods for search, file contents and issues.

use crate::error::Result;

use super::client::GitHubClient;
use super::types::{Issue, SearchResponse, SortMode};

impl GitHubClient {
    /// Search repositories, ordered descending by `sort`.
    pub async fn search_repositories(
        &mut self,
        query: &str,
        sort: SortMode,
    ) -> Result<SearchResponse> {
        let params = [("q", query), ("sort", sort.as_str()), ("order", "desc")];
        let response = self
            .get_with_params("/search/repositories", &params)
            .await?;
        let results: SearchResponse = response.json().await?;
        Ok(results)
    }

    /// Get the raw README text of a repository.
    pub async fn get_readme(&mut self, owner: &str, repo: &str) -> Result<String> {
        self.get_raw(&format!("/repos/{}/{}/readme", owner, repo))
            .await
    }

    /// Get the raw text of a file at `path` in the default branch.
    pub async fn get_contents_raw(&mut self, owner: &str, repo: &str, path: &str) -> Result<String> {
        self.get_raw(&format!("/repos/{}/{}/contents/{}", owner, repo, path))
            .await
    }

    /// Get open issues for a repository.
    pub async fn get_issues(&mut self, owner: &str, repo: &str, per_page: u32) -> Result<Vec<Issue>> {
        let per_page = per_page.to_string();
        let params = [("state", "open"), ("per_page", per_page.as_str())];
        let response = self
            .get_with_params(&format!("/repos/{}/{}/issues", owner, repo), &params)
            .await?;
        let issues: Vec<Issue> = response.json().await?;
        Ok(issues)
    }
}
