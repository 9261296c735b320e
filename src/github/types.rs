// GitHub API response types.
// Defines structs for deserializing search, repository and issue responses.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Label qualifier added when searching for beginner-friendly repositories.
pub const GOOD_FIRST_ISSUE_QUALIFIER: &str = "label:\"good first issue\"";

/// Languages used when picking repositories at random.
pub const POPULAR_LANGUAGES: [&str; 10] = [
    "javascript",
    "python",
    "java",
    "typescript",
    "go",
    "rust",
    "ruby",
    "php",
    "c++",
    "c#",
];

/// GitHub user or organization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    pub id: u64,
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Repository as returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repository {
    pub id: u64,
    pub name: String,
    pub full_name: String,
    pub owner: Owner,
    pub html_url: String,
    pub description: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    #[serde(default)]
    pub open_issues_count: u64,
    pub language: Option<String>,
    pub updated_at: DateTime<Utc>,
}

/// Response body of `GET /search/repositories`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub total_count: u64,
    #[serde(default)]
    pub incomplete_results: bool,
    pub items: Vec<Repository>,
}

impl SearchResponse {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Author of an issue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueUser {
    pub login: String,
}

/// Open issue on a repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    pub id: u64,
    pub number: u64,
    pub title: String,
    pub html_url: String,
    pub user: IssueUser,
    #[serde(default)]
    pub comments: u64,
    pub created_at: DateTime<Utc>,
    /// Present when the "issue" is actually a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
}

impl Issue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

/// Sort order for repository search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    #[default]
    Stars,
    Forks,
    Updated,
    HelpWantedIssues,
}

impl SortMode {
    /// Value of the `sort` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortMode::Stars => "stars",
            SortMode::Forks => "forks",
            SortMode::Updated => "updated",
            SortMode::HelpWantedIssues => "help-wanted-issues",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SortMode::Stars => "Stars",
            SortMode::Forks => "Forks",
            SortMode::Updated => "Recently updated",
            SortMode::HelpWantedIssues => "Help wanted",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            SortMode::Stars => SortMode::Forks,
            SortMode::Forks => SortMode::Updated,
            SortMode::Updated => SortMode::HelpWantedIssues,
            SortMode::HelpWantedIssues => SortMode::Stars,
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameters of a repository search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub language: String,
    pub sort: SortMode,
    pub good_first_issue: bool,
}

impl SearchQuery {
    pub fn new(language: impl Into<String>, sort: SortMode, good_first_issue: bool) -> Self {
        Self {
            language: language.into(),
            sort,
            good_first_issue,
        }
    }

    /// Build the `q` parameter: `language:<lang>` plus the optional label qualifier.
    pub fn query_string(&self) -> String {
        let mut query = format!("language:{}", self.language);
        if self.good_first_issue {
            query.push(' ');
            query.push_str(GOOD_FIRST_ISSUE_QUALIFIER);
        }
        query
    }
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Whether any rate limit headers have been seen yet.
    pub fn is_known(&self) -> bool {
        self.limit > 0
    }
}
