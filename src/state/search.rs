// Search tab state.
// Holds the search form and the repository results list.

use crate::error::Result;
use crate::github::{Repository, SearchQuery, SearchResponse, SortMode};

use super::list::SelectableList;

pub const NO_RESULTS_MESSAGE: &str = "No repositories found";
pub const SEARCH_FAILED_MESSAGE: &str = "Failed to fetch repositories. Please try again later.";

/// Editable search parameters.
#[derive(Debug, Clone, Default)]
pub struct SearchForm {
    pub language: String,
    pub sort: SortMode,
    pub good_first_issue: bool,
    /// Whether keystrokes currently go to the language input.
    pub editing: bool,
}

impl SearchForm {
    /// The query to run, or `None` when the language is blank (random pick).
    pub fn query(&self) -> Option<SearchQuery> {
        let language = self.language.trim();
        if language.is_empty() {
            None
        } else {
            Some(SearchQuery::new(language, self.sort, self.good_first_issue))
        }
    }

    pub fn push_char(&mut self, c: char) {
        self.language.push(c);
    }

    pub fn backspace(&mut self) {
        self.language.pop();
    }

    pub fn cycle_sort(&mut self) {
        self.sort = self.sort.next();
    }

    pub fn toggle_good_first_issue(&mut self) {
        self.good_first_issue = !self.good_first_issue;
    }
}

/// Complete state for the search tab.
#[derive(Debug, Default)]
pub struct SearchTabState {
    pub form: SearchForm,
    pub results: SelectableList<Repository>,
    /// Query behind the results currently shown.
    pub last_query: Option<SearchQuery>,
}

impl SearchTabState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of a search. An empty result is reported, not rendered.
    pub fn apply_results(&mut self, result: Result<(SearchQuery, SearchResponse)>) {
        match result {
            Ok((query, response)) => {
                self.last_query = Some(query);
                if response.is_empty() {
                    self.results.set_error(NO_RESULTS_MESSAGE);
                } else {
                    self.results.set_loaded(response.items);
                    self.results.reset_selection();
                }
            }
            Err(_) => self.results.set_error(SEARCH_FAILED_MESSAGE),
        }
    }

    /// Title for the results panel.
    pub fn results_title(&self) -> String {
        match &self.last_query {
            Some(query) if query.good_first_issue => format!(
                " {} · {} · good first issue ",
                query.language,
                query.sort.title()
            ),
            Some(query) => format!(" {} · {} ", query.language, query.sort.title()),
            None => " Repositories ".to_string(),
        }
    }
}
