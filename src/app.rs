// App state and main event loop.
// Manages tabs, the search form, favorites, and the README/issues modal.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;

use crate::error::Result;
use crate::explorer::Explorer;
use crate::favorites::{FavoriteRepo, FavoritesStore};
use crate::github::{RateLimit, SearchQuery};
use crate::state::{ModalKind, ModalState, SearchTabState, SelectableList};
use crate::ui;

const EMPTY_FAVORITES_MESSAGE: &str = "No favorite repositories yet. Add some with f!";
const PAGE_LINES: u16 = 10;

/// Active tab in the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Search,
    Favorites,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Search, Tab::Favorites];

    pub fn title(&self) -> &'static str {
        match self {
            Tab::Search => "Search",
            Tab::Favorites => "Favorites",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Tab::Search => Tab::Favorites,
            Tab::Favorites => Tab::Search,
        }
    }
}

/// Fetch queued by a key press, performed after the loading state is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Search(SearchQuery),
    RandomSearch,
    OpenReadme { owner: String, repo: String },
    OpenIssues { owner: String, repo: String },
}

/// Main application state.
pub struct App {
    pub active_tab: Tab,
    pub search: SearchTabState,
    pub favorites_list: SelectableList<FavoriteRepo>,
    pub favorites: FavoritesStore,
    pub explorer: Explorer,
    pub modal: Option<ModalState>,
    pub show_help: bool,
    /// One-line feedback shown in the status bar.
    pub status_message: Option<String>,
    pub pending: Option<Action>,
    pub should_quit: bool,
}

impl App {
    pub fn new(explorer: Explorer, favorites: FavoritesStore) -> Self {
        let mut app = Self {
            active_tab: Tab::default(),
            search: SearchTabState::new(),
            favorites_list: SelectableList::new(),
            favorites,
            explorer,
            modal: None,
            show_help: false,
            status_message: None,
            pending: None,
            should_quit: false,
        };
        app.refresh_favorites();
        app
    }

    pub fn rate_limit(&self) -> &RateLimit {
        self.explorer.rate_limit()
    }

    /// Main event loop. Starts with a random search.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.queue(Action::RandomSearch);

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;

            if let Some(action) = self.pending.take() {
                self.perform(action).await;
                continue;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Put the target view into its loading state and queue the fetch.
    pub fn queue(&mut self, action: Action) {
        match &action {
            Action::Search(_) | Action::RandomSearch => {
                self.active_tab = Tab::Search;
                self.search.results.set_loading();
            }
            Action::OpenReadme { owner, repo } => {
                self.modal = Some(ModalState::loading(ModalKind::Readme, owner, repo));
            }
            Action::OpenIssues { owner, repo } => {
                self.modal = Some(ModalState::loading(ModalKind::Issues, owner, repo));
            }
        }
        self.pending = Some(action);
    }

    /// Run a queued fetch and store its outcome.
    pub async fn perform(&mut self, action: Action) {
        match action {
            Action::Search(query) => {
                let result = self
                    .explorer
                    .search_repositories(&query)
                    .await
                    .map(|response| (query, response));
                self.search.apply_results(result);
            }
            Action::RandomSearch => {
                let result = self.explorer.fetch_random_repositories().await;
                self.search.apply_results(result);
            }
            Action::OpenReadme { owner, repo } => {
                let readme = self.explorer.fetch_readme(&owner, &repo).await;
                let contributing = self.explorer.fetch_contributing(&owner, &repo).await;
                if let Some(modal) = self.modal.as_mut() {
                    modal.apply_readme(readme, contributing);
                }
            }
            Action::OpenIssues { owner, repo } => {
                let issues = self.explorer.fetch_repo_issues(&owner, &repo).await;
                if let Some(modal) = self.modal.as_mut() {
                    modal.apply_issues(issues);
                }
            }
        }
    }

    fn handle_events(&mut self) -> Result<()> {
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Dispatch a key press to the innermost active view.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('?')) {
                self.show_help = false;
            }
            return;
        }

        if self.modal.is_some() {
            self.handle_modal_key(key.code);
            return;
        }

        if self.active_tab == Tab::Search && self.search.form.editing {
            self.handle_form_key(key.code);
            return;
        }

        self.status_message = None;
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Tab | KeyCode::BackTab => self.active_tab = self.active_tab.next(),
            KeyCode::Down | KeyCode::Char('j') => self.select_next(),
            KeyCode::Up | KeyCode::Char('k') => self.select_prev(),
            KeyCode::Enter | KeyCode::Char('d') => {
                if let Some((owner, repo)) = self.selected_target() {
                    self.queue(Action::OpenReadme { owner, repo });
                }
            }
            KeyCode::Char('i') => {
                if let Some((owner, repo)) = self.selected_target() {
                    self.queue(Action::OpenIssues { owner, repo });
                }
            }
            _ if self.active_tab == Tab::Search => self.handle_search_key(key.code),
            _ => self.handle_favorites_key(key.code),
        }
    }

    fn handle_modal_key(&mut self, code: KeyCode) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        match code {
            KeyCode::Esc | KeyCode::Char('q') => self.modal = None,
            KeyCode::Down | KeyCode::Char('j') => modal.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') => modal.scroll_up(1),
            KeyCode::PageDown => modal.scroll_down(PAGE_LINES),
            KeyCode::PageUp => modal.scroll_up(PAGE_LINES),
            KeyCode::Home | KeyCode::Char('g') => modal.scroll = 0,
            _ => {}
        }
    }

    fn handle_form_key(&mut self, code: KeyCode) {
        let form = &mut self.search.form;
        match code {
            KeyCode::Esc => form.editing = false,
            KeyCode::Enter => {
                form.editing = false;
                self.submit_search();
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.push_char(c),
            _ => {}
        }
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('/') => self.search.form.editing = true,
            KeyCode::Char('s') => self.search.form.cycle_sort(),
            KeyCode::Char('g') => self.search.form.toggle_good_first_issue(),
            KeyCode::Char('r') => self.submit_search(),
            KeyCode::Char('f') => self.toggle_selected_favorite(),
            _ => {}
        }
    }

    fn handle_favorites_key(&mut self, code: KeyCode) {
        if let KeyCode::Char('x') | KeyCode::Delete = code {
            self.remove_selected_favorite();
        }
    }

    /// Search with the form values; a blank language picks one at random.
    pub fn submit_search(&mut self) {
        match self.search.form.query() {
            Some(query) => self.queue(Action::Search(query)),
            None => self.queue(Action::RandomSearch),
        }
    }

    fn select_next(&mut self) {
        match self.active_tab {
            Tab::Search => self.search.results.select_next(),
            Tab::Favorites => self.favorites_list.select_next(),
        }
    }

    fn select_prev(&mut self) {
        match self.active_tab {
            Tab::Search => self.search.results.select_prev(),
            Tab::Favorites => self.favorites_list.select_prev(),
        }
    }

    /// Owner and name of the highlighted repository on the active tab.
    pub fn selected_target(&self) -> Option<(String, String)> {
        match self.active_tab {
            Tab::Search => self
                .search
                .results
                .selected_item()
                .map(|repo| (repo.owner.login.clone(), repo.name.clone())),
            Tab::Favorites => self
                .favorites_list
                .selected_item()
                .map(|repo| (repo.owner.clone(), repo.name.clone())),
        }
    }

    fn toggle_selected_favorite(&mut self) {
        let Some(repo) = self.search.results.selected_item().cloned() else {
            return;
        };
        self.status_message = Some(match self.favorites.toggle(&repo) {
            Ok(true) => format!("Added {} to favorites", repo.full_name),
            Ok(false) => format!("Removed {} from favorites", repo.full_name),
            Err(e) => {
                tracing::error!("Failed to save favorites: {}", e);
                "Failed to save favorites".to_string()
            }
        });
        self.refresh_favorites();
    }

    fn remove_selected_favorite(&mut self) {
        let Some(repo) = self.favorites_list.selected_item().cloned() else {
            return;
        };
        self.status_message = Some(match self.favorites.remove(repo.id) {
            Ok(_) => format!("Removed {}/{} from favorites", repo.owner, repo.name),
            Err(e) => {
                tracing::error!("Failed to save favorites: {}", e);
                "Failed to save favorites".to_string()
            }
        });
        self.refresh_favorites();
    }

    /// Rebuild the favorites list view from the store.
    pub fn refresh_favorites(&mut self) {
        if self.favorites.is_empty() {
            self.favorites_list.set_error(EMPTY_FAVORITES_MESSAGE);
        } else {
            self.favorites_list.set_loaded(self.favorites.all().to_vec());
        }
    }
}
