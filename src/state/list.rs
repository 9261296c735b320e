// Loading and selection state shared by every list view.

use ratatui::widgets::ListState;

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadingState::Loaded(_))
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<Vec<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select the next item, staying on the last one.
    pub fn select_next(&mut self) {
        let Some(items) = self.data.data() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) if i + 1 < items.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Select the previous item, staying on the first one.
    pub fn select_prev(&mut self) {
        let Some(items) = self.data.data() else {
            return;
        };
        if items.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.data.data()?.get(index)
    }

    /// Reset selection to the first item, or to nothing for an empty list.
    pub fn reset_selection(&mut self) {
        let has_items = self.data.data().is_some_and(|items| !items.is_empty());
        self.list_state.select(if has_items { Some(0) } else { None });
    }

    /// Replace the items, keeping the selection in range.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        let previous = self.list_state.selected();
        let len = items.len();
        self.data = LoadingState::Loaded(items);
        match previous {
            Some(i) if len > 0 => self.list_state.select(Some(i.min(len - 1))),
            _ => self.reset_selection(),
        }
    }

    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
    }

    pub fn set_error(&mut self, error: impl Into<String>) {
        self.data = LoadingState::Error(error.into());
        self.list_state.select(None);
    }
}
