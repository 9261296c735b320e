// State management module.
// Handles list selection, search results and modal content for the tabs.

pub mod list;
pub mod modal;
pub mod search;

pub use list::{LoadingState, SelectableList};
pub use modal::{ModalContent, ModalKind, ModalState};
pub use search::{SearchForm, SearchTabState};
