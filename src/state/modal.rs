// Modal viewer state for README summaries and issue lists.

use crate::error::Result;
use crate::explorer::Document;
use crate::github::Issue;

use super::list::LoadingState;

pub const README_FAILED_MESSAGE: &str = "Failed to load README";
pub const ISSUES_FAILED_MESSAGE: &str = "Failed to load issues";

/// What a modal is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalKind {
    Readme,
    Issues,
}

/// Loaded modal content.
#[derive(Debug, Clone)]
pub enum ModalContent {
    Readme {
        readme: Document,
        contributing: Option<Document>,
    },
    Issues(Vec<Issue>),
}

/// An open modal for one repository.
#[derive(Debug, Clone)]
pub struct ModalState {
    pub kind: ModalKind,
    pub owner: String,
    pub repo: String,
    pub content: LoadingState<ModalContent>,
    pub scroll: u16,
}

impl ModalState {
    /// A modal in the loading state.
    pub fn loading(kind: ModalKind, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            kind,
            owner: owner.into(),
            repo: repo.into(),
            content: LoadingState::Loading,
            scroll: 0,
        }
    }

    pub fn title(&self) -> String {
        match self.kind {
            ModalKind::Readme => format!(" {} README ", self.repo),
            ModalKind::Issues => format!(" {} Issues ", self.repo),
        }
    }

    /// Show a README. Only the README decides success; a missing or failed
    /// CONTRIBUTING document just leaves that section out.
    pub fn apply_readme(
        &mut self,
        readme: Result<Option<Document>>,
        contributing: Result<Option<Document>>,
    ) {
        self.content = match readme {
            Ok(Some(readme)) => LoadingState::Loaded(ModalContent::Readme {
                readme,
                contributing: contributing.ok().flatten(),
            }),
            Ok(None) | Err(_) => LoadingState::Error(README_FAILED_MESSAGE.to_string()),
        };
        self.scroll = 0;
    }

    pub fn apply_issues(&mut self, issues: Result<Vec<Issue>>) {
        self.content = match issues {
            Ok(issues) => LoadingState::Loaded(ModalContent::Issues(issues)),
            Err(_) => LoadingState::Error(ISSUES_FAILED_MESSAGE.to_string()),
        };
        self.scroll = 0;
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_add(lines);
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll = self.scroll.saturating_sub(lines);
    }
}
