// Favorites store.
// An ordered list of starred repositories persisted as one JSON file.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::write_atomic;
use crate::error::Result;
use crate::github::Repository;

/// Normalized projection of a repository kept in the favorites list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRepo {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub url: String,
    pub description: Option<String>,
    pub star_count: u64,
    pub fork_count: u64,
    pub updated_at: DateTime<Utc>,
}

impl From<&Repository> for FavoriteRepo {
    fn from(repo: &Repository) -> Self {
        Self {
            id: repo.id,
            name: repo.name.clone(),
            owner: repo.owner.login.clone(),
            url: repo.html_url.clone(),
            description: repo.description.clone(),
            star_count: repo.stargazers_count,
            fork_count: repo.forks_count,
            updated_at: repo.updated_at,
        }
    }
}

/// Favorites list bound to its backing file. Every mutation rewrites the whole file.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    repos: Vec<FavoriteRepo>,
}

impl FavoritesStore {
    /// Load favorites from `path`. A missing file is an empty list.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let repos = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            serde_json::from_str(&contents)?
        } else {
            Vec::new()
        };

        Ok(Self { path, repos })
    }

    /// Persist the full list.
    pub fn save(&self) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.repos)?;
        write_atomic(&self.path, &json)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a repository. Returns false (and writes nothing) if it is already a favorite.
    pub fn add(&mut self, repo: &Repository) -> Result<bool> {
        if self.is_favorite(repo.id) {
            return Ok(false);
        }
        self.repos.push(FavoriteRepo::from(repo));
        self.save()?;
        Ok(true)
    }

    /// Remove a repository by id. Returns whether it was present.
    pub fn remove(&mut self, id: u64) -> Result<bool> {
        let before = self.repos.len();
        self.repos.retain(|repo| repo.id != id);
        self.save()?;
        Ok(self.repos.len() != before)
    }

    /// Add if absent, remove if present. Returns whether it is a favorite afterwards.
    pub fn toggle(&mut self, repo: &Repository) -> Result<bool> {
        if self.is_favorite(repo.id) {
            self.remove(repo.id)?;
            Ok(false)
        } else {
            self.add(repo)?;
            Ok(true)
        }
    }

    pub fn is_favorite(&self, id: u64) -> bool {
        self.repos.iter().any(|repo| repo.id == id)
    }

    pub fn all(&self) -> &[FavoriteRepo] {
        &self.repos
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }
}
