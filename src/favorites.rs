//! Favorites management
//!
//! Keeps the user's saved recipes in memory and mirrors the full list to a
//! persistent key-value slot after every mutation. Mutations are serialized:
//! the list lock is held across the in-memory update and the write.

use anyhow::{Context, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex as StdMutex;
use tokio::sync::Mutex;

use crate::models::Recipe;

/// Storage key holding the serialized favorites list
pub const FAVORITES_KEY: &str = "favorites";

// =============================================================================
// Storage
// =============================================================================

/// Key-value persistence with whole-value reads and writes
///
/// Reads happen once at startup; writes happen on every mutation while the
/// favorites lock is held, so they must not block the runtime.
#[allow(async_fn_in_trait)]
pub trait FavoritesStore {
    /// Stored value for `key`, `None` if the slot was never written
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value for `key`
    async fn write(&self, key: &str, value: &str) -> Result<()>;
}

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default data directory (~/.local/share/chefs-choice on Linux)
    pub fn default_dir() -> Option<PathBuf> {
        dirs::data_dir().map(|p| p.join("chefs-choice"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl FavoritesStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match std::fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("reading {}", path.display())),
        }
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("creating {}", self.dir.display()))?;

        // Write beside the target and rename so readers never see half a list
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, value)
            .await
            .with_context(|| format!("writing {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    slots: StdMutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FavoritesStore for MemoryStore {
    fn read(&self, key: &str) -> Result<Option<String>> {
        let slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        Ok(slots.get(key).cloned())
    }

    async fn write(&self, key: &str, value: &str) -> Result<()> {
        let mut slots = self
            .slots
            .lock()
            .map_err(|_| anyhow::anyhow!("memory store poisoned"))?;
        slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// =============================================================================
// Manager
// =============================================================================

/// Result of a favorites mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// List changed and was written to storage
    Saved,
    /// Nothing to do (recipe already saved)
    Unchanged,
    /// List changed in memory but the write failed
    Unsynced,
}

impl Mutation {
    pub fn is_persisted(&self) -> bool {
        !matches!(self, Mutation::Unsynced)
    }
}

/// The user's saved recipes, unique by identifier
pub struct Favorites<S> {
    store: S,
    recipes: Mutex<Vec<Recipe>>,
}

impl<S: FavoritesStore> Favorites<S> {
    /// Load the persisted list
    ///
    /// Never fails: a missing or unreadable slot starts an empty list.
    pub fn load(store: S) -> Self {
        let recipes = match store.read(FAVORITES_KEY) {
            Ok(Some(json)) => match serde_json::from_str::<Vec<Recipe>>(&json) {
                Ok(recipes) => dedup_by_id(recipes),
                Err(e) => {
                    tracing::warn!(error = %e, "stored favorites unreadable, starting empty");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read favorites, starting empty");
                Vec::new()
            }
        };
        tracing::debug!(count = recipes.len(), "favorites loaded");

        Self {
            store,
            recipes: Mutex::new(recipes),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Save `recipe` unless one with the same id is already saved
    pub async fn add(&self, recipe: Recipe) -> Mutation {
        let mut recipes = self.recipes.lock().await;
        if recipes.iter().any(|r| r.id == recipe.id) {
            return Mutation::Unchanged;
        }
        tracing::debug!(id = %recipe.id, name = %recipe.name, "adding favorite");
        recipes.push(recipe);
        self.persist(&recipes).await
    }

    /// Drop every entry with identifier `id`
    pub async fn remove(&self, id: &str) -> Mutation {
        let mut recipes = self.recipes.lock().await;
        recipes.retain(|r| r.id != id);
        tracing::debug!(id, "removing favorite");
        self.persist(&recipes).await
    }

    pub async fn contains(&self, id: &str) -> bool {
        self.recipes.lock().await.iter().any(|r| r.id == id)
    }

    pub async fn contains_recipe(&self, recipe: &Recipe) -> bool {
        self.contains(&recipe.id).await
    }

    /// Snapshot of the saved recipes in insertion order
    pub async fn list(&self) -> Vec<Recipe> {
        self.recipes.lock().await.clone()
    }

    pub async fn len(&self) -> usize {
        self.recipes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.recipes.lock().await.is_empty()
    }

    async fn persist(&self, recipes: &[Recipe]) -> Mutation {
        let written = match serde_json::to_string(recipes) {
            Ok(json) => self.store.write(FAVORITES_KEY, &json).await,
            Err(e) => Err(e.into()),
        };

        match written {
            Ok(()) => Mutation::Saved,
            Err(e) => {
                tracing::warn!(error = %e, count = recipes.len(), "failed to persist favorites");
                Mutation::Unsynced
            }
        }
    }
}

/// Keep the first entry for each identifier
fn dedup_by_id(recipes: Vec<Recipe>) -> Vec<Recipe> {
    let mut unique: Vec<Recipe> = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        if !unique.iter().any(|r| r.id == recipe.id) {
            unique.push(recipe);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_keeps_first() {
        let recipes = vec![
            Recipe::new("1", "First"),
            Recipe::new("2", "Other"),
            Recipe::new("1", "Duplicate"),
        ];
        let unique = dedup_by_id(recipes);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].name, "First");
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.read(FAVORITES_KEY).unwrap().is_none());
        store.write(FAVORITES_KEY, "[]").await.unwrap();
        assert_eq!(store.read(FAVORITES_KEY).unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_store_path() {
        let store = FileStore::new("/tmp/chefs");
        assert_eq!(
            store.path_for(FAVORITES_KEY),
            PathBuf::from("/tmp/chefs/favorites.json")
        );
    }

    #[tokio::test]
    async fn test_unreadable_slot_starts_empty() {
        let store = MemoryStore::new();
        store.write(FAVORITES_KEY, "not json").await.unwrap();
        let favorites = Favorites::load(store);
        assert!(favorites.is_empty().await);
    }

    #[tokio::test]
    async fn test_add_twice_is_unchanged() {
        let favorites = Favorites::load(MemoryStore::new());
        let recipe = Recipe::new("52772", "Teriyaki Chicken Casserole");
        assert_eq!(favorites.add(recipe.clone()).await, Mutation::Saved);
        assert_eq!(favorites.add(recipe).await, Mutation::Unchanged);
        assert_eq!(favorites.len().await, 1);
    }
}
