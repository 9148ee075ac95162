//! Chef's Choice - discover, search and save recipes from TheMealDB
//!
//! Random video recipes from a handful of cuisines, the latest additions,
//! search, category browsing, and a keep/skip discovery queue that feeds a
//! persisted favorites list.
//!
//! # Modules
//!
//! - `models` - Recipes, categories, discovery decisions
//! - `api` - TheMealDB client and the `RecipeSource` boundary
//! - `selector` - Qualifying random recipe search
//! - `favorites` - Saved recipes and their storage
//! - `discovery` - Swipe session over a random batch
//! - `app` - Per-screen state and navigation
//! - `cli` / `commands` - Command line front end

pub mod api;
pub mod app;
pub mod cli;
pub mod commands;
pub mod config;
pub mod discovery;
pub mod favorites;
pub mod models;
pub mod selector;

// Re-export commonly used types
pub use models::{Category, Decision, Ingredient, Recipe};

pub use api::{MealDbClient, RecipeSource};
pub use app::{App, Tab};
pub use discovery::{DiscoverySession, SessionState};
pub use favorites::{Favorites, FavoritesStore, FileStore, MemoryStore, Mutation};
pub use selector::QualifyingSelector;
