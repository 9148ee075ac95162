//! API clients for the remote recipe service
//!
//! - TheMealDB: random picks, latest additions, search, categories, lookup
//!
//! Core components talk to the service through [`RecipeSource`], whose
//! operations never fail: a transport or parse problem shows up as an empty
//! list or `None`, exactly like a legitimate "no results".

pub mod mealdb;

pub use mealdb::{MealDbClient, MealDbError};

use crate::models::{Category, Recipe};

/// Infallible view of the recipe service
#[allow(async_fn_in_trait)]
pub trait RecipeSource {
    /// One random recipe
    async fn fetch_random(&self) -> Option<Recipe>;

    /// A server-sized batch of random recipes for the discovery queue
    async fn fetch_random_batch(&self) -> Vec<Recipe>;

    /// Most recently added recipes
    async fn fetch_latest(&self) -> Vec<Recipe>;

    /// Recipes whose name matches `query`
    async fn search_by_name(&self, query: &str) -> Vec<Recipe>;

    async fn fetch_categories(&self) -> Vec<Category>;

    /// Recipes in the named category (id, name and thumbnail only)
    async fn fetch_by_category(&self, category: &str) -> Vec<Recipe>;

    async fn fetch_by_id(&self, id: &str) -> Option<Recipe>;
}
