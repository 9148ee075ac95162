//! App state and core application logic
//!
//! Owns one named state struct per screen and coordinates between the
//! front end and the core services (recipe source, selector, favorites,
//! discovery session).

use crate::api::RecipeSource;
use crate::discovery::{DecisionOutcome, DiscoverySession, SessionError};
use crate::favorites::{Favorites, FavoritesStore, Mutation};
use crate::models::{Category, Decision, Recipe};
use crate::selector::QualifyingSelector;

// =============================================================================
// Tabs
// =============================================================================

/// Top-level screens
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    /// One qualifying random recipe
    #[default]
    Home,
    /// Recently added recipes
    Latest,
    /// Swipe through random recipes
    Discover,
    /// Search by name
    Search,
    /// Browse by category
    Categories,
}

// =============================================================================
// Per-screen State
// =============================================================================

#[derive(Debug, Clone, Default)]
pub struct HomeState {
    pub recipe: Option<Recipe>,
    /// Full instructions instead of the preview
    pub show_full_instructions: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LatestState {
    pub recipes: Vec<Recipe>,
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<Recipe>,
}

#[derive(Debug, Clone, Default)]
pub struct CategoryState {
    pub categories: Vec<Category>,
    /// Category being browsed, `None` on the category grid
    pub selected: Option<String>,
    pub recipes: Vec<Recipe>,
}

// =============================================================================
// App
// =============================================================================

pub struct App<S, F> {
    source: S,
    selector: QualifyingSelector,
    favorites: Favorites<F>,
    pub tab: Tab,
    pub home: HomeState,
    pub latest: LatestState,
    pub discover: DiscoverySession,
    pub search: SearchState,
    pub categories: CategoryState,
    /// Recipe opened in the detail view
    pub detail: Option<Recipe>,
}

impl<S: RecipeSource, F: FavoritesStore> App<S, F> {
    pub fn new(source: S, selector: QualifyingSelector, favorites: Favorites<F>) -> Self {
        Self {
            source,
            selector,
            favorites,
            tab: Tab::default(),
            home: HomeState::default(),
            latest: LatestState::default(),
            discover: DiscoverySession::new(),
            search: SearchState::default(),
            categories: CategoryState::default(),
            detail: None,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn selector(&self) -> &QualifyingSelector {
        &self.selector
    }

    pub fn favorites(&self) -> &Favorites<F> {
        &self.favorites
    }

    // -------------------------------------------------------------------------
    // Home
    // -------------------------------------------------------------------------

    /// Look for a new qualifying recipe
    ///
    /// The current recipe stays in place when none is found. Returns whether
    /// the home recipe changed.
    pub async fn refresh_random(&mut self) -> bool {
        self.home.show_full_instructions = false;
        match self.selector.select(&self.source).await {
            Some(recipe) => {
                self.home.recipe = Some(recipe);
                true
            }
            None => false,
        }
    }

    pub fn toggle_instructions(&mut self) {
        self.home.show_full_instructions = !self.home.show_full_instructions;
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Switch tabs, loading the tab's data the first time it is shown
    pub async fn select_tab(&mut self, tab: Tab) {
        self.tab = tab;
        match tab {
            Tab::Latest if self.latest.recipes.is_empty() => {
                self.load_latest().await;
            }
            Tab::Discover if self.discover.is_empty() => {
                self.discover.refill(&self.source).await;
            }
            Tab::Categories if self.categories.categories.is_empty() => {
                self.load_categories().await;
            }
            _ => {}
        }
    }

    /// Reload the latest list; an empty response keeps the previous list
    pub async fn load_latest(&mut self) -> bool {
        let recipes = self.source.fetch_latest().await;
        if recipes.is_empty() {
            return false;
        }
        self.latest.recipes = recipes;
        true
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    /// Search by name
    ///
    /// A blank query issues no request and leaves the results untouched.
    /// Returns whether a search was performed.
    pub async fn search(&mut self, query: &str) -> bool {
        self.search.query = query.to_string();
        let query = query.trim();
        if query.is_empty() {
            return false;
        }
        self.search.results = self.source.search_by_name(query).await;
        true
    }

    // -------------------------------------------------------------------------
    // Categories
    // -------------------------------------------------------------------------

    /// Reload the category grid; an empty response keeps the previous grid
    pub async fn load_categories(&mut self) -> bool {
        let categories = self.source.fetch_categories().await;
        if categories.is_empty() {
            return false;
        }
        self.categories.categories = categories;
        true
    }

    pub async fn open_category(&mut self, name: &str) {
        self.categories.selected = Some(name.to_string());
        self.categories.recipes = self.source.fetch_by_category(name).await;
    }

    /// Back to the category grid
    pub fn close_category(&mut self) {
        self.categories.selected = None;
        self.categories.recipes.clear();
    }

    // -------------------------------------------------------------------------
    // Details
    // -------------------------------------------------------------------------

    /// Fetch the full recipe and open it; a miss leaves the view unchanged
    pub async fn show_details(&mut self, id: &str) -> Option<&Recipe> {
        if let Some(recipe) = self.source.fetch_by_id(id).await {
            self.detail = Some(recipe);
            return self.detail.as_ref();
        }
        None
    }

    /// Open a recipe that is already complete (favorites, search results)
    pub fn open_recipe(&mut self, recipe: Recipe) {
        self.detail = Some(recipe);
    }

    pub fn close_details(&mut self) {
        self.detail = None;
    }

    // -------------------------------------------------------------------------
    // Favorites
    // -------------------------------------------------------------------------

    pub async fn save(&self, recipe: Recipe) -> Mutation {
        self.favorites.add(recipe).await
    }

    /// Save the home screen's recipe, if any
    pub async fn save_current(&self) -> Option<Mutation> {
        match &self.home.recipe {
            Some(recipe) => Some(self.favorites.add(recipe.clone()).await),
            None => None,
        }
    }

    pub async fn remove_favorite(&self, id: &str) -> Mutation {
        self.favorites.remove(id).await
    }

    pub async fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id).await
    }

    // -------------------------------------------------------------------------
    // Discovery
    // -------------------------------------------------------------------------

    /// Keep or skip the current discovery card
    pub async fn swipe(&mut self, decision: Decision) -> Result<DecisionOutcome, SessionError> {
        self.discover
            .decide(decision, &self.source, &self.favorites)
            .await
    }

    /// Replace the discovery queue ("load more"); a failed fetch keeps it
    pub async fn refill_discover(&mut self) -> bool {
        self.discover.refill(&self.source).await
    }
}
