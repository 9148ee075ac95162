//! Shared fixtures for integration tests
//!
//! `ScriptedSource` stands in for the recipe service: random draws and
//! batches are served from queues, everything else from fixed lists, and
//! every call is recorded.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use chefs_choice::api::RecipeSource;
use chefs_choice::models::{Category, Recipe};

#[derive(Default)]
pub struct ScriptedSource {
    /// `None` entries simulate a failed fetch
    randoms: Mutex<VecDeque<Option<Recipe>>>,
    /// Served once the random queue is drained
    pub fallback_random: Option<Recipe>,
    batches: Mutex<VecDeque<Vec<Recipe>>>,
    pub latest: Vec<Recipe>,
    pub search_results: Vec<Recipe>,
    pub categories: Vec<Category>,
    pub category_recipes: Vec<Recipe>,
    pub lookup: Vec<Recipe>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_randoms(randoms: Vec<Option<Recipe>>) -> Self {
        let source = Self::default();
        *source.randoms.lock().unwrap() = randoms.into();
        source
    }

    /// Every random draw returns `recipe`
    pub fn always(recipe: Recipe) -> Self {
        Self {
            fallback_random: Some(recipe),
            ..Self::default()
        }
    }

    pub fn push_batch(&self, batch: Vec<Recipe>) {
        self.batches.lock().unwrap().push_back(batch);
    }

    /// Number of recorded calls to `operation`
    pub fn count(&self, operation: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.split(':').next() == Some(operation))
            .count()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.lock().unwrap().push(call.into());
    }
}

impl RecipeSource for ScriptedSource {
    async fn fetch_random(&self) -> Option<Recipe> {
        self.record("random");
        let next = self.randoms.lock().unwrap().pop_front();
        match next {
            Some(fetched) => fetched,
            None => self.fallback_random.clone(),
        }
    }

    async fn fetch_random_batch(&self) -> Vec<Recipe> {
        self.record("batch");
        self.batches.lock().unwrap().pop_front().unwrap_or_default()
    }

    async fn fetch_latest(&self) -> Vec<Recipe> {
        self.record("latest");
        self.latest.clone()
    }

    async fn search_by_name(&self, query: &str) -> Vec<Recipe> {
        self.record(format!("search:{}", query));
        self.search_results.clone()
    }

    async fn fetch_categories(&self) -> Vec<Category> {
        self.record("categories");
        self.categories.clone()
    }

    async fn fetch_by_category(&self, category: &str) -> Vec<Recipe> {
        self.record(format!("category:{}", category));
        self.category_recipes.clone()
    }

    async fn fetch_by_id(&self, id: &str) -> Option<Recipe> {
        self.record(format!("lookup:{}", id));
        self.lookup.iter().find(|r| r.id == id).cloned()
    }
}

pub fn recipe(id: &str, area: &str, video: Option<&str>) -> Recipe {
    Recipe {
        id: id.to_string(),
        name: format!("Recipe {}", id),
        area: area.to_string(),
        video_url: video.map(String::from),
        ..Default::default()
    }
}

pub fn teriyaki() -> Recipe {
    Recipe {
        id: "52772".to_string(),
        name: "Teriyaki Chicken Casserole".to_string(),
        area: "American".to_string(),
        category: "Chicken".to_string(),
        video_url: Some("https://www.youtube.com/watch?v=4aZr5hZXP_s".to_string()),
        ..Default::default()
    }
}

/// `n` recipes with ids `<prefix>0`, `<prefix>1`, ...
pub fn batch(prefix: &str, n: usize) -> Vec<Recipe> {
    (0..n)
        .map(|i| recipe(&format!("{}{}", prefix, i), "British", None))
        .collect()
}
