//! TheMealDB API client
//!
//! Provides random picks, latest additions, search, categories and lookups.
//! API docs: https://www.themealdb.com/api.php

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use super::RecipeSource;
use crate::models::{Category, Ingredient, Recipe, MAX_INGREDIENTS};

/// Free test endpoint (key "1"); premium-only endpoints answer with errors
pub const PUBLIC_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1";

/// Default per-request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Base URL for a premium (v2) API key
pub fn premium_base_url(api_key: &str) -> String {
    format!("https://www.themealdb.com/api/json/v2/{}", api_key)
}

/// TheMealDB API error types
#[derive(Error, Debug)]
pub enum MealDbError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

/// TheMealDB API client
pub struct MealDbClient {
    base_url: String,
    client: reqwest::Client,
    max_retries: u32,
}

impl Default for MealDbClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MealDbClient {
    /// Client for the public test endpoint
    pub fn new() -> Self {
        Self::with_base_url(PUBLIC_BASE_URL)
    }

    /// Client for a premium API key
    pub fn with_api_key(api_key: &str) -> Self {
        Self::with_base_url(premium_base_url(api_key))
    }

    /// Create a client with a custom base URL (for testing)
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: build_http(DEFAULT_TIMEOUT),
            max_retries: 3,
        }
    }

    /// Replace the per-request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = build_http(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET with retry logic for rate limits
    async fn get<T: for<'de> Deserialize<'de>>(&self, endpoint: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut retries = 0;

        loop {
            tracing::debug!(%url, "GET");
            let response = self
                .client
                .get(&url)
                .header("Accept", "application/json")
                .send()
                .await
                .map_err(MealDbError::from)?;

            match response.status() {
                StatusCode::OK => {
                    let body = response.text().await.map_err(MealDbError::from)?;
                    let parsed: T = serde_json::from_str(&body).map_err(|e| {
                        MealDbError::InvalidResponse(format!("JSON parse error: {}", e))
                    })?;
                    return Ok(parsed);
                }
                StatusCode::NOT_FOUND => {
                    return Err(MealDbError::NotFound.into());
                }
                StatusCode::TOO_MANY_REQUESTS => {
                    retries += 1;
                    if retries >= self.max_retries {
                        return Err(MealDbError::RateLimited.into());
                    }

                    let wait_secs = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|v| v.to_str().ok())
                        .and_then(|s| s.parse::<u64>().ok())
                        .unwrap_or(2u64.pow(retries));

                    tracing::debug!(%url, wait_secs, retries, "rate limited, backing off");
                    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
                    continue;
                }
                status => {
                    return Err(MealDbError::ServerError(status.as_u16()).into());
                }
            }
        }
    }

    async fn get_meals(&self, endpoint: &str) -> Result<Vec<Recipe>> {
        let response: MealsResponse = self.get(endpoint).await?;
        Ok(response.into_recipes())
    }

    /// One random recipe (`None` if the service returned no meal)
    pub async fn random_meal(&self) -> Result<Option<Recipe>> {
        Ok(self.get_meals("/random.php").await?.into_iter().next())
    }

    /// A batch of random recipes, sized by the server
    pub async fn random_selection(&self) -> Result<Vec<Recipe>> {
        self.get_meals("/randomselection.php").await
    }

    /// Most recently added recipes
    pub async fn latest_meals(&self) -> Result<Vec<Recipe>> {
        self.get_meals("/latest.php").await
    }

    /// Search recipes by name; a blank query returns nothing without a request
    pub async fn search_meals(&self, query: &str) -> Result<Vec<Recipe>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }
        let endpoint = format!("/search.php?s={}", urlencoding::encode(query));
        self.get_meals(&endpoint).await
    }

    pub async fn list_categories(&self) -> Result<Vec<Category>> {
        let response: CategoriesResponse = self.get("/categories.php").await?;
        Ok(response.into_categories())
    }

    /// Recipes in a category
    pub async fn filter_by_category(&self, category: &str) -> Result<Vec<Recipe>> {
        let endpoint = format!("/filter.php?c={}", urlencoding::encode(category));
        self.get_meals(&endpoint).await
    }

    /// Full recipe by identifier
    pub async fn lookup_meal(&self, id: &str) -> Result<Option<Recipe>> {
        let endpoint = format!("/lookup.php?i={}", urlencoding::encode(id));
        Ok(self.get_meals(&endpoint).await?.into_iter().next())
    }
}

fn build_http(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_default()
}

/// Collapse a fallible fetch into the uniform "empty" failure signal
fn absorb<T: Default>(operation: &str, result: Result<T>) -> T {
    result.unwrap_or_else(|e| {
        tracing::warn!(operation, error = %e, "recipe fetch failed");
        T::default()
    })
}

impl RecipeSource for MealDbClient {
    async fn fetch_random(&self) -> Option<Recipe> {
        absorb("random", self.random_meal().await)
    }

    async fn fetch_random_batch(&self) -> Vec<Recipe> {
        absorb("random_selection", self.random_selection().await)
    }

    async fn fetch_latest(&self) -> Vec<Recipe> {
        absorb("latest", self.latest_meals().await)
    }

    async fn search_by_name(&self, query: &str) -> Vec<Recipe> {
        absorb("search", self.search_meals(query).await)
    }

    async fn fetch_categories(&self) -> Vec<Category> {
        absorb("categories", self.list_categories().await)
    }

    async fn fetch_by_category(&self, category: &str) -> Vec<Recipe> {
        absorb("filter", self.filter_by_category(category).await)
    }

    async fn fetch_by_id(&self, id: &str) -> Option<Recipe> {
        absorb("lookup", self.lookup_meal(id).await)
    }
}

// =============================================================================
// Response Structures (internal deserialization)
// =============================================================================

#[derive(Debug, Deserialize)]
struct MealsResponse {
    // "meals": null means no results
    #[serde(default)]
    meals: Option<Vec<MealRaw>>,
}

impl MealsResponse {
    fn into_recipes(self) -> Vec<Recipe> {
        self.meals
            .unwrap_or_default()
            .into_iter()
            .filter_map(MealRaw::into_recipe)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct MealRaw {
    #[serde(rename = "idMeal")]
    id: Option<String>,
    #[serde(rename = "strMeal")]
    name: Option<String>,
    #[serde(rename = "strCategory")]
    category: Option<String>,
    #[serde(rename = "strArea")]
    area: Option<String>,
    #[serde(rename = "strMealThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strInstructions")]
    instructions: Option<String>,
    #[serde(rename = "strYoutube")]
    youtube: Option<String>,
    // strIngredient1..20, strMeasure1..20 and whatever else the record carries
    #[serde(flatten)]
    slots: HashMap<String, Value>,
}

impl MealRaw {
    fn into_recipe(self) -> Option<Recipe> {
        let ingredients: Vec<Ingredient> = (1..=MAX_INGREDIENTS)
            .map(|n| {
                Ingredient::new(
                    self.slot(&format!("strIngredient{}", n)),
                    self.slot(&format!("strMeasure{}", n)),
                )
            })
            .filter(|i| !i.name.is_empty() || !i.measure.is_empty())
            .collect();
        let id = self.id.filter(|id| !id.trim().is_empty())?;

        Some(Recipe {
            id,
            name: self.name.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            area: self.area.unwrap_or_default(),
            thumbnail: self.thumbnail.unwrap_or_default(),
            instructions: self.instructions.unwrap_or_default(),
            video_url: self.youtube.filter(|v| !v.trim().is_empty()),
            ingredients,
        })
    }

    fn slot(&self, key: &str) -> String {
        self.slots
            .get(key)
            .and_then(Value::as_str)
            .map(|s| s.trim().to_string())
            .unwrap_or_default()
    }
}

#[derive(Debug, Deserialize)]
struct CategoriesResponse {
    #[serde(default)]
    categories: Option<Vec<CategoryRaw>>,
}

impl CategoriesResponse {
    fn into_categories(self) -> Vec<Category> {
        self.categories
            .unwrap_or_default()
            .into_iter()
            .map(CategoryRaw::into_category)
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRaw {
    #[serde(rename = "idCategory")]
    id: Option<String>,
    #[serde(rename = "strCategory")]
    name: Option<String>,
    #[serde(rename = "strCategoryThumb")]
    thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription")]
    description: Option<String>,
}

impl CategoryRaw {
    fn into_category(self) -> Category {
        Category {
            id: self.id.unwrap_or_default(),
            name: self.name.unwrap_or_default(),
            thumbnail: self.thumbnail.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}
