//! Qualifying random recipe selection
//!
//! The random endpoint returns recipes from any cuisine, with or without a
//! video. The home screen only shows recipes that have a video link and come
//! from an allow-listed area, so we keep drawing random recipes until one
//! qualifies or the attempt budget runs out.

use futures::stream::{self, Stream, StreamExt};
use std::future;
use std::pin::pin;

use crate::api::RecipeSource;
use crate::models::Recipe;

/// Areas accepted by default (exact, case-sensitive match)
pub const DEFAULT_AREAS: [&str; 4] = ["British", "American", "Canadian", "Irish"];

/// Default number of random draws before giving up
pub const DEFAULT_MAX_ATTEMPTS: u32 = 20;

/// Rejection sampler over the random recipe endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifyingSelector {
    allowed_areas: Vec<String>,
    max_attempts: u32,
}

impl Default for QualifyingSelector {
    fn default() -> Self {
        Self::new(DEFAULT_AREAS, DEFAULT_MAX_ATTEMPTS)
    }
}

impl QualifyingSelector {
    /// An attempt budget of zero is raised to one.
    pub fn new<I, S>(allowed_areas: I, max_attempts: u32) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed_areas: allowed_areas.into_iter().map(Into::into).collect(),
            max_attempts: max_attempts.max(1),
        }
    }

    /// Selector that only requires a video link
    pub fn any_area(max_attempts: u32) -> Self {
        Self {
            allowed_areas: Vec::new(),
            max_attempts: max_attempts.max(1),
        }
    }

    pub fn allowed_areas(&self) -> &[String] {
        &self.allowed_areas
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    /// Whether `recipe` has a video and an allowed area
    ///
    /// An empty allow-list accepts every area.
    pub fn qualifies(&self, recipe: &Recipe) -> bool {
        recipe.has_video()
            && (self.allowed_areas.is_empty()
                || self.allowed_areas.iter().any(|a| *a == recipe.area))
    }

    /// Random draws from `source`, at most `max_attempts` of them
    ///
    /// Draws are sequential and the stream ends early at the first failed
    /// fetch.
    pub fn candidates<'a, S: RecipeSource>(
        &'a self,
        source: &'a S,
    ) -> impl Stream<Item = Recipe> + 'a {
        stream::iter(0..self.max_attempts)
            .then(move |_| source.fetch_random())
            .take_while(|fetched| future::ready(fetched.is_some()))
            .filter_map(future::ready)
    }

    /// First qualifying candidate, or `None` when the budget runs out or a
    /// fetch fails
    pub async fn select<S: RecipeSource>(&self, source: &S) -> Option<Recipe> {
        let mut qualifying = pin!(self
            .candidates(source)
            .filter(|recipe| future::ready(self.qualifies(recipe))));

        let found = qualifying.next().await;
        match &found {
            Some(recipe) => tracing::debug!(id = %recipe.id, area = %recipe.area, "qualifying recipe found"),
            None => tracing::info!(
                max_attempts = self.max_attempts,
                "no qualifying recipe within attempt budget"
            ),
        }
        found
    }
}
