//! Discovery session: swipe through random recipes
//!
//! A queue of candidate recipes and a cursor. Each keep/skip decision moves
//! the cursor forward by one; keeping also saves the recipe to favorites.
//! Running off the end of the queue refills it with a fresh random batch.

use thiserror::Error;

use crate::api::RecipeSource;
use crate::favorites::{Favorites, FavoritesStore, Mutation};
use crate::models::{Decision, Recipe};

/// Horizontal drag distance before a card starts following the finger
pub const DRAG_START_THRESHOLD: f32 = 10.0;

/// Horizontal drag distance that commits a decision on release
pub const SWIPE_COMMIT_THRESHOLD: f32 = 120.0;

/// Whether a horizontal drag of `dx` should start moving the card
pub fn drag_started(dx: f32) -> bool {
    dx.abs() > DRAG_START_THRESHOLD
}

/// Decision for a drag released at horizontal offset `dx`
///
/// Right is keep, left is skip; anything shorter snaps the card back.
pub fn decision_for_release(dx: f32) -> Option<Decision> {
    if dx > SWIPE_COMMIT_THRESHOLD {
        Some(Decision::Keep)
    } else if dx < -SWIPE_COMMIT_THRESHOLD {
        Some(Decision::Skip)
    } else {
        None
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("No recipe to decide on ({0:?} session)")]
    NotActive(SessionState),
}

/// Where the session is in its queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing loaded
    Empty,
    /// A current recipe is waiting for a decision
    Active,
    /// Every recipe has been decided on; needs a refill
    Exhausted,
}

/// What a decision did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionOutcome {
    pub recipe: Recipe,
    pub decision: Decision,
    /// Favorites mutation, for keep decisions
    pub saved: Option<Mutation>,
    /// The decision consumed the last queued recipe
    pub exhausted: bool,
    /// The automatic refill produced a new non-empty queue
    pub refilled: bool,
}

/// Ordered queue of candidates plus a cursor
#[derive(Debug, Clone, Default)]
pub struct DiscoverySession {
    queue: Vec<Recipe>,
    cursor: usize,
}

impl DiscoverySession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Session over an existing queue, positioned at `cursor`
    ///
    /// The cursor is clamped to the queue length.
    pub fn with_queue(queue: Vec<Recipe>, cursor: usize) -> Self {
        let cursor = cursor.min(queue.len());
        Self { queue, cursor }
    }

    pub fn state(&self) -> SessionState {
        if self.queue.is_empty() {
            SessionState::Empty
        } else if self.cursor < self.queue.len() {
            SessionState::Active
        } else {
            SessionState::Exhausted
        }
    }

    pub fn current(&self) -> Option<&Recipe> {
        self.queue.get(self.cursor)
    }

    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn queue(&self) -> &[Recipe] {
        &self.queue
    }

    /// One-based position for display, e.g. `(3, 10)` for "3 / 10"
    pub fn progress(&self) -> Option<(usize, usize)> {
        self.current().map(|_| (self.cursor + 1, self.queue.len()))
    }

    /// Replace the queue with a fresh random batch ("load more")
    ///
    /// An empty batch leaves an Active session where it was. Returns whether
    /// the queue was replaced.
    pub async fn refill<S: RecipeSource>(&mut self, source: &S) -> bool {
        let batch = source.fetch_random_batch().await;
        if batch.is_empty() && self.state() == SessionState::Active {
            tracing::debug!(cursor = self.cursor, "empty batch, keeping discovery queue");
            return false;
        }
        self.replace(batch)
    }

    /// Unconditional reload once the queue has run out
    async fn reload<S: RecipeSource>(&mut self, source: &S) -> bool {
        let batch = source.fetch_random_batch().await;
        self.replace(batch)
    }

    fn replace(&mut self, batch: Vec<Recipe>) -> bool {
        self.queue = batch;
        self.cursor = 0;
        tracing::debug!(count = self.queue.len(), "discovery queue refilled");
        !self.queue.is_empty()
    }

    /// Apply `decision` to the current recipe
    ///
    /// Keep saves the recipe to `favorites`. The cursor always moves forward
    /// by one, and running off the end triggers a refill from `source`.
    pub async fn decide<S, F>(
        &mut self,
        decision: Decision,
        source: &S,
        favorites: &Favorites<F>,
    ) -> Result<DecisionOutcome, SessionError>
    where
        S: RecipeSource,
        F: FavoritesStore,
    {
        let recipe = match self.state() {
            SessionState::Active => self.queue[self.cursor].clone(),
            state => return Err(SessionError::NotActive(state)),
        };

        let saved = match decision {
            Decision::Keep => Some(favorites.add(recipe.clone()).await),
            Decision::Skip => None,
        };
        tracing::debug!(id = %recipe.id, %decision, cursor = self.cursor, "discovery decision");

        self.cursor += 1;
        let exhausted = self.state() == SessionState::Exhausted;
        let refilled = exhausted && self.reload(source).await;

        Ok(DecisionOutcome {
            recipe,
            decision,
            saved,
            exhausted,
            refilled,
        })
    }
}
