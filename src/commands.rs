//! CLI Command Handlers
//!
//! Implements all CLI commands on top of [`App`].
//! Each handler takes CLI args and Output, returns ExitCode.

use serde::Serialize;
use std::fmt;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::api::{MealDbClient, RecipeSource};
use crate::app::{App, Tab};
use crate::cli::{
    CategoryCmd, ExitCode, FavoriteChange, FavoritesAction, FavoritesCmd, ListCmd, Output,
    RandomCmd, SearchCmd, ShowCmd,
};
use crate::config::Config;
use crate::favorites::{Favorites, FileStore, Mutation};
use crate::models::{Decision, Recipe};
use crate::selector::QualifyingSelector;

/// App wired to TheMealDB and the on-disk favorites
pub type CliApp = App<MealDbClient, FileStore>;

pub fn build_app(config: &Config, selector: QualifyingSelector) -> CliApp {
    App::new(config.client(), selector, Favorites::load(config.store()))
}

/// Characters of instructions shown on a collapsed recipe card
pub const INSTRUCTIONS_PREVIEW_CHARS: usize = 200;

/// Full recipe view for `show`
#[derive(Serialize)]
#[serde(transparent)]
pub struct RecipeDetail<'a>(pub &'a Recipe);

impl fmt::Display for RecipeDetail<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_recipe(f, self.0, self.0.instructions.trim())
    }
}

/// Home screen card for `random`: instructions collapsed unless expanded
///
/// JSON output always carries the complete recipe.
pub struct RecipeCard<'a> {
    pub recipe: &'a Recipe,
    pub expanded: bool,
}

impl Serialize for RecipeCard<'_> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.recipe.serialize(serializer)
    }
}

impl fmt::Display for RecipeCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.expanded {
            return write_recipe(f, self.recipe, self.recipe.instructions.trim());
        }
        let preview = self.recipe.instructions_preview(INSTRUCTIONS_PREVIEW_CHARS);
        write_recipe(f, self.recipe, &preview)?;
        if preview != self.recipe.instructions.trim() {
            write!(f, "\n(use --full to read more)")?;
        }
        Ok(())
    }
}

fn write_recipe(f: &mut fmt::Formatter<'_>, recipe: &Recipe, instructions: &str) -> fmt::Result {
    writeln!(f, "{} [{}]", recipe.name, recipe.id)?;
    if !recipe.area.is_empty() || !recipe.category.is_empty() {
        writeln!(f, "{} • {}", recipe.area, recipe.category)?;
    }
    if let Some(video) = recipe.video() {
        writeln!(f, "Video: {}", video)?;
    }

    let mut ingredients = recipe.ingredients().peekable();
    if ingredients.peek().is_some() {
        writeln!(f, "\nIngredients:")?;
        for ingredient in ingredients {
            writeln!(f, "  • {}", ingredient)?;
        }
    }

    if !instructions.is_empty() {
        writeln!(f, "\nInstructions:")?;
        write!(f, "{}", instructions)?;
    }
    Ok(())
}

fn mutation_status(mutation: Mutation) -> &'static str {
    match mutation {
        Mutation::Saved => "saved",
        Mutation::Unchanged => "unchanged",
        Mutation::Unsynced => "unsynced",
    }
}

fn print_or_error<T: Serialize + fmt::Display>(output: &Output, data: &T) -> ExitCode {
    match output.print(data) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

fn print_list_or_error<T: Serialize + fmt::Display>(output: &Output, items: &[T]) -> ExitCode {
    match output.print_list(items) {
        Ok(()) => ExitCode::Success,
        Err(e) => output.error(format!("Failed to serialize: {}", e), ExitCode::Error),
    }
}

// =============================================================================
// Browse Commands
// =============================================================================

pub async fn random_cmd(cmd: RandomCmd, config: &Config, output: &Output) -> ExitCode {
    let base = config.selector();
    let attempts = cmd.attempts.unwrap_or(base.max_attempts());
    let selector = if cmd.any_area {
        QualifyingSelector::any_area(attempts)
    } else {
        QualifyingSelector::new(base.allowed_areas().iter().cloned(), attempts)
    };

    let mut app = build_app(config, selector);
    output.info(format!(
        "Looking for a video recipe ({} attempts max)...",
        app.selector().max_attempts()
    ));

    app.refresh_random().await;
    if cmd.full {
        app.toggle_instructions();
    }
    match app.home.recipe.as_ref() {
        Some(recipe) => {
            let card = RecipeCard {
                recipe,
                expanded: app.home.show_full_instructions,
            };
            print_or_error(output, &card)
        }
        None => output.error("No qualifying recipe found", ExitCode::NotFound),
    }
}

pub async fn latest_cmd(cmd: ListCmd, config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());
    app.select_tab(Tab::Latest).await;

    let recipes = &app.latest.recipes[..cmd.limit.min(app.latest.recipes.len())];
    print_list_or_error(output, recipes)
}

pub async fn search_cmd(cmd: SearchCmd, config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());

    output.info(format!("Searching for: {}", cmd.query.trim()));
    if !app.search(&cmd.query).await {
        return output.error("Search query must not be empty", ExitCode::InvalidArgs);
    }

    let results = &app.search.results[..cmd.limit.min(app.search.results.len())];
    print_list_or_error(output, results)
}

pub async fn categories_cmd(config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());
    app.select_tab(Tab::Categories).await;
    print_list_or_error(output, &app.categories.categories)
}

pub async fn category_cmd(cmd: CategoryCmd, config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());
    app.open_category(&cmd.name).await;

    let recipes = &app.categories.recipes[..cmd.limit.min(app.categories.recipes.len())];
    print_list_or_error(output, recipes)
}

pub async fn show_cmd(cmd: ShowCmd, config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());
    match app.show_details(&cmd.id).await {
        Some(recipe) => print_or_error(output, &RecipeDetail(recipe)),
        None => output.error(format!("Recipe {} not found", cmd.id), ExitCode::NotFound),
    }
}

// =============================================================================
// Favorites Command
// =============================================================================

pub async fn favorites_cmd(cmd: FavoritesCmd, config: &Config, output: &Output) -> ExitCode {
    let app = build_app(config, config.selector());

    match cmd.action.unwrap_or(FavoritesAction::List) {
        FavoritesAction::List => {
            let recipes = app.favorites().list().await;
            print_list_or_error(output, &recipes)
        }
        FavoritesAction::Add { id } => {
            let Some(recipe) = app.source().fetch_by_id(&id).await else {
                return output.error(format!("Recipe {} not found", id), ExitCode::NotFound);
            };
            let mutation = app.save(recipe).await;
            let change = FavoriteChange {
                id,
                status: mutation_status(mutation).to_string(),
                count: app.favorites().len().await,
            };
            print_or_error(output, &change)
        }
        FavoritesAction::Remove { id } => {
            let mutation = app.remove_favorite(&id).await;
            let change = FavoriteChange {
                id,
                status: mutation_status(mutation).to_string(),
                count: app.favorites().len().await,
            };
            print_or_error(output, &change)
        }
    }
}

// =============================================================================
// Discover Command
// =============================================================================

const DISCOVER_HELP: &str = "[y] keep  [n] skip  [i] details  [r] load more  [q] quit";

pub async fn discover_cmd(config: &Config, output: &Output) -> ExitCode {
    let mut app = build_app(config, config.selector());
    app.select_tab(Tab::Discover).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let Some(recipe) = app.discover.current().cloned() else {
            return output.error("No recipes to discover", ExitCode::NotFound);
        };

        if output.json {
            if let Err(e) = output.print(&recipe) {
                return output.error(format!("Failed to serialize: {}", e), ExitCode::Error);
            }
        } else {
            let (n, total) = app.discover.progress().unwrap_or((0, 0));
            let saved = if app.is_favorite(&recipe.id).await { " ♥" } else { "" };
            println!("\n[{} / {}] {}{}", n, total, recipe, saved);
        }
        output.info(DISCOVER_HELP);

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => return output.error(format!("Failed to read input: {}", e), ExitCode::Error),
        };

        let decision = match line.trim() {
            "y" | "k" | "keep" => Decision::Keep,
            "n" | "s" | "skip" => Decision::Skip,
            "i" | "info" => {
                let shown = match app.show_details(&recipe.id).await {
                    Some(detail) => print_or_error(output, &RecipeDetail(detail)),
                    None => {
                        output.info("Details unavailable");
                        ExitCode::Success
                    }
                };
                if shown != ExitCode::Success {
                    return shown;
                }
                continue;
            }
            "r" | "reload" => {
                app.refill_discover().await;
                continue;
            }
            "q" | "quit" => break,
            other => {
                output.info(format!("Unknown choice: {:?}", other));
                continue;
            }
        };

        match app.swipe(decision).await {
            Ok(outcome) => {
                match outcome.saved {
                    Some(Mutation::Saved) => output.info("Saved to favorites"),
                    Some(Mutation::Unchanged) => output.info("Already in favorites"),
                    Some(Mutation::Unsynced) => {
                        output.info("Saved for this session (could not write favorites)")
                    }
                    None => {}
                }
                if outcome.exhausted {
                    output.info("Loading more recipes...");
                }
            }
            Err(e) => return output.error(e.to_string(), ExitCode::Error),
        }
    }

    ExitCode::Success
}
