//! CLI - Command Line Interface for Chef's Choice
//!
//! Every screen of the app has a scriptable command. Output is JSON when
//! `--json` is given or stdout is not a terminal.
//!
//! # Examples
//!
//! ```bash
//! chefs-choice random
//! chefs-choice search "chicken" --limit 5
//! chefs-choice category Seafood
//! chefs-choice favorites add 52772
//! chefs-choice discover
//! ```

use clap::{Args, Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::IsTerminal;
use std::path::PathBuf;

// =============================================================================
// Exit Codes
// =============================================================================

/// Exit codes for CLI operations (semantic for scripting)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Success
    Success = 0,
    /// General error
    Error = 1,
    /// Invalid arguments
    InvalidArgs = 2,
    /// Nothing found (also what a network failure looks like)
    NotFound = 4,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> std::process::ExitCode {
        std::process::ExitCode::from(code as u8)
    }
}

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Chef's Choice - discover, search and save recipes from TheMealDB
#[derive(Parser, Debug)]
#[command(
    name = "chefs-choice",
    version,
    about = "Discover, search and save recipes from TheMealDB",
    after_help = "EXAMPLES:\n\
                  chefs-choice random                  Random video recipe\n\
                  chefs-choice search \"pie\" -l 5       Search by name\n\
                  chefs-choice favorites add 52772     Save a recipe\n\
                  chefs-choice discover                Swipe through recipes"
)]
pub struct Cli {
    /// Output format as JSON (default for non-TTY)
    #[arg(long, short = 'j', global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Debug logging on stderr
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Path to config file
    #[arg(long, short = 'c', global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Check if JSON output should be used
    pub fn should_json(&self) -> bool {
        self.json || !std::io::stdout().is_terminal()
    }
}

// =============================================================================
// Subcommands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Random recipe with a video from an allowed area
    #[command(visible_alias = "r")]
    Random(RandomCmd),

    /// Recently added recipes
    Latest(ListCmd),

    /// Search recipes by name
    #[command(visible_alias = "s")]
    Search(SearchCmd),

    /// List recipe categories
    Categories,

    /// Recipes in a category
    #[command(visible_alias = "cat")]
    Category(CategoryCmd),

    /// Full recipe by id
    Show(ShowCmd),

    /// Manage saved recipes
    #[command(visible_alias = "fav")]
    Favorites(FavoritesCmd),

    /// Keep or skip random recipes one at a time
    #[command(visible_alias = "d")]
    Discover,
}

#[derive(Args, Debug)]
pub struct RandomCmd {
    /// Random draws before giving up (overrides config)
    #[arg(long, short = 'a')]
    pub attempts: Option<u32>,

    /// Accept recipes from any area (video still required)
    #[arg(long)]
    pub any_area: bool,

    /// Show the full instructions instead of a preview
    #[arg(long, short = 'f')]
    pub full: bool,
}

#[derive(Args, Debug)]
pub struct ListCmd {
    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct SearchCmd {
    /// Recipe name or part of it
    #[arg(required = true)]
    pub query: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "20")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct CategoryCmd {
    /// Category name (e.g. Seafood)
    pub name: String,

    /// Maximum number of results
    #[arg(long, short = 'l', default_value = "50")]
    pub limit: usize,
}

#[derive(Args, Debug)]
pub struct ShowCmd {
    /// Recipe id (e.g. 52772)
    pub id: String,
}

#[derive(Args, Debug)]
pub struct FavoritesCmd {
    #[command(subcommand)]
    pub action: Option<FavoritesAction>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum FavoritesAction {
    /// List saved recipes (default)
    #[command(visible_alias = "ls")]
    List,
    /// Look up a recipe by id and save it
    Add { id: String },
    /// Remove a saved recipe
    #[command(visible_alias = "rm")]
    Remove { id: String },
}

// =============================================================================
// JSON Output Structures
// =============================================================================

/// Standard JSON output wrapper
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "is_zero")]
    pub exit_code: i32,
}

fn is_zero(n: &i32) -> bool {
    *n == 0
}

impl<T: Serialize> JsonOutput<T> {
    /// Create success output with data
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            exit_code: 0,
        }
    }

    /// Create error output (no data)
    pub fn error_msg(msg: impl Into<String>, code: ExitCode) -> JsonOutput<()> {
        JsonOutput::<()> {
            data: None,
            error: Some(msg.into()),
            exit_code: code.into(),
        }
    }
}

/// Favorites mutation response
#[derive(Debug, Serialize, Deserialize)]
pub struct FavoriteChange {
    pub id: String,
    /// "saved", "unchanged" or "unsynced"
    pub status: String,
    pub count: usize,
}

impl Display for FavoriteChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} ({} saved)", self.id, self.status, self.count)
    }
}

// =============================================================================
// Output Helpers
// =============================================================================

/// Output handler for consistent formatting
pub struct Output {
    pub json: bool,
    pub quiet: bool,
}

impl Output {
    pub fn new(cli: &Cli) -> Self {
        Self {
            json: cli.should_json(),
            quiet: cli.quiet,
        }
    }

    /// Print success data (JSON wrapper, or `Display` for humans)
    pub fn print<T: Serialize + Display>(&self, data: &T) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(data))?);
        } else {
            println!("{}", data);
        }
        Ok(())
    }

    /// Print a list, one `Display` line per item for humans
    pub fn print_list<T: Serialize + Display>(&self, items: &[T]) -> anyhow::Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(&JsonOutput::success(items))?);
        } else if items.is_empty() {
            self.info("No results");
        } else {
            for item in items {
                println!("{}", item);
            }
        }
        Ok(())
    }

    /// Print error and return exit code
    pub fn error(&self, msg: impl Into<String>, code: ExitCode) -> ExitCode {
        let msg = msg.into();
        if self.json {
            let output = JsonOutput::<()>::error_msg(&msg, code);
            if let Ok(json) = serde_json::to_string_pretty(&output) {
                eprintln!("{}", json);
            }
        } else if !self.quiet {
            eprintln!("Error: {}", msg);
        }
        code
    }

    /// Print info message (suppressed in quiet mode)
    pub fn info(&self, msg: impl Display) {
        if !self.quiet && !self.json {
            eprintln!("{}", msg);
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
