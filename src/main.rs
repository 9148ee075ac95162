//! Chef's Choice - discover, search and save recipes from TheMealDB
//!
//! # Usage
//!
//! ```bash
//! chefs-choice random
//! chefs-choice latest --limit 5
//! chefs-choice search "teriyaki"
//! chefs-choice favorites add 52772
//! chefs-choice discover
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use chefs_choice::cli::{Cli, Command, Output};
use chefs_choice::commands;
use chefs_choice::config::Config;

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match &cli.config {
        Some(path) => Config::load_from(path),
        None => Config::load(),
    };
    tracing::debug!(api = %config.api_base_url(), data_dir = %config.data_dir().display(), "starting");

    let output = Output::new(&cli);
    let exit_code = match cli.command {
        Command::Random(cmd) => commands::random_cmd(cmd, &config, &output).await,
        Command::Latest(cmd) => commands::latest_cmd(cmd, &config, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &config, &output).await,
        Command::Categories => commands::categories_cmd(&config, &output).await,
        Command::Category(cmd) => commands::category_cmd(cmd, &config, &output).await,
        Command::Show(cmd) => commands::show_cmd(cmd, &config, &output).await,
        Command::Favorites(cmd) => commands::favorites_cmd(cmd, &config, &output).await,
        Command::Discover => commands::discover_cmd(&config, &output).await,
    };

    exit_code.into()
}

/// Log to stderr so JSON on stdout stays parseable; RUST_LOG overrides
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
