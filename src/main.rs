mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use dvispecials::config::Config;
use dvispecials::observability;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();

    let config = match cli.config {
        Some(path) => Config::load_from_path(path)?,
        None => Config::load()?,
    };
    observability::init_tracing(&config.logging);

    match cli.command {
        Commands::List(args) => commands::list(&config, args)?,
        Commands::Process(args) => commands::process(&config, args)?,
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
