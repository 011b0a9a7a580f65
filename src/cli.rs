use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dvispecials")]
#[command(about = "Route DVI specials to their handlers", long_about = None)]
pub struct Cli {
    /// Configuration file (defaults to $DVISPECIALS_CONFIG or config/dvispecials.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available special handlers
    List(ListArgs),
    /// Dispatch a stream of specials, one per line
    Process(ProcessArgs),
    /// Print the effective configuration
    Config,
}

#[derive(clap::Args, Debug)]
pub struct SelectionArgs {
    /// Don't process specials of the given handlers (e.g. "color,bgcolor");
    /// without a value all specials are ignored
    #[arg(long, value_name = "NAMES", num_args = 0..=1, require_equals = true)]
    pub no_specials: Option<Option<String>>,
}

#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct ProcessArgs {
    /// File with one special per line, or "-" for stdin
    #[arg(default_value = "-")]
    pub input: PathBuf,

    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Stop at the first special that fails
    #[arg(long)]
    pub strict: bool,
}
