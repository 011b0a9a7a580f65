use std::fs::File;
use std::io::{self, BufRead, BufReader};

use dvispecials::actions::RecordingActions;
use dvispecials::config::Config;
use dvispecials::handlers::{HandlerRegistry, builtin_handlers};
use dvispecials::observability::DispatchMetrics;
use dvispecials::stream::{self, StreamOptions};
use tracing::info;

use crate::cli::{ListArgs, ProcessArgs, SelectionArgs};

type AnyError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Registry with the built-in handlers minus the excluded ones.
///
/// `--no-specials` takes precedence over the configured selection.
fn build_registry(config: &Config, selection: &SelectionArgs) -> HandlerRegistry {
    let mut registry =
        HandlerRegistry::new().with_info_column_width(config.specials.info_column_width);

    let ignore = match &selection.no_specials {
        Some(None) => return registry,
        Some(Some(names)) => Some(names.as_str()),
        None if config.specials.disable_all => return registry,
        None => config.ignore_spec(),
    };
    registry.register_all(builtin_handlers(), ignore);
    info!(handlers = registry.len(), "Special handlers registered");
    registry
}

pub fn list(config: &Config, args: ListArgs) -> Result<(), AnyError> {
    let registry = build_registry(config, &args.selection);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&registry.handler_info())?);
    } else {
        print!("{}", registry.write_handler_info());
    }
    Ok(())
}

pub fn process(config: &Config, args: ProcessArgs) -> Result<(), AnyError> {
    let mut registry = build_registry(config, &args.selection);

    let reader: Box<dyn BufRead> = if args.input.as_os_str() == "-" {
        Box::new(io::stdin().lock())
    } else {
        Box::new(BufReader::new(File::open(&args.input)?))
    };

    let mut actions = RecordingActions::new();
    let metrics = DispatchMetrics::new();
    let options = StreamOptions {
        strict: args.strict,
    };

    let summary = stream::run(&mut registry, reader, &mut actions, options, &metrics)?;
    let snapshot = metrics.snapshot();

    println!("specials:     {}", summary.specials);
    println!("pages:        {}", summary.pages);
    println!("handled:      {}", snapshot.handled);
    println!("declined:     {}", snapshot.declined);
    println!("unrecognized: {}", snapshot.unrecognized);
    println!("failed:       {}", snapshot.failed);
    Ok(())
}

pub fn show_config(config: &Config) -> Result<(), AnyError> {
    print!("{}", config.to_toml()?);
    Ok(())
}
