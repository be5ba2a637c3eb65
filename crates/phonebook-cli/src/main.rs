//! Phonebook CLI
//!
//! Interactive contact directory backed by a JSON file.

#![warn(clippy::all)]
#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;
use phonebook_cli::cli::Args;
use phonebook_cli::config::Config;
use phonebook_cli::console::StdConsole;
use phonebook_cli::shell::Shell;
use phonebook_core::{FileBackend, LoadOutcome, Store};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = Config::load(args.config.as_deref())?
        .with_overrides(args.data_file, args.page_size);
    config.validate()?;
    tracing::debug!("Using {:?}", config);

    let store = Store::open(FileBackend::new(&config.data_file))
        .with_context(|| format!("Failed to open {}", config.data_file.display()))?;
    if store.outcome() == LoadOutcome::Created {
        tracing::info!("Created {}", config.data_file.display());
    }

    let mut shell = Shell::new(store, StdConsole::stdio(), config.page_size);
    shell.run()?;
    Ok(())
}

/// Log to stderr so the menu on stdout stays clean. `RUST_LOG` wins over
/// `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
