//! App store CLI
//!
//! Adapts compose manifests to the deployment environment and curates the
//! app store catalog from the command line.

mod cli;
mod commands;
mod error;
mod logging;
mod store;

use clap::Parser;
use colored::Colorize;

use cli::{Cli, Commands};
use error::Result;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();

    logging::init(cli.verbose);
    tracing::debug!("Verbose mode enabled");

    execute_command(cli.command)
}

fn execute_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Adapt {
            file,
            overrides,
            json,
        } => commands::run_adapt(&file, &overrides, json),
        Commands::List {
            store,
            category,
            author_type,
            arch,
            any_arch,
            recommend,
            json,
        } => {
            let arch = if any_arch {
                None
            } else {
                Some(arch.unwrap_or_else(|| store::host_architecture().to_string()))
            };
            let query = commands::list::build_query(category, author_type, arch, recommend);
            commands::run_list(&store, &query, json)
        }
        Commands::Categories { store, json } => commands::run_categories(&store, json),
        Commands::Upgradable {
            store,
            installed,
            updating,
            digest_tags,
            json,
        } => commands::run_upgradable(&store, &installed, &updating, &digest_tags, json),
        Commands::Tag { store, id, service } => commands::run_tag(&store, &id, service.as_deref()),
    }
}
