use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cafelist_lib::{CafeQuery, Catalog, QueryResolver};

#[derive(Parser, Debug)]
#[command(author, version, about = "Café catalog utilities")]
struct Cli {
    /// CSV catalog (`city,name` columns) to use instead of the built-in one.
    #[arg(long, env = "CAFELIST_CATALOG_PATH")]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List cafés in a city, optionally filtered and capped.
    List {
        /// City key, matched exactly.
        #[arg(long)]
        city: Option<String>,
        /// Maximum number of cafés to print.
        #[arg(long)]
        count: Option<String>,
        /// Case-insensitive substring the café name must contain.
        #[arg(long)]
        search: Option<String>,
    },
    /// List the cities in the catalog with their café counts.
    Cities,
}

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let catalog = load_catalog(cli.catalog.as_deref())?;

    match cli.command {
        Command::List {
            city,
            count,
            search,
        } => handle_list(catalog, CafeQuery { city, count, search }),
        Command::Cities => {
            handle_cities(&catalog);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn load_catalog(path: Option<&Path>) -> Result<Catalog> {
    match path {
        Some(path) => Catalog::from_path(path)
            .with_context(|| format!("failed to load catalog from {}", path.display())),
        None => Ok(Catalog::builtin()),
    }
}

/// Query errors are printed as their bare message, matching the HTTP body.
fn handle_list(catalog: Catalog, query: CafeQuery) -> Result<ExitCode> {
    let resolver = QueryResolver::new(Arc::new(catalog));
    debug!(?query, "resolving query");

    match resolver.resolve(&query) {
        Ok(names) => {
            println!("{}", names.join(","));
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            eprintln!("{e}");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn handle_cities(catalog: &Catalog) {
    for city in catalog.cities() {
        let count = catalog.lookup(city).map(<[_]>::len).unwrap_or_default();
        println!("{} ({} cafés)", city, count);
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
