//! # ndl CLI Entry Point
//!
//! Assembles subcommands and dispatches to handler modules.

use clap::Parser;

/// NUTS datalake toolchain.
///
/// Resolves region codes and free-text names against the datalake
/// listings, prints fuzzy suggestions and country quick links, and runs
/// the API service.
#[derive(Parser, Debug)]
#[command(name = "ndl", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand, Debug)]
enum Commands {
    /// Resolve a code prefix or free-text name to matching partitions.
    Resolve(ndl_cli::resolve::ResolveArgs),
    /// Ranked fuzzy suggestions for a free-text query.
    Suggest(ndl_cli::suggest::SuggestArgs),
    /// Country quick links.
    Countries(ndl_cli::countries::CountriesArgs),
    /// Run the API service.
    Serve(ndl_cli::serve::ServeArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Resolve(args) => ndl_cli::resolve::run(&args),
        Commands::Suggest(args) => ndl_cli::suggest::run(&args),
        Commands::Countries(args) => ndl_cli::countries::run(&args),
        Commands::Serve(args) => ndl_cli::serve::run(&args),
    }
}
