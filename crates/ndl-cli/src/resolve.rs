//! # `ndl resolve`
//!
//! Resolves a code prefix or free-text name exactly the way the download
//! page does: through the engine, including the debounce windows (driven
//! to completion immediately, since there is no further typing coming).

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use ndl_core::DatalakeConfig;
use ndl_engine::{Engine, RenderModel, REFRESH_WINDOW};

use crate::listings;

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// NUTS code prefix (default) or free-text name (with --name).
    pub query: String,

    /// Treat the query as a free-text region name.
    #[arg(long)]
    pub name: bool,

    /// Configuration file.
    #[arg(long, default_value = "ndl.yaml")]
    pub config: PathBuf,

    /// Print the render model as JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: &ResolveArgs) -> Result<()> {
    let config = DatalakeConfig::load(&args.config)?;
    let listings = listings::load(&config);

    let mut engine = Engine::new(config.api_base_trimmed());
    engine.on_catalog_loaded(listings.catalog);
    engine.on_partitions_loaded(listings.partitions);

    let now = Instant::now();
    if args.name {
        engine.on_name_input(&args.query, now);
    } else {
        engine.on_code_input(&args.query, now);
    }
    engine.poll(now + REFRESH_WINDOW);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(engine.current_render_model())?
        );
        return Ok(());
    }

    match engine.current_render_model() {
        RenderModel::Rows { rows, bundle_url } => {
            println!("{:<8} {:<28} {:>8}  {}", "NUTS", "REGION", "SIZE", "URL");
            for row in rows {
                println!(
                    "{:<8} {:<28} {:>5} MB  {}",
                    row.nuts_id, row.region_name, row.size_mb, row.file_url
                );
            }
            println!();
            println!("Bundle: {bundle_url}");
        }
        model => {
            if let Some(message) = model.message() {
                println!("{message}");
            }
        }
    }
    Ok(())
}
