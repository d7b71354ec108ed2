//! # `ndl countries`
//!
//! Country quick links: the pre-built country-wide archives, one line per
//! country.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ndl_core::{DatalakeConfig, FileLink};

use crate::listings;

#[derive(Args, Debug)]
pub struct CountriesArgs {
    /// Configuration file.
    #[arg(long, default_value = "ndl.yaml")]
    pub config: PathBuf,
}

pub fn run(args: &CountriesArgs) -> Result<()> {
    let config = DatalakeConfig::load(&args.config)?;
    let listings = listings::load(&config);

    if listings.countries.is_empty() {
        println!("No countries available.");
        return Ok(());
    }
    println!("{:<20} {:<40} {:<40}", "COUNTRY", "GPKG", "CSV");
    for country in &listings.countries {
        println!(
            "{:<20} {:<40} {:<40}",
            country.name,
            format_link(country.gpkg.as_ref()),
            format_link(country.csv.as_ref()),
        );
    }
    Ok(())
}

fn format_link(link: Option<&FileLink>) -> String {
    match link {
        Some(link) => format!("{} ({} MB)", link.download_link, link.size_in_mb.round()),
        None => "—".to_string(),
    }
}
