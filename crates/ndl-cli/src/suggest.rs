//! # `ndl suggest`
//!
//! Ranked fuzzy suggestions for a free-text query, printed with their
//! scores. Useful for checking how the matcher orders a disputed query.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use ndl_core::DatalakeConfig;
use ndl_engine::{FuzzyMatcher, DEFAULT_SHORTLIST};

use crate::listings;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Free-text region name query (at least 2 characters).
    pub query: String,

    /// Maximum number of suggestions.
    #[arg(long, default_value_t = DEFAULT_SHORTLIST)]
    pub limit: usize,

    /// Configuration file.
    #[arg(long, default_value = "ndl.yaml")]
    pub config: PathBuf,
}

pub fn run(args: &SuggestArgs) -> Result<()> {
    let config = DatalakeConfig::load(&args.config)?;
    let listings = listings::load(&config);

    let matches = FuzzyMatcher::new(&listings.catalog).top_matches(&args.query, args.limit);
    if matches.is_empty() {
        println!("No suggestions.");
        return Ok(());
    }
    for candidate in matches {
        println!("{:>5.2}  {}", candidate.score, candidate.suggestion_label());
    }
    Ok(())
}
