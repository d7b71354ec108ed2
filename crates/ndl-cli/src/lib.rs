//! # ndl-cli — NUTS Datalake Command-Line Interface
//!
//! Front end over the resolution engine and the API service, working from
//! the same listing files the service loads.
//!
//! ## Subcommands
//!
//! - `resolve` — resolve a code prefix or free-text name and print the
//!   matching partitions with download links and the bundle URL
//! - `suggest` — ranked fuzzy suggestions for a free-text query
//! - `countries` — country quick links
//! - `serve` — run the API service
//!
//! ## Crate Policy
//!
//! - CLI construction (argument parsing) is separated from business logic.
//! - Handler functions delegate to `ndl-engine`/`ndl-api` — no resolution
//!   logic here, only listing IO and output formatting.

pub mod countries;
pub mod listings;
pub mod resolve;
pub mod serve;
pub mod suggest;
