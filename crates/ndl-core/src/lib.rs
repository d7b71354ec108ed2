//! # ndl-core — Foundational Types for the NUTS Datalake
//!
//! This crate is the bedrock of the NUTS datalake workspace. It defines the
//! data model shared by the resolution engine, the API service, and the CLI.
//! Every other crate in the workspace depends on `ndl-core`; it depends on
//! nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrapper for region codes.** `RegionCode` is a validated
//!    newtype with a single constructor that trims, upper-cases, and rejects
//!    anything that is not 1–5 ASCII alphanumerics. No bare strings for
//!    region identifiers anywhere downstream.
//!
//! 2. **Prefix hierarchy as methods, not conventions.** Region level,
//!    parenthood, and the prefix test live on `RegionCode` so the partition
//!    query and the map filter derivation cannot disagree on them.
//!
//! 3. **Degrade, never fail, on remote data.** An empty `RegionCatalog` and
//!    an empty partition list are valid states. Only operator input
//!    (configuration files) is allowed to error at startup.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `ndl-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod catalog;
pub mod config;
pub mod country;
pub mod error;
pub mod partition;
pub mod region;

// Re-export primary types for ergonomic imports.
pub use catalog::RegionCatalog;
pub use config::DatalakeConfig;
pub use country::{parse_country_listing, CountryRecord, FileLink};
pub use error::NdlError;
pub use partition::{parse_partition_listing, FileRef, PartitionRecord};
pub use region::{RegionCode, MAX_REGION_LEVEL};
