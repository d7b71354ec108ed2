//! # Partition Records
//!
//! Wire shapes for the datalake partition listing: one record per NUTS
//! partition, each carrying the files available for download.
//!
//! ## Invariant
//!
//! A record present in the listing has at least one file. Records with zero
//! files are dropped at the loading boundary ([`parse_partition_listing`]),
//! so downstream code may rely on [`PartitionRecord::primary_file`]
//! returning a file whenever the record exists.

use serde::{Deserialize, Serialize};

/// Key suffix identifying the canonical columnar format.
const PARQUET_SUFFIX: &str = ".parquet";

/// A single downloadable object within a partition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Object key within the datalake bucket.
    pub key: String,
    /// Object size in bytes.
    pub size_bytes: u64,
    /// Time-limited download URL.
    pub presigned_url: String,
}

impl FileRef {
    /// Size in megabytes, rounded to the nearest integer (decimal
    /// megabytes: one million bytes, matching the datalake's displayed
    /// sizes).
    pub fn size_mb(&self) -> u64 {
        (self.size_bytes as f64 / 1e6).round() as u64
    }
}

/// One datalake partition: the files published for a region at a given
/// format version.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionRecord {
    /// Region identifier as published by the source. Kept as raw text;
    /// prefix matching against it is case-insensitive.
    pub nuts_id: String,
    /// Format version the partition belongs to (e.g. `v0.2`).
    pub version: String,
    /// Downloadable files, in source order.
    pub files: Vec<FileRef>,
}

impl PartitionRecord {
    /// The file to offer for this partition: the first parquet file if one
    /// exists, otherwise the first file in source order.
    pub fn primary_file(&self) -> Option<&FileRef> {
        self.files
            .iter()
            .find(|f| f.key.ends_with(PARQUET_SUFFIX))
            .or_else(|| self.files.first())
    }
}

/// Parse the remote partition listing. Any failure yields the empty list;
/// records without files are dropped here so the at-least-one-file
/// invariant holds everywhere downstream.
pub fn parse_partition_listing(raw: &str) -> Vec<PartitionRecord> {
    let mut records: Vec<PartitionRecord> = serde_json::from_str(raw).unwrap_or_default();
    records.retain(|r| !r.files.is_empty());
    records
}
