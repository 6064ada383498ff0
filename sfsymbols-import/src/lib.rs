//! Import SF Symbols metadata into the catalog database.
//!
//! This crate owns the ETL step: it takes resources loaded by
//! `sfsymbols-catalog`, merges release tables and alias maps, and writes every
//! entity through `sfsymbols-db` inside a single transaction.

pub mod progress;
pub mod symbol_import;

pub use progress::{ImportProgress, LogProgress, SilentProgress};
pub use symbol_import::{
    ImportError, ImportStats, extract, import_into_repository, import_resources,
};
