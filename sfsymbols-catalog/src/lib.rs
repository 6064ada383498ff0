//! SF Symbols catalog data model and metadata loading.
//!
//! This crate defines the catalog types without any database dependencies
//! and reads the property lists and strings tables shipped with
//! `SF Symbols.app`. Consumers pass the loaded resources to
//! `sfsymbols-import` for persistence.

pub mod availability;
pub mod resources;
pub mod strings;
pub mod types;

pub use availability::{invert_aliases, layerset_names, merge_aliases, merge_releases};
pub use resources::{
    AvailabilityFile, LayersetYears, MetadataBundle, ResourceError, SymbolResources,
};
pub use strings::StringsTable;
pub use types::*;
