//! SQLite persistence layer for the SF Symbols catalog.
//!
//! Provides schema migration, bulk insert operations, and typed read
//! queries backed by SQLite (via rusqlite with the bundled feature, which
//! includes FTS5). [`SymbolsRepository`] wraps these behind a handle that
//! serializes writes and lets reads run side by side.

pub mod operations;
pub mod queries;
pub mod repository;
pub mod schema;

pub use operations::{
    OperationError, clear_all, insert_category, insert_layerset, insert_layerset_availability,
    insert_release, insert_search_record, insert_symbol, insert_symbol_category,
};
pub use queries::{
    CatalogStats, SymbolsFilter, all_symbols, catalog_stats, find_category_by_key,
    find_release_by_year, find_search_record, find_symbol_by_name, list_categories,
    list_layersets, list_releases, list_symbols, symbol_detail,
};
pub use repository::SymbolsRepository;
pub use schema::{OpenOptions, SchemaError, migrate, open_database, open_memory};
