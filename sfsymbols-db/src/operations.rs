//! Write operations for catalog entities.
//!
//! Entities are inserted once per import and only ever removed all at once
//! through [`clear_all`].

use rusqlite::{Connection, params};
use sfsymbols_catalog::types::*;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Invalid search record for symbol {id}: {source}")]
    SearchRecord { id: RowId, source: serde_json::Error },
}

// ── Inserts ─────────────────────────────────────────────────────────────────

/// Insert a release. Returns the generated row id.
pub fn insert_release(
    conn: &Connection,
    year: &str,
    platforms: &PlatformVersions,
) -> Result<RowId, OperationError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO releases (year, ios, macos, visionos, watchos)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    stmt.execute(params![
        year,
        platforms.ios,
        platforms.macos,
        platforms.visionos,
        platforms.watchos,
    ])?;
    Ok(conn.last_insert_rowid())
}

/// Insert a category. Returns the generated row id.
pub fn insert_category(
    conn: &Connection,
    category: &CategoryEntry,
) -> Result<RowId, OperationError> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO categories (key, label, icon) VALUES (?1, ?2, ?3)")?;
    stmt.execute(params![category.key, category.label, category.icon])?;
    Ok(conn.last_insert_rowid())
}

/// Insert a layerset. Returns the generated row id.
pub fn insert_layerset(conn: &Connection, name: &str) -> Result<RowId, OperationError> {
    let mut stmt = conn.prepare_cached("INSERT INTO layersets (name) VALUES (?1)")?;
    stmt.execute(params![name])?;
    Ok(conn.last_insert_rowid())
}

/// Insert a symbol introduced in `release_id`. Returns the generated row id.
pub fn insert_symbol(
    conn: &Connection,
    name: &str,
    release_id: RowId,
) -> Result<RowId, OperationError> {
    let mut stmt = conn.prepare_cached("INSERT INTO symbols (name, release_id) VALUES (?1, ?2)")?;
    stmt.execute(params![name, release_id])?;
    Ok(conn.last_insert_rowid())
}

pub fn insert_symbol_category(
    conn: &Connection,
    row: &SymbolCategory,
) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO symbol_categories (symbol_id, category_id) VALUES (?1, ?2)",
    )?;
    stmt.execute(params![row.symbol_id, row.category_id])?;
    Ok(())
}

pub fn insert_layerset_availability(
    conn: &Connection,
    row: &LayersetAvailability,
) -> Result<(), OperationError> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO layerset_availability (symbol_id, layerset_id, release_id)
         VALUES (?1, ?2, ?3)",
    )?;
    stmt.execute(params![row.symbol_id, row.layerset_id, row.release_id])?;
    Ok(())
}

/// Insert a search record. Aliases and keywords are stored as JSON arrays,
/// which the FTS tokenizer splits into words.
pub fn insert_search_record(
    conn: &Connection,
    record: &SearchRecord,
) -> Result<(), OperationError> {
    let encode = |values: &[String]| {
        serde_json::to_string(values).map_err(|e| OperationError::SearchRecord {
            id: record.id,
            source: e,
        })
    };
    let aliases = encode(&record.aliases)?;
    let keywords = encode(&record.keywords)?;

    let mut stmt = conn.prepare_cached(
        "INSERT INTO search_records (rowid, id, name, aliases, keywords)
         VALUES (?1, ?1, ?2, ?3, ?4)",
    )?;
    stmt.execute(params![record.id, record.name, aliases, keywords])?;
    Ok(())
}

// ── Reset ───────────────────────────────────────────────────────────────────

/// Tables in child-to-parent order.
const DATA_TABLES: &[&str] = &[
    "search_records",
    "layerset_availability",
    "symbol_categories",
    "symbols",
    "layersets",
    "categories",
    "releases",
];

/// Delete every row from every catalog table, keeping the schema.
///
/// Row id counters are reset too, so a re-import assigns the same ids.
pub fn clear_all(conn: &Connection) -> Result<(), OperationError> {
    let tx = conn.unchecked_transaction()?;
    for table in DATA_TABLES {
        tx.execute(&format!("DELETE FROM {table}"), [])?;
    }
    tx.execute(
        "DELETE FROM sqlite_sequence
         WHERE name IN ('releases', 'categories', 'layersets', 'symbols')",
        [],
    )?;
    tx.commit()?;
    log::debug!("Cleared {} tables", DATA_TABLES.len());
    Ok(())
}
