//! Read queries for the symbols database.
//!
//! Provides lookup by name, key and year, filtered listing, the joined
//! symbol detail view, and table statistics.

use rusqlite::{Connection, params};
use sfsymbols_catalog::types::*;

use crate::operations::OperationError;

/// Filter for [`list_symbols`]. Empty fields do not restrict the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolsFilter {
    /// Matched against names (substring) and the search index (name, alias
    /// or keyword prefixes).
    pub search_term: Option<String>,
    /// Only symbols in the category with this key.
    pub category_key: Option<String>,
}

impl SymbolsFilter {
    pub fn category(key: impl Into<String>) -> Self {
        Self {
            category_key: Some(key.into()),
            ..Self::default()
        }
    }

    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search_term: Some(term.into()),
            ..Self::default()
        }
    }
}

// ── Symbol Lookups ──────────────────────────────────────────────────────────

/// Find a symbol by its exact name.
pub fn find_symbol_by_name(
    conn: &Connection,
    name: &str,
) -> Result<Option<Symbol>, OperationError> {
    let mut stmt = conn.prepare_cached("SELECT id, name, release_id FROM symbols WHERE name = ?1")?;
    let result = stmt.query_row(params![name], row_to_symbol);
    match result {
        Ok(s) => Ok(Some(s)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all symbols ordered by name.
pub fn all_symbols(conn: &Connection) -> Result<Vec<Symbol>, OperationError> {
    list_symbols(conn, &SymbolsFilter::default())
}

/// List symbols matching a filter, ordered by name.
///
/// An unknown category key yields an empty list. A search term matches any
/// symbol whose name contains it, plus any symbol whose search record
/// matches every word of the term as a prefix.
pub fn list_symbols(
    conn: &Connection,
    filter: &SymbolsFilter,
) -> Result<Vec<Symbol>, OperationError> {
    let mut conditions: Vec<&str> = Vec::new();
    let mut param_values: Vec<Box<dyn rusqlite::types::ToSql>> = Vec::new();

    if let Some(key) = &filter.category_key {
        conditions.push(
            "EXISTS (SELECT 1 FROM symbol_categories sc
                     JOIN categories c ON c.id = sc.category_id
                     WHERE sc.symbol_id = s.id AND c.key = ?)",
        );
        param_values.push(Box::new(key.clone()));
    }

    let term = filter
        .search_term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty());
    if let Some(term) = term {
        let pattern = format!("%{}%", escape_like(term));
        match fts_query(term) {
            Some(query) => {
                conditions.push(
                    "(s.name LIKE ? ESCAPE '\\'
                      OR s.id IN (SELECT rowid FROM search_records WHERE search_records MATCH ?))",
                );
                param_values.push(Box::new(pattern));
                param_values.push(Box::new(query));
            }
            None => {
                conditions.push("s.name LIKE ? ESCAPE '\\'");
                param_values.push(Box::new(pattern));
            }
        }
    }

    let mut sql = String::from("SELECT s.id, s.name, s.release_id FROM symbols s");
    if !conditions.is_empty() {
        sql.push_str(" WHERE ");
        sql.push_str(&conditions.join(" AND "));
    }
    sql.push_str(" ORDER BY s.name");

    let mut stmt = conn.prepare(&sql)?;
    let params: Vec<&dyn rusqlite::types::ToSql> =
        param_values.iter().map(|v| v.as_ref()).collect();
    let rows = stmt.query_map(params.as_slice(), row_to_symbol)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Build an FTS5 query requiring every word of `term` as a prefix.
///
/// Returns `None` when the term has no word characters.
fn fts_query(term: &str) -> Option<String> {
    let words: Vec<String> = term
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(|w| format!("\"{w}\"*"))
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join(" "))
    }
}

fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

// ── Release Lookups ─────────────────────────────────────────────────────────

/// Find a release by year.
pub fn find_release_by_year(
    conn: &Connection,
    year: &str,
) -> Result<Option<Release>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, year, ios, macos, visionos, watchos FROM releases WHERE year = ?1",
    )?;
    let result = stmt.query_row(params![year], |row| row_to_release(row, 0));
    match result {
        Ok(r) => Ok(Some(r)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all releases, oldest first.
pub fn list_releases(conn: &Connection) -> Result<Vec<Release>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, year, ios, macos, visionos, watchos FROM releases ORDER BY year",
    )?;
    let rows = stmt.query_map([], |row| row_to_release(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Category Lookups ────────────────────────────────────────────────────────

/// Find a category by key.
pub fn find_category_by_key(
    conn: &Connection,
    key: &str,
) -> Result<Option<Category>, OperationError> {
    let mut stmt =
        conn.prepare_cached("SELECT id, key, label, icon FROM categories WHERE key = ?1")?;
    let result = stmt.query_row(params![key], row_to_category);
    match result {
        Ok(c) => Ok(Some(c)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// List all categories in the order they were imported.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>, OperationError> {
    let mut stmt = conn.prepare_cached("SELECT id, key, label, icon FROM categories ORDER BY id")?;
    let rows = stmt.query_map([], row_to_category)?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Layerset Lookups ────────────────────────────────────────────────────────

pub fn list_layersets(conn: &Connection) -> Result<Vec<Layerset>, OperationError> {
    let mut stmt = conn.prepare_cached("SELECT id, name FROM layersets ORDER BY name")?;
    let rows = stmt.query_map([], |row| row_to_layerset(row, 0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Search Records ──────────────────────────────────────────────────────────

/// Fetch the search record of a symbol by name.
pub fn find_search_record(
    conn: &Connection,
    name: &str,
) -> Result<Option<SearchRecord>, OperationError> {
    let mut stmt = conn.prepare_cached(
        "SELECT rowid, name, aliases, keywords FROM search_records
         WHERE rowid = (SELECT id FROM symbols WHERE name = ?1)",
    )?;
    let result = stmt.query_row(params![name], |row| {
        Ok((
            row.get::<_, RowId>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, String>(3)?,
        ))
    });
    let (id, name, aliases, keywords) = match result {
        Ok(r) => r,
        Err(rusqlite::Error::QueryReturnedNoRows) => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let decode = |text: &str| {
        serde_json::from_str::<Vec<String>>(text)
            .map_err(|e| OperationError::SearchRecord { id, source: e })
    };
    Ok(Some(SearchRecord {
        id,
        name,
        aliases: decode(&aliases)?,
        keywords: decode(&keywords)?,
    }))
}

// ── Symbol Detail ───────────────────────────────────────────────────────────

/// Fetch a symbol with its release, categories and layerset availability.
pub fn symbol_detail(
    conn: &Connection,
    name: &str,
) -> Result<Option<SymbolDetail>, OperationError> {
    let Some(symbol) = find_symbol_by_name(conn, name)? else {
        return Ok(None);
    };

    let release = conn.query_row(
        "SELECT id, year, ios, macos, visionos, watchos FROM releases WHERE id = ?1",
        params![symbol.release_id],
        |row| row_to_release(row, 0),
    )?;

    let mut stmt = conn.prepare_cached(
        "SELECT c.id, c.key, c.label, c.icon
         FROM categories c
         JOIN symbol_categories sc ON sc.category_id = c.id
         WHERE sc.symbol_id = ?1
         ORDER BY c.id",
    )?;
    let categories = stmt
        .query_map(params![symbol.id], row_to_category)?
        .collect::<Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare_cached(
        "SELECT l.id, l.name, r.id, r.year, r.ios, r.macos, r.visionos, r.watchos
         FROM layerset_availability la
         JOIN layersets l ON l.id = la.layerset_id
         JOIN releases r ON r.id = la.release_id
         WHERE la.symbol_id = ?1
         ORDER BY l.name",
    )?;
    let layerset_availability = stmt
        .query_map(params![symbol.id], |row| {
            Ok(LayersetRelease {
                layerset: row_to_layerset(row, 0)?,
                release: row_to_release(row, 2)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Some(SymbolDetail {
        symbol,
        release,
        categories,
        layerset_availability,
    }))
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Row counts per table.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let count = |table: &str| -> Result<i64, OperationError> {
        Ok(conn.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    };

    Ok(CatalogStats {
        releases: count("releases")?,
        categories: count("categories")?,
        layersets: count("layersets")?,
        symbols: count("symbols")?,
        symbol_categories: count("symbol_categories")?,
        layerset_availabilities: count("layerset_availability")?,
        search_records: count("search_records")?,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogStats {
    pub releases: i64,
    pub categories: i64,
    pub layersets: i64,
    pub symbols: i64,
    pub symbol_categories: i64,
    pub layerset_availabilities: i64,
    pub search_records: i64,
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

fn row_to_symbol(row: &rusqlite::Row<'_>) -> rusqlite::Result<Symbol> {
    Ok(Symbol {
        id: row.get(0)?,
        name: row.get(1)?,
        release_id: row.get(2)?,
    })
}

/// Map six release columns starting at `offset`.
fn row_to_release(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Release> {
    Ok(Release {
        id: row.get(offset)?,
        year: row.get(offset + 1)?,
        platforms: PlatformVersions {
            ios: row.get(offset + 2)?,
            macos: row.get(offset + 3)?,
            visionos: row.get(offset + 4)?,
            watchos: row.get(offset + 5)?,
        },
    })
}

fn row_to_category(row: &rusqlite::Row<'_>) -> rusqlite::Result<Category> {
    Ok(Category {
        id: row.get(0)?,
        key: row.get(1)?,
        label: row.get(2)?,
        icon: row.get(3)?,
    })
}

fn row_to_layerset(row: &rusqlite::Row<'_>, offset: usize) -> rusqlite::Result<Layerset> {
    Ok(Layerset {
        id: row.get(offset)?,
        name: row.get(offset + 1)?,
    })
}
