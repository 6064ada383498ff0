//! SQLite schema creation and migration.

use std::path::Path;

use rusqlite::{Connection, OpenFlags, params};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Migration error: expected version {expected}, found {found}")]
    VersionMismatch { expected: i32, found: i32 },
    #[error("Symbols database at {path} is missing or has not been migrated")]
    NotPrepared { path: String },
}

/// A single schema migration. Applied at most once, in version order.
#[derive(Debug)]
pub struct Migration {
    pub version: i32,
    pub name: &'static str,
    pub sql: &'static str,
}

/// All known migrations, oldest first.
pub const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "create_symbols_schema",
    sql: SCHEMA_V1_SQL,
}];

/// Current schema version. Matches the last entry of [`MIGRATIONS`].
pub const CURRENT_VERSION: i32 = 1;

/// How to treat a database file that does not exist or lacks the schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenOptions {
    /// Create the file and apply migrations when needed. When false the
    /// database is opened read-only and must already be migrated.
    pub create_if_missing: bool,
}

impl OpenOptions {
    /// Open or create, migrating as needed.
    pub fn create() -> Self {
        Self {
            create_if_missing: true,
        }
    }

    /// Open an already prepared database read-only.
    pub fn existing() -> Self {
        Self {
            create_if_missing: false,
        }
    }
}

/// Open a symbols database at the given path.
///
/// With [`OpenOptions::existing`], a missing or unmigrated file fails with
/// [`SchemaError::NotPrepared`] instead of being created.
pub fn open_database(path: &Path, options: OpenOptions) -> Result<Connection, SchemaError> {
    if !options.create_if_missing {
        return open_prepared(path);
    }

    let conn = Connection::open(path)?;
    conn.execute_batch("PRAGMA journal_mode=WAL; PRAGMA foreign_keys=ON;")?;
    migrate(&conn)?;
    Ok(conn)
}

/// Open an in-memory database with the full schema. Useful for testing.
pub fn open_memory() -> Result<Connection, SchemaError> {
    let conn = Connection::open_in_memory()?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    migrate(&conn)?;
    Ok(conn)
}

fn open_prepared(path: &Path) -> Result<Connection, SchemaError> {
    let not_prepared = || SchemaError::NotPrepared {
        path: path.display().to_string(),
    };

    if !path.is_file() {
        return Err(not_prepared());
    }

    let conn = Connection::open_with_flags(
        path,
        OpenFlags::SQLITE_OPEN_READ_ONLY
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;

    let version = schema_version(&conn)?;
    if version > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: version,
        });
    }
    if version < CURRENT_VERSION {
        return Err(not_prepared());
    }

    Ok(conn)
}

/// Apply every pending migration. Returns how many were applied.
///
/// Each migration runs in its own transaction together with the row that
/// records it, so a failed step leaves no trace. Safe to call repeatedly.
pub fn migrate(conn: &Connection) -> Result<usize, SchemaError> {
    conn.execute_batch(MIGRATIONS_TABLE_SQL)?;

    let current = schema_version(conn)?;
    if current > CURRENT_VERSION {
        return Err(SchemaError::VersionMismatch {
            expected: CURRENT_VERSION,
            found: current,
        });
    }

    let mut applied = 0;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(migration.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
            params![migration.version, migration.name],
        )?;
        tx.commit()?;
        log::debug!(
            "Applied migration {} ({})",
            migration.version,
            migration.name
        );
        applied += 1;
    }

    Ok(applied)
}

/// Get the current schema version, or 0 if no schema exists.
pub fn schema_version(conn: &Connection) -> Result<i32, SchemaError> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_migrations')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

const MIGRATIONS_TABLE_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS schema_migrations (
    version INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;

const SCHEMA_V1_SQL: &str = r#"
-- Yearly releases with minimum OS versions
CREATE TABLE IF NOT EXISTS releases (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    year TEXT NOT NULL UNIQUE,
    ios TEXT NOT NULL,
    macos TEXT NOT NULL,
    visionos TEXT NOT NULL,
    watchos TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    key TEXT NOT NULL UNIQUE,
    label TEXT NOT NULL,
    icon TEXT NOT NULL
);

-- Rendering variants (hierarchical, multicolor, ...)
CREATE TABLE IF NOT EXISTS layersets (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS symbols (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    release_id INTEGER NOT NULL REFERENCES releases(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_symbols_release ON symbols(release_id);

CREATE TABLE IF NOT EXISTS symbol_categories (
    symbol_id INTEGER NOT NULL REFERENCES symbols(id) ON DELETE CASCADE,
    category_id INTEGER NOT NULL REFERENCES categories(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_symbol_categories_symbol ON symbol_categories(symbol_id);
CREATE INDEX IF NOT EXISTS idx_symbol_categories_category ON symbol_categories(category_id);

CREATE TABLE IF NOT EXISTS layerset_availability (
    symbol_id INTEGER NOT NULL REFERENCES symbols(id) ON DELETE CASCADE,
    layerset_id INTEGER NOT NULL REFERENCES layersets(id) ON DELETE CASCADE,
    release_id INTEGER NOT NULL REFERENCES releases(id) ON DELETE CASCADE
);
CREATE INDEX IF NOT EXISTS idx_layerset_availability_symbol ON layerset_availability(symbol_id);

-- Full-text search over names, aliases and keywords. rowid = symbols.id
CREATE VIRTUAL TABLE IF NOT EXISTS search_records USING fts5(
    id UNINDEXED, name, aliases, keywords
);

CREATE TRIGGER IF NOT EXISTS symbols_search_cleanup AFTER DELETE ON symbols BEGIN
    DELETE FROM search_records WHERE rowid = old.id;
END;
"#;
