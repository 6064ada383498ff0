//! A shareable handle over a symbols database.
//!
//! Writes (migration, import, clear) go through a single connection behind a
//! mutex. Reads borrow a connection from a small pool of read-only
//! connections. The database always runs in WAL mode, so a read sees the last
//! committed state and never waits on, or fails because of, an open write.

use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use rusqlite::{Connection, OpenFlags};
use sfsymbols_catalog::types::*;
use tempfile::TempDir;

use crate::operations::{self, OperationError};
use crate::queries::{self, CatalogStats, SymbolsFilter};
use crate::schema::{self, OpenOptions, SchemaError};

/// Idle read connections kept around for reuse.
const MAX_IDLE_READERS: usize = 4;

/// File name of the database inside a scratch directory.
const SCRATCH_DB_NAME: &str = "symbols.sqlite";

/// Where reader connections are opened from.
#[derive(Debug)]
enum Source {
    File(PathBuf),
    /// Private database removed together with the repository.
    Scratch(TempDir),
}

impl Source {
    fn path(&self) -> PathBuf {
        match self {
            Source::File(path) => path.clone(),
            Source::Scratch(dir) => dir.path().join(SCRATCH_DB_NAME),
        }
    }
}

/// Single-writer, multi-reader access to the symbols catalog.
pub struct SymbolsRepository {
    // Connections drop before the scratch directory is removed.
    writer: Mutex<Connection>,
    idle_readers: Mutex<Vec<Connection>>,
    source: Source,
}

impl SymbolsRepository {
    /// Open a repository backed by a database file.
    ///
    /// See [`OpenOptions`] for how a missing or unmigrated file is handled.
    pub fn open(path: &Path, options: OpenOptions) -> Result<Self, SchemaError> {
        let writer = schema::open_database(path, options)?;
        Ok(Self::with_source(writer, Source::File(path.to_path_buf())))
    }

    /// Create a migrated throwaway repository.
    ///
    /// Each call gets its own database in a private temporary directory,
    /// which is deleted when the handle is dropped.
    pub fn in_memory() -> Result<Self, SchemaError> {
        let dir = tempfile::Builder::new().prefix("sfsymbols-").tempdir()?;
        let source = Source::Scratch(dir);
        let writer = schema::open_database(&source.path(), OpenOptions::create())?;
        Ok(Self::with_source(writer, source))
    }

    fn with_source(writer: Connection, source: Source) -> Self {
        Self {
            writer: Mutex::new(writer),
            idle_readers: Mutex::new(Vec::new()),
            source,
        }
    }

    /// Run `f` with exclusive access to the writer connection.
    pub fn with_writer<T, E>(&self, f: impl FnOnce(&Connection) -> Result<T, E>) -> Result<T, E> {
        let conn = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        f(&*conn)
    }

    /// Run `f` on a pooled read-only connection.
    fn read<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, OperationError>,
    ) -> Result<T, OperationError> {
        let idle = self
            .idle_readers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let conn = match idle {
            Some(conn) => conn,
            None => self.open_reader()?,
        };

        let result = f(&conn);

        let mut idle = self
            .idle_readers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if idle.len() < MAX_IDLE_READERS {
            idle.push(conn);
        }
        result
    }

    fn open_reader(&self) -> Result<Connection, OperationError> {
        let path = self.source.path();
        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY
                | OpenFlags::SQLITE_OPEN_URI
                | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        log::trace!("Opened reader connection for {}", path.display());
        Ok(conn)
    }

    // ── Queries ─────────────────────────────────────────────────────────────

    /// Look up a symbol by exact name.
    pub fn symbol(&self, name: &str) -> Result<Option<Symbol>, OperationError> {
        self.read(|conn| queries::find_symbol_by_name(conn, name))
    }

    pub fn symbols(&self, filter: &SymbolsFilter) -> Result<Vec<Symbol>, OperationError> {
        self.read(|conn| queries::list_symbols(conn, filter))
    }

    pub fn all_symbols(&self) -> Result<Vec<Symbol>, OperationError> {
        self.read(queries::all_symbols)
    }

    pub fn release(&self, year: &str) -> Result<Option<Release>, OperationError> {
        self.read(|conn| queries::find_release_by_year(conn, year))
    }

    /// All releases, oldest first.
    pub fn releases(&self) -> Result<Vec<Release>, OperationError> {
        self.read(queries::list_releases)
    }

    pub fn category(&self, key: &str) -> Result<Option<Category>, OperationError> {
        self.read(|conn| queries::find_category_by_key(conn, key))
    }

    pub fn categories(&self) -> Result<Vec<Category>, OperationError> {
        self.read(queries::list_categories)
    }

    pub fn layersets(&self) -> Result<Vec<Layerset>, OperationError> {
        self.read(queries::list_layersets)
    }

    pub fn search_record(&self, name: &str) -> Result<Option<SearchRecord>, OperationError> {
        self.read(|conn| queries::find_search_record(conn, name))
    }

    /// Symbol with its release, categories and layerset availability.
    pub fn detail(&self, name: &str) -> Result<Option<SymbolDetail>, OperationError> {
        self.read(|conn| queries::symbol_detail(conn, name))
    }

    pub fn stats(&self) -> Result<CatalogStats, OperationError> {
        self.read(queries::catalog_stats)
    }

    // ── Writes ──────────────────────────────────────────────────────────────

    /// Delete all rows from every table, keeping the schema.
    pub fn clear(&self) -> Result<(), OperationError> {
        self.with_writer(operations::clear_all)
    }
}
