pub(crate) mod extract;
pub(crate) mod lookup;
pub(crate) mod stats;

use std::path::Path;

use sfsymbols_db::{OpenOptions, SymbolsRepository};

use crate::CliError;

/// Default database written by `extract` and read by the other commands.
pub(crate) const DEFAULT_DB_PATH: &str = "./symbols.sqlite";

/// Default install location of the SF Symbols app.
pub(crate) const DEFAULT_APP_PATH: &str = "/Applications/SF Symbols.app";

/// Open an extracted database for reading.
///
/// Returns `Ok(None)` after printing a hint when no database exists yet.
pub(crate) fn open_existing(db_path: &Path) -> Result<Option<SymbolsRepository>, CliError> {
    if !db_path.exists() {
        log::warn!("No symbols database found at {}", db_path.display());
        log::info!("Run 'symbols-extract extract' to create one.");
        return Ok(None);
    }

    SymbolsRepository::open(db_path, OpenOptions::existing())
        .map(Some)
        .map_err(|e| CliError::database(format!("Failed to open symbols database: {}", e)))
}
