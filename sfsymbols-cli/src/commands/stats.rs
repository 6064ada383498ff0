use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

use crate::CliError;

use super::open_existing;

pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(repo) = open_existing(db_path)? else {
        return Ok(());
    };

    let stats = repo
        .stats()
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Symbols Database Statistics".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Releases:               {:>8}", stats.releases);
    log::info!("  Categories:             {:>8}", stats.categories);
    log::info!("  Layersets:              {:>8}", stats.layersets);
    log::info!("  Symbols:                {:>8}", stats.symbols);
    log::info!("  Symbol categories:      {:>8}", stats.symbol_categories);
    log::info!("  Layerset availability:  {:>8}", stats.layerset_availabilities);
    log::info!("  Search records:         {:>8}", stats.search_records);

    Ok(())
}
