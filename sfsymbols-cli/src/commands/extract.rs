use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;
use sfsymbols_catalog::MetadataBundle;
use sfsymbols_db::{OpenOptions, SymbolsRepository};
use sfsymbols_import::{ImportProgress, ImportStats, import_into_repository};

use crate::CliError;
use crate::cli_types::ExtractArgs;
use crate::spinner::ImportSpinner;

/// Entry point for `extract`.
pub(crate) fn run_extract(args: ExtractArgs, quiet: bool) -> Result<(), CliError> {
    let target = if args.in_memory {
        None
    } else {
        Some(args.output.as_path())
    };

    if let Some(path) = target {
        if path.exists() && !args.force && !confirm_overwrite(path)? {
            log::info!("Aborted; {} left unchanged.", path.display());
            return Ok(());
        }
    }

    let bundle = MetadataBundle::from_app(&args.app);
    let spinner = ImportSpinner::new(quiet);
    spinner.on_phase(&format!("Loading metadata from {}", bundle.dir().display()));

    // Parse everything before the old database is removed.
    let resources = bundle
        .load()
        .map_err(|e| CliError::resource(e.to_string()))?;

    let repo = match target {
        Some(path) => {
            remove_database(path)?;
            SymbolsRepository::open(path, OpenOptions::create())
        }
        None => SymbolsRepository::in_memory(),
    }
    .map_err(|e| CliError::database(format!("Failed to create symbols database: {}", e)))?;

    let stats = import_into_repository(&repo, &resources, Some(&spinner))
        .map_err(|e| CliError::import(e.to_string()))?;

    print_summary(&stats, target);
    Ok(())
}

/// Ask before replacing an existing database. Anything but `y` declines.
fn confirm_overwrite(path: &Path) -> Result<bool, CliError> {
    print!("{} already exists. Overwrite? [y/N] ", path.display());
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

/// Delete a database file along with its WAL sidecars.
fn remove_database(path: &Path) -> Result<(), CliError> {
    let mut files = vec![path.to_path_buf()];
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = path.as_os_str().to_owned();
        sidecar.push(suffix);
        files.push(PathBuf::from(sidecar));
    }

    for file in files.iter().filter(|f| f.exists()) {
        log::debug!("Removing {}", file.display());
        fs::remove_file(file)?;
    }
    Ok(())
}

fn print_summary(stats: &ImportStats, target: Option<&Path>) {
    crate::log_blank();
    log::info!(
        "{}",
        "Extraction complete".if_supports_color(Stderr, |t| t.bold()),
    );
    log::info!("  Releases:               {:>8}", stats.releases);
    log::info!("  Categories:             {:>8}", stats.categories);
    log::info!("  Layersets:              {:>8}", stats.layersets);
    log::info!("  Symbols:                {:>8}", stats.symbols);
    log::info!("  Symbol categories:      {:>8}", stats.symbol_categories);
    log::info!("  Layerset availability:  {:>8}", stats.layerset_availabilities);
    log::info!("  Search records:         {:>8}", stats.search_records);
    match target {
        Some(path) => log::info!("  Database: {}", path.display()),
        None => log::info!(
            "  {}",
            "In-memory database discarded".if_supports_color(Stderr, |t| t.dimmed()),
        ),
    }
}
