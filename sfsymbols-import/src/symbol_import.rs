//! Bulk import of loaded resources into the symbols database.
//!
//! Entities are inserted parents first. Each stage records the generated row
//! ids by natural key (category key, year, layerset name, symbol name) so the
//! following stages can resolve their foreign keys.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use rusqlite::Connection;
use sfsymbols_catalog::types::*;
use sfsymbols_catalog::{
    MetadataBundle, ResourceError, SymbolResources, invert_aliases, layerset_names,
    merge_aliases, merge_releases,
};
use sfsymbols_db::SymbolsRepository;
use sfsymbols_db::operations::{self, OperationError};
use thiserror::Error;

use crate::progress::ImportProgress;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Resource error: {0}")]
    Resource(#[from] ResourceError),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Symbol '{symbol}' is introduced in unknown release '{year}'")]
    UnknownRelease { symbol: String, year: String },
    #[error("Layerset '{layerset}' of symbol '{symbol}' is available from unknown release '{year}'")]
    UnknownLayersetRelease {
        symbol: String,
        layerset: String,
        year: String,
    },
    #[error("Symbol '{symbol}' references unknown category '{key}'")]
    UnknownCategory { symbol: String, key: String },
    #[error("Symbol '{symbol}' references unknown layerset '{layerset}'")]
    UnknownLayerset { symbol: String, layerset: String },
    #[error("{source_file} references unknown symbol '{name}'")]
    UnknownSymbol {
        name: String,
        source_file: &'static str,
    },
}

/// Rows written per entity by one import.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub categories: usize,
    pub releases: usize,
    pub layersets: usize,
    pub symbols: usize,
    pub symbol_categories: usize,
    pub layerset_availabilities: usize,
    pub search_records: usize,
}

impl fmt::Display for ImportStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} releases, {} categories, {} layersets, {} symbols, {} search records",
            self.releases, self.categories, self.layersets, self.symbols, self.search_records,
        )
    }
}

/// Load every resource from `bundle` and import it.
///
/// Resources are fully parsed before the database is touched, so a malformed
/// file leaves the store unchanged.
pub fn extract(
    bundle: &MetadataBundle,
    conn: &Connection,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    if let Some(p) = progress {
        p.on_phase(&format!("Loading metadata from {}", bundle.dir().display()));
    }
    let resources = bundle.load()?;
    import_resources(conn, &resources, progress)
}

/// Import into a repository through its writer connection.
pub fn import_into_repository(
    repo: &SymbolsRepository,
    resources: &SymbolResources,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    repo.with_writer(|conn| import_resources(conn, resources, progress))
}

/// Import parsed resources into an empty database.
///
/// Runs in a single transaction: if any stage fails, nothing is written.
pub fn import_resources(
    conn: &Connection,
    resources: &SymbolResources,
    progress: Option<&dyn ImportProgress>,
) -> Result<ImportStats, ImportError> {
    let mut stats = ImportStats::default();
    let tx = conn.unchecked_transaction()?;

    let phase = |message: &str| {
        if let Some(p) = progress {
            p.on_phase(message);
        }
    };
    let stage = |name: &str, count: usize| {
        if let Some(p) = progress {
            p.on_stage(name, count);
        }
    };

    phase("Inserting categories");
    let category_ids = insert_categories(&tx, &resources.categories)?;
    stats.categories = category_ids.len();
    stage("categories", stats.categories);

    phase("Inserting releases");
    let release_ids = insert_releases(&tx, resources)?;
    stats.releases = release_ids.len();
    stage("releases", stats.releases);

    phase("Inserting layersets");
    let layerset_ids = insert_layersets(&tx, resources)?;
    stats.layersets = layerset_ids.len();
    stage("layersets", stats.layersets);

    phase("Inserting symbols");
    let symbol_ids = insert_symbols(&tx, resources, &release_ids)?;
    stats.symbols = symbol_ids.len();
    stage("symbols", stats.symbols);

    phase("Linking symbol categories");
    stats.symbol_categories = insert_symbol_categories(&tx, resources, &symbol_ids, &category_ids)?;
    stage("symbol categories", stats.symbol_categories);

    phase("Linking layerset availability");
    stats.layerset_availabilities =
        insert_layerset_availability(&tx, resources, &symbol_ids, &layerset_ids, &release_ids)?;
    stage("layerset availability", stats.layerset_availabilities);

    phase("Building search records");
    stats.search_records = insert_search_records(&tx, resources, &symbol_ids)?;
    stage("search records", stats.search_records);

    tx.commit()?;

    if let Some(p) = progress {
        p.on_complete(&format!("Imported {stats}"));
    }
    Ok(stats)
}

fn insert_categories(
    conn: &Connection,
    categories: &[CategoryEntry],
) -> Result<HashMap<String, RowId>, ImportError> {
    let mut ids = HashMap::with_capacity(categories.len());
    for category in categories {
        let id = operations::insert_category(conn, category)?;
        ids.insert(category.key.clone(), id);
    }
    Ok(ids)
}

fn insert_releases(
    conn: &Connection,
    resources: &SymbolResources,
) -> Result<HashMap<String, RowId>, ImportError> {
    let merged = merge_releases(
        &resources.name_availability.year_to_release,
        &resources.layerset_availability.year_to_release,
    );

    let mut ids = HashMap::with_capacity(merged.len());
    for (year, platforms) in &merged {
        let id = operations::insert_release(conn, year, platforms)?;
        ids.insert(year.clone(), id);
    }
    Ok(ids)
}

fn insert_layersets(
    conn: &Connection,
    resources: &SymbolResources,
) -> Result<HashMap<String, RowId>, ImportError> {
    let names = layerset_names(&resources.layerset_availability);
    let mut ids = HashMap::with_capacity(names.len());
    for name in names {
        let id = operations::insert_layerset(conn, &name)?;
        ids.insert(name, id);
    }
    Ok(ids)
}

fn insert_symbols(
    conn: &Connection,
    resources: &SymbolResources,
    release_ids: &HashMap<String, RowId>,
) -> Result<BTreeMap<String, RowId>, ImportError> {
    let mut ids = BTreeMap::new();
    for (name, year) in &resources.name_availability.symbols {
        let release_id = *release_ids
            .get(year)
            .ok_or_else(|| ImportError::UnknownRelease {
                symbol: name.clone(),
                year: year.clone(),
            })?;
        let id = operations::insert_symbol(conn, name, release_id)?;
        ids.insert(name.clone(), id);
    }
    Ok(ids)
}

fn lookup_symbol(
    symbol_ids: &BTreeMap<String, RowId>,
    name: &str,
    source_file: &'static str,
) -> Result<RowId, ImportError> {
    symbol_ids
        .get(name)
        .copied()
        .ok_or_else(|| ImportError::UnknownSymbol {
            name: name.to_string(),
            source_file,
        })
}

fn insert_symbol_categories(
    conn: &Connection,
    resources: &SymbolResources,
    symbol_ids: &BTreeMap<String, RowId>,
    category_ids: &HashMap<String, RowId>,
) -> Result<usize, ImportError> {
    let mut count = 0;
    for (name, keys) in &resources.symbol_categories {
        let symbol_id = lookup_symbol(symbol_ids, name, "symbol_categories.plist")?;

        let mut seen = HashSet::new();
        for key in keys {
            if !seen.insert(key.as_str()) {
                continue;
            }
            let category_id = *category_ids
                .get(key)
                .ok_or_else(|| ImportError::UnknownCategory {
                    symbol: name.clone(),
                    key: key.clone(),
                })?;
            operations::insert_symbol_category(
                conn,
                &SymbolCategory {
                    symbol_id,
                    category_id,
                },
            )?;
            count += 1;
        }
    }
    Ok(count)
}

fn insert_layerset_availability(
    conn: &Connection,
    resources: &SymbolResources,
    symbol_ids: &BTreeMap<String, RowId>,
    layerset_ids: &HashMap<String, RowId>,
    release_ids: &HashMap<String, RowId>,
) -> Result<usize, ImportError> {
    let mut count = 0;
    for (name, layersets) in &resources.layerset_availability.symbols {
        let symbol_id = lookup_symbol(symbol_ids, name, "layerset_availability.plist")?;

        for (layerset, year) in layersets {
            let layerset_id = *layerset_ids
                .get(layerset)
                .ok_or_else(|| ImportError::UnknownLayerset {
                    symbol: name.clone(),
                    layerset: layerset.clone(),
                })?;
            let release_id = *release_ids
                .get(year)
                .ok_or_else(|| ImportError::UnknownLayersetRelease {
                    symbol: name.clone(),
                    layerset: layerset.clone(),
                    year: year.clone(),
                })?;
            operations::insert_layerset_availability(
                conn,
                &LayersetAvailability {
                    symbol_id,
                    layerset_id,
                    release_id,
                },
            )?;
            count += 1;
        }
    }
    Ok(count)
}

fn insert_search_records(
    conn: &Connection,
    resources: &SymbolResources,
    symbol_ids: &BTreeMap<String, RowId>,
) -> Result<usize, ImportError> {
    let aliases = merge_aliases(
        &invert_aliases(&resources.name_aliases),
        &invert_aliases(&resources.legacy_aliases),
    );

    let orphaned = aliases
        .keys()
        .filter(|name| !symbol_ids.contains_key(*name))
        .count();
    if orphaned > 0 {
        log::debug!("{} aliased names have no matching symbol", orphaned);
    }

    for (name, &id) in symbol_ids {
        let record = SearchRecord {
            id,
            name: name.clone(),
            aliases: aliases.get(name).cloned().unwrap_or_default(),
            keywords: resources.symbol_search.get(name).cloned().unwrap_or_default(),
        };
        operations::insert_search_record(conn, &record)?;
    }
    Ok(symbol_ids.len())
}
