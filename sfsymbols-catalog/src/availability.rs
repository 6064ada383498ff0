//! Merging of availability and alias maps from independent resource files.

use std::collections::{BTreeMap, BTreeSet};

use crate::resources::{AvailabilityFile, LayersetYears};
use crate::strings::StringsTable;
use crate::types::PlatformVersions;

/// Combine two `year -> platforms` tables into one.
///
/// When a year appears in both, the entry from `primary` is kept. The
/// importer passes the name-availability table as `primary`.
pub fn merge_releases(
    primary: &BTreeMap<String, PlatformVersions>,
    secondary: &BTreeMap<String, PlatformVersions>,
) -> BTreeMap<String, PlatformVersions> {
    let mut merged = primary.clone();
    for (year, platforms) in secondary {
        match merged.get(year) {
            Some(existing) if existing != platforms => {
                log::debug!(
                    "Release {} differs between sources; keeping {:?} over {:?}",
                    year,
                    existing,
                    platforms,
                );
            }
            Some(_) => {}
            None => {
                merged.insert(year.clone(), platforms.clone());
            }
        }
    }
    merged
}

/// Turn an `alias -> name` table into `name -> [alias]`.
///
/// Aliases keep the order they were encountered in and appear once per name.
pub fn invert_aliases(table: &StringsTable) -> BTreeMap<String, Vec<String>> {
    let mut inverted: BTreeMap<String, Vec<String>> = BTreeMap::new();
    for (alias, name) in table.iter() {
        let aliases = inverted.entry(name.to_string()).or_default();
        if !aliases.iter().any(|a| a == alias) {
            aliases.push(alias.to_string());
        }
    }
    inverted
}

/// Union of current and legacy aliases per name, current ones first.
pub fn merge_aliases(
    current: &BTreeMap<String, Vec<String>>,
    legacy: &BTreeMap<String, Vec<String>>,
) -> BTreeMap<String, Vec<String>> {
    let mut merged = current.clone();
    for (name, aliases) in legacy {
        let existing = merged.entry(name.clone()).or_default();
        for alias in aliases {
            if !existing.contains(alias) {
                existing.push(alias.clone());
            }
        }
    }
    merged
}

/// Distinct layerset names across every symbol's availability map.
pub fn layerset_names(file: &AvailabilityFile<LayersetYears>) -> BTreeSet<String> {
    file.symbols
        .values()
        .flat_map(|layersets| layersets.keys().cloned())
        .collect()
}
