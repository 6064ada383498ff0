use std::cell::RefCell;
use std::collections::BTreeMap;

use sfsymbols_catalog::types::*;
use sfsymbols_catalog::{AvailabilityFile, LayersetYears, StringsTable, SymbolResources};
use sfsymbols_db::{CatalogStats, SymbolsFilter, SymbolsRepository, catalog_stats, open_memory};
use sfsymbols_import::*;

fn platforms(ios: &str, macos: &str) -> PlatformVersions {
    PlatformVersions {
        ios: ios.to_string(),
        macos: macos.to_string(),
        visionos: "1.0".to_string(),
        watchos: "7.0".to_string(),
    }
}

fn strings_map<V: Clone>(pairs: &[(&str, V)]) -> BTreeMap<String, V> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.clone()))
        .collect()
}

fn string_list(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn category(key: &str, label: &str, icon: &str) -> CategoryEntry {
    CategoryEntry {
        key: key.to_string(),
        label: label.to_string(),
        icon: icon.to_string(),
    }
}

fn layerset_years(pairs: &[(&str, &str)]) -> LayersetYears {
    strings_map(pairs).into_iter().map(|(k, v)| (k, v.to_string())).collect()
}

fn resources() -> SymbolResources {
    SymbolResources {
        name_availability: AvailabilityFile {
            symbols: strings_map(&[("circle", "2019"), ("circle.fill", "2019"), ("leaf", "2020")])
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
            year_to_release: strings_map(&[
                ("2019", platforms("13.0", "10.15")),
                ("2020", platforms("14.0", "11.0")),
            ]),
        },
        layerset_availability: AvailabilityFile {
            symbols: strings_map(&[(
                "circle.fill",
                layerset_years(&[("hierarchical", "2021"), ("multicolor", "2020")]),
            )]),
            year_to_release: strings_map(&[
                ("2019", platforms("13", "10.15")),
                ("2021", platforms("15.0", "12.0")),
            ]),
        },
        categories: vec![
            category("all", "All", "square.grid.2x2"),
            category("shapes", "Shapes", "square.on.circle"),
            category("nature", "Nature", "leaf"),
        ],
        symbol_categories: strings_map(&[
            ("circle", string_list(&["all", "shapes"])),
            ("circle.fill", string_list(&["all", "shapes", "shapes"])),
            ("leaf", string_list(&["nature"])),
        ]),
        symbol_search: strings_map(&[
            ("circle", string_list(&["round"])),
            ("leaf", string_list(&["plant", "eco"])),
        ]),
        name_aliases: StringsTable::parse(
            "\"ring\" = \"circle\";\n\"dot\" = \"circle.fill\";\n",
            "name_aliases.strings",
        )
        .unwrap(),
        legacy_aliases: StringsTable::parse(
            "\"ring\" = \"circle\";\n\"circle.old\" = \"circle\";\n\"ghost.old\" = \"ghost\";\n",
            "legacy_aliases.strings",
        )
        .unwrap(),
    }
}

fn names(symbols: &[Symbol]) -> Vec<&str> {
    symbols.iter().map(|s| s.name.as_str()).collect()
}

#[test]
fn import_counts() {
    let conn = open_memory().unwrap();
    let stats = import_resources(&conn, &resources(), None).unwrap();

    assert_eq!(
        stats,
        ImportStats {
            categories: 3,
            releases: 3,
            layersets: 2,
            symbols: 3,
            symbol_categories: 5,
            layerset_availabilities: 2,
            search_records: 3,
        }
    );
    assert_eq!(
        catalog_stats(&conn).unwrap(),
        CatalogStats {
            releases: 3,
            categories: 3,
            layersets: 2,
            symbols: 3,
            symbol_categories: 5,
            layerset_availabilities: 2,
            search_records: 3,
        }
    );
}

#[test]
fn release_prefers_name_availability() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let release = repo.release("2019").unwrap().unwrap();
    assert_eq!(release.platforms.ios, "13.0");

    let years: Vec<String> = repo.releases().unwrap().into_iter().map(|r| r.year).collect();
    assert_eq!(years, vec!["2019", "2020", "2021"]);
}

#[test]
fn symbol_release_link() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let leaf = repo.symbol("leaf").unwrap().unwrap();
    let r2020 = repo.release("2020").unwrap().unwrap();
    assert_eq!(leaf.release_id, r2020.id);
}

#[test]
fn category_filter() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let shapes = repo.symbols(&SymbolsFilter::category("shapes")).unwrap();
    assert_eq!(names(&shapes), vec!["circle", "circle.fill"]);

    let nature = repo.symbols(&SymbolsFilter::category("nature")).unwrap();
    assert_eq!(names(&nature), vec!["leaf"]);

    let unknown = repo.symbols(&SymbolsFilter::category("transport")).unwrap();
    assert!(unknown.is_empty());
}

#[test]
fn search_uses_aliases_and_keywords() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let by_keyword = repo.symbols(&SymbolsFilter::search("plant")).unwrap();
    assert_eq!(names(&by_keyword), vec!["leaf"]);

    let by_alias = repo.symbols(&SymbolsFilter::search("dot")).unwrap();
    assert_eq!(names(&by_alias), vec!["circle.fill"]);

    let by_legacy_alias = repo.symbols(&SymbolsFilter::search("old")).unwrap();
    assert_eq!(names(&by_legacy_alias), vec!["circle"]);
}

#[test]
fn search_record_alias_union() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let circle = repo.search_record("circle").unwrap().unwrap();
    assert_eq!(circle.aliases, vec!["ring", "circle.old"]);
    assert_eq!(circle.keywords, vec!["round"]);

    let leaf = repo.search_record("leaf").unwrap().unwrap();
    assert!(leaf.aliases.is_empty());
    assert_eq!(leaf.keywords, vec!["plant", "eco"]);

    assert!(repo.search_record("ghost").unwrap().is_none());
}

#[test]
fn detail_after_import() {
    let repo = SymbolsRepository::in_memory().unwrap();
    import_into_repository(&repo, &resources(), None).unwrap();

    let detail = repo.detail("circle.fill").unwrap().unwrap();
    assert_eq!(detail.release.year, "2019");

    let keys: Vec<&str> = detail.categories.iter().map(|c| c.key.as_str()).collect();
    assert_eq!(keys, vec!["all", "shapes"]);

    let layersets: Vec<(&str, &str)> = detail
        .layerset_availability
        .iter()
        .map(|l| (l.layerset.name.as_str(), l.release.year.as_str()))
        .collect();
    assert_eq!(layersets, vec![("hierarchical", "2021"), ("multicolor", "2020")]);
}

#[test]
fn clear_and_reimport() {
    let repo = SymbolsRepository::in_memory().unwrap();
    let first = import_into_repository(&repo, &resources(), None).unwrap();
    let before = repo.stats().unwrap();
    let circle_id = repo.symbol("circle").unwrap().unwrap().id;

    repo.clear().unwrap();
    assert_eq!(repo.stats().unwrap(), CatalogStats::default());

    let second = import_into_repository(&repo, &resources(), None).unwrap();
    assert_eq!(first, second);
    assert_eq!(repo.stats().unwrap(), before);
    assert_eq!(repo.symbol("circle").unwrap().unwrap().id, circle_id);
}

#[test]
fn unknown_release_rolls_back() {
    let mut res = resources();
    res.name_availability
        .symbols
        .insert("sparkles".to_string(), "2030".to_string());

    let conn = open_memory().unwrap();
    let err = import_resources(&conn, &res, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnknownRelease { ref symbol, ref year } if symbol == "sparkles" && year == "2030"
    ));
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn unknown_category_rolls_back() {
    let mut res = resources();
    res.symbol_categories
        .insert("leaf".to_string(), string_list(&["nature", "weather"]));

    let conn = open_memory().unwrap();
    let err = import_resources(&conn, &res, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnknownCategory { ref symbol, ref key } if symbol == "leaf" && key == "weather"
    ));
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn unknown_symbol_rolls_back() {
    let mut res = resources();
    res.symbol_categories
        .insert("ghost".to_string(), string_list(&["all"]));

    let conn = open_memory().unwrap();
    let err = import_resources(&conn, &res, None).unwrap_err();
    assert!(matches!(err, ImportError::UnknownSymbol { ref name, .. } if name == "ghost"));
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[test]
fn unknown_layerset_release_rolls_back() {
    let mut res = resources();
    res.layerset_availability.symbols.insert(
        "leaf".to_string(),
        layerset_years(&[("multicolor", "2031")]),
    );

    let conn = open_memory().unwrap();
    let err = import_resources(&conn, &res, None).unwrap_err();
    assert!(matches!(
        err,
        ImportError::UnknownLayersetRelease { ref year, .. } if year == "2031"
    ));
    assert_eq!(catalog_stats(&conn).unwrap(), CatalogStats::default());
}

#[derive(Default)]
struct RecordingProgress {
    stages: RefCell<Vec<(String, usize)>>,
    completed: RefCell<bool>,
}

impl ImportProgress for RecordingProgress {
    fn on_phase(&self, _message: &str) {}

    fn on_stage(&self, stage: &str, count: usize) {
        self.stages.borrow_mut().push((stage.to_string(), count));
    }

    fn on_complete(&self, _message: &str) {
        *self.completed.borrow_mut() = true;
    }
}

#[test]
fn progress_reports_each_stage() {
    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    import_resources(&conn, &resources(), Some(&progress)).unwrap();

    let stages = progress.stages.borrow();
    let order: Vec<&str> = stages.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(
        order,
        vec![
            "categories",
            "releases",
            "layersets",
            "symbols",
            "symbol categories",
            "layerset availability",
            "search records",
        ]
    );
    assert_eq!(stages[3], ("symbols".to_string(), 3));
    assert!(*progress.completed.borrow());
}

#[test]
fn failed_import_skips_completion() {
    let mut res = resources();
    res.name_availability
        .symbols
        .insert("sparkles".to_string(), "2030".to_string());

    let conn = open_memory().unwrap();
    let progress = RecordingProgress::default();
    assert!(import_resources(&conn, &res, Some(&progress)).is_err());
    assert!(!*progress.completed.borrow());
}
