use std::collections::BTreeMap;

use sfsymbols_catalog::*;

fn platforms(ios: &str) -> PlatformVersions {
    PlatformVersions {
        ios: ios.to_string(),
        macos: "11.0".to_string(),
        visionos: "1.0".to_string(),
        watchos: "7.0".to_string(),
    }
}

#[test]
fn merge_prefers_name_availability() {
    let mut primary = BTreeMap::new();
    primary.insert("2020".to_string(), platforms("13"));
    let mut secondary = BTreeMap::new();
    secondary.insert("2020".to_string(), platforms("14"));
    secondary.insert("2021".to_string(), platforms("15"));

    let merged = merge_releases(&primary, &secondary);

    assert_eq!(merged.len(), 2);
    assert_eq!(merged["2020"].ios, "13");
    assert_eq!(merged["2021"].ios, "15");
}

#[test]
fn merge_with_empty_secondary_is_identity() {
    let mut primary = BTreeMap::new();
    primary.insert("2019".to_string(), platforms("13"));
    let merged = merge_releases(&primary, &BTreeMap::new());
    assert_eq!(merged, primary);
}

#[test]
fn invert_keeps_file_order() {
    let table = StringsTable::parse(
        "\"circle\" = \"circle.fill\";\n\"circle2\" = \"circle.fill\";\n\"sq\" = \"square\";\n",
        "name_aliases.strings",
    )
    .unwrap();

    let inverted = invert_aliases(&table);

    assert_eq!(inverted["circle.fill"], vec!["circle", "circle2"]);
    assert_eq!(inverted["square"], vec!["sq"]);
}

#[test]
fn invert_follows_duplicate_key_reassignment() {
    let table = StringsTable::parse(
        "\"dot\" = \"circle\";\n\"dot\" = \"circle.fill\";\n",
        "name_aliases.strings",
    )
    .unwrap();

    let inverted = invert_aliases(&table);

    assert!(!inverted.contains_key("circle"));
    assert_eq!(inverted["circle.fill"], vec!["dot"]);
}

#[test]
fn merge_aliases_deduplicates() {
    let mut current = BTreeMap::new();
    current.insert("circle".to_string(), vec!["round".to_string(), "ring".to_string()]);
    let mut legacy = BTreeMap::new();
    legacy.insert("circle".to_string(), vec!["ring".to_string(), "circle.old".to_string()]);
    legacy.insert("square".to_string(), vec!["box".to_string()]);

    let merged = merge_aliases(&current, &legacy);

    assert_eq!(merged["circle"], vec!["round", "ring", "circle.old"]);
    assert_eq!(merged["square"], vec!["box"]);
}

#[test]
fn layerset_names_are_distinct() {
    let mut symbols = BTreeMap::new();
    let mut a = BTreeMap::new();
    a.insert("hierarchical".to_string(), "2020".to_string());
    a.insert("multicolor".to_string(), "2020".to_string());
    let mut b = BTreeMap::new();
    b.insert("hierarchical".to_string(), "2021".to_string());
    symbols.insert("a".to_string(), a);
    symbols.insert("b".to_string(), b);
    let file = AvailabilityFile {
        symbols,
        year_to_release: BTreeMap::new(),
    };

    let names: Vec<_> = layerset_names(&file).into_iter().collect();
    assert_eq!(names, vec!["hierarchical", "multicolor"]);
}
