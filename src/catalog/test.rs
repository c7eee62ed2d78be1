use std::collections::HashSet;

use super::{Catalog, CounterDef, CATALOG};
use crate::error::Error;
use crate::event::hw::Cache;
use crate::event::Family;

#[test]
fn test_catalog_size() {
    let count = |family: Family| CATALOG.iter().filter(|def| def.family == family).count();
    assert_eq!(count(Family::Software), 9);
    assert_eq!(count(Family::Hardware), 10);
    assert_eq!(count(Family::HardwareCache), 42);
    assert_eq!(CATALOG.len(), 9 + 10 + 42);
}

#[test]
fn test_names_are_unique() {
    let names: HashSet<_> = CATALOG.iter().map(|def| def.name).collect();
    assert_eq!(names.len(), CATALOG.len());
}

#[test]
fn test_cache_entries_unpack() {
    let caches: Vec<_> = CATALOG
        .iter()
        .filter(|def| def.family == Family::HardwareCache)
        .collect();
    assert_eq!(caches.len(), 7 * 3 * 2);

    for def in caches {
        let cache = Cache::unpack(def.config).unwrap();
        assert_eq!(cache.config(), def.config, "{}", def.name);
    }
}

#[test]
fn test_cache_entry_names_match_fields() {
    let def = CounterDef::find("DTLB-prefetch-miss").unwrap();
    let cache = Cache::unpack(def.config).unwrap();
    assert_eq!(format!("{:?}", cache.ty), "Dtlb");
    assert_eq!(format!("{:?}", cache.op), "Prefetch");
    assert_eq!(format!("{:?}", cache.result), "Miss");
}

#[test]
fn test_defaults() {
    let catalog = Catalog::default();
    let enabled: Vec<_> = catalog
        .iter()
        .filter(|(_, on)| *on)
        .map(|(def, _)| def.name)
        .collect();
    assert_eq!(
        enabled,
        [
            "cpu-clock",
            "task-clock",
            "page-faults",
            "context-switches",
            "cpu-migrations",
            "page-fault-minor",
            "cpu-cycles",
            "instructions",
            "cache-misses",
            "L1D-read-miss",
            "L1I-read-miss",
        ]
    );
    assert_eq!(catalog.enabled(), 11);
}

#[test]
fn test_enable_disable() {
    let mut catalog = Catalog::none();
    assert_eq!(catalog.enabled(), 0);

    catalog.enable("branch-misses").unwrap();
    catalog.enable("branch-misses").unwrap();
    assert!(catalog.is_enabled("branch-misses").unwrap());
    assert_eq!(catalog.enabled(), 1);

    catalog.disable("branch-misses").unwrap();
    assert!(!catalog.is_enabled("branch-misses").unwrap());
    assert_eq!(catalog.enabled(), 0);
}

#[test]
fn test_unknown_counter() {
    let mut catalog = Catalog::default();
    let before = catalog.clone();

    let err = catalog.enable("no-such-counter").unwrap_err();
    assert!(matches!(err, Error::UnknownCounter(ref name) if name == "no-such-counter"));
    assert!(err.is_usage());

    let err = catalog.disable("CPU-CYCLES").unwrap_err();
    assert!(matches!(err, Error::UnknownCounter(_)));

    assert_eq!(catalog, before);
}

#[test]
fn test_find() {
    let def = CounterDef::find("instructions").unwrap();
    assert_eq!(def.family, Family::Hardware);
    assert!(CounterDef::find("").is_none());
}
