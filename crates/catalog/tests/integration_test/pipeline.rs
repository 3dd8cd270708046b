use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use satreg_catalog::{LoadState, LoadStatus, ReconcileEvent, SourceKind, SourceRegistry};

use crate::helpers::{catalog_numbers, open_registry, tle_block};

/// Stand-in for the external fetch pipeline: reads pasted text for text
/// sources, serves remote sources from the fetch cache, and reports states.
fn run_fetch_cycle(reg: &SourceRegistry) -> HashMap<String, Vec<u32>> {
    let tracker = reg.load_states();
    let cache = reg.cache();
    let mut contributions = HashMap::new();

    for source in reg.enabled_descriptors() {
        tracker.set(&source.id, LoadState::loading());
        let (text, age) = match source.kind {
            SourceKind::PastedText => (Some(reg.get_stored_text(&source.id)), None),
            _ => match cache.read(&source.id) {
                Some(payload) => {
                    let age = payload.age_secs(Utc::now());
                    (Some(payload.text), Some(age))
                }
                None => (None, None),
            },
        };
        match text {
            Some(text) => {
                let numbers = catalog_numbers(&text);
                tracker.set(&source.id, LoadState::loaded(numbers.len(), age));
                contributions.insert(source.id.clone(), numbers);
            }
            None => {
                let previous = tracker.get(&source.id);
                tracker.set(
                    &source.id,
                    LoadState::failed(previous.as_ref(), "no cached data and network disabled"),
                );
            }
        }
    }
    contributions
}

#[test]
fn overlapping_sources_are_deduplicated() {
    let tmp = tempfile::tempdir().unwrap();
    let mut reg = open_registry(tmp.path());

    let passes = Arc::new(Mutex::new(0));
    let counter = passes.clone();
    reg.set_reconcile_hook(move |_: &ReconcileEvent| {
        *counter.lock().unwrap() += 1;
        Ok(())
    });

    reg.cache()
        .write("celestrak:visual", &tle_block(&[1, 2, 3]), Utc::now())
        .unwrap();
    let pasted = reg.add_text_source("Pasted", &tle_block(&[2, 3, 4]));
    assert_eq!(*passes.lock().unwrap(), 1);

    let contributions = run_fetch_cycle(&reg);
    let merged = reg.aggregate(&contributions, |n| *n);
    assert_eq!(merged.result.total_sats, 4);
    assert_eq!(merged.result.dups_removed, 2);

    assert_eq!(reg.load_state(&pasted).sat_count, Some(3));
    assert!(reg.load_state("celestrak:visual").cache_age.is_some());
}

#[test]
fn source_without_data_reports_error_and_contributes_nothing() {
    let tmp = tempfile::tempdir().unwrap();
    let mut reg = open_registry(tmp.path());
    reg.toggle("celestrak:stations");
    reg.cache()
        .write("celestrak:visual", &tle_block(&[10, 11]), Utc::now())
        .unwrap();

    let contributions = run_fetch_cycle(&reg);
    let merged = reg.aggregate(&contributions, |n| *n);
    assert_eq!(merged.result.total_sats, 2);
    assert_eq!(merged.result.dups_removed, 0);

    let stations = reg.load_state("celestrak:stations");
    assert_eq!(stations.status, LoadStatus::Error);
    assert!(stations.sat_count.is_none());

    let report = reg.status_report();
    let row = report
        .iter()
        .find(|r| r.descriptor.id == "celestrak:stations")
        .unwrap();
    assert!(row.summary().starts_with("error ("));
}
