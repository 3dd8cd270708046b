use satreg_catalog::LoadOrigin;
use satreg_core::KvStore;

use crate::helpers::{file_store, open_registry};

#[test]
fn fresh_install_persists_default() {
    let tmp = tempfile::tempdir().unwrap();
    let reg = open_registry(tmp.path());
    assert_eq!(reg.enabled_ids(), vec!["celestrak:visual"]);

    let store = file_store(tmp.path());
    assert_eq!(
        store.get("sources.enabled").as_deref(),
        Some(r#"["celestrak:visual"]"#)
    );
}

#[test]
fn legacy_selection_migrates_exactly_once() {
    let tmp = tempfile::tempdir().unwrap();
    let store = file_store(tmp.path());
    store.set("satellite-group", "visual").unwrap();

    let reg = open_registry(tmp.path());
    assert_eq!(
        reg.enablement_origin(),
        &LoadOrigin::Migrated {
            group: "visual".into()
        }
    );
    assert_eq!(reg.enabled_ids(), vec!["celestrak:visual"]);
    assert!(store.get("satellite-group").is_none());
    assert_eq!(
        store.get("sources.enabled").as_deref(),
        Some(r#"["celestrak:visual"]"#)
    );

    for _ in 0..3 {
        let reg = open_registry(tmp.path());
        assert_eq!(reg.enablement_origin(), &LoadOrigin::Stored);
        assert!(store.get("satellite-group").is_none());
    }
}

#[test]
fn legacy_custom_sentinel_uses_default() {
    let tmp = tempfile::tempdir().unwrap();
    let store = file_store(tmp.path());
    store.set("satellite-group", "custom").unwrap();

    let reg = open_registry(tmp.path());
    assert_eq!(reg.enablement_origin(), &LoadOrigin::Default);
    assert_eq!(reg.enabled_ids(), vec!["celestrak:visual"]);
    assert!(store.get("satellite-group").is_none());
}
