use satreg_catalog::{LoadOrigin, SourceKind};
use satreg_core::KvStore;

use crate::helpers::{file_store, open_registry};

#[test]
fn custom_sources_and_enablement_survive_restart() {
    let tmp = tempfile::tempdir().unwrap();

    let (url_id, text_id) = {
        let mut reg = open_registry(tmp.path());
        let url_id = reg.add_url_source("Mirror", "https://example.org/tle.txt");
        let text_id = reg.add_text_source("Pasted", "ISS (ZARYA)\n");
        reg.toggle("celestrak:stations");
        reg.toggle("celestrak:visual");
        reg.rename_custom_source(&url_id, "Backup mirror");
        (url_id, text_id)
    };

    let reg = open_registry(tmp.path());
    assert_eq!(reg.enablement_origin(), &LoadOrigin::Stored);

    let url = reg.descriptor(&url_id).unwrap();
    assert_eq!(url.name, "Backup mirror");
    assert_eq!(url.kind, SourceKind::RemoteUrl);
    assert_eq!(reg.get_stored_text(&text_id), "ISS (ZARYA)\n");

    assert!(reg.is_enabled(&url_id));
    assert!(reg.is_enabled(&text_id));
    assert!(reg.is_enabled("celestrak:stations"));
    assert!(!reg.is_enabled("celestrak:visual"));

    // Built-ins are rebuilt from static definitions, custom ones follow them.
    let last_builtin = reg.descriptors().iter().rposition(|d| d.builtin).unwrap();
    let first_custom = reg.descriptors().iter().position(|d| !d.builtin).unwrap();
    assert!(last_builtin < first_custom);
}

#[test]
fn removed_source_stays_removed_after_restart() {
    let tmp = tempfile::tempdir().unwrap();

    let id = {
        let mut reg = open_registry(tmp.path());
        let id = reg.add_text_source("Pasted", "payload");
        assert!(reg.remove_custom_source(&id));
        id
    };

    let reg = open_registry(tmp.path());
    assert!(reg.descriptor(&id).is_none());
    assert!(!reg.is_enabled(&id));
    assert_eq!(reg.get_stored_text(&id), "");
}

#[test]
fn corrupt_files_fall_back_to_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let store = file_store(tmp.path());
    store.set("sources.custom", "{{{{").unwrap();
    store.set("sources.enabled", "[1, 2").unwrap();

    let reg = open_registry(tmp.path());
    assert_eq!(reg.descriptors().iter().filter(|d| !d.builtin).count(), 0);
    assert_eq!(reg.enabled_ids(), vec!["celestrak:visual"]);
}

#[test]
fn quota_limited_text_source_reads_empty_after_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let id = {
        let store = std::sync::Arc::new(
            satreg_core::FileStore::new(tmp.path()).unwrap().with_quota(256),
        );
        let mut reg = satreg_catalog::SourceRegistry::open(store);
        reg.add_text_source("Huge", &"x".repeat(4096))
    };

    let reg = open_registry(tmp.path());
    assert!(reg.descriptor(&id).is_some());
    assert_eq!(reg.get_stored_text(&id), "");
}
