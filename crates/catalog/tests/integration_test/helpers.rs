use std::path::Path;
use std::sync::Arc;

use satreg_catalog::SourceRegistry;
use satreg_core::{FileStore, KvStore};

/// Open a file-backed store rooted at `dir`.
pub fn file_store(dir: &Path) -> Arc<FileStore> {
    Arc::new(FileStore::new(dir).unwrap())
}

/// Open a registry with stock built-ins over `dir`, as a fresh process would.
pub fn open_registry(dir: &Path) -> SourceRegistry {
    let store: Arc<dyn KvStore> = file_store(dir);
    SourceRegistry::open(store)
}

/// Four NORAD catalog numbers per source, two of them shared.
pub fn tle_block(numbers: &[u32]) -> String {
    numbers
        .iter()
        .map(|n| format!("SAT {n}\n1 {n:05}U 00000A   24001.00000000\n2 {n:05}  51.6400\n"))
        .collect()
}

/// Catalog numbers found on the `1 ` lines of a TLE block.
pub fn catalog_numbers(text: &str) -> Vec<u32> {
    text.lines()
        .filter_map(|line| line.strip_prefix("1 "))
        .filter_map(|rest| rest.get(..5))
        .filter_map(|num| num.trim().parse().ok())
        .collect()
}
