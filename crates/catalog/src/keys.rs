//! Persisted key layout.
//!
//! ```text
//! sources.enabled        JSON array of enabled source ids
//! sources.custom         JSON array of custom source records
//! sources.text:{id}      raw pasted text for a PASTED_TEXT source
//! sources.cache:{id}     last fetched payload for a source
//! satellite-group        legacy single-group selection (pre-migration)
//! tle-cache:{id}         legacy per-source cache
//! ```

pub const ENABLED_SOURCES: &str = "sources.enabled";
pub const CUSTOM_SOURCES: &str = "sources.custom";
pub const LEGACY_GROUP: &str = "satellite-group";

pub fn stored_text(id: &str) -> String {
    format!("sources.text:{id}")
}

pub fn fetch_cache(id: &str) -> String {
    format!("sources.cache:{id}")
}

pub fn legacy_cache(id: &str) -> String {
    format!("tle-cache:{id}")
}

/// Every key that may hold data owned by a single source.
pub fn per_source_keys(id: &str) -> [String; 3] {
    [stored_text(id), fetch_cache(id), legacy_cache(id)]
}
