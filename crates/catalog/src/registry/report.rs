use serde::Serialize;

use crate::load_state::LoadState;
use crate::source::SourceDescriptor;

/// A catalog source with its enablement and last reported load state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SourceStatus {
    #[serde(flatten)]
    pub descriptor: SourceDescriptor,
    pub enabled: bool,
    pub load_state: LoadState,
}

impl SourceStatus {
    /// Short status line, e.g. `loaded (1234 sats, cached 5m ago)`.
    pub fn summary(&self) -> String {
        let state = &self.load_state;
        let mut parts = Vec::new();
        if let Some(count) = state.sat_count {
            parts.push(format!("{count} sats"));
        }
        if let Some(age) = state.cache_age {
            parts.push(format!("cached {} ago", format_age(age)));
        }
        if let Some(err) = &state.error {
            parts.push(err.clone());
        }
        if parts.is_empty() {
            state.status.to_string()
        } else {
            format!("{} ({})", state.status, parts.join(", "))
        }
    }
}

fn format_age(secs: u64) -> String {
    match secs {
        s if s < 60 => format!("{s}s"),
        s if s < 3600 => format!("{}m", s / 60),
        s if s < 86_400 => format!("{}h", s / 3600),
        s => format!("{}d", s / 86_400),
    }
}
