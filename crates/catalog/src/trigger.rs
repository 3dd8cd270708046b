//! Single callback slot notified whenever the set of contributing sources
//! changes.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, warn};

use crate::source::SourceDescriptor;

/// Which mutation caused a reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconcileReason {
    Toggled,
    Added,
    Removed,
}

/// Passed to the reconcile hook.
///
/// The hook runs while the registry is mutably borrowed, so the event
/// carries everything needed to rebuild the merged view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileEvent {
    pub reason: ReconcileReason,
    pub source_id: String,
    /// Enabled sources after the mutation, in catalog order.
    pub enabled: Vec<SourceDescriptor>,
}

impl ReconcileEvent {
    pub fn enabled_ids(&self) -> impl Iterator<Item = &str> {
        self.enabled.iter().map(|s| s.id.as_str())
    }
}

/// Callback run after toggle, add and remove.
///
/// Its outcome is never inspected beyond logging a failure. It must not
/// panic: the mutation is already persisted and a panic unwinds through the
/// caller.
pub type ReconcileHook = Arc<dyn Fn(&ReconcileEvent) -> anyhow::Result<()> + Send + Sync>;

/// Optional, replaceable hook.
#[derive(Default, Clone)]
pub struct ReconcileTrigger {
    hook: Option<ReconcileHook>,
}

impl ReconcileTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `hook`, replacing any previous one.
    pub fn set<F>(&mut self, hook: F)
    where
        F: Fn(&ReconcileEvent) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.hook = Some(Arc::new(hook));
    }

    pub fn clear(&mut self) {
        self.hook = None;
    }

    pub fn is_set(&self) -> bool {
        self.hook.is_some()
    }

    /// Run the hook to completion. A failing hook is logged and swallowed.
    pub fn fire(&self, event: &ReconcileEvent) {
        let Some(hook) = &self.hook else {
            debug!(reason = ?event.reason, source_id = %event.source_id, "no reconcile hook installed");
            return;
        };
        if let Err(e) = hook(event) {
            warn!(
                reason = ?event.reason,
                source_id = %event.source_id,
                error = %e,
                "reconcile hook failed"
            );
        }
    }
}

impl std::fmt::Debug for ReconcileTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReconcileTrigger")
            .field("hook", &self.hook.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceKind;
    use std::sync::Mutex;

    fn event(reason: ReconcileReason, source_id: &str) -> ReconcileEvent {
        ReconcileEvent {
            reason,
            source_id: source_id.to_string(),
            enabled: vec![SourceDescriptor {
                id: source_id.to_string(),
                name: "Mirror".into(),
                kind: SourceKind::RemoteUrl,
                locator: Some("https://example.org/tle.txt".into()),
                builtin: false,
            }],
        }
    }

    #[test]
    fn fire_without_hook_is_noop() {
        let trigger = ReconcileTrigger::new();
        assert!(!trigger.is_set());
        trigger.fire(&event(ReconcileReason::Toggled, "a"));
    }

    #[test]
    fn fire_passes_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let mut trigger = ReconcileTrigger::new();
        trigger.set(move |event: &ReconcileEvent| {
            sink.lock().unwrap().push(event.clone());
            Ok(())
        });

        let fired = event(ReconcileReason::Added, "custom:1");
        trigger.fire(&fired);
        let seen = seen.lock().unwrap();
        assert_eq!(*seen, vec![fired.clone()]);
        assert_eq!(seen[0].enabled_ids().collect::<Vec<_>>(), vec!["custom:1"]);
    }

    #[test]
    fn failing_hook_is_swallowed() {
        let mut trigger = ReconcileTrigger::new();
        trigger.set(|_: &ReconcileEvent| anyhow::bail!("pipeline offline"));
        trigger.fire(&event(ReconcileReason::Removed, "custom:1"));
    }

    #[test]
    fn set_replaces_and_clear_removes() {
        let calls = Arc::new(Mutex::new((0, 0)));
        let mut trigger = ReconcileTrigger::new();

        let c = calls.clone();
        trigger.set(move |_: &ReconcileEvent| {
            c.lock().unwrap().0 += 1;
            Ok(())
        });
        let c = calls.clone();
        trigger.set(move |_: &ReconcileEvent| {
            c.lock().unwrap().1 += 1;
            Ok(())
        });
        trigger.fire(&event(ReconcileReason::Toggled, "a"));
        assert_eq!(*calls.lock().unwrap(), (0, 1));

        trigger.clear();
        trigger.fire(&event(ReconcileReason::Toggled, "a"));
        assert_eq!(*calls.lock().unwrap(), (0, 1));
    }
}
