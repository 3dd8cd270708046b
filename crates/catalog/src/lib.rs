pub mod aggregate;
pub mod builtin;
pub mod cache;
pub mod catalog;
pub mod enablement;
pub mod keys;
pub mod load_state;
pub mod registry;
pub mod source;
pub mod trigger;

pub use aggregate::{count_identities, merge, AggregateResult, Merged};
pub use builtin::{BuiltinDefinition, BUILTIN_SOURCES};
pub use cache::{CachedPayload, SourceCache};
pub use catalog::SourceCatalog;
pub use enablement::{EnablementSet, LoadOrigin};
pub use load_state::{LoadState, LoadStateTracker, LoadStatus};
pub use registry::{RegistryBuilder, SourceRegistry, SourceStatus};
pub use source::{SourceDescriptor, SourceKind};
pub use trigger::{ReconcileEvent, ReconcileReason, ReconcileTrigger};
