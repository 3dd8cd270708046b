pub mod config;
pub mod error;
pub mod ids;
pub mod store;

pub use config::Config;
pub use error::*;
pub use ids::{IdGenerator, SequentialIds, UuidGenerator};
pub use store::{FileStore, KvStore, MemoryStore};
