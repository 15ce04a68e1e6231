//! Storage backends for linkstore
//!
//! The write path persists through the `ResourceService` trait. `SqliteResourceService`
//! is the durable backend; `MemoryResourceService` backs tests and embedded use.

mod memory;
mod sqlite;
mod traits;

pub use memory::MemoryResourceService;
pub use sqlite::SqliteResourceService;
pub use traits::{OpenStore, ResourceService, StorageError, StorageResult};
