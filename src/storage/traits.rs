//! Storage trait definitions

use crate::graph::{Dataset, Iri, Quad};
use crate::resource::{parent_identifier, Binary, InteractionModel, ResourceState, Session};
use async_trait::async_trait;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Date parsing error: {0}")]
    DateParse(String),

    #[error("Corrupt record for {identifier}: {message}")]
    Corrupt { identifier: String, message: String },

    #[error("Internal storage error: {0}")]
    Internal(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// The persistence collaborator of the write path
///
/// `create` and `replace` must be atomic with respect to each other for the
/// same identifier. A `false` outcome means the store declined the write.
#[async_trait]
pub trait ResourceService: Send + Sync {
    /// Load the current state of a resource
    async fn get(&self, identifier: &Iri) -> StorageResult<ResourceState>;

    /// Store a resource that does not exist yet
    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool>;

    /// Overwrite an existing resource
    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool>;

    /// Append to a resource's audit history
    async fn add(&self, identifier: &Iri, session: &Session, dataset: &Dataset)
        -> StorageResult<bool>;

    /// Every audit quad ever appended for `identifier`, oldest first
    async fn audit(&self, identifier: &Iri) -> StorageResult<Vec<Quad>>;

    /// The parent container of `identifier`, None for the root
    fn get_container(&self, identifier: &Iri) -> Option<Iri> {
        parent_identifier(identifier)
    }

    /// Interaction models this store accepts
    fn supported_interaction_models(&self) -> &[InteractionModel];

    fn supports(&self, interaction_model: InteractionModel) -> bool {
        self.supported_interaction_models().contains(&interaction_model)
    }
}

/// Extension trait for opening stores from paths
pub trait OpenStore: ResourceService + Sized {
    /// Open or create a store at the given path
    fn open(path: impl AsRef<Path>) -> StorageResult<Self>;

    /// Create an in-memory store (useful for testing)
    fn open_in_memory() -> StorageResult<Self>;
}
