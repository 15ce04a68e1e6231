//! Collaborators of the write path
//!
//! Each concern the pipeline delegates sits behind a trait. `ServiceBundle`
//! carries one shared instance of each into a handler.

mod audit;
mod binary;
mod constraint;
mod memento;

pub use audit::{AuditService, DefaultAuditService};
pub use binary::{BinaryMetadata, BinaryService, FileBinaryService, MemoryBinaryService};
pub use constraint::{ConstraintService, LdpConstraintService};
pub use memento::{MementoService, NoopMementoService};

use crate::io::{IoService, TurtleIoService};
use crate::storage::ResourceService;
use std::sync::Arc;
use thiserror::Error;

/// Errors raised by binary and memento collaborators
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported storage location: {0}")]
    UnsupportedLocation(String),

    #[error("{0}")]
    Internal(String),
}

/// Result type for collaborator operations
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Shared collaborator instances for a handler
#[derive(Clone)]
pub struct ServiceBundle {
    pub resources: Arc<dyn ResourceService>,
    pub binaries: Arc<dyn BinaryService>,
    pub io: Arc<dyn IoService>,
    pub audit: Arc<dyn AuditService>,
    pub constraints: Arc<dyn ConstraintService>,
    pub mementos: Arc<dyn MementoService>,
}

impl ServiceBundle {
    /// Default IO, audit, constraint and memento services around the given stores
    pub fn new(resources: Arc<dyn ResourceService>, binaries: Arc<dyn BinaryService>) -> Self {
        Self {
            resources,
            binaries,
            io: Arc::new(TurtleIoService::new()),
            audit: Arc::new(DefaultAuditService::new()),
            constraints: Arc::new(LdpConstraintService::new()),
            mementos: Arc::new(NoopMementoService),
        }
    }

    pub fn with_io(mut self, io: Arc<dyn IoService>) -> Self {
        self.io = io;
        self
    }

    pub fn with_audit(mut self, audit: Arc<dyn AuditService>) -> Self {
        self.audit = audit;
        self
    }

    pub fn with_constraints(mut self, constraints: Arc<dyn ConstraintService>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_mementos(mut self, mementos: Arc<dyn MementoService>) -> Self {
        self.mementos = mementos;
        self
    }
}

impl std::fmt::Debug for ServiceBundle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceBundle").finish_non_exhaustive()
    }
}
