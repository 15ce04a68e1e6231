//! linkstore: the write path of a Linked Data Platform resource server
//!
//! A PUT request is resolved to an interaction model, checked against its
//! preconditions, materialized as binary or RDF content, merged with the
//! partitions it does not touch, and committed together with an audit record.
//!
//! # Core Concepts
//!
//! - **Resources**: identified content with an LDP interaction model
//! - **Graphs**: a resource's quads split into user-managed and access-control partitions
//! - **Audit**: append-only PROV records written alongside every commit
//!
//! # Example
//!
//! ```
//! use linkstore::{LdpRequest, MemoryBinaryService, MemoryResourceService, PutHandler, ServiceBundle, Session};
//! use std::sync::Arc;
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let services = ServiceBundle::new(
//!     Arc::new(MemoryResourceService::new()),
//!     Arc::new(MemoryBinaryService::new()),
//! );
//! let request = LdpRequest::new("http://localhost:8080/", "notes/1")
//!     .with_content_type("text/turtle")
//!     .with_body("<> <http://purl.org/dc/terms/title> \"First note\" .");
//! let response = PutHandler::new(services).handle(request, Session::anonymous()).await;
//! assert_eq!(response.status.code(), 201);
//! # });
//! ```

pub mod config;
pub mod graph;
pub mod handler;
pub mod http;
pub mod io;
pub mod resource;
pub mod service;
pub mod storage;

pub use config::{Config, ConfigError};
pub use graph::{Dataset, Iri, Quad, Term, Triple};
pub use handler::{PutError, PutHandler, Stop};
pub use http::{Digest, EntityTag, EntityTagList, LdpRequest, LdpResponse, Link, Prefer, Status};
pub use io::{IoService, RdfSyntax, TurtleIoService};
pub use resource::{
    internal_identifier, Binary, InteractionModel, Resource, ResourceState, Session,
};
pub use service::{
    AuditService, BinaryService, ConstraintService, FileBinaryService, MementoService,
    MemoryBinaryService, ServiceBundle,
};
pub use storage::{
    MemoryResourceService, OpenStore, ResourceService, SqliteResourceService, StorageError,
    StorageResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
