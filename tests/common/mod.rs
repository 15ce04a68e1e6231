//! Shared collaborators and request builders for the PUT integration tests
//!
//! `RecordingStore` wraps the in-memory store and counts every persistence
//! call; each half of the commit can be told to fail in one of several ways.

#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use linkstore::graph::vocab::server;
use linkstore::service::{ServiceError, ServiceResult};
use linkstore::{
    BinaryService, Dataset, InteractionModel, Iri, LdpRequest, MementoService,
    MemoryBinaryService, MemoryResourceService, PutHandler, Quad, ResourceService,
    ResourceState, ServiceBundle, Session, StorageError, StorageResult,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const BASE: &str = "http://localhost:8080/";
pub const TITLE: &str = "http://purl.org/dc/terms/title";

/// How a commit half misbehaves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Fault {
    #[default]
    None,
    /// Return `Ok(false)`
    Decline,
    /// Return a storage error
    Error,
    /// Panic inside the task
    Panic,
}

impl Fault {
    fn apply(self, operation: &str) -> Option<StorageResult<bool>> {
        match self {
            Fault::None => None,
            Fault::Decline => Some(Ok(false)),
            Fault::Error => Some(Err(StorageError::Internal(format!("{} refused", operation)))),
            Fault::Panic => panic!("{} exploded", operation),
        }
    }
}

/// Call counters for a `RecordingStore`
#[derive(Debug, Default)]
pub struct Calls {
    pub get: AtomicUsize,
    pub create: AtomicUsize,
    pub replace: AtomicUsize,
    pub add: AtomicUsize,
}

impl Calls {
    /// create + replace + add
    pub fn writes(&self) -> usize {
        self.create.load(Ordering::SeqCst)
            + self.replace.load(Ordering::SeqCst)
            + self.add.load(Ordering::SeqCst)
    }

    pub fn creates(&self) -> usize {
        self.create.load(Ordering::SeqCst)
    }

    pub fn replaces(&self) -> usize {
        self.replace.load(Ordering::SeqCst)
    }

    pub fn adds(&self) -> usize {
        self.add.load(Ordering::SeqCst)
    }
}

/// An in-memory store that records calls and injects faults
pub struct RecordingStore {
    inner: MemoryResourceService,
    pub calls: Calls,
    content_fault: Mutex<Fault>,
    audit_fault: Mutex<Fault>,
    /// Interaction model of the last create/replace
    pub last_model: Mutex<Option<InteractionModel>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::wrap(MemoryResourceService::new())
    }

    pub fn wrap(inner: MemoryResourceService) -> Self {
        Self {
            inner,
            calls: Calls::default(),
            content_fault: Mutex::new(Fault::None),
            audit_fault: Mutex::new(Fault::None),
            last_model: Mutex::new(None),
        }
    }

    pub fn inner(&self) -> &MemoryResourceService {
        &self.inner
    }

    pub fn fail_content(&self, fault: Fault) {
        *self.content_fault.lock().unwrap() = fault;
    }

    pub fn fail_audit(&self, fault: Fault) {
        *self.audit_fault.lock().unwrap() = fault;
    }

    fn content_fault(&self) -> Fault {
        *self.content_fault.lock().unwrap()
    }

    fn audit_fault(&self) -> Fault {
        *self.audit_fault.lock().unwrap()
    }
}

#[async_trait]
impl ResourceService for RecordingStore {
    async fn get(&self, identifier: &Iri) -> StorageResult<ResourceState> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.inner.get(identifier).await
    }

    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&linkstore::Binary>,
    ) -> StorageResult<bool> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        *self.last_model.lock().unwrap() = Some(interaction_model);
        if let Some(outcome) = self.content_fault().apply("create") {
            return outcome;
        }
        self.inner
            .create(identifier, session, interaction_model, dataset, container, binary)
            .await
    }

    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&linkstore::Binary>,
    ) -> StorageResult<bool> {
        self.calls.replace.fetch_add(1, Ordering::SeqCst);
        *self.last_model.lock().unwrap() = Some(interaction_model);
        if let Some(outcome) = self.content_fault().apply("replace") {
            return outcome;
        }
        self.inner
            .replace(identifier, session, interaction_model, dataset, container, binary)
            .await
    }

    async fn add(&self, identifier: &Iri, session: &Session, dataset: &Dataset) -> StorageResult<bool> {
        self.calls.add.fetch_add(1, Ordering::SeqCst);
        if let Some(outcome) = self.audit_fault().apply("add") {
            return outcome;
        }
        self.inner.add(identifier, session, dataset).await
    }

    async fn audit(&self, identifier: &Iri) -> StorageResult<Vec<Quad>> {
        self.inner.audit(identifier).await
    }

    fn supported_interaction_models(&self) -> &[InteractionModel] {
        self.inner.supported_interaction_models()
    }
}

/// A binary store that counts persist calls
#[derive(Default)]
pub struct RecordingBinaries {
    inner: MemoryBinaryService,
    pub persisted: AtomicUsize,
    pub fail: Mutex<bool>,
}

impl RecordingBinaries {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inner(&self) -> &MemoryBinaryService {
        &self.inner
    }

    pub fn persists(&self) -> usize {
        self.persisted.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BinaryService for RecordingBinaries {
    fn generate_identifier(&self) -> Iri {
        self.inner.generate_identifier()
    }

    async fn persist(&self, location: &Iri, content: Bytes, content_type: &str) -> ServiceResult<()> {
        self.persisted.fetch_add(1, Ordering::SeqCst);
        if *self.fail.lock().unwrap() {
            return Err(ServiceError::Internal("disk full".into()));
        }
        self.inner.persist(location, content, content_type).await
    }
}

/// A memento service that always fails
#[derive(Default)]
pub struct BrokenMementos {
    pub attempts: AtomicUsize,
}

#[async_trait]
impl MementoService for BrokenMementos {
    async fn put(&self, _identifier: &Iri, _time: DateTime<Utc>) -> ServiceResult<()> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        Err(ServiceError::Internal("memento store offline".into()))
    }
}

/// A handler plus handles on its recording collaborators
pub struct Harness {
    pub handler: PutHandler,
    pub store: Arc<RecordingStore>,
    pub binaries: Arc<RecordingBinaries>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_store(RecordingStore::new())
    }

    pub fn with_store(store: RecordingStore) -> Self {
        let store = Arc::new(store);
        let binaries = Arc::new(RecordingBinaries::new());
        let services = ServiceBundle::new(store.clone(), binaries.clone());
        Self {
            handler: PutHandler::new(services),
            store,
            binaries,
        }
    }

    /// Rebuild the handler with modified services
    pub fn map_services(mut self, f: impl FnOnce(ServiceBundle) -> ServiceBundle) -> Self {
        let services = f(self.handler.services().clone());
        self.handler = PutHandler::new(services);
        self
    }

    pub async fn put(&self, request: LdpRequest) -> linkstore::LdpResponse {
        self.handler.handle(request, Session::anonymous()).await
    }

    /// The stored resource, panicking if there is none
    pub async fn stored(&self, path: &str) -> linkstore::Resource {
        self.store
            .inner()
            .get(&linkstore::internal_identifier(path))
            .await
            .unwrap()
            .into_resource()
            .unwrap_or_else(|| panic!("no resource at {}", path))
    }
}

pub fn turtle(path: &str, body: impl Into<Bytes>) -> LdpRequest {
    LdpRequest::new(BASE, path)
        .with_content_type("text/turtle")
        .with_body(body)
}

pub fn acl(path: &str, body: impl Into<Bytes>) -> LdpRequest {
    turtle(path, body).with_ext(linkstore::http::ACL_EXTENSION)
}

pub fn binary(path: &str, content_type: &str, body: impl Into<Bytes>) -> LdpRequest {
    LdpRequest::new(BASE, path)
        .with_content_type(content_type)
        .with_body(body)
}

/// A one-triple Turtle body giving the resource a title
pub fn titled(title: &str) -> String {
    format!("<> <{}> \"{}\" .", TITLE, title)
}

pub fn user_graph() -> Iri {
    Iri::new(server::PREFER_USER_MANAGED)
}

pub fn acl_graph() -> Iri {
    Iri::new(server::PREFER_ACCESS_CONTROL)
}

/// Quads of one partition, sorted for comparison
pub fn partition(resource: &linkstore::Resource, graph: &Iri) -> Vec<String> {
    let mut quads: Vec<String> = resource
        .quads
        .iter()
        .filter(|q| &q.graph == graph)
        .map(|q| q.to_string())
        .collect();
    quads.sort();
    quads
}
