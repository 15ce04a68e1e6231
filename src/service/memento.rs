//! Versioning hook

use super::ServiceResult;
use crate::graph::Iri;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Records a historical version after a successful write
#[async_trait]
pub trait MementoService: Send + Sync {
    async fn put(&self, identifier: &Iri, time: DateTime<Utc>) -> ServiceResult<()>;
}

/// Keeps no history
#[derive(Debug, Clone, Default)]
pub struct NoopMementoService;

#[async_trait]
impl MementoService for NoopMementoService {
    async fn put(&self, _identifier: &Iri, _time: DateTime<Utc>) -> ServiceResult<()> {
        Ok(())
    }
}
