//! Binary object stores

use super::{ServiceError, ServiceResult};
use crate::graph::Iri;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

const FILE_SCHEME: &str = "file:///";

/// Where binary content lives
#[async_trait]
pub trait BinaryService: Send + Sync {
    /// A fresh, unused storage location
    fn generate_identifier(&self) -> Iri;

    /// Store `content` at `location`, tagged with its MIME type
    async fn persist(&self, location: &Iri, content: Bytes, content_type: &str) -> ServiceResult<()>;
}

/// Sidecar written next to each stored file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryMetadata {
    pub content_type: String,
    pub size: u64,
    pub stored: DateTime<Utc>,
}

/// Stores binaries as files under a root directory
#[derive(Debug, Clone)]
pub struct FileBinaryService {
    root: PathBuf,
}

impl FileBinaryService {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path for a `file:///<name>` location
    pub fn path_for(&self, location: &Iri) -> ServiceResult<PathBuf> {
        let name = location
            .as_str()
            .strip_prefix(FILE_SCHEME)
            .filter(|name| !name.is_empty() && !name.contains(|c: char| c == '/' || c == '\\') && *name != "..")
            .ok_or_else(|| ServiceError::UnsupportedLocation(location.to_string()))?;
        Ok(self.root.join(name))
    }

    /// Read back stored content and its metadata
    pub async fn load(&self, location: &Iri) -> ServiceResult<(BinaryMetadata, Bytes)> {
        let path = self.path_for(location)?;
        let content = tokio::fs::read(&path).await?;
        let metadata = tokio::fs::read(path.with_extension("json")).await?;
        Ok((serde_json::from_slice(&metadata)?, Bytes::from(content)))
    }
}

#[async_trait]
impl BinaryService for FileBinaryService {
    fn generate_identifier(&self) -> Iri {
        Iri::new(format!("{}{}", FILE_SCHEME, Uuid::new_v4().simple()))
    }

    async fn persist(&self, location: &Iri, content: Bytes, content_type: &str) -> ServiceResult<()> {
        let path = self.path_for(location)?;
        tokio::fs::create_dir_all(&self.root).await?;

        let metadata = BinaryMetadata {
            content_type: content_type.to_string(),
            size: content.len() as u64,
            stored: Utc::now(),
        };
        tokio::fs::write(&path, &content).await?;
        tokio::fs::write(path.with_extension("json"), serde_json::to_vec(&metadata)?).await?;

        debug!(location = %location, path = %path.display(), size = metadata.size, "binary stored");
        Ok(())
    }
}

/// Keeps binaries in memory
#[derive(Debug, Default)]
pub struct MemoryBinaryService {
    objects: DashMap<Iri, (String, Bytes)>,
}

impl MemoryBinaryService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content type and bytes stored at `location`
    pub fn get(&self, location: &Iri) -> Option<(String, Bytes)> {
        self.objects.get(location).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl BinaryService for MemoryBinaryService {
    fn generate_identifier(&self) -> Iri {
        Iri::new(format!("mem:{}", Uuid::new_v4().simple()))
    }

    async fn persist(&self, location: &Iri, content: Bytes, content_type: &str) -> ServiceResult<()> {
        self.objects
            .insert(location.clone(), (content_type.to_string(), content));
        Ok(())
    }
}
