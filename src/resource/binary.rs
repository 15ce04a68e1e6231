//! Binary descriptor for NonRDFSource content

use crate::graph::Iri;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Describes stored binary content.
///
/// Replaced wholesale when the content is rewritten; never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Binary {
    /// Opaque storage location handed out by the binary store
    pub identifier: Iri,
    pub modified: DateTime<Utc>,
    pub mime_type: String,
    pub size: u64,
}

impl Binary {
    pub fn new(
        identifier: Iri,
        modified: DateTime<Utc>,
        mime_type: impl Into<String>,
        size: u64,
    ) -> Self {
        Self {
            identifier,
            modified,
            mime_type: mime_type.into(),
            size,
        }
    }
}
