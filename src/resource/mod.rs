//! Resource model: interaction models, binaries, sessions, stored resources

mod binary;
pub mod identifier;
mod interaction;
mod session;

pub use binary::Binary;
pub use identifier::{internal_identifier, parent_identifier, Skolemizer};
pub use interaction::InteractionModel;
pub use session::Session;

use crate::graph::{Iri, Quad, Triple};
use chrono::{DateTime, Utc};

/// A stored resource as seen by the write path
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    pub identifier: Iri,
    pub interaction_model: InteractionModel,
    pub modified: DateTime<Utc>,
    pub container: Option<Iri>,
    pub binary: Option<Binary>,
    /// Content of every partition, graph name retained
    pub quads: Vec<Quad>,
}

impl Resource {
    pub fn new(identifier: Iri, interaction_model: InteractionModel, modified: DateTime<Utc>) -> Self {
        Self {
            identifier,
            interaction_model,
            modified,
            container: None,
            binary: None,
            quads: Vec::new(),
        }
    }

    pub fn with_binary(mut self, binary: Binary) -> Self {
        self.binary = Some(binary);
        self
    }

    pub fn with_quads(mut self, quads: impl IntoIterator<Item = Quad>) -> Self {
        self.quads.extend(quads);
        self
    }

    /// Triples of one partition
    pub fn stream<'a>(&'a self, graph: &'a Iri) -> impl Iterator<Item = Triple> + 'a {
        self.quads
            .iter()
            .filter(move |q| &q.graph == graph)
            .map(Quad::to_triple)
    }
}

/// What a lookup found at an identifier.
///
/// `Missing` and `Deleted` both mean "no resource" to the write path.
#[derive(Debug, Clone, PartialEq)]
pub enum ResourceState {
    Missing,
    Deleted,
    Present(Resource),
}

impl ResourceState {
    pub fn into_resource(self) -> Option<Resource> {
        match self {
            Self::Present(resource) => Some(resource),
            Self::Missing | Self::Deleted => None,
        }
    }

    pub fn exists(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

impl From<Option<Resource>> for ResourceState {
    fn from(resource: Option<Resource>) -> Self {
        resource.map(Self::Present).unwrap_or(Self::Missing)
    }
}
