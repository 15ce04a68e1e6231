//! Interaction models and their fixed type hierarchy
//!
//! ```text
//! Resource
//! ├── RDFSource
//! │   └── Container
//! │       ├── BasicContainer
//! │       ├── DirectContainer
//! │       └── IndirectContainer
//! └── NonRDFSource
//! ```
//!
//! The hierarchy is consulted for subtype membership only.

use crate::graph::vocab::ldp;
use crate::graph::Iri;
use serde::{Deserialize, Serialize};

/// The structural category of a resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InteractionModel {
    Resource,
    #[serde(rename = "RDFSource")]
    RdfSource,
    #[serde(rename = "NonRDFSource")]
    NonRdfSource,
    Container,
    BasicContainer,
    DirectContainer,
    IndirectContainer,
}

impl InteractionModel {
    pub const ALL: [InteractionModel; 7] = [
        Self::Resource,
        Self::RdfSource,
        Self::NonRdfSource,
        Self::Container,
        Self::BasicContainer,
        Self::DirectContainer,
        Self::IndirectContainer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resource => ldp::RESOURCE,
            Self::RdfSource => ldp::RDF_SOURCE,
            Self::NonRdfSource => ldp::NON_RDF_SOURCE,
            Self::Container => ldp::CONTAINER,
            Self::BasicContainer => ldp::BASIC_CONTAINER,
            Self::DirectContainer => ldp::DIRECT_CONTAINER,
            Self::IndirectContainer => ldp::INDIRECT_CONTAINER,
        }
    }

    pub fn iri(&self) -> Iri {
        Iri::new(self.as_str())
    }

    /// Look up a model by its full LDP IRI
    pub fn from_iri(iri: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == iri)
    }

    /// The immediate supertype, None for the root
    pub fn parent(&self) -> Option<Self> {
        match self {
            Self::Resource => None,
            Self::RdfSource | Self::NonRdfSource => Some(Self::Resource),
            Self::Container => Some(Self::RdfSource),
            Self::BasicContainer | Self::DirectContainer | Self::IndirectContainer => {
                Some(Self::Container)
            }
        }
    }

    /// This model followed by every ancestor up to the root
    pub fn ancestors(&self) -> Vec<Self> {
        let mut chain = vec![*self];
        let mut current = *self;
        while let Some(parent) = current.parent() {
            chain.push(parent);
            current = parent;
        }
        chain
    }

    /// True if `self` equals `other` or descends from it
    pub fn is_subtype_of(&self, other: InteractionModel) -> bool {
        self.ancestors().contains(&other)
    }

    /// Anything but the generic root
    pub fn is_concrete(&self) -> bool {
        *self != Self::Resource
    }
}

impl std::fmt::Display for InteractionModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for InteractionModel {
    type Err = String;

    /// Accepts the full IRI, an `ldp:` prefixed name, or the bare local name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let local = s
            .strip_prefix(ldp::NS)
            .or_else(|| s.strip_prefix("ldp:"))
            .unwrap_or(s);
        Self::ALL
            .into_iter()
            .find(|m| m.as_str()[ldp::NS.len()..].eq_ignore_ascii_case(local))
            .ok_or_else(|| format!("unknown interaction model: {}", s))
    }
}
