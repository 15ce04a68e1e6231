//! Triples and quads

use super::term::{Iri, Term};
use serde::{Deserialize, Serialize};

/// A single statement with no graph name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: Iri, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    /// Place this triple into a named graph
    pub fn in_graph(self, graph: Iri) -> Quad {
        Quad {
            graph,
            subject: self.subject,
            predicate: self.predicate,
            object: self.object,
        }
    }
}

impl std::fmt::Display for Triple {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A statement scoped to a named graph (partition)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Quad {
    pub graph: Iri,
    pub subject: Term,
    pub predicate: Iri,
    pub object: Term,
}

impl Quad {
    pub fn new(
        graph: Iri,
        subject: impl Into<Term>,
        predicate: Iri,
        object: impl Into<Term>,
    ) -> Self {
        Self {
            graph,
            subject: subject.into(),
            predicate,
            object: object.into(),
        }
    }

    /// Drop the graph name
    pub fn to_triple(&self) -> Triple {
        Triple {
            subject: self.subject.clone(),
            predicate: self.predicate.clone(),
            object: self.object.clone(),
        }
    }
}

impl std::fmt::Display for Quad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} <{}> {} <{}> .",
            self.subject, self.predicate, self.object, self.graph
        )
    }
}
