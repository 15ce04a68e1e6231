//! Mapping between request paths, internal identifiers and base-URL IRIs

use crate::graph::vocab::server;
use crate::graph::{Iri, Quad, Term, Triple};

/// Internal identifier for a request path (`trellis:data/<path>`)
pub fn internal_identifier(path: &str) -> Iri {
    Iri::new(format!("{}{}", server::DATA_PREFIX, path.trim_matches('/')))
}

/// The parent of an internal identifier; the root has none.
pub fn parent_identifier(identifier: &Iri) -> Option<Iri> {
    let path = identifier.as_str().strip_prefix(server::DATA_PREFIX)?;
    if path.is_empty() {
        return None;
    }
    let parent = path.rsplit_once('/').map(|(p, _)| p).unwrap_or("");
    Some(internal_identifier(parent))
}

/// Rewrites terms so that nothing request-scoped reaches storage.
///
/// Blank nodes become `trellis:bnode/<label>` and IRIs under the public base
/// URL become internal identifiers, which is how the self reference `<>`
/// resolves to the stored resource.
#[derive(Debug, Clone)]
pub struct Skolemizer {
    base_url: String,
}

impl Skolemizer {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    pub fn term(&self, term: Term) -> Term {
        match term {
            Term::Blank(node) => {
                Term::Iri(Iri::new(format!("{}{}", server::BNODE_PREFIX, node.label())))
            }
            Term::Iri(iri) => Term::Iri(self.iri(iri)),
            literal => literal,
        }
    }

    pub fn iri(&self, iri: Iri) -> Iri {
        match iri.as_str().strip_prefix(self.base_url.as_str()) {
            Some(path) => internal_identifier(path),
            None => iri,
        }
    }

    pub fn triple(&self, triple: Triple) -> Triple {
        Triple {
            subject: self.term(triple.subject),
            predicate: self.iri(triple.predicate),
            object: self.term(triple.object),
        }
    }

    pub fn quad(&self, quad: Quad) -> Quad {
        Quad {
            graph: quad.graph,
            subject: self.term(quad.subject),
            predicate: self.iri(quad.predicate),
            object: self.term(quad.object),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{BlankNode, Literal};

    #[test]
    fn internal_identifier_trims_slashes() {
        assert_eq!(internal_identifier("/x/y/").as_str(), "trellis:data/x/y");
        assert_eq!(internal_identifier("").as_str(), "trellis:data/");
    }

    #[test]
    fn parent_walks_up_to_root() {
        let id = internal_identifier("a/b");
        let parent = parent_identifier(&id).unwrap();
        assert_eq!(parent.as_str(), "trellis:data/a");
        let root = parent_identifier(&parent).unwrap();
        assert_eq!(root.as_str(), "trellis:data/");
        assert!(parent_identifier(&root).is_none());
        assert!(parent_identifier(&Iri::new("http://example.org/a")).is_none());
    }

    #[test]
    fn skolemizes_blank_nodes_and_base_iris() {
        let skolem = Skolemizer::new("http://localhost:8080/");
        let triple = Triple::new(
            Iri::new("http://localhost:8080/x"),
            Iri::new("http://purl.org/dc/terms/relation"),
            BlankNode::from_label("b0"),
        );
        let out = skolem.triple(triple);
        assert_eq!(out.subject, Term::iri("trellis:data/x"));
        assert_eq!(out.object, Term::iri("trellis:bnode/b0"));
    }

    #[test]
    fn leaves_foreign_iris_and_literals_alone() {
        let skolem = Skolemizer::new("http://localhost:8080/");
        assert_eq!(
            skolem.term(Term::iri("http://example.org/y")),
            Term::iri("http://example.org/y")
        );
        let literal = Term::Literal(Literal::string("http://localhost:8080/x"));
        assert_eq!(skolem.term(literal.clone()), literal);
    }
}
