//! Dataset: an unordered set of quads partitioned by graph name

use super::quad::{Quad, Triple};
use super::term::Iri;
use std::collections::BTreeSet;

/// A set of quads.
///
/// Duplicate quads collapse. Iteration order is stable (sorted), which keeps
/// persisted output and test assertions deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    quads: BTreeSet<Quad>,
}

impl Dataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a quad. Returns false if it was already present.
    pub fn add(&mut self, quad: Quad) -> bool {
        self.quads.insert(quad)
    }

    pub fn contains(&self, quad: &Quad) -> bool {
        self.quads.contains(quad)
    }

    pub fn len(&self) -> usize {
        self.quads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Quad> {
        self.quads.iter()
    }

    /// Triples of one partition
    pub fn graph<'a>(&'a self, name: &'a Iri) -> impl Iterator<Item = Triple> + 'a {
        self.quads
            .iter()
            .filter(move |q| &q.graph == name)
            .map(Quad::to_triple)
    }

    /// Quads of one partition, graph name retained
    pub fn quads_in<'a>(&'a self, name: &'a Iri) -> impl Iterator<Item = &'a Quad> + 'a {
        self.quads.iter().filter(move |q| &q.graph == name)
    }

    pub fn into_quads(self) -> Vec<Quad> {
        self.quads.into_iter().collect()
    }
}

impl Extend<Quad> for Dataset {
    fn extend<T: IntoIterator<Item = Quad>>(&mut self, iter: T) {
        self.quads.extend(iter);
    }
}

impl FromIterator<Quad> for Dataset {
    fn from_iter<T: IntoIterator<Item = Quad>>(iter: T) -> Self {
        Self {
            quads: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Literal, Term};

    fn quad(graph: &str, object: &str) -> Quad {
        Quad::new(
            Iri::new(graph),
            Term::iri("trellis:data/x"),
            Iri::new("http://purl.org/dc/terms/title"),
            Literal::string(object),
        )
    }

    #[test]
    fn duplicate_quads_collapse() {
        let mut ds = Dataset::new();
        assert!(ds.add(quad("g:a", "one")));
        assert!(!ds.add(quad("g:a", "one")));
        assert_eq!(ds.len(), 1);
    }

    #[test]
    fn graph_filters_by_partition() {
        let ds: Dataset = vec![quad("g:a", "one"), quad("g:b", "two"), quad("g:a", "three")]
            .into_iter()
            .collect();

        let a = Iri::new("g:a");
        assert_eq!(ds.graph(&a).count(), 2);
        let missing = Iri::new("g:c");
        assert_eq!(ds.graph(&missing).count(), 0);
    }
}
