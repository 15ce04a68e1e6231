//! Core RDF data structures

mod dataset;
mod quad;
mod term;
pub mod vocab;

pub use dataset::Dataset;
pub use quad::{Quad, Triple};
pub use term::{BlankNode, Iri, Literal, Term};
