//! Structured-data input: syntaxes, negotiation, and the default reader
//!
//! The write path depends on the `IoService` trait only. `TurtleIoService`
//! reads Turtle and N-Triples; deployments needing more syntaxes plug in
//! their own implementation.

mod lexer;
mod syntax;
mod turtle;

pub use syntax::{MediaType, RdfSyntax};

use crate::graph::Triple;
use thiserror::Error;

/// Errors raised while reading a structured-data entity
#[derive(Debug, Error)]
pub enum IoError {
    #[error("Lexer error at position {position}: {message}")]
    Lexer { position: usize, message: String },

    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    #[error("Undefined prefix: {0}")]
    UndefinedPrefix(String),

    #[error("Entity is not valid UTF-8: {0}")]
    Encoding(#[from] std::str::Utf8Error),

    #[error("Unsupported syntax: {0}")]
    UnsupportedSyntax(RdfSyntax),
}

impl IoError {
    pub fn lexer(position: usize, message: impl Into<String>) -> Self {
        Self::Lexer {
            position,
            message: message.into(),
        }
    }

    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }
}

/// Result type for IO operations
pub type IoResult<T> = Result<T, IoError>;

/// Reads request entities into triples
pub trait IoService: Send + Sync {
    /// Syntaxes this service can read, in preference order
    fn supported_write_syntaxes(&self) -> &[RdfSyntax];

    /// Parse `input` with `syntax`, resolving relative IRIs against `base`
    fn read(&self, input: &[u8], syntax: RdfSyntax, base: &str) -> IoResult<Vec<Triple>>;
}

/// Turtle and N-Triples reader
#[derive(Debug, Clone, Default)]
pub struct TurtleIoService;

impl TurtleIoService {
    const SYNTAXES: [RdfSyntax; 2] = [RdfSyntax::Turtle, RdfSyntax::NTriples];

    pub fn new() -> Self {
        Self
    }
}

impl IoService for TurtleIoService {
    fn supported_write_syntaxes(&self) -> &[RdfSyntax] {
        &Self::SYNTAXES
    }

    fn read(&self, input: &[u8], syntax: RdfSyntax, base: &str) -> IoResult<Vec<Triple>> {
        if !Self::SYNTAXES.contains(&syntax) {
            return Err(IoError::UnsupportedSyntax(syntax));
        }
        // N-Triples is a subset of Turtle
        let text = std::str::from_utf8(input)?;
        turtle::parse(text, base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_turtle_bytes() {
        let io = TurtleIoService::new();
        let body = b"<> <http://purl.org/dc/terms/title> \"x\" .";
        let triples = io
            .read(body, RdfSyntax::Turtle, "http://localhost:8080/x")
            .unwrap();
        assert_eq!(triples.len(), 1);
    }

    #[test]
    fn rejects_unsupported_syntax() {
        let io = TurtleIoService::new();
        let err = io
            .read(b"{}", RdfSyntax::JsonLd, "http://localhost:8080/x")
            .unwrap_err();
        assert!(matches!(err, IoError::UnsupportedSyntax(RdfSyntax::JsonLd)));
    }

    #[test]
    fn rejects_invalid_utf8() {
        let io = TurtleIoService::new();
        let err = io
            .read(&[0xff, 0xfe], RdfSyntax::Turtle, "http://localhost:8080/x")
            .unwrap_err();
        assert!(matches!(err, IoError::Encoding(_)));
    }
}
