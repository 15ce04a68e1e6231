//! Turtle / N-Triples parser producing triples
//!
//! Covers the subset request bodies use in practice: directives, prefixed
//! names, predicate and object lists, blank node property lists, collections
//! and literal shorthand.

use std::collections::HashMap;

use super::lexer::{tokenize, Token, TokenKind};
use super::{IoError, IoResult};
use crate::graph::vocab::{rdf, xsd};
use crate::graph::{BlankNode, Iri, Literal, Term, Triple};

/// Parse a document, resolving relative IRIs against `base`.
///
/// Blank node labels are scoped to the document: each distinct label maps to
/// a freshly minted blank node.
pub(crate) fn parse(input: &str, base: &str) -> IoResult<Vec<Triple>> {
    let parser = Parser {
        tokens: tokenize(input)?,
        pos: 0,
        prefixes: HashMap::new(),
        base: base.to_string(),
        labels: HashMap::new(),
        triples: Vec::new(),
    };
    parser.parse()
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    prefixes: HashMap<String, String>,
    base: String,
    labels: HashMap<String, BlankNode>,
    triples: Vec<Triple>,
}

impl Parser {
    fn parse(mut self) -> IoResult<Vec<Triple>> {
        while !self.at(&TokenKind::Eof) {
            self.statement()?;
        }
        Ok(self.triples)
    }

    fn current(&self) -> &Token {
        // tokenize always ends with Eof, and parsing never advances past it
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn at(&self, kind: &TokenKind) -> bool {
        &self.current().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> IoResult<()> {
        if self.at(&kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected(what))
        }
    }

    fn unexpected(&self, what: &str) -> IoError {
        let token = self.current();
        IoError::parse(
            token.position,
            format!("expected {}, found {:?}", what, token.kind),
        )
    }

    fn statement(&mut self) -> IoResult<()> {
        match self.current().kind {
            TokenKind::PrefixDirective => {
                self.advance();
                self.prefix_declaration()?;
                self.expect(TokenKind::Dot, "'.' after @prefix")
            }
            TokenKind::SparqlPrefix => {
                self.advance();
                self.prefix_declaration()
            }
            TokenKind::BaseDirective => {
                self.advance();
                self.base_declaration()?;
                self.expect(TokenKind::Dot, "'.' after @base")
            }
            TokenKind::SparqlBase => {
                self.advance();
                self.base_declaration()
            }
            _ => {
                self.triples_statement()?;
                self.expect(TokenKind::Dot, "'.' to end the statement")
            }
        }
    }

    fn prefix_declaration(&mut self) -> IoResult<()> {
        let token = self.advance();
        let TokenKind::PrefixedName { prefix, local } = token.kind else {
            return Err(IoError::parse(token.position, "expected a prefix name"));
        };
        if !local.is_empty() {
            return Err(IoError::parse(token.position, "prefix name must end with ':'"));
        }
        let namespace = self.iri_ref()?;
        self.prefixes.insert(prefix, namespace.as_str().to_string());
        Ok(())
    }

    fn base_declaration(&mut self) -> IoResult<()> {
        let base = self.iri_ref()?;
        self.base = base.as_str().to_string();
        Ok(())
    }

    fn iri_ref(&mut self) -> IoResult<Iri> {
        let token = self.advance();
        match token.kind {
            TokenKind::IriRef(raw) => Ok(Iri::new(resolve(&self.base, &raw))),
            _ => Err(IoError::parse(token.position, "expected an IRI")),
        }
    }

    fn triples_statement(&mut self) -> IoResult<()> {
        if self.at(&TokenKind::LBracket) {
            let subject = self.blank_node_property_list()?;
            // `[ ... ] .` alone is a complete statement
            if self.at(&TokenKind::Dot) {
                return Ok(());
            }
            return self.predicate_object_list(&subject);
        }
        let subject = self.subject()?;
        self.predicate_object_list(&subject)
    }

    fn subject(&mut self) -> IoResult<Term> {
        match self.current().kind {
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => Ok(Term::Iri(self.iri()?)),
            TokenKind::BlankLabel(_) => self.blank_label(),
            TokenKind::LParen => self.collection(),
            _ => Err(self.unexpected("a subject")),
        }
    }

    fn iri(&mut self) -> IoResult<Iri> {
        let token = self.advance();
        match token.kind {
            TokenKind::IriRef(raw) => Ok(Iri::new(resolve(&self.base, &raw))),
            TokenKind::PrefixedName { prefix, local } => {
                let namespace = self
                    .prefixes
                    .get(&prefix)
                    .ok_or_else(|| IoError::UndefinedPrefix(prefix.clone()))?;
                Ok(Iri::new(format!("{}{}", namespace, local)))
            }
            _ => Err(IoError::parse(token.position, "expected an IRI")),
        }
    }

    fn blank_label(&mut self) -> IoResult<Term> {
        let token = self.advance();
        let TokenKind::BlankLabel(label) = token.kind else {
            return Err(IoError::parse(token.position, "expected a blank node"));
        };
        let node = self.labels.entry(label).or_default().clone();
        Ok(Term::Blank(node))
    }

    fn predicate_object_list(&mut self, subject: &Term) -> IoResult<()> {
        loop {
            let predicate = self.verb()?;
            self.object_list(subject, &predicate)?;
            if !self.at(&TokenKind::Semicolon) {
                return Ok(());
            }
            while self.at(&TokenKind::Semicolon) {
                self.advance();
            }
            // a trailing ';' is allowed before '.' or ']'
            if self.at(&TokenKind::Dot) || self.at(&TokenKind::RBracket) {
                return Ok(());
            }
        }
    }

    fn verb(&mut self) -> IoResult<Iri> {
        if self.at(&TokenKind::A) {
            self.advance();
            return Ok(Iri::new(rdf::TYPE));
        }
        match self.current().kind {
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => self.iri(),
            _ => Err(self.unexpected("a predicate")),
        }
    }

    fn object_list(&mut self, subject: &Term, predicate: &Iri) -> IoResult<()> {
        loop {
            let object = self.object()?;
            self.triples
                .push(Triple::new(subject.clone(), predicate.clone(), object));
            if !self.at(&TokenKind::Comma) {
                return Ok(());
            }
            self.advance();
        }
    }

    fn object(&mut self) -> IoResult<Term> {
        match self.current().kind.clone() {
            TokenKind::IriRef(_) | TokenKind::PrefixedName { .. } => Ok(Term::Iri(self.iri()?)),
            TokenKind::BlankLabel(_) => self.blank_label(),
            TokenKind::LBracket => self.blank_node_property_list(),
            TokenKind::LParen => self.collection(),
            TokenKind::String(value) => {
                self.advance();
                self.literal_suffix(value)
            }
            TokenKind::Integer(text) => {
                self.advance();
                Ok(Literal::typed(text, Iri::new(xsd::INTEGER)).into())
            }
            TokenKind::Decimal(text) => {
                self.advance();
                Ok(Literal::typed(text, Iri::new(xsd::DECIMAL)).into())
            }
            TokenKind::Double(text) => {
                self.advance();
                Ok(Literal::typed(text, Iri::new(xsd::DOUBLE)).into())
            }
            TokenKind::Boolean(value) => {
                self.advance();
                Ok(Literal::typed(value.to_string(), Iri::new(xsd::BOOLEAN)).into())
            }
            _ => Err(self.unexpected("an object")),
        }
    }

    fn literal_suffix(&mut self, value: String) -> IoResult<Term> {
        match self.current().kind.clone() {
            TokenKind::LangTag(lang) => {
                self.advance();
                Ok(Literal::lang(value, lang).into())
            }
            TokenKind::DoubleCaret => {
                self.advance();
                let datatype = self.iri()?;
                Ok(Literal::typed(value, datatype).into())
            }
            _ => Ok(Literal::string(value).into()),
        }
    }

    /// `[ ... ]`, returning the fresh blank node it describes
    fn blank_node_property_list(&mut self) -> IoResult<Term> {
        self.expect(TokenKind::LBracket, "'['")?;
        let node = Term::Blank(BlankNode::new());
        if !self.at(&TokenKind::RBracket) {
            self.predicate_object_list(&node)?;
        }
        self.expect(TokenKind::RBracket, "']'")?;
        Ok(node)
    }

    /// `( ... )` as an `rdf:first`/`rdf:rest` chain; `()` is `rdf:nil`
    fn collection(&mut self) -> IoResult<Term> {
        self.expect(TokenKind::LParen, "'('")?;
        let mut items = Vec::new();
        while !self.at(&TokenKind::RParen) {
            if self.at(&TokenKind::Eof) {
                return Err(self.unexpected("')'"));
            }
            items.push(self.object()?);
        }
        self.advance();

        let mut rest = Term::iri(rdf::NIL);
        for item in items.into_iter().rev() {
            let cell = Term::Blank(BlankNode::new());
            self.triples
                .push(Triple::new(cell.clone(), Iri::new(rdf::FIRST), item));
            self.triples
                .push(Triple::new(cell.clone(), Iri::new(rdf::REST), rest));
            rest = cell;
        }
        Ok(rest)
    }
}

/// Resolve `reference` against `base` (RFC 3986 §5.2, without normalization
/// beyond dot-segment removal).
pub(crate) fn resolve(base: &str, reference: &str) -> String {
    if has_scheme(reference) {
        return reference.to_string();
    }
    let base = base.split('#').next().unwrap_or(base);
    if reference.is_empty() {
        return base.to_string();
    }
    if reference.starts_with('#') {
        return format!("{}{}", base, reference);
    }

    let (scheme, rest) = match base.split_once(':') {
        Some((scheme, rest)) => (scheme, rest),
        None => return reference.to_string(),
    };
    if reference.starts_with("//") {
        return format!("{}:{}", scheme, reference);
    }

    let (authority, base_path) = match rest.strip_prefix("//") {
        Some(after) => {
            let end = after.find(|c: char| c == '/' || c == '?').unwrap_or(after.len());
            (format!("//{}", &after[..end]), &after[end..])
        }
        None => (String::new(), rest),
    };
    let base_path = base_path.split('?').next().unwrap_or(base_path);

    if reference.starts_with('?') {
        return format!("{}:{}{}{}", scheme, authority, base_path, reference);
    }

    let merged = if reference.starts_with('/') {
        reference.to_string()
    } else {
        let dir = match base_path.rfind('/') {
            Some(i) => &base_path[..=i],
            None if !authority.is_empty() => "/",
            None => "",
        };
        format!("{}{}", dir, reference)
    };

    let (path, query) = match merged.split_once('?') {
        Some((p, q)) => (p.to_string(), Some(q)),
        None => (merged.clone(), None),
    };
    let mut out = format!("{}:{}{}", scheme, authority, remove_dot_segments(&path));
    if let Some(query) = query {
        out.push('?');
        out.push_str(query);
    }
    out
}

fn has_scheme(reference: &str) -> bool {
    let Some(colon) = reference.find(':') else {
        return false;
    };
    let scheme = &reference[..colon];
    !scheme.is_empty()
        && scheme.starts_with(|c: char| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

fn remove_dot_segments(path: &str) -> String {
    let mut segments: Vec<&str> = Vec::new();
    let absolute = path.starts_with('/');
    let parts: Vec<&str> = path.split('/').collect();
    let last = parts.len().saturating_sub(1);
    for (i, segment) in parts.iter().enumerate() {
        match *segment {
            "." => {
                if i == last {
                    segments.push("");
                }
            }
            ".." => {
                if segments.len() > usize::from(absolute) {
                    segments.pop();
                }
                if i == last {
                    segments.push("");
                }
            }
            s => segments.push(s),
        }
    }
    let joined = segments.join("/");
    if absolute && !joined.starts_with('/') {
        format!("/{}", joined)
    } else {
        joined
    }
}
