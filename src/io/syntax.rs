//! RDF syntaxes and media-type compatibility

use serde::{Deserialize, Serialize};

/// A structured-data serialization the server knows by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RdfSyntax {
    Turtle,
    NTriples,
    JsonLd,
    NQuads,
}

impl RdfSyntax {
    pub const ALL: [RdfSyntax; 4] = [Self::Turtle, Self::NTriples, Self::JsonLd, Self::NQuads];

    pub fn media_type(&self) -> &'static str {
        match self {
            Self::Turtle => "text/turtle",
            Self::NTriples => "application/n-triples",
            Self::JsonLd => "application/ld+json",
            Self::NQuads => "application/n-quads",
        }
    }

    /// The known syntax named exactly by `content_type`; parameters and case
    /// are ignored, wildcards match nothing
    pub fn by_media_type(content_type: &str) -> Option<Self> {
        let requested = MediaType::parse(content_type)?;
        Self::ALL.into_iter().find(|s| {
            MediaType::parse(s.media_type())
                .map(|m| m == requested)
                .unwrap_or(false)
        })
    }

    /// First of `supported` compatible with `content_type`
    pub fn negotiate(content_type: &str, supported: &[RdfSyntax]) -> Option<Self> {
        let requested = MediaType::parse(content_type)?;
        supported.iter().copied().find(|s| {
            MediaType::parse(s.media_type())
                .map(|m| requested.is_compatible(&m))
                .unwrap_or(false)
        })
    }
}

impl std::fmt::Display for RdfSyntax {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.media_type())
    }
}

/// `type/subtype`, parameters dropped, lowercased
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaType {
    pub kind: String,
    pub subtype: String,
}

impl MediaType {
    pub fn parse(value: &str) -> Option<Self> {
        let essence = value.split(';').next()?.trim();
        let (kind, subtype) = essence.split_once('/')?;
        let (kind, subtype) = (kind.trim(), subtype.trim());
        if kind.is_empty() || subtype.is_empty() {
            return None;
        }
        Some(Self {
            kind: kind.to_ascii_lowercase(),
            subtype: subtype.to_ascii_lowercase(),
        })
    }

    /// Equal, or either side a wildcard
    pub fn is_compatible(&self, other: &MediaType) -> bool {
        let kind = self.kind == "*" || other.kind == "*" || self.kind == other.kind;
        let subtype =
            self.subtype == "*" || other.subtype == "*" || self.subtype == other.subtype;
        kind && subtype
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn by_media_type_ignores_parameters_and_case() {
        assert_eq!(
            RdfSyntax::by_media_type("Text/Turtle; charset=UTF-8"),
            Some(RdfSyntax::Turtle)
        );
        assert_eq!(
            RdfSyntax::by_media_type("application/ld+json"),
            Some(RdfSyntax::JsonLd)
        );
        assert_eq!(RdfSyntax::by_media_type("image/png"), None);
        assert_eq!(RdfSyntax::by_media_type("garbage"), None);
    }

    #[test]
    fn by_media_type_does_not_expand_wildcards() {
        assert_eq!(RdfSyntax::by_media_type("*/*"), None);
        assert_eq!(RdfSyntax::by_media_type("text/*"), None);
        assert_eq!(
            RdfSyntax::negotiate("text/*", &RdfSyntax::ALL),
            Some(RdfSyntax::Turtle)
        );
    }

    #[test]
    fn negotiate_only_picks_supported_syntaxes() {
        let supported = [RdfSyntax::Turtle, RdfSyntax::NTriples];
        assert_eq!(
            RdfSyntax::negotiate("application/n-triples", &supported),
            Some(RdfSyntax::NTriples)
        );
        assert_eq!(RdfSyntax::negotiate("application/ld+json", &supported), None);
    }

    #[test]
    fn wildcards_are_compatible() {
        let any = MediaType::parse("*/*").unwrap();
        let turtle = MediaType::parse("text/turtle").unwrap();
        assert!(any.is_compatible(&turtle));
        let text = MediaType::parse("text/*").unwrap();
        assert!(text.is_compatible(&turtle));
        let image = MediaType::parse("image/*").unwrap();
        assert!(!image.is_compatible(&turtle));
    }
}
