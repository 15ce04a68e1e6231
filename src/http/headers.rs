//! `Link` and `Prefer` header values

use crate::graph::vocab::ldp;

/// A single `<uri>; rel="..."` link value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub uri: String,
    pub rel: Option<String>,
}

impl Link {
    pub fn new(uri: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            rel: Some(rel.into()),
        }
    }

    /// `<uri>; rel="type"`
    pub fn type_link(uri: impl Into<String>) -> Self {
        Self::new(uri, "type")
    }

    /// `<uri>; rel="http://www.w3.org/ns/ldp#constrainedBy"`
    pub fn constrained_by(uri: impl Into<String>) -> Self {
        Self::new(uri, ldp::CONSTRAINED_BY)
    }

    pub fn has_rel(&self, rel: &str) -> bool {
        self.rel
            .as_deref()
            .map(|r| r.split_whitespace().any(|r| r == rel))
            .unwrap_or(false)
    }
}

impl std::fmt::Display for Link {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<{}>", self.uri)?;
        if let Some(rel) = &self.rel {
            write!(f, "; rel=\"{}\"", rel)?;
        }
        Ok(())
    }
}

impl std::str::FromStr for Link {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let rest = s
            .strip_prefix('<')
            .ok_or_else(|| format!("invalid link: {}", s))?;
        let (uri, params) = rest
            .split_once('>')
            .ok_or_else(|| format!("invalid link: {}", s))?;

        let rel = params
            .split(';')
            .filter_map(|p| p.trim().split_once('='))
            .find(|(k, _)| k.trim().eq_ignore_ascii_case("rel"))
            .map(|(_, v)| v.trim().trim_matches('"').to_string());

        Ok(Self {
            uri: uri.trim().to_string(),
            rel,
        })
    }
}

/// A `Prefer` request header
///
/// The raw value feeds the entity tag; `return`, `include` and `omit` are
/// broken out for callers that select representations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prefer {
    raw: String,
    pub preference: Option<String>,
    pub include: Vec<String>,
    pub omit: Vec<String>,
}

impl Prefer {
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl std::str::FromStr for Prefer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut prefer = Prefer {
            raw: s.trim().to_string(),
            preference: None,
            include: Vec::new(),
            omit: Vec::new(),
        };
        for part in s.split(';') {
            let Some((key, value)) = part.trim().split_once('=') else {
                continue;
            };
            let value = value.trim().trim_matches('"');
            match key.trim().to_ascii_lowercase().as_str() {
                "return" => prefer.preference = Some(value.to_string()),
                "include" => prefer
                    .include
                    .extend(value.split_whitespace().map(str::to_string)),
                "omit" => prefer
                    .omit
                    .extend(value.split_whitespace().map(str::to_string)),
                _ => {}
            }
        }
        Ok(prefer)
    }
}

impl std::fmt::Display for Prefer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}
