//! Entity tags and conditional-request validators

use chrono::{DateTime, Utc};
use sha2::{Digest as _, Sha256};

/// An HTTP entity tag
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityTag {
    pub value: String,
    pub weak: bool,
}

impl EntityTag {
    pub fn strong(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            weak: false,
        }
    }

    pub fn weak(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            weak: true,
        }
    }

    /// Strong comparison: both strong and equal values
    pub fn strong_eq(&self, other: &EntityTag) -> bool {
        !self.weak && !other.weak && self.value == other.value
    }

    /// Weak comparison: equal values, weakness ignored
    pub fn weak_eq(&self, other: &EntityTag) -> bool {
        self.value == other.value
    }
}

impl std::fmt::Display for EntityTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.weak {
            write!(f, "W/\"{}\"", self.value)
        } else {
            write!(f, "\"{}\"", self.value)
        }
    }
}

impl std::str::FromStr for EntityTag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (weak, rest) = match s.strip_prefix("W/") {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let value = rest
            .strip_prefix('"')
            .and_then(|r| r.strip_suffix('"'))
            .ok_or_else(|| format!("invalid entity tag: {}", s))?;
        if value.contains('"') {
            return Err(format!("invalid entity tag: {}", s));
        }
        Ok(Self {
            value: value.to_string(),
            weak,
        })
    }
}

/// The value of an If-Match / If-None-Match header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityTagList {
    /// `*`
    Any,
    Tags(Vec<EntityTag>),
}

impl EntityTagList {
    pub fn matches_strong(&self, tag: &EntityTag) -> bool {
        match self {
            Self::Any => true,
            Self::Tags(tags) => tags.iter().any(|t| t.strong_eq(tag)),
        }
    }

    pub fn matches_weak(&self, tag: &EntityTag) -> bool {
        match self {
            Self::Any => true,
            Self::Tags(tags) => tags.iter().any(|t| t.weak_eq(tag)),
        }
    }
}

impl std::str::FromStr for EntityTagList {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim() == "*" {
            return Ok(Self::Any);
        }
        s.split(',')
            .filter(|part| !part.trim().is_empty())
            .map(str::parse)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::Tags)
    }
}

/// Opaque validator hash: hex SHA-256 over identifier, modification time and
/// the representation preference.
pub fn build_etag_hash(identifier: &str, modified: DateTime<Utc>, prefer: Option<&str>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(identifier.as_bytes());
    hasher.update(b".");
    hasher.update(modified.timestamp_millis().to_string().as_bytes());
    if let Some(prefer) = prefer {
        hasher.update(b".");
        hasher.update(prefer.as_bytes());
    }
    hex::encode(hasher.finalize())
}
