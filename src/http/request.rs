//! The request-facing values a write consumes

use super::digest::Digest;
use super::etag::EntityTagList;
use super::headers::{Link, Prefer};
use crate::graph::Iri;
use crate::resource::internal_identifier;
use bytes::Bytes;
use chrono::{DateTime, Utc};

/// Extension marker selecting the access-control partition
pub const ACL_EXTENSION: &str = "acl";

/// Conditional-request validators
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preconditions {
    pub if_match: Option<EntityTagList>,
    pub if_none_match: Option<EntityTagList>,
    pub if_modified_since: Option<DateTime<Utc>>,
    pub if_unmodified_since: Option<DateTime<Utc>>,
}

impl Preconditions {
    pub fn is_empty(&self) -> bool {
        self.if_match.is_none()
            && self.if_none_match.is_none()
            && self.if_modified_since.is_none()
            && self.if_unmodified_since.is_none()
    }
}

/// A create-or-replace request
#[derive(Debug, Clone)]
pub struct LdpRequest {
    base_url: String,
    pub path: String,
    pub content_type: Option<String>,
    pub body: Bytes,
    pub link: Option<Link>,
    pub digest: Option<Digest>,
    pub prefer: Option<Prefer>,
    pub preconditions: Preconditions,
    pub ext: Option<String>,
}

impl LdpRequest {
    /// A request for `path` (relative to `base_url`) with an empty body
    pub fn new(base_url: impl Into<String>, path: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            base_url,
            path: path.into().trim_start_matches('/').to_string(),
            content_type: None,
            body: Bytes::new(),
            link: None,
            digest: None,
            prefer: None,
            preconditions: Preconditions::default(),
            ext: None,
        }
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.link = Some(link);
        self
    }

    pub fn with_digest(mut self, digest: Digest) -> Self {
        self.digest = Some(digest);
        self
    }

    pub fn with_prefer(mut self, prefer: Prefer) -> Self {
        self.prefer = Some(prefer);
        self
    }

    pub fn with_if_match(mut self, tags: EntityTagList) -> Self {
        self.preconditions.if_match = Some(tags);
        self
    }

    pub fn with_if_none_match(mut self, tags: EntityTagList) -> Self {
        self.preconditions.if_none_match = Some(tags);
        self
    }

    pub fn with_if_modified_since(mut self, instant: DateTime<Utc>) -> Self {
        self.preconditions.if_modified_since = Some(instant);
        self
    }

    pub fn with_if_unmodified_since(mut self, instant: DateTime<Utc>) -> Self {
        self.preconditions.if_unmodified_since = Some(instant);
        self
    }

    pub fn with_ext(mut self, ext: impl Into<String>) -> Self {
        self.ext = Some(ext.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Base URL joined with the path; relative IRIs in the body resolve here
    pub fn request_url(&self) -> String {
        format!("{}{}", self.base_url, self.path)
    }

    /// The public identifier, marked with the extension for ACL writes
    pub fn identifier(&self) -> String {
        if self.is_acl() {
            format!("{}?ext={}", self.request_url(), ACL_EXTENSION)
        } else {
            self.request_url()
        }
    }

    /// The storage key for the target resource
    pub fn internal_identifier(&self) -> Iri {
        internal_identifier(&self.path)
    }

    pub fn is_acl(&self) -> bool {
        self.ext.as_deref() == Some(ACL_EXTENSION)
    }

    /// The `Link` value when it declares `rel="type"`
    pub fn type_link(&self) -> Option<&Link> {
        self.link.as_ref().filter(|l| l.has_rel("type"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_base_and_path() {
        let req = LdpRequest::new("http://localhost:8080", "/x/y");
        assert_eq!(req.base_url(), "http://localhost:8080/");
        assert_eq!(req.request_url(), "http://localhost:8080/x/y");
        assert_eq!(req.internal_identifier().as_str(), "trellis:data/x/y");
    }

    #[test]
    fn acl_extension_marks_identifier() {
        let req = LdpRequest::new("http://localhost:8080/", "x").with_ext("acl");
        assert!(req.is_acl());
        assert_eq!(req.identifier(), "http://localhost:8080/x?ext=acl");

        let other = LdpRequest::new("http://localhost:8080/", "x").with_ext("timemap");
        assert!(!other.is_acl());
        assert_eq!(other.identifier(), "http://localhost:8080/x");
    }

    #[test]
    fn only_type_links_are_hints() {
        let req = LdpRequest::new("http://localhost:8080/", "x")
            .with_link(Link::new("http://example.org/a", "describedby"));
        assert!(req.type_link().is_none());
    }

    #[test]
    fn preconditions_start_empty() {
        let req = LdpRequest::new("http://localhost:8080/", "x");
        assert!(req.preconditions.is_empty());
        let req = req.with_if_none_match(EntityTagList::Any);
        assert!(!req.preconditions.is_empty());
    }
}
