//! The response contract a write produces

use super::etag::EntityTag;
use super::headers::Link;

/// Statuses the write path can produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    Ok,
    Created,
    NoContent,
    NotModified,
    BadRequest,
    NotAcceptable,
    Conflict,
    PreconditionFailed,
    InternalServerError,
}

impl Status {
    pub fn code(&self) -> u16 {
        match self {
            Self::Ok => 200,
            Self::Created => 201,
            Self::NoContent => 204,
            Self::NotModified => 304,
            Self::BadRequest => 400,
            Self::NotAcceptable => 406,
            Self::Conflict => 409,
            Self::PreconditionFailed => 412,
            Self::InternalServerError => 500,
        }
    }

    pub fn reason(&self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Created => "Created",
            Self::NoContent => "No Content",
            Self::NotModified => "Not Modified",
            Self::BadRequest => "Bad Request",
            Self::NotAcceptable => "Not Acceptable",
            Self::Conflict => "Conflict",
            Self::PreconditionFailed => "Precondition Failed",
            Self::InternalServerError => "Internal Server Error",
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code())
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.code(), self.reason())
    }
}

/// Status, headers and an optional plain-text body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LdpResponse {
    pub status: Status,
    pub links: Vec<Link>,
    pub location: Option<String>,
    pub etag: Option<EntityTag>,
    pub body: Option<String>,
}

impl LdpResponse {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            links: Vec::new(),
            location: None,
            etag: None,
            body: None,
        }
    }

    pub fn with_link(mut self, link: Link) -> Self {
        self.links.push(link);
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_etag(mut self, etag: EntityTag) -> Self {
        self.etag = Some(etag);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// URIs of every `rel="type"` link, in header order
    pub fn type_links(&self) -> Vec<&str> {
        self.links
            .iter()
            .filter(|l| l.has_rel("type"))
            .map(|l| l.uri.as_str())
            .collect()
    }

    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| "text/plain")
    }
}

impl std::fmt::Display for LdpResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "HTTP/1.1 {}", self.status)?;
        if let Some(location) = &self.location {
            writeln!(f, "Location: {}", location)?;
        }
        if let Some(etag) = &self.etag {
            writeln!(f, "ETag: {}", etag)?;
        }
        for link in &self.links {
            writeln!(f, "Link: {}", link)?;
        }
        if let Some(content_type) = self.content_type() {
            writeln!(f, "Content-Type: {}", content_type)?;
        }
        if let Some(body) = &self.body {
            writeln!(f)?;
            writeln!(f, "{}", body)?;
        }
        Ok(())
    }
}
