//! Conditional request evaluation

use super::error::{PutError, Stop};
use crate::http::{build_etag_hash, EntityTag, LdpRequest};
use crate::io::RdfSyntax;
use crate::resource::Resource;
use chrono::{DateTime, Utc};
use tracing::debug;

/// The validator and timestamp preconditions are compared against
///
/// Tags hash the public identifier, so the access-control partition and the
/// user partition of one resource validate separately.
pub fn validator(request: &LdpRequest, prior: &Resource) -> (EntityTag, DateTime<Utc>) {
    let structured = request
        .content_type
        .as_deref()
        .and_then(RdfSyntax::by_media_type)
        .is_some();

    match &prior.binary {
        Some(binary) if !structured => {
            let identifier = format!("{}BINARY", request.identifier());
            (
                EntityTag::weak(build_etag_hash(&identifier, binary.modified, None)),
                binary.modified,
            )
        }
        _ => {
            let prefer = request.prefer.as_ref().map(|p| p.as_str());
            (
                EntityTag::strong(build_etag_hash(&request.identifier(), prior.modified, prefer)),
                prior.modified,
            )
        }
    }
}

/// Short-circuit when the request's preconditions disagree with `prior`
///
/// Checks run in RFC 7232 order; HTTP dates carry whole seconds, so
/// timestamps compare at that granularity.
pub fn evaluate(request: &LdpRequest, prior: &Resource) -> Result<(), Stop> {
    let (etag, modified) = validator(request, prior);
    let conditions = &request.preconditions;

    if let Some(if_match) = &conditions.if_match {
        if !if_match.matches_strong(&etag) {
            debug!(identifier = %prior.identifier, etag = %etag, "If-Match failed");
            return Err(Stop::PreconditionFailed(etag));
        }
    } else if let Some(since) = conditions.if_unmodified_since {
        if modified.timestamp() > since.timestamp() {
            debug!(identifier = %prior.identifier, "If-Unmodified-Since failed");
            return Err(Stop::PreconditionFailed(etag));
        }
    }

    if let Some(if_none_match) = &conditions.if_none_match {
        if if_none_match.matches_weak(&etag) {
            debug!(identifier = %prior.identifier, etag = %etag, "If-None-Match matched");
            return Err(Stop::PreconditionFailed(etag));
        }
    } else if let Some(since) = conditions.if_modified_since {
        if modified.timestamp() <= since.timestamp() {
            debug!(identifier = %prior.identifier, "not modified");
            return Err(Stop::NotModified(etag));
        }
    }

    Ok(())
}

/// Binaries cannot live in the access-control graph
pub fn check_acl_target(request: &LdpRequest, syntax: Option<RdfSyntax>) -> Result<(), Stop> {
    if request.is_acl() && syntax.is_none() {
        return Err(PutError::NotAcceptable.into());
    }
    Ok(())
}
