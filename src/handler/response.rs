//! Success responses

use crate::http::{LdpRequest, LdpResponse, Link, Status};
use crate::resource::InteractionModel;

/// One `rel="type"` link per model in the hierarchy, most specific first
pub fn type_links(model: InteractionModel) -> impl Iterator<Item = Link> {
    model
        .ancestors()
        .into_iter()
        .map(|m| Link::type_link(m.as_str()))
}

/// Created with a location for new resources, `status` otherwise
pub fn success(
    request: &LdpRequest,
    created: bool,
    status: Status,
    effective_model: InteractionModel,
) -> LdpResponse {
    let mut response = if created {
        LdpResponse::new(Status::Created).with_location(request.identifier())
    } else {
        LdpResponse::new(status)
    };
    response.links.extend(type_links(effective_model));
    response
}
