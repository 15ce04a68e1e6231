//! Interaction model resolution

use super::error::{PutError, Stop};
use crate::http::LdpRequest;
use crate::io::{IoService, RdfSyntax};
use crate::resource::{InteractionModel, Resource};
use crate::storage::ResourceService;
use tracing::debug;

/// What the request will be stored as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// The model passed to the store
    pub interaction_model: InteractionModel,
    /// Structured syntax negotiated from the content type, if any
    pub syntax: Option<RdfSyntax>,
    /// An RDF description replacing a binary's metadata
    pub binary_description: bool,
}

impl Resolution {
    /// The model reported in type links; a rewritten binary description
    /// reports as an RDF source.
    pub fn effective_model(&self) -> InteractionModel {
        if self.binary_description && self.interaction_model == InteractionModel::NonRdfSource {
            InteractionModel::RdfSource
        } else {
            self.interaction_model
        }
    }

    /// True when the body is stored as opaque bytes
    pub fn is_binary(&self) -> bool {
        self.interaction_model == InteractionModel::NonRdfSource && self.syntax.is_none()
    }
}

/// Structured syntax the IO service can read for `content_type`
pub fn negotiate_syntax(request: &LdpRequest, io: &dyn IoService) -> Option<RdfSyntax> {
    request
        .content_type
        .as_deref()
        .and_then(|ct| RdfSyntax::negotiate(ct, io.supported_write_syntaxes()))
}

/// Decide the interaction model and syntax the request will be stored with
pub fn resolve(request: &LdpRequest, prior: Option<&Resource>, io: &dyn IoService) -> Resolution {
    let syntax = negotiate_syntax(request, io);
    let binary_description = prior
        .map(|r| r.interaction_model == InteractionModel::NonRdfSource)
        .unwrap_or(false)
        && syntax.is_some();

    let interaction_model = if binary_description {
        InteractionModel::NonRdfSource
    } else {
        request
            .type_link()
            .and_then(|link| InteractionModel::from_iri(&link.uri))
            .filter(InteractionModel::is_concrete)
            .or_else(|| prior.map(|r| r.interaction_model))
            .unwrap_or_else(|| heuristic(request, syntax))
    };

    debug!(
        identifier = %request.internal_identifier(),
        interaction_model = %interaction_model,
        binary_description,
        "resolved interaction model"
    );

    Resolution {
        interaction_model,
        syntax,
        binary_description,
    }
}

/// Verify the store accepts the resolved model and that it does not change
/// the type of `prior`
///
/// Runs after the preconditions, so a stale validator wins over a conflict.
pub fn check(
    resolution: &Resolution,
    prior: Option<&Resource>,
    resources: &dyn ResourceService,
) -> Result<(), Stop> {
    let interaction_model = resolution.interaction_model;
    if !resources.supports(interaction_model) {
        return Err(PutError::UnsupportedInteractionModel(interaction_model).into());
    }

    if let Some(prior) = prior {
        if !resolution.binary_description && !interaction_model.is_subtype_of(prior.interaction_model) {
            return Err(PutError::TypeConflict {
                from: prior.interaction_model,
                to: interaction_model,
            }
            .into());
        }
    }
    Ok(())
}

/// Declared content with no readable syntax is binary; anything else is RDF
fn heuristic(request: &LdpRequest, syntax: Option<RdfSyntax>) -> InteractionModel {
    if request.content_type.is_some() && syntax.is_none() {
        InteractionModel::NonRdfSource
    } else {
        InteractionModel::RdfSource
    }
}
