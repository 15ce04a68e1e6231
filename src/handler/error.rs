//! Pipeline failures and short-circuit outcomes

use crate::graph::vocab::server;
use crate::graph::Iri;
use crate::http::{EntityTag, LdpResponse, Link, Status};
use crate::io::IoError;
use crate::resource::InteractionModel;
use crate::service::ServiceError;
use crate::storage::StorageError;
use thiserror::Error;

const PERSISTENCE_MESSAGE: &str =
    "Unable to persist data. Please consult the logs for more information";

/// Why a create-or-replace did not commit
#[derive(Debug, Error)]
pub enum PutError {
    #[error("Unsupported interaction model provided: {0}")]
    UnsupportedInteractionModel(InteractionModel),

    #[error("Cannot change the interaction model from {from} to {to}")]
    TypeConflict {
        from: InteractionModel,
        to: InteractionModel,
    },

    #[error("Content violates constraint {0}")]
    ConstraintViolation(Iri),

    #[error("Digest mismatch: declared {declared}, computed {computed}")]
    DigestMismatch { declared: String, computed: String },

    #[error("Unsupported digest algorithm: {0}")]
    UnsupportedDigest(String),

    #[error("Invalid entity: {0}")]
    InvalidEntity(#[from] IoError),

    #[error("Binary content cannot be stored in the access-control graph")]
    NotAcceptable,

    #[error("Binary storage failed: {0}")]
    BinaryStorage(#[source] ServiceError),

    #[error("Unable to load {identifier}: {source}")]
    Lookup {
        identifier: Iri,
        #[source]
        source: StorageError,
    },

    #[error("Unable to persist {0}")]
    PersistenceFailure(Iri),
}

impl PutError {
    pub fn status(&self) -> Status {
        match self {
            Self::UnsupportedInteractionModel(_)
            | Self::DigestMismatch { .. }
            | Self::UnsupportedDigest(_)
            | Self::InvalidEntity(_) => Status::BadRequest,
            Self::TypeConflict { .. } | Self::ConstraintViolation(_) => Status::Conflict,
            Self::NotAcceptable => Status::NotAcceptable,
            Self::BinaryStorage(_) | Self::Lookup { .. } | Self::PersistenceFailure(_) => {
                Status::InternalServerError
            }
        }
    }

    /// Server-side failures, as opposed to a rejected request
    pub fn is_server_error(&self) -> bool {
        self.status() == Status::InternalServerError
    }

    pub fn into_response(self) -> LdpResponse {
        let response = LdpResponse::new(self.status());
        let body = self.to_string();
        match self {
            Self::UnsupportedInteractionModel(_) => response
                .with_link(Link::constrained_by(server::UNSUPPORTED_INTERACTION_MODEL))
                .with_body(body),
            Self::ConstraintViolation(violation) => response
                .with_link(Link::constrained_by(violation.to_string()))
                .with_body(body),
            Self::NotAcceptable => response,
            Self::BinaryStorage(_) | Self::Lookup { .. } | Self::PersistenceFailure(_) => {
                response.with_body(PERSISTENCE_MESSAGE)
            }
            _ => response.with_body(body),
        }
    }
}

/// A stage's decision to end the pipeline early
#[derive(Debug)]
pub enum Stop {
    NotModified(EntityTag),
    PreconditionFailed(EntityTag),
    Failed(PutError),
}

impl Stop {
    pub fn into_response(self) -> LdpResponse {
        match self {
            Self::NotModified(etag) => LdpResponse::new(Status::NotModified).with_etag(etag),
            Self::PreconditionFailed(etag) => {
                LdpResponse::new(Status::PreconditionFailed).with_etag(etag)
            }
            Self::Failed(err) => err.into_response(),
        }
    }
}

impl From<PutError> for Stop {
    fn from(err: PutError) -> Self {
        Self::Failed(err)
    }
}
