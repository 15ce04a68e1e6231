//! The create-or-replace pipeline
//!
//! Stages run in order and each returns `Result<_, Stop>`; the first `Stop`
//! becomes the response and nothing downstream of it runs.
//!
//! ```text
//! resolve → cache → check → materialize → assemble → audit → commit → respond
//! ```

mod assemble;
mod audit;
mod cache;
mod commit;
mod content;
mod error;
mod resolve;
mod response;

pub use commit::{CommitState, ContentWrite, PersistenceCoordinator};
pub use error::{PutError, Stop};
pub use resolve::Resolution;
pub use response::type_links;

use crate::http::{LdpRequest, LdpResponse, Status};
use crate::resource::{Resource, ResourceState, Session, Skolemizer};
use crate::service::ServiceBundle;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Handles PUT: creates a resource or replaces its content
#[derive(Debug, Clone)]
pub struct PutHandler {
    services: ServiceBundle,
    success_status: Status,
}

impl PutHandler {
    pub fn new(services: ServiceBundle) -> Self {
        Self {
            services,
            success_status: Status::NoContent,
        }
    }

    /// Status returned when an existing resource is replaced
    pub fn with_success_status(mut self, status: Status) -> Self {
        self.success_status = status;
        self
    }

    pub fn services(&self) -> &ServiceBundle {
        &self.services
    }

    /// Load the target's current state, then run the pipeline
    pub async fn handle(&self, request: LdpRequest, session: Session) -> LdpResponse {
        let identifier = request.internal_identifier();
        match self.services.resources.get(&identifier).await {
            Ok(state) => self.handle_with(request, state, session).await,
            Err(source) => {
                let err = PutError::Lookup { identifier, source };
                error!(error = %err, "unable to load prior resource");
                err.into_response()
            }
        }
    }

    /// Run the pipeline against an already loaded prior state
    pub async fn handle_with(
        &self,
        request: LdpRequest,
        prior: ResourceState,
        session: Session,
    ) -> LdpResponse {
        let identifier = request.internal_identifier();
        match self.run(&request, prior.into_resource(), &session).await {
            Ok(response) => {
                info!(identifier = %identifier, status = response.status.code(), "resource stored");
                response
            }
            Err(Stop::Failed(err)) if err.is_server_error() => {
                error!(identifier = %identifier, error = %err, "write failed");
                err.into_response()
            }
            Err(Stop::Failed(err)) => {
                warn!(identifier = %identifier, error = %err, "write rejected");
                err.into_response()
            }
            Err(stop) => {
                info!(identifier = %identifier, outcome = ?stop, "precondition short-circuit");
                stop.into_response()
            }
        }
    }

    async fn run(
        &self,
        request: &LdpRequest,
        prior: Option<Resource>,
        session: &Session,
    ) -> Result<LdpResponse, Stop> {
        let services = &self.services;
        let identifier = request.internal_identifier();
        let skolemizer = Skolemizer::new(request.base_url());

        let resolution = resolve::resolve(request, prior.as_ref(), services.io.as_ref());

        if let Some(prior) = &prior {
            cache::evaluate(request, prior)?;
        }
        cache::check_acl_target(request, resolution.syntax)?;
        resolve::check(&resolution, prior.as_ref(), services.resources.as_ref())?;

        let materialized =
            content::materialize(request, &resolution, prior.as_ref(), services, &skolemizer).await?;

        let mutable = assemble::assemble(
            materialized.dataset,
            prior.as_ref(),
            &assemble::preserved_graph(request),
        );
        let created = prior.is_none();
        let immutable = audit::audit_dataset(
            services.audit.as_ref(),
            &identifier,
            session,
            created,
            &skolemizer,
        );

        let write = ContentWrite {
            container: services.resources.get_container(&identifier),
            identifier: identifier.clone(),
            interaction_model: resolution.interaction_model,
            binary: materialized.binary,
            replace: !created,
        };
        let mut coordinator = PersistenceCoordinator::new();
        let state = coordinator
            .commit(Arc::clone(&services.resources), session, write, mutable, immutable)
            .await;
        if state != CommitState::Succeeded {
            return Err(PutError::PersistenceFailure(identifier).into());
        }

        if let Err(e) = services.mementos.put(&identifier, session.created).await {
            warn!(identifier = %identifier, error = %e, "unable to record memento");
        }

        Ok(response::success(
            request,
            created,
            self.success_status,
            resolution.effective_model(),
        ))
    }
}
