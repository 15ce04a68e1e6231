//! Persistence coordination
//!
//! The content write and the audit append run as two tasks on a `JoinSet`.
//! Both are awaited before the outcome is decided; dropping the coordinator's
//! future aborts whichever task is still pending. A succeeded half is not
//! rolled back when the other half fails.

use crate::graph::{Dataset, Iri};
use crate::resource::{Binary, InteractionModel, Session};
use crate::storage::ResourceService;
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error, warn};

/// Lifecycle of one commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitState {
    Assembling,
    Committing,
    Succeeded,
    Failed,
}

/// Everything the content half stores besides the dataset
#[derive(Debug, Clone)]
pub struct ContentWrite {
    pub identifier: Iri,
    pub interaction_model: InteractionModel,
    pub container: Option<Iri>,
    pub binary: Option<Binary>,
    /// Replace an existing resource rather than create one
    pub replace: bool,
}

#[derive(Debug, Clone, Copy)]
enum Half {
    Content,
    Audit,
}

impl std::fmt::Display for Half {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Content => write!(f, "content"),
            Self::Audit => write!(f, "audit"),
        }
    }
}

/// Drives a single create-or-replace plus audit append
#[derive(Debug)]
pub struct PersistenceCoordinator {
    state: CommitState,
}

impl PersistenceCoordinator {
    pub fn new() -> Self {
        Self {
            state: CommitState::Assembling,
        }
    }

    pub fn state(&self) -> CommitState {
        self.state
    }

    /// Issue both writes and reduce their outcomes to one state
    ///
    /// Succeeds only when both halves report `true`. An error, a `false`, or
    /// a panicked task fails the commit.
    pub async fn commit(
        &mut self,
        resources: Arc<dyn ResourceService>,
        session: &Session,
        write: ContentWrite,
        mutable: Dataset,
        immutable: Dataset,
    ) -> CommitState {
        self.state = CommitState::Committing;
        let identifier = write.identifier.clone();
        let mut tasks = JoinSet::new();

        {
            let resources = Arc::clone(&resources);
            let session = session.clone();
            tasks.spawn(async move {
                let outcome = if write.replace {
                    resources
                        .replace(
                            &write.identifier,
                            &session,
                            write.interaction_model,
                            &mutable,
                            write.container.as_ref(),
                            write.binary.as_ref(),
                        )
                        .await
                } else {
                    resources
                        .create(
                            &write.identifier,
                            &session,
                            write.interaction_model,
                            &mutable,
                            write.container.as_ref(),
                            write.binary.as_ref(),
                        )
                        .await
                };
                (Half::Content, outcome)
            });
        }

        {
            let identifier = identifier.clone();
            let session = session.clone();
            tasks.spawn(async move {
                let outcome = resources.add(&identifier, &session, &immutable).await;
                (Half::Audit, outcome)
            });
        }

        let mut succeeded = true;
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((half, Ok(true))) => {
                    debug!(identifier = %identifier, half = %half, "commit half succeeded");
                }
                Ok((half, Ok(false))) => {
                    warn!(identifier = %identifier, half = %half, "commit half declined by store");
                    succeeded = false;
                }
                Ok((half, Err(e))) => {
                    error!(identifier = %identifier, half = %half, error = %e, "commit half failed");
                    succeeded = false;
                }
                Err(e) => {
                    error!(identifier = %identifier, error = %e, "commit task did not complete");
                    succeeded = false;
                }
            }
        }

        self.state = if succeeded {
            CommitState::Succeeded
        } else {
            CommitState::Failed
        };
        self.state
    }
}

impl Default for PersistenceCoordinator {
    fn default() -> Self {
        Self::new()
    }
}
