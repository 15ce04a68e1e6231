//! Per-request session: who is acting, and when

use crate::graph::vocab::server;
use crate::graph::Iri;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// The acting agent and operation instant for one request.
///
/// Created once per request and handed by reference to the persistence and
/// audit collaborators.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub identifier: Iri,
    pub agent: Iri,
    pub created: DateTime<Utc>,
}

impl Session {
    pub fn new(agent: Iri) -> Self {
        Self::at(agent, Utc::now())
    }

    /// A session with a fixed operation instant
    pub fn at(agent: Iri, created: DateTime<Utc>) -> Self {
        Self {
            identifier: Iri::new(format!("{}{}", server::SESSION_PREFIX, Uuid::new_v4())),
            agent,
            created,
        }
    }

    pub fn anonymous() -> Self {
        Self::new(Iri::new(server::ANONYMOUS_AGENT))
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}
