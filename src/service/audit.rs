//! Audit record generation

use crate::graph::vocab::{activity_streams, prov, rdf, server, xsd};
use crate::graph::{BlankNode, Iri, Literal, Quad};
use crate::resource::Session;
use chrono::SecondsFormat;

/// Produces the history records appended for each write
pub trait AuditService: Send + Sync {
    /// Quads recording that `subject` was created
    fn creation(&self, subject: &Iri, session: &Session) -> Vec<Quad>;

    /// Quads recording that `subject` was updated
    fn update(&self, subject: &Iri, session: &Session) -> Vec<Quad>;
}

/// PROV-O activity records in the audit graph
#[derive(Debug, Clone, Default)]
pub struct DefaultAuditService;

impl DefaultAuditService {
    pub fn new() -> Self {
        Self
    }

    fn activity(subject: &Iri, session: &Session, kind: &str) -> Vec<Quad> {
        let graph = Iri::new(server::PREFER_AUDIT);
        let activity = BlankNode::new();
        let at = session.created.to_rfc3339_opts(SecondsFormat::Millis, true);

        vec![
            Quad::new(
                graph.clone(),
                subject.clone(),
                Iri::new(prov::WAS_GENERATED_BY),
                activity.clone(),
            ),
            Quad::new(
                graph.clone(),
                activity.clone(),
                Iri::new(rdf::TYPE),
                Iri::new(prov::ACTIVITY),
            ),
            Quad::new(graph.clone(), activity.clone(), Iri::new(rdf::TYPE), Iri::new(kind)),
            Quad::new(
                graph.clone(),
                activity.clone(),
                Iri::new(prov::WAS_ASSOCIATED_WITH),
                session.agent.clone(),
            ),
            Quad::new(
                graph,
                activity,
                Iri::new(prov::AT_TIME),
                Literal::typed(at, Iri::new(xsd::DATE_TIME)),
            ),
        ]
    }
}

impl AuditService for DefaultAuditService {
    fn creation(&self, subject: &Iri, session: &Session) -> Vec<Quad> {
        Self::activity(subject, session, activity_streams::CREATE)
    }

    fn update(&self, subject: &Iri, session: &Session) -> Vec<Quad> {
        Self::activity(subject, session, activity_streams::UPDATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Term;

    #[test]
    fn creation_records_activity() {
        let audit = DefaultAuditService::new();
        let subject = Iri::new("trellis:data/x");
        let session = Session::new(Iri::new("http://example.org/agent"));
        let quads = audit.creation(&subject, &session);

        assert_eq!(quads.len(), 5);
        assert!(quads.iter().all(|q| q.graph.as_str() == server::PREFER_AUDIT));
        assert_eq!(quads[0].subject, Term::Iri(subject));
        assert!(quads
            .iter()
            .any(|q| q.object == Term::iri(activity_streams::CREATE)));
        assert!(quads
            .iter()
            .any(|q| q.object == Term::iri("http://example.org/agent")));
    }

    #[test]
    fn update_uses_fresh_activity() {
        let audit = DefaultAuditService::new();
        let subject = Iri::new("trellis:data/x");
        let session = Session::anonymous();
        let first = audit.update(&subject, &session);
        let second = audit.update(&subject, &session);

        assert!(first
            .iter()
            .any(|q| q.object == Term::iri(activity_streams::UPDATE)));
        assert_ne!(first[0].object, second[0].object);
    }
}
