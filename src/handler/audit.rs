//! Audit record integration

use crate::graph::{Dataset, Iri};
use crate::resource::{Session, Skolemizer};
use crate::service::AuditService;

/// Creation or update records for `identifier`, skolemized
///
/// The returned dataset is append-only history; the pipeline never reads it back.
pub fn audit_dataset(
    audit: &dyn AuditService,
    identifier: &Iri,
    session: &Session,
    created: bool,
    skolemizer: &Skolemizer,
) -> Dataset {
    let quads = if created {
        audit.creation(identifier, session)
    } else {
        audit.update(identifier, session)
    };
    quads.into_iter().map(|q| skolemizer.quad(q)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::vocab::{activity_streams, server};
    use crate::graph::{Quad, Term};
    use crate::resource::internal_identifier;
    use crate::service::DefaultAuditService;

    const BASE: &str = "http://localhost:8080/";

    #[test]
    fn creation_vs_update() {
        let id = internal_identifier("x");
        let session = Session::anonymous();
        let skolem = Skolemizer::new(BASE);
        let audit = DefaultAuditService::new();

        let created = audit_dataset(&audit, &id, &session, true, &skolem);
        assert!(created.iter().any(|q| q.object == Term::iri(activity_streams::CREATE)));
        let updated = audit_dataset(&audit, &id, &session, false, &skolem);
        assert!(updated.iter().any(|q| q.object == Term::iri(activity_streams::UPDATE)));
    }

    #[test]
    fn blank_nodes_become_stable_iris() {
        let id = internal_identifier("x");
        let out = audit_dataset(
            &DefaultAuditService::new(),
            &id,
            &Session::anonymous(),
            true,
            &Skolemizer::new(BASE),
        );
        assert!(out
            .iter()
            .all(|q| !matches!(q.subject, Term::Blank(_)) && !matches!(q.object, Term::Blank(_))));
    }

    struct SelfReferencing;

    impl AuditService for SelfReferencing {
        fn creation(&self, _subject: &Iri, _session: &Session) -> Vec<Quad> {
            vec![Quad::new(
                Iri::new(server::PREFER_AUDIT),
                Iri::new("http://localhost:8080/x"),
                Iri::new("http://purl.org/dc/terms/relation"),
                Iri::new("http://localhost:8080/x/child"),
            )]
        }

        fn update(&self, subject: &Iri, session: &Session) -> Vec<Quad> {
            self.creation(subject, session)
        }
    }

    #[test]
    fn public_urls_map_to_internal_identifiers() {
        let id = internal_identifier("x");
        let out = audit_dataset(&SelfReferencing, &id, &Session::anonymous(), true, &Skolemizer::new(BASE));
        let quad = out.iter().next().unwrap();
        assert_eq!(quad.subject, Term::Iri(id));
        assert_eq!(quad.object, Term::Iri(internal_identifier("x/child")));
    }
}
