//! Dataset assembly

use crate::graph::vocab::server;
use crate::graph::{Dataset, Iri};
use crate::http::LdpRequest;
use crate::resource::Resource;

/// The graph a write leaves untouched
pub fn preserved_graph(request: &LdpRequest) -> Iri {
    if request.is_acl() {
        Iri::new(server::PREFER_USER_MANAGED)
    } else {
        Iri::new(server::PREFER_ACCESS_CONTROL)
    }
}

/// Copy the untouched graph of `prior` into the new content
pub fn assemble(mut dataset: Dataset, prior: Option<&Resource>, preserved: &Iri) -> Dataset {
    if let Some(prior) = prior {
        dataset.extend(
            prior
                .quads
                .iter()
                .filter(|q| &q.graph == preserved)
                .cloned(),
        );
    }
    dataset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{Literal, Quad};
    use crate::resource::{internal_identifier, InteractionModel};
    use chrono::Utc;

    fn quad(graph: &str, value: &str) -> Quad {
        Quad::new(
            Iri::new(graph),
            internal_identifier("x"),
            Iri::new("http://purl.org/dc/terms/title"),
            Literal::string(value),
        )
    }

    fn prior() -> Resource {
        Resource::new(internal_identifier("x"), InteractionModel::RdfSource, Utc::now()).with_quads(vec![
            quad(server::PREFER_USER_MANAGED, "old user"),
            quad(server::PREFER_ACCESS_CONTROL, "old acl"),
            quad(server::PREFER_AUDIT, "history"),
        ])
    }

    #[test]
    fn user_write_keeps_acl_graph() {
        let request = LdpRequest::new("http://localhost:8080/", "x");
        let fresh: Dataset = vec![quad(server::PREFER_USER_MANAGED, "new user")].into_iter().collect();
        let out = assemble(fresh, Some(&prior()), &preserved_graph(&request));

        assert_eq!(out.len(), 2);
        assert!(out.contains(&quad(server::PREFER_USER_MANAGED, "new user")));
        assert!(out.contains(&quad(server::PREFER_ACCESS_CONTROL, "old acl")));
        assert!(!out.contains(&quad(server::PREFER_USER_MANAGED, "old user")));
    }

    #[test]
    fn acl_write_keeps_user_graph() {
        let request = LdpRequest::new("http://localhost:8080/", "x").with_ext("acl");
        let fresh: Dataset = vec![quad(server::PREFER_ACCESS_CONTROL, "new acl")].into_iter().collect();
        let out = assemble(fresh, Some(&prior()), &preserved_graph(&request));

        assert_eq!(out.len(), 2);
        assert!(out.contains(&quad(server::PREFER_USER_MANAGED, "old user")));
        assert!(out.contains(&quad(server::PREFER_ACCESS_CONTROL, "new acl")));
    }

    #[test]
    fn no_prior_contributes_nothing() {
        let request = LdpRequest::new("http://localhost:8080/", "x");
        let out = assemble(Dataset::new(), None, &preserved_graph(&request));
        assert!(out.is_empty());
    }
}
