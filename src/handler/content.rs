//! Content materialization: binary upload or structured parse

use super::error::{PutError, Stop};
use super::resolve::Resolution;
use crate::graph::vocab::server;
use crate::graph::{Dataset, Iri, Triple};
use crate::http::{DigestAlgorithm, LdpRequest};
use crate::io::RdfSyntax;
use crate::resource::{Binary, InteractionModel, Resource, Skolemizer};
use crate::service::ServiceBundle;
use chrono::Utc;
use tracing::{debug, warn};

const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

/// User content ready for assembly
#[derive(Debug)]
pub struct Materialized {
    /// Quads for the targeted graph only
    pub dataset: Dataset,
    pub binary: Option<Binary>,
}

/// The named graph a request writes to
pub fn target_graph(request: &LdpRequest) -> Iri {
    if request.is_acl() {
        Iri::new(server::PREFER_ACCESS_CONTROL)
    } else {
        Iri::new(server::PREFER_USER_MANAGED)
    }
}

/// Reject a body whose declared digest does not match
pub fn verify_digest(request: &LdpRequest) -> Result<(), PutError> {
    let Some(digest) = &request.digest else {
        return Ok(());
    };
    let algorithm = DigestAlgorithm::from_name(&digest.algorithm)
        .ok_or_else(|| PutError::UnsupportedDigest(digest.algorithm.clone()))?;
    let computed = algorithm.compute(&request.body);
    if computed != digest.value {
        return Err(PutError::DigestMismatch {
            declared: digest.value.clone(),
            computed,
        });
    }
    Ok(())
}

/// Turn the request body into a binary descriptor or a graph
pub async fn materialize(
    request: &LdpRequest,
    resolution: &Resolution,
    prior: Option<&Resource>,
    services: &ServiceBundle,
    skolemizer: &Skolemizer,
) -> Result<Materialized, Stop> {
    verify_digest(request)?;

    if resolution.is_binary() {
        let binary = persist_binary(request, services).await?;
        return Ok(Materialized {
            dataset: Dataset::new(),
            binary: Some(binary),
        });
    }

    let syntax = resolution.syntax.unwrap_or(RdfSyntax::Turtle);
    let triples: Vec<Triple> = services
        .io
        .read(&request.body, syntax, &request.request_url())
        .map_err(PutError::from)?
        .into_iter()
        .map(|t| skolemizer.triple(t))
        .collect();

    let model = if request.is_acl() {
        InteractionModel::RdfSource
    } else {
        resolution.interaction_model
    };
    if let Some(violation) = services.constraints.validate(&triples, model, syntax) {
        warn!(identifier = %request.internal_identifier(), violation = %violation, "constraint violation");
        return Err(PutError::ConstraintViolation(violation).into());
    }

    let graph = target_graph(request);
    let dataset = triples
        .into_iter()
        .map(|t| t.in_graph(graph.clone()))
        .collect();

    Ok(Materialized {
        dataset,
        binary: prior.and_then(|r| r.binary.clone()),
    })
}

async fn persist_binary(request: &LdpRequest, services: &ServiceBundle) -> Result<Binary, Stop> {
    let mime_type = request
        .content_type
        .clone()
        .unwrap_or_else(|| DEFAULT_MIME_TYPE.to_string());
    let location = services.binaries.generate_identifier();

    services
        .binaries
        .persist(&location, request.body.clone(), &mime_type)
        .await
        .map_err(PutError::BinaryStorage)?;

    debug!(
        identifier = %request.internal_identifier(),
        location = %location,
        size = request.body.len(),
        "binary persisted"
    );
    Ok(Binary::new(location, Utc::now(), mime_type, request.body.len() as u64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Term;
    use crate::http::Digest;
    use crate::resource::internal_identifier;
    use crate::service::MemoryBinaryService;
    use crate::storage::MemoryResourceService;
    use std::sync::Arc;

    const BASE: &str = "http://localhost:8080/";

    fn services() -> (ServiceBundle, Arc<MemoryBinaryService>) {
        let binaries = Arc::new(MemoryBinaryService::new());
        let bundle = ServiceBundle::new(Arc::new(MemoryResourceService::new()), binaries.clone());
        (bundle, binaries)
    }

    fn structured(interaction_model: InteractionModel) -> Resolution {
        Resolution {
            interaction_model,
            syntax: Some(RdfSyntax::Turtle),
            binary_description: false,
        }
    }

    #[test]
    fn digest_guard() {
        let request = LdpRequest::new(BASE, "x").with_body("foo");
        assert!(verify_digest(&request).is_ok());

        let good = request
            .clone()
            .with_digest(Digest::new("sha-256", "LCa0a2j/xo/5m0U8HTBBNBNCLXBkg7+g+YpeiGJm564="));
        assert!(verify_digest(&good).is_ok());

        let bad = request.clone().with_digest(Digest::new("sha-256", "AAAA"));
        assert!(matches!(verify_digest(&bad), Err(PutError::DigestMismatch { .. })));

        let unknown = request.with_digest(Digest::new("md5", "rL0Y20zC+Fzt72VPzMSk2A=="));
        assert!(matches!(verify_digest(&unknown), Err(PutError::UnsupportedDigest(_))));
    }

    #[tokio::test]
    async fn binary_path_persists_body() {
        let (bundle, binaries) = services();
        let request = LdpRequest::new(BASE, "img").with_content_type("image/png").with_body("png!");
        let resolution = Resolution {
            interaction_model: InteractionModel::NonRdfSource,
            syntax: None,
            binary_description: false,
        };

        let out = materialize(&request, &resolution, None, &bundle, &Skolemizer::new(BASE))
            .await
            .unwrap();
        let binary = out.binary.unwrap();
        assert_eq!(binary.mime_type, "image/png");
        assert_eq!(binary.size, 4);
        assert!(out.dataset.is_empty());
        assert_eq!(binaries.get(&binary.identifier).unwrap().1.as_ref(), b"png!");
    }

    #[tokio::test]
    async fn binary_without_content_type_is_octet_stream() {
        let (bundle, _) = services();
        let request = LdpRequest::new(BASE, "blob").with_body("raw");
        let resolution = Resolution {
            interaction_model: InteractionModel::NonRdfSource,
            syntax: None,
            binary_description: false,
        };
        let out = materialize(&request, &resolution, None, &bundle, &Skolemizer::new(BASE))
            .await
            .unwrap();
        assert_eq!(out.binary.unwrap().mime_type, DEFAULT_MIME_TYPE);
    }

    #[tokio::test]
    async fn structured_path_skolemizes_into_target_graph() {
        let (bundle, _) = services();
        let request = LdpRequest::new(BASE, "x")
            .with_content_type("text/turtle")
            .with_body("<> <http://purl.org/dc/terms/relation> [ <http://purl.org/dc/terms/title> \"t\" ] .");

        let out = materialize(
            &request,
            &structured(InteractionModel::RdfSource),
            None,
            &bundle,
            &Skolemizer::new(BASE),
        )
        .await
        .unwrap();

        assert_eq!(out.dataset.len(), 2);
        assert!(out.binary.is_none());
        let user = Iri::new(server::PREFER_USER_MANAGED);
        assert_eq!(out.dataset.quads_in(&user).count(), 2);
        assert!(out
            .dataset
            .iter()
            .any(|q| q.subject == Term::Iri(internal_identifier("x"))));
        assert!(out.dataset.iter().all(|q| !matches!(q.subject, Term::Blank(_))));
    }

    #[tokio::test]
    async fn acl_write_targets_access_control_graph() {
        let (bundle, _) = services();
        let request = LdpRequest::new(BASE, "x")
            .with_ext("acl")
            .with_content_type("text/turtle")
            .with_body("<#auth> <http://www.w3.org/ns/auth/acl#mode> <http://www.w3.org/ns/auth/acl#Read> .");
        let out = materialize(
            &request,
            &structured(InteractionModel::RdfSource),
            None,
            &bundle,
            &Skolemizer::new(BASE),
        )
        .await
        .unwrap();
        let acl = Iri::new(server::PREFER_ACCESS_CONTROL);
        assert_eq!(out.dataset.quads_in(&acl).count(), 1);
    }

    #[tokio::test]
    async fn constraint_violation_stops() {
        let (bundle, _) = services();
        let request = LdpRequest::new(BASE, "x")
            .with_content_type("text/turtle")
            .with_body("<> <http://www.w3.org/ns/ldp#contains> <child> .");
        let stop = materialize(
            &request,
            &structured(InteractionModel::BasicContainer),
            None,
            &bundle,
            &Skolemizer::new(BASE),
        )
        .await
        .unwrap_err();
        match stop {
            Stop::Failed(PutError::ConstraintViolation(iri)) => {
                assert_eq!(iri.as_str(), server::INVALID_PROPERTY)
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[tokio::test]
    async fn unparseable_body_is_invalid_entity() {
        let (bundle, _) = services();
        let request = LdpRequest::new(BASE, "x")
            .with_content_type("text/turtle")
            .with_body("<> <p> ");
        let stop = materialize(
            &request,
            &structured(InteractionModel::RdfSource),
            None,
            &bundle,
            &Skolemizer::new(BASE),
        )
        .await
        .unwrap_err();
        assert!(matches!(stop, Stop::Failed(PutError::InvalidEntity(_))));
    }

    #[tokio::test]
    async fn description_rewrite_keeps_prior_binary() {
        let (bundle, binaries) = services();
        let binary = Binary::new(Iri::new("mem:1"), Utc::now(), "image/png", 10);
        let prior = Resource::new(internal_identifier("x"), InteractionModel::NonRdfSource, Utc::now())
            .with_binary(binary.clone());
        let request = LdpRequest::new(BASE, "x")
            .with_content_type("text/turtle")
            .with_body("<> <http://purl.org/dc/terms/title> \"described\" .");
        let resolution = Resolution {
            interaction_model: InteractionModel::NonRdfSource,
            syntax: Some(RdfSyntax::Turtle),
            binary_description: true,
        };

        let out = materialize(&request, &resolution, Some(&prior), &bundle, &Skolemizer::new(BASE))
            .await
            .unwrap();
        assert_eq!(out.binary, Some(binary));
        assert!(binaries.is_empty());
    }
}
