//! Structural constraints on user-supplied graphs

use crate::graph::vocab::{ldp, rdf, server};
use crate::graph::{Iri, Term, Triple};
use crate::io::RdfSyntax;
use crate::resource::InteractionModel;

/// Accepts or rejects a candidate graph for an interaction model
pub trait ConstraintService: Send + Sync {
    /// The violated constraint, or None when the graph is acceptable
    fn validate(
        &self,
        graph: &[Triple],
        interaction_model: InteractionModel,
        syntax: RdfSyntax,
    ) -> Option<Iri>;
}

/// LDP rules on server-managed and membership properties
#[derive(Debug, Clone, Default)]
pub struct LdpConstraintService;

impl LdpConstraintService {
    pub fn new() -> Self {
        Self
    }

    fn is_membership_container(model: InteractionModel) -> bool {
        matches!(
            model,
            InteractionModel::DirectContainer | InteractionModel::IndirectContainer
        )
    }

    fn check_triple(triple: &Triple, model: InteractionModel) -> Option<&'static str> {
        let predicate = triple.predicate.as_str();
        match predicate {
            ldp::CONTAINS => Some(server::INVALID_PROPERTY),
            rdf::TYPE => match &triple.object {
                Term::Iri(object) if object.starts_with(ldp::NS) => Some(server::INVALID_TYPE),
                _ => None,
            },
            ldp::MEMBERSHIP_RESOURCE | ldp::HAS_MEMBER_RELATION | ldp::IS_MEMBER_OF_RELATION
                if !Self::is_membership_container(model) =>
            {
                Some(server::INVALID_PROPERTY)
            }
            ldp::INSERTED_CONTENT_RELATION if model != InteractionModel::IndirectContainer => {
                Some(server::INVALID_PROPERTY)
            }
            ldp::MEMBERSHIP_RESOURCE | ldp::HAS_MEMBER_RELATION if triple.object.is_literal() => {
                Some(server::INVALID_RANGE)
            }
            _ => None,
        }
    }
}

impl ConstraintService for LdpConstraintService {
    fn validate(
        &self,
        graph: &[Triple],
        interaction_model: InteractionModel,
        _syntax: RdfSyntax,
    ) -> Option<Iri> {
        if let Some(violation) = graph
            .iter()
            .find_map(|t| Self::check_triple(t, interaction_model))
        {
            return Some(Iri::new(violation));
        }

        let membership_resources = graph
            .iter()
            .filter(|t| t.predicate.as_str() == ldp::MEMBERSHIP_RESOURCE)
            .count();
        (membership_resources > 1).then(|| Iri::new(server::INVALID_CARDINALITY))
    }
}
