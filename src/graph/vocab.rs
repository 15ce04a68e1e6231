//! Vocabulary IRIs used by the write path

/// Linked Data Platform
pub mod ldp {
    pub const NS: &str = "http://www.w3.org/ns/ldp#";
    pub const RESOURCE: &str = "http://www.w3.org/ns/ldp#Resource";
    pub const RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#RDFSource";
    pub const NON_RDF_SOURCE: &str = "http://www.w3.org/ns/ldp#NonRDFSource";
    pub const CONTAINER: &str = "http://www.w3.org/ns/ldp#Container";
    pub const BASIC_CONTAINER: &str = "http://www.w3.org/ns/ldp#BasicContainer";
    pub const DIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#DirectContainer";
    pub const INDIRECT_CONTAINER: &str = "http://www.w3.org/ns/ldp#IndirectContainer";
    pub const CONTAINS: &str = "http://www.w3.org/ns/ldp#contains";
    pub const MEMBERSHIP_RESOURCE: &str = "http://www.w3.org/ns/ldp#membershipResource";
    pub const HAS_MEMBER_RELATION: &str = "http://www.w3.org/ns/ldp#hasMemberRelation";
    pub const IS_MEMBER_OF_RELATION: &str = "http://www.w3.org/ns/ldp#isMemberOfRelation";
    pub const INSERTED_CONTENT_RELATION: &str = "http://www.w3.org/ns/ldp#insertedContentRelation";
    pub const CONSTRAINED_BY: &str = "http://www.w3.org/ns/ldp#constrainedBy";
}

pub mod rdf {
    pub const TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";
    pub const LANG_STRING: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#langString";
    pub const FIRST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#first";
    pub const REST: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#rest";
    pub const NIL: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#nil";
}

pub mod xsd {
    pub const STRING: &str = "http://www.w3.org/2001/XMLSchema#string";
    pub const INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
    pub const DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
    pub const DOUBLE: &str = "http://www.w3.org/2001/XMLSchema#double";
    pub const BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";
    pub const DATE_TIME: &str = "http://www.w3.org/2001/XMLSchema#dateTime";
}

/// W3C provenance ontology
pub mod prov {
    pub const ACTIVITY: &str = "http://www.w3.org/ns/prov#Activity";
    pub const WAS_GENERATED_BY: &str = "http://www.w3.org/ns/prov#wasGeneratedBy";
    pub const WAS_ASSOCIATED_WITH: &str = "http://www.w3.org/ns/prov#wasAssociatedWith";
    pub const AT_TIME: &str = "http://www.w3.org/ns/prov#atTime";
}

/// ActivityStreams activity types
pub mod activity_streams {
    pub const CREATE: &str = "https://www.w3.org/ns/activitystreams#Create";
    pub const UPDATE: &str = "https://www.w3.org/ns/activitystreams#Update";
}

/// Server namespace: partition names, constraint violations, internal prefixes
pub mod server {
    pub const NS: &str = "http://www.trellisldp.org/ns/trellis#";
    pub const PREFER_USER_MANAGED: &str = "http://www.trellisldp.org/ns/trellis#PreferUserManaged";
    pub const PREFER_ACCESS_CONTROL: &str =
        "http://www.trellisldp.org/ns/trellis#PreferAccessControl";
    pub const PREFER_AUDIT: &str = "http://www.trellisldp.org/ns/trellis#PreferAudit";
    pub const ANONYMOUS_AGENT: &str = "http://www.trellisldp.org/ns/trellis#AnonymousAgent";

    pub const UNSUPPORTED_INTERACTION_MODEL: &str =
        "http://www.trellisldp.org/ns/trellis#UnsupportedInteractionModel";
    pub const INVALID_PROPERTY: &str = "http://www.trellisldp.org/ns/trellis#InvalidProperty";
    pub const INVALID_TYPE: &str = "http://www.trellisldp.org/ns/trellis#InvalidType";
    pub const INVALID_RANGE: &str = "http://www.trellisldp.org/ns/trellis#InvalidRange";
    pub const INVALID_CARDINALITY: &str = "http://www.trellisldp.org/ns/trellis#InvalidCardinality";

    /// Prefix of every internal resource identifier
    pub const DATA_PREFIX: &str = "trellis:data/";
    /// Prefix of skolemized blank nodes
    pub const BNODE_PREFIX: &str = "trellis:bnode/";
    pub const SESSION_PREFIX: &str = "trellis:session/";
}
