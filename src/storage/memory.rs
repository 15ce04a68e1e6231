//! In-memory storage backend

use super::traits::{ResourceService, StorageResult};
use crate::graph::{Dataset, Iri, Quad};
use crate::resource::{Binary, InteractionModel, Resource, ResourceState, Session};
use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

#[derive(Debug, Clone)]
enum Slot {
    Live(Resource),
    Deleted,
}

/// `DashMap`-backed resource store
///
/// Each identifier's create/replace runs under its shard lock, so concurrent
/// creates of the same identifier admit exactly one winner.
#[derive(Debug)]
pub struct MemoryResourceService {
    resources: DashMap<Iri, Slot>,
    audit: DashMap<Iri, Vec<Quad>>,
    interaction_models: Vec<InteractionModel>,
}

impl MemoryResourceService {
    pub fn new() -> Self {
        Self::with_interaction_models(InteractionModel::ALL.to_vec())
    }

    pub fn with_interaction_models(interaction_models: Vec<InteractionModel>) -> Self {
        Self {
            resources: DashMap::new(),
            audit: DashMap::new(),
            interaction_models,
        }
    }

    /// Put a resource in place directly, bypassing the write path
    pub fn insert(&self, resource: Resource) {
        self.resources
            .insert(resource.identifier.clone(), Slot::Live(resource));
    }

    /// Mark `identifier` deleted
    pub fn tombstone(&self, identifier: &Iri) {
        self.resources.insert(identifier.clone(), Slot::Deleted);
    }

    pub fn len(&self) -> usize {
        self.resources
            .iter()
            .filter(|entry| matches!(entry.value(), Slot::Live(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn build(
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> Resource {
        Resource {
            identifier: identifier.clone(),
            interaction_model,
            modified: session.created,
            container: container.cloned(),
            binary: binary.cloned(),
            quads: dataset.iter().cloned().collect(),
        }
    }
}

impl Default for MemoryResourceService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResourceService for MemoryResourceService {
    async fn get(&self, identifier: &Iri) -> StorageResult<ResourceState> {
        Ok(match self.resources.get(identifier).map(|e| e.value().clone()) {
            Some(Slot::Live(resource)) => ResourceState::Present(resource),
            Some(Slot::Deleted) => ResourceState::Deleted,
            None => ResourceState::Missing,
        })
    }

    async fn create(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool> {
        let resource = Self::build(identifier, session, interaction_model, dataset, container, binary);
        match self.resources.entry(identifier.clone()) {
            Entry::Occupied(mut entry) => {
                if matches!(entry.get(), Slot::Live(_)) {
                    return Ok(false);
                }
                entry.insert(Slot::Live(resource));
            }
            Entry::Vacant(entry) => {
                entry.insert(Slot::Live(resource));
            }
        }
        Ok(true)
    }

    async fn replace(
        &self,
        identifier: &Iri,
        session: &Session,
        interaction_model: InteractionModel,
        dataset: &Dataset,
        container: Option<&Iri>,
        binary: Option<&Binary>,
    ) -> StorageResult<bool> {
        let resource = Self::build(identifier, session, interaction_model, dataset, container, binary);
        self.resources
            .insert(identifier.clone(), Slot::Live(resource));
        Ok(true)
    }

    async fn add(
        &self,
        identifier: &Iri,
        _session: &Session,
        dataset: &Dataset,
    ) -> StorageResult<bool> {
        self.audit
            .entry(identifier.clone())
            .or_default()
            .extend(dataset.iter().cloned());
        Ok(true)
    }

    async fn audit(&self, identifier: &Iri) -> StorageResult<Vec<Quad>> {
        Ok(self
            .audit
            .get(identifier)
            .map(|quads| quads.value().clone())
            .unwrap_or_default())
    }

    fn supported_interaction_models(&self) -> &[InteractionModel] {
        &self.interaction_models
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::vocab::server;
    use crate::graph::Literal;
    use crate::resource::internal_identifier;

    fn title_quad(id: &Iri, graph: &str, value: &str) -> Quad {
        Quad::new(
            Iri::new(graph),
            id.clone(),
            Iri::new("http://purl.org/dc/terms/title"),
            Literal::string(value),
        )
    }

    #[tokio::test]
    async fn create_then_get() {
        let store = MemoryResourceService::new();
        let id = internal_identifier("x");
        let session = Session::anonymous();
        let dataset: Dataset = vec![title_quad(&id, server::PREFER_USER_MANAGED, "t")]
            .into_iter()
            .collect();

        let created = store
            .create(&id, &session, InteractionModel::RdfSource, &dataset, None, None)
            .await
            .unwrap();
        assert!(created);

        let resource = store.get(&id).await.unwrap().into_resource().unwrap();
        assert_eq!(resource.interaction_model, InteractionModel::RdfSource);
        assert_eq!(resource.modified, session.created);
        assert_eq!(resource.quads.len(), 1);
    }

    #[tokio::test]
    async fn second_create_is_declined() {
        let store = MemoryResourceService::new();
        let id = internal_identifier("x");
        let session = Session::anonymous();
        let dataset = Dataset::new();

        assert!(store
            .create(&id, &session, InteractionModel::RdfSource, &dataset, None, None)
            .await
            .unwrap());
        assert!(!store
            .create(&id, &session, InteractionModel::RdfSource, &dataset, None, None)
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn create_over_tombstone_succeeds() {
        let store = MemoryResourceService::new();
        let id = internal_identifier("x");
        store.tombstone(&id);
        assert_eq!(store.get(&id).await.unwrap(), ResourceState::Deleted);

        let created = store
            .create(
                &id,
                &Session::anonymous(),
                InteractionModel::RdfSource,
                &Dataset::new(),
                None,
                None,
            )
            .await
            .unwrap();
        assert!(created);
        assert!(store.get(&id).await.unwrap().exists());
    }

    #[tokio::test]
    async fn audit_appends_in_order() {
        let store = MemoryResourceService::new();
        let id = internal_identifier("x");
        let session = Session::anonymous();
        let first: Dataset = vec![title_quad(&id, server::PREFER_AUDIT, "1")].into_iter().collect();
        let second: Dataset = vec![title_quad(&id, server::PREFER_AUDIT, "2")].into_iter().collect();

        store.add(&id, &session, &first).await.unwrap();
        store.add(&id, &session, &second).await.unwrap();

        let history = store.audit(&id).await.unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0], title_quad(&id, server::PREFER_AUDIT, "1"));
    }

    #[test]
    fn restricted_models() {
        let store =
            MemoryResourceService::with_interaction_models(vec![InteractionModel::RdfSource]);
        assert!(store.supports(InteractionModel::RdfSource));
        assert!(!store.supports(InteractionModel::BasicContainer));
    }

    #[test]
    fn default_container_is_parent_path() {
        let store = MemoryResourceService::new();
        let container = store.get_container(&internal_identifier("a/b"));
        assert_eq!(container, Some(internal_identifier("a")));
        assert_eq!(store.get_container(&internal_identifier("")), None);
    }
}
