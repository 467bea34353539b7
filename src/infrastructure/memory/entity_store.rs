//! In-memory implementation of the entity lookup.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::RelatedEntity;
use crate::domain::repositories::EntityLookup;
use crate::error::LinkError;

/// Files, pages and custom records keyed by `(kind, id)`.
#[derive(Default)]
pub struct InMemoryEntityStore {
    entities: RwLock<HashMap<(String, i64), RelatedEntity>>,
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from a list of records, later entries winning.
    pub fn from_entities(entities: impl IntoIterator<Item = RelatedEntity>) -> Self {
        let entities = entities
            .into_iter()
            .map(|e| ((e.kind.clone(), e.id), e))
            .collect();
        Self {
            entities: RwLock::new(entities),
        }
    }

    /// Adds or replaces a record.
    pub async fn put(&self, entity: RelatedEntity) {
        self.entities
            .write()
            .await
            .insert((entity.kind.clone(), entity.id), entity);
    }

    /// Marks a record as deleted. Returns false if it is unknown.
    pub async fn mark_deleted(&self, kind: &str, id: i64) -> bool {
        match self.entities.write().await.get_mut(&(kind.to_string(), id)) {
            Some(entity) => {
                entity.exists = false;
                true
            }
            None => false,
        }
    }
}

#[async_trait]
impl EntityLookup for InMemoryEntityStore {
    async fn find_by_id(&self, kind: &str, id: i64) -> Result<Option<RelatedEntity>, LinkError> {
        let found = self
            .entities
            .read()
            .await
            .get(&(kind.to_string(), id))
            .cloned();
        if found.is_none() {
            debug!(kind, id, "Entity not found");
        }
        Ok(found)
    }
}
