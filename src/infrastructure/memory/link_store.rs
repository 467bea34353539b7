//! In-memory implementation of the link repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::LinkError;

/// Link store backed by a map, for tools and tests.
///
/// Ids are assigned sequentially from 1. `Created` and `LastEdited` are
/// stamped on write.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    state: RwLock<State>,
}

#[derive(Default)]
struct State {
    next_id: i64,
    links: BTreeMap<i64, Link>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored links.
    pub async fn len(&self) -> usize {
        self.state.read().await.links.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All stored links in id order.
    pub async fn all(&self) -> Vec<Link> {
        self.state.read().await.links.values().cloned().collect()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn insert(&self, mut link: Link) -> Result<Link, LinkError> {
        if link.is_persisted() {
            return Err(LinkError::persistence(format!(
                "link #{} is already stored",
                link.id.unwrap_or_default()
            )));
        }

        let mut state = self.state.write().await;
        state.next_id += 1;
        let id = state.next_id;
        let now = Utc::now();
        link.id = Some(id);
        link.created = Some(now);
        link.last_edited = Some(now);
        state.links.insert(id, link.clone());
        Ok(link)
    }

    async fn update(&self, mut link: Link) -> Result<Link, LinkError> {
        let id = link
            .id
            .ok_or_else(|| LinkError::persistence("cannot update a link without an id"))?;

        let mut state = self.state.write().await;
        let existing = state
            .links
            .get(&id)
            .ok_or_else(|| LinkError::persistence(format!("link #{id} does not exist")))?;

        link.created = existing.created;
        link.last_edited = Some(Utc::now());
        state.links.insert(id, link.clone());
        Ok(link)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, LinkError> {
        Ok(self.state.read().await.links.get(&id).cloned())
    }

    async fn delete(&self, id: i64) -> Result<bool, LinkError> {
        Ok(self.state.write().await.links.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_assigns_sequential_ids() {
        let repo = InMemoryLinkRepository::new();
        let a = repo.insert(Link::url("/a")).await.unwrap();
        let b = repo.insert(Link::url("/b")).await.unwrap();

        assert_eq!(a.id, Some(1));
        assert_eq!(b.id, Some(2));
        assert!(a.created.is_some());
        assert_eq!(repo.len().await, 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_stored_link() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.insert(Link::url("/a")).await.unwrap();
        let result = repo.insert(link).await;
        assert!(matches!(result, Err(LinkError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_update_keeps_created() {
        let repo = InMemoryLinkRepository::new();
        let link = repo.insert(Link::url("/a")).await.unwrap();
        let created = link.created;

        let updated = repo.update(link.with_title("A")).await.unwrap();
        assert_eq!(updated.created, created);

        let found = repo.find_by_id(1).await.unwrap().unwrap();
        assert_eq!(found.title.as_deref(), Some("A"));
    }

    #[tokio::test]
    async fn test_update_unknown_link_fails() {
        let repo = InMemoryLinkRepository::new();
        let mut link = Link::url("/a");
        assert!(repo.update(link.clone()).await.is_err());

        link.id = Some(9);
        assert!(repo.update(link).await.is_err());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = InMemoryLinkRepository::new();
        repo.insert(Link::url("/a")).await.unwrap();

        assert!(repo.delete(1).await.unwrap());
        assert!(!repo.delete(1).await.unwrap());
        assert!(repo.is_empty().await);
    }
}
