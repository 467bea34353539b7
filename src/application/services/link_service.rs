//! Save workflow for links: validate, persist, then fill in a missing title.

use std::sync::Arc;

use crate::application::services::resolver::LinkResolver;
use crate::application::services::validation::{LinkValidator, ValidationResult};
use crate::domain::entities::Link;
use crate::domain::repositories::{EntityLookup, LinkRepository};
use crate::error::LinkError;
use tracing::{debug, info, warn};

/// Result of [`LinkService::save`].
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    /// The link was written; this is the stored state.
    Saved(Link),
    /// Validation failed and nothing was written.
    Rejected(ValidationResult),
}

impl SaveOutcome {
    pub fn saved(self) -> Option<Link> {
        match self {
            Self::Saved(link) => Some(link),
            Self::Rejected(_) => None,
        }
    }
}

/// Service for persisting links.
///
/// Saving is two-phase: the link is validated and written, then a
/// post-write enrichment step derives a title for links that have none and
/// writes the link once more.
pub struct LinkService<R: LinkRepository, E: EntityLookup> {
    repository: Arc<R>,
    validator: Arc<LinkValidator>,
    resolver: Arc<LinkResolver<E>>,
}

impl<R: LinkRepository, E: EntityLookup> LinkService<R, E> {
    pub fn new(
        repository: Arc<R>,
        validator: Arc<LinkValidator>,
        resolver: Arc<LinkResolver<E>>,
    ) -> Self {
        Self {
            repository,
            validator,
            resolver,
        }
    }

    /// Validates and stores `link`.
    ///
    /// Unpersisted links are inserted, persisted ones updated. If the stored
    /// link has a blank title afterwards, one is derived and written with a
    /// second update.
    ///
    /// Once the first write succeeds the link counts as saved: a failure while
    /// filling in the title is logged and never turned into an error.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] if the first write fails.
    /// Validation failures are reported as [`SaveOutcome::Rejected`].
    pub async fn save(&self, link: Link) -> Result<SaveOutcome, LinkError> {
        let validation = self.validator.validate(&link);
        if !validation.is_valid() {
            return Ok(SaveOutcome::Rejected(validation));
        }

        let stored = if link.is_persisted() {
            self.repository.update(link).await?
        } else {
            let created = self.repository.insert(link).await?;
            info!(id = ?created.id, link_type = %created.link_type, "Link created");
            created
        };

        let stored = self.after_write(stored).await;
        Ok(SaveOutcome::Saved(stored))
    }

    /// Post-write enrichment: derives and stores a title if it is blank.
    ///
    /// Titles that are already set are never touched, so running this again
    /// on a stored link is a no-op. If the lookup behind the title fails, the
    /// title falls back to `Link-<id>`; if the second write fails, the link is
    /// returned as stored by the first one.
    pub async fn after_write(&self, link: Link) -> Link {
        if !link.has_blank_title() {
            return link;
        }

        let title = match self.resolver.derive_title(&link).await {
            Ok(title) => title,
            Err(e) => {
                warn!(id = ?link.id, error = %e, "Failed to derive link title");
                format!("Link-{}", link.id.unwrap_or_default())
            }
        };
        debug!(id = ?link.id, title = %title, "Derived link title");

        let mut titled = link.clone();
        titled.title = Some(title);
        match self.repository.update(titled).await {
            Ok(stored) => stored,
            Err(e) => {
                warn!(id = ?link.id, error = %e, "Failed to store derived link title");
                link
            }
        }
    }

    /// Loads a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] on store failures.
    pub async fn find(&self, id: i64) -> Result<Option<Link>, LinkError> {
        self.repository.find_by_id(id).await
    }

    /// Deletes a link. Returns `Ok(false)` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] on store failures.
    pub async fn delete(&self, id: i64) -> Result<bool, LinkError> {
        let deleted = self.repository.delete(id).await?;
        if deleted {
            info!(id, "Link deleted");
        }
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::hooks::LinkHooks;
    use crate::domain::entities::{LinkType, RelatedEntity};
    use crate::domain::registry::TypeRegistry;
    use crate::domain::repositories::{MockEntityLookup, MockLinkRepository};

    fn service(
        repository: MockLinkRepository,
        lookup: MockEntityLookup,
    ) -> LinkService<MockLinkRepository, MockEntityLookup> {
        let registry = Arc::new(TypeRegistry::default());
        let hooks = Arc::new(LinkHooks::new());
        let validator = LinkValidator::new(registry.clone(), hooks.clone());
        let resolver = LinkResolver::new(registry, Arc::new(lookup), hooks);
        LinkService::new(Arc::new(repository), Arc::new(validator), Arc::new(resolver))
    }

    fn with_id(mut link: Link, id: i64) -> Link {
        link.id = Some(id);
        link
    }

    #[tokio::test]
    async fn test_invalid_link_is_not_written() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        repo.expect_update().times(0);

        let outcome = service(repo, MockEntityLookup::new())
            .save(Link::email("not-an-email"))
            .await
            .unwrap();

        assert_eq!(
            outcome,
            SaveOutcome::Rejected(ValidationResult::error("Please enter a valid Email address"))
        );
    }

    #[tokio::test]
    async fn test_new_link_without_title_is_written_twice() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|link| Ok(with_id(link, 10)));
        repo.expect_update()
            .withf(|link| link.title.as_deref() == Some("https://example.com"))
            .times(1)
            .returning(Ok);

        let outcome = service(repo, MockEntityLookup::new())
            .save(Link::url("https://example.com"))
            .await
            .unwrap();

        let link = outcome.saved().unwrap();
        assert_eq!(link.id, Some(10));
        assert_eq!(link.title.as_deref(), Some("https://example.com"));
    }

    #[tokio::test]
    async fn test_new_link_with_title_is_written_once() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|link| Ok(with_id(link, 11)));
        repo.expect_update().times(0);

        let outcome = service(repo, MockEntityLookup::new())
            .save(Link::url("/contact").with_title("Contact us"))
            .await
            .unwrap();

        assert_eq!(outcome.saved().unwrap().title.as_deref(), Some("Contact us"));
    }

    #[tokio::test]
    async fn test_existing_link_is_updated() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().times(0);
        repo.expect_update().times(1).returning(Ok);

        let link = with_id(Link::phone("+1 555-1234"), 3).with_title("Call");
        let outcome = service(repo, MockEntityLookup::new())
            .save(link)
            .await
            .unwrap();

        assert_eq!(outcome.saved().unwrap().id, Some(3));
    }

    #[tokio::test]
    async fn test_page_link_title_comes_from_page() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert().returning(|link| Ok(with_id(link, 5)));
        repo.expect_update().times(1).returning(Ok);

        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_find_by_id()
            .withf(|kind, id| kind == "SiteTree" && *id == 42)
            .returning(|_, id| {
                Ok(Some(
                    RelatedEntity::new("SiteTree", id).with_menu_title("Team"),
                ))
            });

        let outcome = service(repo, lookup)
            .save(Link::site_tree(42))
            .await
            .unwrap();
        assert_eq!(outcome.saved().unwrap().title.as_deref(), Some("Team"));
    }

    #[tokio::test]
    async fn test_after_write_keeps_existing_title() {
        let mut repo = MockLinkRepository::new();
        repo.expect_update().times(0);

        let link = with_id(Link::new(LinkType::Url), 2).with_title("Kept");
        let link = service(repo, MockEntityLookup::new())
            .after_write(link)
            .await;
        assert_eq!(link.title.as_deref(), Some("Kept"));
    }

    #[tokio::test]
    async fn test_failed_title_lookup_still_saves() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|link| Ok(with_id(link, 1)));
        repo.expect_update()
            .withf(|link| link.title.as_deref() == Some("Link-1"))
            .times(1)
            .returning(Ok);

        let mut lookup = MockEntityLookup::new();
        lookup
            .expect_find_by_id()
            .returning(|kind, id| Err(LinkError::lookup(kind, id, "connection reset")));

        let outcome = service(repo, lookup).save(Link::file(3)).await.unwrap();
        let link = outcome.saved().unwrap();
        assert_eq!(link.id, Some(1));
        assert_eq!(link.title.as_deref(), Some("Link-1"));
    }

    #[tokio::test]
    async fn test_failed_title_update_keeps_first_write() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .times(1)
            .returning(|link| Ok(with_id(link, 4)));
        repo.expect_update()
            .times(1)
            .returning(|_| Err(LinkError::persistence("disk full")));

        let outcome = service(repo, MockEntityLookup::new())
            .save(Link::url("/about"))
            .await
            .unwrap();

        let link = outcome.saved().unwrap();
        assert_eq!(link.id, Some(4));
        assert_eq!(link.title, None);
    }

    #[tokio::test]
    async fn test_persistence_errors_propagate() {
        let mut repo = MockLinkRepository::new();
        repo.expect_insert()
            .returning(|_| Err(LinkError::persistence("disk full")));

        let result = service(repo, MockEntityLookup::new())
            .save(Link::url("/"))
            .await;
        assert!(matches!(result, Err(LinkError::Persistence { .. })));
    }

    #[tokio::test]
    async fn test_delete() {
        let mut repo = MockLinkRepository::new();
        repo.expect_delete().returning(|id| Ok(id == 1));

        let svc = service(repo, MockEntityLookup::new());
        assert!(svc.delete(1).await.unwrap());
        assert!(!svc.delete(2).await.unwrap());
    }
}
