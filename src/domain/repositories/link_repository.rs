//! Repository trait for link record storage.

use crate::domain::entities::Link;
use crate::error::LinkError;
use async_trait::async_trait;

/// Repository interface for persisting links.
///
/// The save workflow in [`crate::application::services::LinkService`] calls
/// `insert` for new records and `update` for everything else, including the
/// follow-up write that fills in a derived title.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryLinkRepository`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Stores a new link and returns it with its assigned id.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] if the link already has an id or the
    /// store fails.
    async fn insert(&self, link: Link) -> Result<Link, LinkError>;

    /// Overwrites an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] if no link has this id or the store
    /// fails.
    async fn update(&self, link: Link) -> Result<Link, LinkError>;

    /// Finds a link by id.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] on store failures.
    async fn find_by_id(&self, id: i64) -> Result<Option<Link>, LinkError>;

    /// Deletes a link. Returns `Ok(false)` if it did not exist.
    ///
    /// Referenced files and pages are owned elsewhere and left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Persistence`] on store failures.
    async fn delete(&self, id: i64) -> Result<bool, LinkError>;
}
