//! Lookup trait for records a link can reference.

use crate::domain::entities::RelatedEntity;
use crate::error::LinkError;
use async_trait::async_trait;

/// Resolves referenced records (files, pages, custom records) by kind and id.
///
/// The link core never stores these records; it asks for a snapshot each
/// time it needs a URL or title.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::InMemoryEntityStore`] - In-process store
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntityLookup: Send + Sync {
    /// Finds a record by kind (`"File"`, `"SiteTree"`, custom type key) and id.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(entity))` if the store knows the record, deleted or not
    /// - `Ok(None)` if it does not
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Lookup`] when the backing store fails.
    async fn find_by_id(&self, kind: &str, id: i64) -> Result<Option<RelatedEntity>, LinkError>;
}
