//! In-process implementations of the storage traits.
//!
//! - [`InMemoryLinkRepository`] - Link records
//! - [`InMemoryEntityStore`] - Files, pages and custom records

mod entity_store;
mod link_store;

pub use entity_store::InMemoryEntityStore;
pub use link_store::InMemoryLinkRepository;
