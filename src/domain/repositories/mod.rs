//! Collaborator traits the link core depends on.
//!
//! Implementations live in `crate::infrastructure`; mock implementations are
//! generated via `mockall` for unit tests.
//!
//! - [`EntityLookup`] - Resolve referenced files, pages and custom records
//! - [`LinkRepository`] - Persist link records
//! - [`Translator`] - Localized string lookup

pub mod entity_lookup;
pub mod link_repository;
pub mod translator;

pub use entity_lookup::EntityLookup;
pub use link_repository::LinkRepository;
pub use translator::Translator;

#[cfg(test)]
pub use entity_lookup::MockEntityLookup;
#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use translator::MockTranslator;
