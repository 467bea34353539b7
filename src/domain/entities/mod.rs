//! Core domain entities.
//!
//! - [`Link`] - The polymorphic link record
//! - [`LinkType`] - Its type discriminator
//! - [`LinkUrl`] - Result of resolving a link target
//! - [`RelatedEntity`] - A file, page or custom record a link points at

pub mod link;
pub mod related;

pub use link::{BASE_RECORD_CLASS, Link, LinkType, LinkUrl};
pub use related::RelatedEntity;
