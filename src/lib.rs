//! # Linkable
//!
//! Polymorphic link records for content management. One [`Link`] record can
//! point at a URL, an email address, a phone number, a file, a page, or a
//! record of a custom type registered at startup.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - The link record, the type registry and
//!   collaborator traits
//! - **Application Layer** ([`application`]) - Validation, URL resolution,
//!   rendering and the save workflow
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory stores and
//!   translation catalogs
//!
//! ## Usage
//!
//! ```ignore
//! let registry = Arc::new(TypeRegistry::builder().with_style("button", "Button").build()?);
//! let hooks = Arc::new(LinkHooks::new());
//! let validator = LinkValidator::new(registry.clone(), hooks.clone());
//! let resolver = LinkResolver::new(registry, Arc::new(InMemoryEntityStore::new()), hooks);
//!
//! let link = Link::email("hello@example.com");
//! assert!(validator.validate(&link).is_valid());
//! ```
//!
//! ## Configuration
//!
//! The registry can be built from environment variables via
//! [`config::Config`]. See [`config`] for available options.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod utils;

pub use error::LinkError;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::hooks::LinkHooks;
    pub use crate::application::services::{
        LinkRenderer, LinkResolver, LinkService, LinkValidator, SaveOutcome, ValidationResult,
    };
    pub use crate::domain::entities::{Link, LinkType, LinkUrl, RelatedEntity};
    pub use crate::domain::registry::TypeRegistry;
    pub use crate::error::LinkError;
}

pub use domain::entities::{Link, LinkType, LinkUrl};
