//! Domain layer: the link record, its type registry and collaborator traits.
//!
//! - [`entities`] - Link record and referenced-record snapshots
//! - [`registry`] - Link types, styles and record classes
//! - [`repositories`] - Traits implemented by `crate::infrastructure`
//!
//! The domain layer has no dependencies on infrastructure; behaviour that
//! needs collaborators lives in [`crate::application::services`].

pub mod entities;
pub mod registry;
pub mod repositories;

pub use registry::{TypeKind, TypeRegistry, TypeRegistryBuilder};
