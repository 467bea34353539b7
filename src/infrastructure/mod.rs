//! Infrastructure layer: implementations of the collaborator traits defined
//! in [`crate::domain::repositories`].
//!
//! # Modules
//!
//! - [`memory`] - In-process link and entity stores
//! - [`i18n`] - Translation catalogs

pub mod i18n;
pub mod memory;
