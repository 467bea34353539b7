//! Application layer: behaviour built on the domain types and collaborator
//! traits.
//!
//! - [`services::LinkValidator`] - Type-specific field checks
//! - [`services::LinkResolver`] - Target URL, title, classes, template names
//! - [`services::LinkRenderer`] - HTML output through named templates
//! - [`services::LinkService`] - Validate, persist and enrich links
//! - [`hooks::LinkHooks`] - Post-processing chains for computed values

pub mod hooks;
pub mod services;

pub use hooks::{HookChain, LinkHooks};
