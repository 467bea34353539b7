//! Helpers shared by the validator and resolver.
//!
//! - [`interpolate`] - `{Name}` placeholder substitution
//! - [`phone`] - Phone number normalization for `tel:` links
//! - [`url_check`] - URL field checks

pub mod interpolate;
pub mod phone;
pub mod url_check;
