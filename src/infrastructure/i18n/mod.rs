//! Translator implementations.
//!
//! - [`CatalogTranslator`] - Key/value catalog, loadable from JSON
//! - [`NullTranslator`] - No translations; defaults are used

mod catalog_translator;
mod null_translator;

pub use catalog_translator::CatalogTranslator;
pub use null_translator::NullTranslator;
