//! Translator backed by a key/value catalog.

use std::collections::HashMap;
use std::path::Path;

use crate::domain::repositories::Translator;
use crate::error::LinkError;
use tracing::info;

/// Translations loaded from a flat JSON object such as
/// `{"Link.TYPEURL": "Adresse"}`.
#[derive(Debug, Default, Clone)]
pub struct CatalogTranslator {
    entries: HashMap<String, String>,
}

impl CatalogTranslator {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    /// Parses a catalog from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if the text is not a JSON object
    /// of strings.
    pub fn from_json(json: &str) -> Result<Self, LinkError> {
        let entries: HashMap<String, String> = serde_json::from_str(json)
            .map_err(|e| LinkError::configuration(format!("invalid translation catalog: {e}")))?;
        Ok(Self::new(entries))
    }

    /// Reads a catalog from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if the file cannot be read or parsed.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LinkError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| {
            LinkError::configuration(format!(
                "cannot read translation catalog {}: {e}",
                path.display()
            ))
        })?;
        let catalog = Self::from_json(&json)?;
        info!(path = %path.display(), entries = catalog.len(), "Loaded translation catalog");
        Ok(catalog)
    }

    pub fn insert(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut Self {
        self.entries.insert(key.into(), text.into());
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Translator for CatalogTranslator {
    fn lookup(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }
}
