//! Link registry configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup, validated, and turned into a
//! [`TypeRegistry`] before any link is processed.
//!
//! ## Variables
//!
//! ```bash
//! export LINK_ALLOWED_TYPES="URL,Email,SiteTree"
//! export LINK_STYLES="button:Button,Card:Feature card"
//! export LINK_REFERENCE_TYPES="Product:Product page"
//! export LINK_TRANSLATIONS="./lang/de.json"
//! ```
//!
//! All variables are optional:
//!
//! - `LINK_ALLOWED_TYPES` - Comma-separated type keys offered to editors (default: all)
//! - `LINK_STYLES` - Comma-separated `key:Label` style variants
//! - `LINK_REFERENCE_TYPES` - Comma-separated `key:Label` custom reference types
//! - `LINK_TRANSLATIONS` - Path to a JSON translation catalog
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)

use crate::domain::registry::TypeRegistry;
use crate::infrastructure::i18n::CatalogTranslator;
use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;

/// Registry and logging configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Type keys offered to editors; `None` offers every registered type.
    pub allowed_types: Option<Vec<String>>,
    pub styles: Vec<(String, String)>,
    pub reference_types: Vec<(String, String)>,
    pub translations_path: Option<String>,
    pub log_level: String,
    pub log_format: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            allowed_types: None,
            styles: Vec::new(),
            reference_types: Vec::new(),
            translations_path: None,
            log_level: "info".to_string(),
            log_format: "text".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if a `key:Label` list is malformed.
    pub fn from_env() -> Result<Self> {
        let allowed_types = env::var("LINK_ALLOWED_TYPES")
            .ok()
            .map(|v| parse_list(&v))
            .filter(|types| !types.is_empty());

        let styles = match env::var("LINK_STYLES") {
            Ok(v) => parse_labelled_list(&v).context("Failed to parse LINK_STYLES")?,
            Err(_) => Vec::new(),
        };

        let reference_types = match env::var("LINK_REFERENCE_TYPES") {
            Ok(v) => parse_labelled_list(&v).context("Failed to parse LINK_REFERENCE_TYPES")?,
            Err(_) => Vec::new(),
        };

        let translations_path = env::var("LINK_TRANSLATIONS").ok().filter(|p| !p.is_empty());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        Ok(Self {
            allowed_types,
            styles,
            reference_types,
            translations_path,
            log_level,
            log_format,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - a reference type reuses a core type key
    /// - a style or type key is listed twice
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        const CORE_TYPES: [&str; 5] = ["URL", "Email", "Phone", "File", "SiteTree"];
        if let Some((key, _)) = self
            .reference_types
            .iter()
            .find(|(key, _)| CORE_TYPES.contains(&key.as_str()))
        {
            anyhow::bail!("LINK_REFERENCE_TYPES must not redefine core type '{key}'");
        }

        if let Some(key) = first_duplicate(self.styles.iter().map(|(k, _)| k.as_str())) {
            anyhow::bail!("LINK_STYLES lists '{key}' more than once");
        }

        if let Some(key) = first_duplicate(self.reference_types.iter().map(|(k, _)| k.as_str())) {
            anyhow::bail!("LINK_REFERENCE_TYPES lists '{key}' more than once");
        }

        Ok(())
    }

    /// Builds the type registry described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the translation catalog cannot be loaded or the
    /// allowed types name an unregistered type.
    pub fn build_registry(&self) -> Result<TypeRegistry> {
        let mut builder = TypeRegistry::builder();

        for (key, label) in &self.reference_types {
            builder = builder.with_reference_type(key.clone(), label.clone());
        }
        for (key, label) in &self.styles {
            builder = builder.with_style(key.clone(), label.clone());
        }
        if let Some(allowed) = &self.allowed_types {
            builder = builder.allow_types(allowed.iter().cloned());
        }
        if let Some(path) = &self.translations_path {
            let catalog = CatalogTranslator::from_file(path)
                .context("Failed to load LINK_TRANSLATIONS")?;
            builder = builder.with_translator(Arc::new(catalog));
        }

        builder.build().context("Invalid link type configuration")
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        match &self.allowed_types {
            Some(types) => tracing::info!("  Allowed types: {}", types.join(", ")),
            None => tracing::info!("  Allowed types: all"),
        }
        tracing::info!("  Styles: {}", self.styles.len());
        tracing::info!("  Reference types: {}", self.reference_types.len());
        match &self.translations_path {
            Some(path) => tracing::info!("  Translations: {}", path),
            None => tracing::info!("  Translations: disabled"),
        }
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Splits a comma-separated list, dropping blanks.
fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Parses `key:Label,key2:Label 2`. A missing label reuses the key.
fn parse_labelled_list(value: &str) -> Result<Vec<(String, String)>> {
    parse_list(value)
        .into_iter()
        .map(|item| {
            let (key, label) = match item.split_once(':') {
                Some((key, label)) => (key.trim(), label.trim()),
                None => (item.as_str(), item.as_str()),
            };
            if key.is_empty() {
                anyhow::bail!("entry '{item}' has an empty key");
            }
            let label = if label.is_empty() { key } else { label };
            Ok((key.to_string(), label.to_string()))
        })
        .collect()
}

fn first_duplicate<'a>(keys: impl Iterator<Item = &'a str>) -> Option<&'a str> {
    let mut seen = std::collections::HashSet::new();
    keys.into_iter().find(|key| !seen.insert(*key))
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if parsing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in the binary).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_labelled_list() {
        assert_eq!(
            parse_labelled_list("button:Button, Card : Feature card ,,ghost").unwrap(),
            vec![
                ("button".to_string(), "Button".to_string()),
                ("Card".to_string(), "Feature card".to_string()),
                ("ghost".to_string(), "ghost".to_string()),
            ]
        );
        assert!(parse_labelled_list(":Nameless").is_err());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        assert!(config.validate().is_ok());

        config.log_format = "xml".to_string();
        assert!(config.validate().is_err());
        config.log_format = "json".to_string();
        assert!(config.validate().is_ok());

        config.reference_types = vec![("File".to_string(), "Another file".to_string())];
        assert!(config.validate().is_err());
        config.reference_types = vec![("Product".to_string(), "Product".to_string())];
        assert!(config.validate().is_ok());

        config.styles = vec![
            ("Card".to_string(), "Card".to_string()),
            ("Card".to_string(), "Other".to_string()),
        ];
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_registry() {
        let config = Config {
            allowed_types: Some(vec!["URL".to_string(), "Product".to_string()]),
            styles: vec![("Card".to_string(), "Card".to_string())],
            reference_types: vec![("Product".to_string(), "Product page".to_string())],
            ..Config::default()
        };

        let registry = config.build_registry().unwrap();
        let types = registry.list_types(None).unwrap();
        assert_eq!(
            types,
            vec![
                ("URL".to_string(), "URL".to_string()),
                ("Product".to_string(), "Product page".to_string()),
            ]
        );
        assert_eq!(registry.list_styles().len(), 1);
    }

    #[test]
    fn test_build_registry_rejects_unknown_allowed_type() {
        let config = Config {
            allowed_types: Some(vec!["Fax".to_string()]),
            ..Config::default()
        };
        assert!(config.build_registry().is_err());
    }

    #[test]
    #[serial]
    fn test_from_env() {
        // SAFETY: Tests are run serially due to #[serial], so no concurrent access
        unsafe {
            env::set_var("LINK_ALLOWED_TYPES", "URL, Email");
            env::set_var("LINK_STYLES", "button:Button");
            env::set_var("LOG_FORMAT", "json");
        }

        let config = load_from_env().unwrap();
        assert_eq!(
            config.allowed_types,
            Some(vec!["URL".to_string(), "Email".to_string()])
        );
        assert_eq!(config.styles.len(), 1);
        assert!(config.reference_types.is_empty());
        assert_eq!(config.log_format, "json");

        // Cleanup
        unsafe {
            env::remove_var("LINK_ALLOWED_TYPES");
            env::remove_var("LINK_STYLES");
            env::remove_var("LOG_FORMAT");
        }
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_bad_style_list() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LINK_STYLES", ":Broken");
        }

        assert!(Config::from_env().is_err());

        unsafe {
            env::remove_var("LINK_STYLES");
        }
    }

    #[test]
    #[serial]
    fn test_blank_allowed_types_means_all() {
        // SAFETY: Tests are run serially
        unsafe {
            env::set_var("LINK_ALLOWED_TYPES", " , ");
        }

        let config = Config::from_env().unwrap();
        assert!(config.allowed_types.is_none());

        unsafe {
            env::remove_var("LINK_ALLOWED_TYPES");
        }
    }
}
