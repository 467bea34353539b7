//! Registry of link types, styles and record classes.
//!
//! The registry has two phases. During initialization a
//! [`TypeRegistryBuilder`] collects registrations; [`TypeRegistryBuilder::build`]
//! checks them and produces an immutable [`TypeRegistry`] that only serves
//! lookups. A registry can be installed once as the process-wide instance.

use crate::domain::entities::{BASE_RECORD_CLASS, LinkType};
use crate::domain::repositories::Translator;
use crate::error::LinkError;
use crate::utils::interpolate::interpolate;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::debug;

/// Root of the host CMS record hierarchy. Template lookup stops below it.
pub const DATA_OBJECT: &str = "DataObject";

/// Namespace used for translation keys.
pub const TRANSLATION_NAMESPACE: &str = "Link";

static GLOBAL: OnceLock<Arc<TypeRegistry>> = OnceLock::new();

/// How a type stores its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Value lives in a text field on the link (URL, Email, Phone) or in a
    /// custom field with no built-in rules.
    Field,
    /// Value is the id of a record resolved through an entity lookup.
    Reference,
}

#[derive(Debug, Clone)]
struct TypeEntry {
    key: String,
    label: String,
    kind: TypeKind,
}

/// Immutable type and style configuration.
pub struct TypeRegistry {
    types: Vec<TypeEntry>,
    styles: Vec<(String, String)>,
    allowed_types: Option<Vec<String>>,
    /// Child class -> parent class.
    classes: HashMap<String, String>,
    translator: Option<Arc<dyn Translator>>,
}

impl std::fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.types)
            .field("styles", &self.styles)
            .field("allowed_types", &self.allowed_types)
            .field("classes", &self.classes)
            .field("translator", &self.translator.is_some())
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        // Core registrations cannot fail validation.
        TypeRegistryBuilder::new().build_unchecked()
    }
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::new()
    }

    /// Installs this registry as the process-wide instance.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if a registry is already installed.
    pub fn install(self) -> Result<Arc<TypeRegistry>, LinkError> {
        let registry = Arc::new(self);
        GLOBAL
            .set(registry.clone())
            .map_err(|_| LinkError::configuration("a link type registry is already installed"))?;
        Ok(registry)
    }

    /// The process-wide registry, if one was installed.
    pub fn global() -> Option<Arc<TypeRegistry>> {
        GLOBAL.get().cloned()
    }

    /// Registered types in declared order, filtered by an allowed subset.
    ///
    /// A subset passed here takes priority over the configured one.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if the subset names a type that
    /// is not registered.
    pub fn list_types(
        &self,
        allowed_subset: Option<&[String]>,
    ) -> Result<Vec<(String, String)>, LinkError> {
        let allowed = allowed_subset.or(self.allowed_types.as_deref());

        if let Some(allowed) = allowed {
            for key in allowed {
                if !self.types.iter().any(|t| &t.key == key) {
                    return Err(LinkError::configuration(format!(
                        "{key} is not a valid link type"
                    )));
                }
            }
        }

        Ok(self
            .types
            .iter()
            .filter(|t| allowed.is_none_or(|a| a.contains(&t.key)))
            .map(|t| (t.key.clone(), t.label.clone()))
            .collect())
    }

    /// Registered styles in declared order.
    pub fn list_styles(&self) -> Vec<(String, String)> {
        self.styles.clone()
    }

    /// Types with translated labels.
    ///
    /// # Errors
    ///
    /// See [`Self::list_types`].
    pub fn i18n_types(
        &self,
        allowed_subset: Option<&[String]>,
    ) -> Result<Vec<(String, String)>, LinkError> {
        Ok(self
            .list_types(allowed_subset)?
            .into_iter()
            .map(|(key, label)| {
                let text = self.translate(&type_key(&key), &label);
                (key, text)
            })
            .collect())
    }

    /// Styles with translated labels.
    pub fn i18n_styles(&self) -> Vec<(String, String)> {
        self.styles
            .iter()
            .map(|(key, label)| {
                let text = self.translate(&style_key(key), label);
                (key.clone(), text)
            })
            .collect()
    }

    /// Translated label of a registered type; `None` if it is not registered.
    pub fn type_label(&self, link_type: &LinkType) -> Option<String> {
        self.entry(link_type.key())
            .map(|t| self.translate(&type_key(&t.key), &t.label))
    }

    /// Looks up `key`, falling back to `raw_label`. Never fails.
    pub fn translate(&self, key: &str, raw_label: &str) -> String {
        self.translate_with(key, raw_label, &[])
    }

    /// Looks up `key` (falling back to `default`) and fills `{Name}`
    /// placeholders from `substitutions`.
    pub fn translate_with(&self, key: &str, default: &str, substitutions: &[(&str, &str)]) -> String {
        let text = self
            .translator
            .as_ref()
            .and_then(|t| t.lookup(key))
            .unwrap_or_else(|| default.to_string());
        interpolate(&text, substitutions)
    }

    pub fn is_registered(&self, link_type: &LinkType) -> bool {
        self.entry(link_type.key()).is_some()
    }

    /// True if the type resolves through an entity lookup.
    pub fn is_reference_type(&self, link_type: &LinkType) -> bool {
        self.entry(link_type.key())
            .is_some_and(|t| t.kind == TypeKind::Reference)
    }

    /// Parent of a record class, or `None` for unknown classes.
    pub fn parent_class(&self, class: &str) -> Option<&str> {
        self.classes.get(class).map(String::as_str)
    }

    /// True if `class` descends from the base link record.
    pub fn is_record_class(&self, class: &str) -> bool {
        let mut current = class;
        // Each step must move to a registered parent; the chain cannot be
        // longer than the number of registrations.
        for _ in 0..=self.classes.len() {
            if current == BASE_RECORD_CLASS {
                return true;
            }
            match self.parent_class(current) {
                Some(parent) => current = parent,
                None => return false,
            }
        }
        false
    }

    fn entry(&self, key: &str) -> Option<&TypeEntry> {
        self.types.iter().find(|t| t.key == key)
    }
}

fn type_key(key: &str) -> String {
    format!("{TRANSLATION_NAMESPACE}.TYPE{}", key.to_uppercase())
}

fn style_key(key: &str) -> String {
    format!("{TRANSLATION_NAMESPACE}.STYLE{}", key.to_uppercase())
}

/// Collects registrations for a [`TypeRegistry`].
pub struct TypeRegistryBuilder {
    types: Vec<TypeEntry>,
    styles: Vec<(String, String)>,
    allowed_types: Option<Vec<String>>,
    classes: HashMap<String, String>,
    translator: Option<Arc<dyn Translator>>,
}

impl Default for TypeRegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistryBuilder {
    /// Starts with the core types and the base record class.
    pub fn new() -> Self {
        let core = [
            ("URL", "URL", TypeKind::Field),
            ("Email", "Email address", TypeKind::Field),
            ("Phone", "Phone number", TypeKind::Field),
            ("File", "File on this website", TypeKind::Reference),
            ("SiteTree", "Page on this website", TypeKind::Reference),
        ];

        let mut classes = HashMap::new();
        classes.insert(BASE_RECORD_CLASS.to_string(), DATA_OBJECT.to_string());

        Self {
            types: core
                .into_iter()
                .map(|(key, label, kind)| TypeEntry {
                    key: key.to_string(),
                    label: label.to_string(),
                    kind,
                })
                .collect(),
            styles: Vec::new(),
            allowed_types: None,
            classes,
            translator: None,
        }
    }

    /// Registers a custom field type. Re-registering a key replaces its label.
    pub fn with_type(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.register(key.into(), label.into(), TypeKind::Field)
    }

    /// Registers a custom type that references records of kind `key`.
    pub fn with_reference_type(self, key: impl Into<String>, label: impl Into<String>) -> Self {
        self.register(key.into(), label.into(), TypeKind::Reference)
    }

    pub fn with_style(mut self, key: impl Into<String>, label: impl Into<String>) -> Self {
        let (key, label) = (key.into(), label.into());
        match self.styles.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = label,
            None => self.styles.push((key, label)),
        }
        self
    }

    /// Restricts the types offered to editors.
    pub fn allow_types<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_types = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Registers a record class that extends `parent`.
    pub fn with_record_class(mut self, class: impl Into<String>, parent: impl Into<String>) -> Self {
        self.classes.insert(class.into(), parent.into());
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn Translator>) -> Self {
        self.translator = Some(translator);
        self
    }

    /// Finishes the initialization phase.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Configuration`] if the allowed subset names an
    /// unregistered type or is empty.
    pub fn build(self) -> Result<TypeRegistry, LinkError> {
        if let Some(allowed) = &self.allowed_types {
            if allowed.is_empty() {
                return Err(LinkError::configuration("allowed link types must not be empty"));
            }
            for key in allowed {
                if !self.types.iter().any(|t| &t.key == key) {
                    return Err(LinkError::configuration(format!(
                        "{key} is not a valid link type"
                    )));
                }
            }
        }

        debug!(
            types = self.types.len(),
            styles = self.styles.len(),
            classes = self.classes.len(),
            "Link type registry built"
        );

        Ok(self.build_unchecked())
    }

    fn build_unchecked(self) -> TypeRegistry {
        TypeRegistry {
            types: self.types,
            styles: self.styles,
            allowed_types: self.allowed_types,
            classes: self.classes,
            translator: self.translator,
        }
    }

    fn register(mut self, key: String, label: String, kind: TypeKind) -> Self {
        match self.types.iter_mut().find(|t| t.key == key) {
            Some(entry) => {
                entry.label = label;
                entry.kind = kind;
            }
            None => self.types.push(TypeEntry { key, label, kind }),
        }
        self
    }
}
