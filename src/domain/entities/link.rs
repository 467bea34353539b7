//! Link entity: one record that can point at a URL, email address, phone
//! number, file, page or custom record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Class name of the base link record.
pub const BASE_RECORD_CLASS: &str = "Link";

/// Discriminator selecting which field of a [`Link`] is active.
///
/// Serialized as its key string (`"URL"`, `"Email"`, ...). Any key that is
/// not one of the core types becomes [`LinkType::Custom`]; whether it is
/// actually usable is decided by the [`crate::domain::TypeRegistry`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum LinkType {
    #[default]
    Url,
    Email,
    Phone,
    File,
    SiteTree,
    Custom(String),
}

impl LinkType {
    /// Registry key for this type.
    pub fn key(&self) -> &str {
        match self {
            Self::Url => "URL",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::File => "File",
            Self::SiteTree => "SiteTree",
            Self::Custom(key) => key,
        }
    }

    /// True for the types whose value lives in a plain text field.
    pub fn is_text(&self) -> bool {
        matches!(self, Self::Url | Self::Email | Self::Phone)
    }
}

impl FromStr for LinkType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "URL" => Self::Url,
            "Email" => Self::Email,
            "Phone" => Self::Phone,
            "File" => Self::File,
            "SiteTree" => Self::SiteTree,
            other => Self::Custom(other.to_string()),
        })
    }
}

impl From<String> for LinkType {
    fn from(value: String) -> Self {
        match value.parse() {
            Ok(t) => t,
            Err(never) => match never {},
        }
    }
}

impl From<LinkType> for String {
    fn from(value: LinkType) -> Self {
        value.key().to_string()
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of resolving a link's target.
///
/// The variants keep apart "not set yet", "points at something that is gone"
/// and "the target cannot produce a link"; renderers treat them differently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkUrl {
    /// Nothing to link to yet (unpersisted record or empty field).
    Unset,
    /// The referenced record no longer exists, or the type is unknown.
    Broken,
    /// A renderable target.
    Url(String),
    /// Developer-facing message shown in place of a link.
    Placeholder(String),
}

impl LinkUrl {
    /// The string to render, if any.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Url(s) | Self::Placeholder(s) => Some(s),
            Self::Unset | Self::Broken => None,
        }
    }

    pub fn is_broken(&self) -> bool {
        matches!(self, Self::Broken)
    }
}

/// A polymorphic link record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Link {
    #[serde(rename = "ID", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default = "default_class_name")]
    pub class_name: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "Type", default)]
    pub link_type: LinkType,
    #[serde(rename = "URL", default)]
    pub url: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(rename = "FileID", default)]
    pub file_id: Option<i64>,
    #[serde(rename = "SiteTreeID", default)]
    pub site_tree_id: Option<i64>,
    /// Reference ids for custom reference types, keyed by type key.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub references: BTreeMap<String, i64>,
    #[serde(default)]
    pub anchor: Option<String>,
    #[serde(default)]
    pub open_in_new_window: bool,
    #[serde(default)]
    pub style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_edited: Option<DateTime<Utc>>,
    /// Extra CSS classes for rendering. Never persisted.
    #[serde(skip)]
    classes: Vec<String>,
}

fn default_class_name() -> String {
    BASE_RECORD_CLASS.to_string()
}

impl Default for Link {
    fn default() -> Self {
        Self {
            id: None,
            class_name: default_class_name(),
            title: None,
            link_type: LinkType::default(),
            url: None,
            email: None,
            phone: None,
            file_id: None,
            site_tree_id: None,
            references: BTreeMap::new(),
            anchor: None,
            open_in_new_window: false,
            style: None,
            created: None,
            last_edited: None,
            classes: Vec::new(),
        }
    }
}

impl Link {
    /// Creates an empty, unpersisted link of the given type.
    pub fn new(link_type: LinkType) -> Self {
        Self {
            link_type,
            ..Self::default()
        }
    }

    pub fn url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::new(LinkType::Url)
        }
    }

    pub fn email(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
            ..Self::new(LinkType::Email)
        }
    }

    pub fn phone(phone: impl Into<String>) -> Self {
        Self {
            phone: Some(phone.into()),
            ..Self::new(LinkType::Phone)
        }
    }

    pub fn file(file_id: i64) -> Self {
        Self {
            file_id: Some(file_id),
            ..Self::new(LinkType::File)
        }
    }

    pub fn site_tree(page_id: i64) -> Self {
        Self {
            site_tree_id: Some(page_id),
            ..Self::new(LinkType::SiteTree)
        }
    }

    /// Creates a link to a record of a custom reference type.
    pub fn reference(kind: impl Into<String>, id: i64) -> Self {
        let kind = kind.into();
        let mut link = Self::new(LinkType::Custom(kind.clone()));
        link.references.insert(kind, id);
        link
    }

    /// Returns true once the store has assigned an identity.
    pub fn is_persisted(&self) -> bool {
        self.id.is_some_and(|id| id > 0)
    }

    /// Returns true if the title is missing or empty. Whitespace counts as a
    /// title.
    pub fn has_blank_title(&self) -> bool {
        self.title.as_deref().is_none_or(str::is_empty)
    }

    /// Value of the text field selected by the type, if it is a text type.
    pub fn text_value(&self) -> Option<&str> {
        let value = match self.link_type {
            LinkType::Url => self.url.as_deref(),
            LinkType::Email => self.email.as_deref(),
            LinkType::Phone => self.phone.as_deref(),
            _ => None,
        };
        value.filter(|v| !v.is_empty())
    }

    /// Reference id selected by the type. Zero counts as unset.
    pub fn reference_id(&self) -> Option<i64> {
        let id = match &self.link_type {
            LinkType::File => self.file_id,
            LinkType::SiteTree => self.site_tree_id,
            LinkType::Custom(kind) => self.references.get(kind).copied(),
            _ => None,
        };
        id.filter(|id| *id != 0)
    }

    /// Adds space-separated CSS classes, skipping ones already present.
    pub fn add_class(&mut self, class: &str) -> &mut Self {
        for token in class.split_whitespace() {
            if !self.classes.iter().any(|c| c == token) {
                self.classes.push(token.to_string());
            }
        }
        self
    }

    /// Classes added through [`Link::add_class`], in insertion order.
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn with_style(mut self, style: impl Into<String>) -> Self {
        self.style = Some(style.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_link_defaults_to_url() {
        let link = Link::default();
        assert_eq!(link.link_type, LinkType::Url);
        assert_eq!(link.class_name, "Link");
        assert!(!link.is_persisted());
        assert!(link.has_blank_title());
        assert!(link.clone().with_title("").has_blank_title());
        assert!(!link.with_title("   ").has_blank_title());
    }

    #[test]
    fn test_link_type_parse() {
        assert_eq!("SiteTree".parse::<LinkType>().unwrap(), LinkType::SiteTree);
        assert_eq!(
            "Product".parse::<LinkType>().unwrap(),
            LinkType::Custom("Product".to_string())
        );
        assert_eq!(LinkType::Url.key(), "URL");
    }

    #[test]
    fn test_add_class_deduplicates_in_order() {
        let mut link = Link::default();
        link.add_class("btn btn-primary").add_class("btn  large");
        assert_eq!(link.classes(), ["btn", "btn-primary", "large"]);
    }

    #[test]
    fn test_reference_id_zero_is_unset() {
        let link = Link::file(0);
        assert_eq!(link.reference_id(), None);

        let link = Link::reference("Product", 12);
        assert_eq!(link.reference_id(), Some(12));
    }

    #[test]
    fn test_text_value_follows_type() {
        let mut link = Link::email("a@b.com");
        link.url = Some("https://example.com".to_string());
        assert_eq!(link.text_value(), Some("a@b.com"));

        link.email = Some(String::new());
        assert_eq!(link.text_value(), None);
    }

    #[test]
    fn test_serde_uses_record_field_names() {
        let json = r#"{"ID":3,"Type":"Phone","Phone":"+1 555-1234","OpenInNewWindow":true}"#;
        let link: Link = serde_json::from_str(json).unwrap();
        assert_eq!(link.id, Some(3));
        assert_eq!(link.link_type, LinkType::Phone);
        assert_eq!(link.phone.as_deref(), Some("+1 555-1234"));
        assert!(link.open_in_new_window);

        let value = serde_json::to_value(&link).unwrap();
        assert_eq!(value["Type"], "Phone");
        assert_eq!(value["ClassName"], "Link");
        assert!(value.get("Classes").is_none());
    }

    #[test]
    fn test_link_url_as_str() {
        assert_eq!(LinkUrl::Url("/about".into()).as_str(), Some("/about"));
        assert_eq!(LinkUrl::Placeholder("x".into()).as_str(), Some("x"));
        assert_eq!(LinkUrl::Broken.as_str(), None);
        assert!(LinkUrl::Broken.is_broken());
        assert_eq!(LinkUrl::Unset.as_str(), None);
    }
}
