//! Externally owned records a link can point at (files, pages, custom records).

use serde::{Deserialize, Serialize};

/// Snapshot of a referenced record as returned by an
/// [`crate::domain::repositories::EntityLookup`].
///
/// `link` is `None` when the record type cannot compute its own URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedEntity {
    pub kind: String,
    pub id: i64,
    #[serde(default = "default_exists")]
    pub exists: bool,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub menu_title: Option<String>,
}

fn default_exists() -> bool {
    true
}

impl RelatedEntity {
    /// Creates an existing record with no link capability and no titles.
    pub fn new(kind: impl Into<String>, id: i64) -> Self {
        Self {
            kind: kind.into(),
            id,
            exists: true,
            link: None,
            title: None,
            menu_title: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_menu_title(mut self, menu_title: impl Into<String>) -> Self {
        self.menu_title = Some(menu_title.into());
        self
    }

    /// Marks the record as deleted while keeping it addressable.
    pub fn deleted(mut self) -> Self {
        self.exists = false;
        self
    }

    pub fn exists(&self) -> bool {
        self.exists
    }

    /// Title suitable for navigation: the menu title, else the title.
    pub fn nav_title(&self) -> Option<&str> {
        self.menu_title
            .as_deref()
            .filter(|t| !t.is_empty())
            .or_else(|| self.title.as_deref().filter(|t| !t.is_empty()))
    }
}
