//! Presentation values derived from a link: target URL, title, CSS classes,
//! template candidates and HTML attribute fragments.

use std::sync::Arc;

use crate::application::hooks::LinkHooks;
use crate::domain::entities::{Link, LinkType, LinkUrl, RelatedEntity};
use crate::domain::registry::{DATA_OBJECT, TypeRegistry};
use crate::domain::repositories::EntityLookup;
use crate::error::LinkError;
use crate::utils::phone::phone_friendly;
use askama::Template;
use serde::Serialize;
use tracing::{debug, warn};

const LINK_METHOD_MISSING: &str = "Please implement a link method on the \"{Type}\" record";

/// A single ` name='value'` attribute fragment with the value escaped.
#[derive(Template)]
#[template(source = " {{ name }}='{{ value }}'", ext = "html")]
struct AttributeFragment<'a> {
    name: &'a str,
    value: &'a str,
}

/// Row shown in link overviews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinkSummary {
    pub title: Option<String>,
    pub link_type: Option<String>,
    pub link_url: Option<String>,
}

/// Computes read-only presentation values for links.
pub struct LinkResolver<E: EntityLookup> {
    registry: Arc<TypeRegistry>,
    lookup: Arc<E>,
    hooks: Arc<LinkHooks>,
}

impl<E: EntityLookup> LinkResolver<E> {
    pub fn new(registry: Arc<TypeRegistry>, lookup: Arc<E>, hooks: Arc<LinkHooks>) -> Self {
        Self {
            registry,
            lookup,
            hooks,
        }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    pub fn hooks(&self) -> &LinkHooks {
        &self.hooks
    }

    /// Works out the target of `link` from its type.
    ///
    /// # Returns
    ///
    /// - [`LinkUrl::Unset`] for unpersisted links and empty fields
    /// - [`LinkUrl::Broken`] for missing or deleted references and unknown types
    /// - [`LinkUrl::Placeholder`] when the referenced record cannot produce a link
    /// - [`LinkUrl::Url`] otherwise
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Lookup`] if the entity lookup fails.
    pub async fn resolve_url(&self, link: &Link) -> Result<LinkUrl, LinkError> {
        if !link.is_persisted() {
            return Ok(LinkUrl::Unset);
        }

        let url = match &link.link_type {
            LinkType::Url => text_target(link.url.as_deref(), ""),
            LinkType::Email => text_target(link.email.as_deref(), "mailto:"),
            LinkType::Phone => {
                let phone = link.phone.as_deref().map(phone_friendly);
                text_target(phone.as_deref(), "tel:")
            }
            link_type if self.registry.is_reference_type(link_type) => {
                self.resolve_reference(link).await?
            }
            link_type => {
                debug!(link_type = %link_type, "No URL resolution for link type");
                LinkUrl::Broken
            }
        };

        Ok(self.hooks.url.apply(link, url))
    }

    async fn resolve_reference(&self, link: &Link) -> Result<LinkUrl, LinkError> {
        let kind = link.link_type.key();
        let Some(entity) = self.related(link).await? else {
            warn!(kind, link_id = ?link.id, "Link points at a missing record");
            return Ok(LinkUrl::Broken);
        };

        if !entity.exists() {
            warn!(kind, id = entity.id, link_id = ?link.id, "Link points at a deleted record");
            return Ok(LinkUrl::Broken);
        }

        match entity.link {
            Some(target) => {
                let anchor = link.anchor.as_deref().unwrap_or_default();
                Ok(LinkUrl::Url(format!("{target}{anchor}")))
            }
            None => {
                warn!(kind, id = entity.id, "Referenced record has no link");
                Ok(LinkUrl::Placeholder(self.registry.translate_with(
                    "Link.LINKMETHODMISSING",
                    LINK_METHOD_MISSING,
                    &[("Type", kind)],
                )))
            }
        }
    }

    /// The record referenced by `link`, if its type is a reference type.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Lookup`] if the entity lookup fails.
    pub async fn related(&self, link: &Link) -> Result<Option<RelatedEntity>, LinkError> {
        match link.reference_id() {
            Some(id) => self.lookup.find_by_id(link.link_type.key(), id).await,
            None => Ok(None),
        }
    }

    /// Title to store for a link saved without one.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Lookup`] if the entity lookup fails.
    pub async fn derive_title(&self, link: &Link) -> Result<String, LinkError> {
        let title = match &link.link_type {
            link_type if link_type.is_text() => link.text_value().map(str::to_string),
            LinkType::SiteTree => self
                .related(link)
                .await?
                .and_then(|page| page.nav_title().map(str::to_string)),
            _ => self
                .related(link)
                .await?
                .and_then(|entity| entity.title.filter(|t| !t.is_empty())),
        };

        let title = title.unwrap_or_else(|| format!("Link-{}", link.id.unwrap_or_default()));
        Ok(self.hooks.title.apply(link, title))
    }

    /// CSS classes for rendering: added classes, then the style's tokens.
    pub fn css_classes(&self, link: &Link) -> Vec<String> {
        let mut classes = link.classes().to_vec();
        for token in link.style.as_deref().unwrap_or_default().split_whitespace() {
            if !classes.iter().any(|c| c == token) {
                classes.push(token.to_string());
            }
        }
        self.hooks.classes.apply(link, classes)
    }

    /// Template names to try when rendering, most specific first.
    ///
    /// For every record class from `link.class_name` up to the base link
    /// class this yields `<Class>_<Style>` (when a style is set) and then
    /// `<Class>`, with any namespace stripped.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::InvalidInput`] if the class is not a link record.
    pub fn render_template_candidates(&self, link: &Link) -> Result<Vec<String>, LinkError> {
        if !self.registry.is_record_class(&link.class_name) {
            return Err(LinkError::invalid_input(format!(
                "{} is not a subclass of {DATA_OBJECT}",
                link.class_name
            )));
        }

        let style = link.style.as_deref().filter(|s| !s.is_empty());
        let mut templates = Vec::new();
        let mut class = link.class_name.as_str();

        loop {
            let base = short_class_name(class);
            if let Some(style) = style {
                templates.push(format!("{base}_{style}"));
            }
            templates.push(base.to_string());

            match self.registry.parent_class(class) {
                Some(parent) if parent != DATA_OBJECT => class = parent,
                _ => break,
            }
        }

        Ok(self.hooks.templates.apply(link, templates))
    }

    /// `"_blank"` when the link opens in a new window.
    pub fn target_attribute(&self, link: &Link) -> Option<&'static str> {
        link.open_in_new_window.then_some("_blank")
    }

    /// ` class='...'`, or `None` without classes.
    pub fn class_attr(&self, link: &Link) -> Option<String> {
        let classes = self.css_classes(link);
        if classes.is_empty() {
            return None;
        }
        attribute("class", &classes.join(" "))
    }

    /// ` target='_blank'`, or `None`.
    pub fn target_attr(&self, link: &Link) -> Option<String> {
        self.target_attribute(link)
            .and_then(|target| attribute("target", target))
    }

    /// Element id for the rendered link. Only hooks provide one.
    pub fn id_value(&self, link: &Link) -> Option<String> {
        self.hooks
            .id_value
            .apply(link, None)
            .filter(|id| !id.is_empty())
    }

    /// ` id='...'`, or `None`.
    pub fn id_attr(&self, link: &Link) -> Option<String> {
        self.id_value(link).and_then(|id| attribute("id", &id))
    }

    /// Translated label of the link's type.
    pub fn link_type_label(&self, link: &Link) -> Option<String> {
        self.registry.type_label(&link.link_type)
    }

    /// Title, type label and target for overview tables.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Lookup`] if the entity lookup fails.
    pub async fn summary(&self, link: &Link) -> Result<LinkSummary, LinkError> {
        let url = self.resolve_url(link).await?;
        Ok(LinkSummary {
            title: link.title.clone(),
            link_type: self.link_type_label(link),
            link_url: url.as_str().map(str::to_string),
        })
    }
}

fn text_target(value: Option<&str>, scheme: &str) -> LinkUrl {
    match value.filter(|v| !v.is_empty()) {
        Some(value) => LinkUrl::Url(format!("{scheme}{value}")),
        None => LinkUrl::Unset,
    }
}

fn attribute(name: &str, value: &str) -> Option<String> {
    match (AttributeFragment { name, value }).render() {
        Ok(fragment) => Some(fragment),
        Err(e) => {
            warn!(name, error = %e, "Failed to render attribute");
            None
        }
    }
}

/// Strips a `\` or `::` separated namespace from a class name.
fn short_class_name(class: &str) -> &str {
    let class = class.rsplit('\\').next().unwrap_or(class);
    class.rsplit("::").next().unwrap_or(class)
}
