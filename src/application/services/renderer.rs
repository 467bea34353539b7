//! HTML rendering of links through named templates.

use std::collections::HashMap;
use std::sync::Arc;

use crate::application::services::resolver::LinkResolver;
use crate::domain::entities::Link;
use crate::domain::repositories::EntityLookup;
use crate::error::LinkError;
use askama::Template;
use tracing::debug;

/// Name of the stock template for base link records.
pub const STOCK_TEMPLATE: &str = "Link";

/// Values a link template renders. Doubles as the stock `Link` template.
#[derive(Debug, Clone, PartialEq, Eq, Template)]
#[template(path = "link.html")]
pub struct LinkView {
    pub url: String,
    pub title: String,
    pub classes: String,
    pub target: Option<String>,
    pub id: Option<String>,
}

type RenderFn = Box<dyn Fn(&LinkView) -> Result<String, LinkError> + Send + Sync>;

/// Renders links with the most specific registered template.
///
/// Template names come from
/// [`LinkResolver::render_template_candidates`]; the first candidate with a
/// registered template wins.
pub struct LinkRenderer<E: EntityLookup> {
    resolver: Arc<LinkResolver<E>>,
    templates: HashMap<String, RenderFn>,
}

impl<E: EntityLookup> LinkRenderer<E> {
    /// Creates a renderer with the stock `Link` template registered.
    pub fn new(resolver: Arc<LinkResolver<E>>) -> Self {
        let mut renderer = Self {
            resolver,
            templates: HashMap::new(),
        };
        renderer.register(STOCK_TEMPLATE, |view| Ok(view.render()?));
        renderer
    }

    /// Registers (or replaces) the template called `name`.
    pub fn register<F>(&mut self, name: impl Into<String>, template: F) -> &mut Self
    where
        F: Fn(&LinkView) -> Result<String, LinkError> + Send + Sync + 'static,
    {
        self.templates.insert(name.into(), Box::new(template));
        self
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.templates.contains_key(name)
    }

    /// Renders `link` as HTML.
    ///
    /// Links without a renderable target render as an empty string.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::Render`] if no candidate template is registered or
    /// the template fails, [`LinkError::InvalidInput`] for non-record classes
    /// and [`LinkError::Lookup`] if the entity lookup fails.
    pub async fn render(&self, link: &Link) -> Result<String, LinkError> {
        let url = self.resolver.resolve_url(link).await?;

        let output = match url.as_str() {
            Some(url) => {
                let candidates = self.resolver.render_template_candidates(link)?;
                let (name, template) = candidates
                    .iter()
                    .find_map(|name| self.templates.get(name).map(|t| (name, t)))
                    .ok_or_else(|| {
                        LinkError::render(format!(
                            "none of the templates [{}] is registered",
                            candidates.join(", ")
                        ))
                    })?;

                debug!(template = %name, link_id = ?link.id, "Rendering link");
                template(&self.view(link, url))?
            }
            None => String::new(),
        };

        Ok(self.resolver.hooks().output.apply(link, output))
    }

    /// Builds the template values for `link` with its resolved `url`.
    pub fn view(&self, link: &Link, url: &str) -> LinkView {
        let title = link
            .title
            .clone()
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| url.to_string());

        LinkView {
            url: url.to_string(),
            title,
            classes: self.resolver.css_classes(link).join(" "),
            target: self.resolver.target_attribute(link).map(str::to_string),
            id: self.resolver.id_value(link),
        }
    }
}
