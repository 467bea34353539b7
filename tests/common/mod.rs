#![allow(dead_code)]

use linkable::application::hooks::LinkHooks;
use linkable::domain::registry::{TypeRegistry, TypeRegistryBuilder};
use linkable::infrastructure::memory::{InMemoryEntityStore, InMemoryLinkRepository};
use linkable::prelude::*;
use std::sync::Arc;

pub type TestService = LinkService<InMemoryLinkRepository, InMemoryEntityStore>;

/// Fully wired link stack over in-memory stores.
pub struct TestContext {
    pub registry: Arc<TypeRegistry>,
    pub entities: Arc<InMemoryEntityStore>,
    pub links: Arc<InMemoryLinkRepository>,
    pub validator: Arc<LinkValidator>,
    pub resolver: Arc<LinkResolver<InMemoryEntityStore>>,
    pub service: TestService,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_registry(default_registry())
    }

    pub fn with_registry(builder: TypeRegistryBuilder) -> Self {
        Self::with_hooks(builder, LinkHooks::new())
    }

    pub fn with_hooks(builder: TypeRegistryBuilder, hooks: LinkHooks) -> Self {
        let registry = Arc::new(builder.build().unwrap());
        let hooks = Arc::new(hooks);
        let entities = Arc::new(InMemoryEntityStore::new());
        let links = Arc::new(InMemoryLinkRepository::new());

        let validator = Arc::new(LinkValidator::new(registry.clone(), hooks.clone()));
        let resolver = Arc::new(LinkResolver::new(
            registry.clone(),
            entities.clone(),
            hooks,
        ));
        let service = LinkService::new(links.clone(), validator.clone(), resolver.clone());

        Self {
            registry,
            entities,
            links,
            validator,
            resolver,
            service,
        }
    }

    pub fn renderer(&self) -> LinkRenderer<InMemoryEntityStore> {
        LinkRenderer::new(self.resolver.clone())
    }

    /// Saves a link that is expected to pass validation.
    pub async fn save(&self, link: Link) -> Link {
        self.service
            .save(link)
            .await
            .unwrap()
            .saved()
            .expect("link should pass validation")
    }
}

pub fn default_registry() -> TypeRegistryBuilder {
    TypeRegistry::builder()
        .with_reference_type("Product", "Product page")
        .with_style("Card", "Card")
        .with_style("button", "Button")
        .with_record_class("CallToActionLink", "Link")
}

pub fn file(id: i64, link: &str) -> RelatedEntity {
    RelatedEntity::new("File", id)
        .with_link(link)
        .with_title(format!("file-{id}.pdf"))
}

pub fn page(id: i64, link: &str, title: &str) -> RelatedEntity {
    RelatedEntity::new("SiteTree", id)
        .with_link(link)
        .with_title(title)
}
