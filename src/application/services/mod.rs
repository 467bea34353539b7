//! Link services: validation, resolution, rendering and the save workflow.

pub mod link_service;
pub mod renderer;
pub mod resolver;
pub mod validation;

pub use link_service::{LinkService, SaveOutcome};
pub use renderer::{LinkRenderer, LinkView, STOCK_TEMPLATE};
pub use resolver::{LinkResolver, LinkSummary};
pub use validation::{LinkValidator, ValidationResult};
