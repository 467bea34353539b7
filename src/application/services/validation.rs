//! Field validation for link records.

use std::sync::{Arc, LazyLock};

use crate::application::hooks::LinkHooks;
use crate::domain::entities::{Link, LinkType};
use crate::domain::registry::TypeRegistry;
use crate::utils::url_check::{is_absolute_url, is_internal_reference};
use regex::Regex;
use serde::Serialize;
use tracing::debug;
use validator::ValidateEmail;

/// Optional `+`, then digits/letters/hyphens/spaces, then an optional pause or
/// extension marker followed by digits/hyphens/spaces. Only ASCII whitespace
/// counts as a space.
static PHONE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[0-9a-zA-Z\- \t\r\n\x0B\x0C]*[,#]?[0-9\- \t\r\n\x0B\x0C]*$").unwrap()
});

const INVALID_URL: &str = "Please enter a valid URL. Be sure to include http:// for an external URL, or begin your internal url/anchor with a \"/\" or \"#\" character";
const INVALID_EMAIL: &str = "Please enter a valid Email address";
const INVALID_PHONE: &str = "Please enter a valid Phone number";
const MISSING_VALUE: &str = "You must enter a {LinkType}";
const MISSING_REFERENCE: &str = "Please select a {LinkType}";

/// Pass/fail outcome of validating a link, with the first failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub message: Option<String>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Checks that the fields required by a link's type are present and
/// well-formed.
///
/// Validation is a pure function of the link and the registry. Failures are
/// returned as data; the caller decides whether to block persistence.
pub struct LinkValidator {
    registry: Arc<TypeRegistry>,
    hooks: Arc<LinkHooks>,
}

impl LinkValidator {
    pub fn new(registry: Arc<TypeRegistry>, hooks: Arc<LinkHooks>) -> Self {
        Self { registry, hooks }
    }

    /// Validates `link`, stopping at the first failure.
    pub fn validate(&self, link: &Link) -> ValidationResult {
        let result = self
            .check_presence(link)
            .or_else(|| self.check_format(link))
            .unwrap_or_else(ValidationResult::ok);

        if !result.valid {
            debug!(
                link_type = %link.link_type,
                message = ?result.message,
                "Link failed validation"
            );
        }

        self.hooks.validation.apply(link, result)
    }

    fn check_presence(&self, link: &Link) -> Option<ValidationResult> {
        let link_type = &link.link_type;

        if link_type.is_text() {
            if link.text_value().is_some() {
                return None;
            }
            let key = format!(
                "Link.VALIDATIONERROR_EMPTY{}",
                link_type.key().to_uppercase()
            );
            return Some(self.failure(&key, MISSING_VALUE, link_type));
        }

        if self.registry.is_reference_type(link_type) && link.reference_id().is_none() {
            return Some(self.failure("Link.VALIDATIONERROR_OBJECT", MISSING_REFERENCE, link_type));
        }

        None
    }

    fn check_format(&self, link: &Link) -> Option<ValidationResult> {
        let value = link.text_value().unwrap_or_default();

        let (valid, key, message) = match link.link_type {
            LinkType::Url => (
                is_internal_reference(value) || is_absolute_url(value),
                "Link.VALIDATIONERROR_VALIDURL",
                INVALID_URL,
            ),
            LinkType::Email => (
                value.validate_email(),
                "Link.VALIDATIONERROR_VALIDEMAIL",
                INVALID_EMAIL,
            ),
            LinkType::Phone => (
                PHONE_REGEX.is_match(value),
                "Link.VALIDATIONERROR_VALIDPHONE",
                INVALID_PHONE,
            ),
            _ => return None,
        };

        (!valid).then(|| ValidationResult::error(self.registry.translate(key, message)))
    }

    fn failure(&self, key: &str, default: &str, link_type: &LinkType) -> ValidationResult {
        let label = self
            .registry
            .type_label(link_type)
            .unwrap_or_else(|| link_type.key().to_string());
        ValidationResult::error(
            self.registry
                .translate_with(key, default, &[("LinkType", label.as_str())]),
        )
    }
}
