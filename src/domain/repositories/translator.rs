//! Translation catalog trait.

/// Looks up localized strings by key.
///
/// Placeholder substitution (`{LinkType}` and friends) is done by the caller,
/// so implementations only map keys to raw strings.
#[cfg_attr(test, mockall::automock)]
pub trait Translator: Send + Sync {
    /// Returns the translation for `key`, or `None` if the catalog has none.
    fn lookup(&self, key: &str) -> Option<String>;
}
