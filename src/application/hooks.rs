//! Post-processing chains for computed link values.
//!
//! Each chain is an ordered list of callbacks. After the core computation the
//! value is passed through every callback in registration order; each one
//! receives the link and the value so far and returns the new value.

use crate::application::services::ValidationResult;
use crate::domain::entities::{Link, LinkUrl};

type Hook<T> = Box<dyn Fn(&Link, T) -> T + Send + Sync>;

/// An ordered chain of callbacks over values of type `T`.
pub struct HookChain<T> {
    hooks: Vec<Hook<T>>,
}

impl<T> Default for HookChain<T> {
    fn default() -> Self {
        Self { hooks: Vec::new() }
    }
}

impl<T> HookChain<T> {
    /// Appends a callback to the end of the chain.
    pub fn push<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&Link, T) -> T + Send + Sync + 'static,
    {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Runs `value` through every callback in order.
    pub fn apply(&self, link: &Link, value: T) -> T {
        self.hooks.iter().fold(value, |value, hook| hook(link, value))
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }
}

/// Hook chains for every computed link value.
#[derive(Default)]
pub struct LinkHooks {
    pub url: HookChain<LinkUrl>,
    pub title: HookChain<String>,
    pub classes: HookChain<Vec<String>>,
    pub templates: HookChain<Vec<String>>,
    pub id_value: HookChain<Option<String>>,
    pub validation: HookChain<ValidationResult>,
    pub output: HookChain<String>,
}

impl LinkHooks {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_chain_returns_value() {
        let chain: HookChain<String> = HookChain::default();
        assert!(chain.is_empty());
        assert_eq!(chain.apply(&Link::default(), "x".to_string()), "x");
    }

    #[test]
    fn test_hooks_run_in_registration_order() {
        let mut chain = HookChain::default();
        chain
            .push(|_, v: String| format!("{v}a"))
            .push(|_, v: String| format!("{v}b"));

        assert_eq!(chain.len(), 2);
        assert_eq!(chain.apply(&Link::default(), "x".to_string()), "xab");
    }

    #[test]
    fn test_hooks_see_the_link() {
        let mut hooks = LinkHooks::new();
        hooks.id_value.push(|link, _| link.id.map(|id| format!("link-{id}")));

        let mut link = Link::default();
        link.id = Some(4);
        assert_eq!(hooks.id_value.apply(&link, None).as_deref(), Some("link-4"));
    }
}
