//! Checks for the URL field of a link.

use url::Url;

/// Returns true for site-relative paths and in-page anchors.
pub fn is_internal_reference(value: &str) -> bool {
    value.starts_with('/') || value.starts_with('#')
}

/// Characters that are never valid unescaped in a URL.
const FORBIDDEN: &[char] = &['\\', '<', '>', '"', '{', '}', '|', '^', '`'];

/// Returns true if `value` is an absolute URL of the form `scheme://host...`.
///
/// The input must already be well formed: the parser would otherwise repair
/// things like `http:example.com` or embedded spaces. `mailto:` and similar
/// host-less URLs do not qualify; links of that kind have their own types.
pub fn is_absolute_url(value: &str) -> bool {
    if value
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || FORBIDDEN.contains(&c))
    {
        return false;
    }

    match Url::parse(value) {
        Ok(url) => {
            let authority = value
                .get(url.scheme().len()..)
                .is_some_and(|rest| rest.starts_with("://"));
            authority && url.host_str().is_some_and(|h| !h.is_empty())
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_internal_references() {
        assert!(is_internal_reference("/about-us"));
        assert!(is_internal_reference("#top"));
        assert!(!is_internal_reference("about-us"));
        assert!(!is_internal_reference(""));
    }

    #[test]
    fn test_absolute_urls() {
        assert!(is_absolute_url("https://example.com"));
        assert!(is_absolute_url("http://localhost:3000/test"));
        assert!(is_absolute_url("ftp://example.com/file.txt"));
        assert!(is_absolute_url("http://192.168.1.1:8080/api"));
    }

    #[test]
    fn test_rejects_relative_and_hostless() {
        assert!(!is_absolute_url("example.com"));
        assert!(!is_absolute_url("not a valid url"));
        assert!(!is_absolute_url("mailto:test@example.com"));
        assert!(!is_absolute_url("javascript:alert('xss')"));
        assert!(!is_absolute_url(""));
    }

    #[test]
    fn test_rejects_input_the_parser_would_repair() {
        assert!(!is_absolute_url("http:example.com"));
        assert!(!is_absolute_url("http:/example.com"));
        assert!(!is_absolute_url("https://example.com/my page"));
        assert!(!is_absolute_url("http://example.com/<x>"));
        assert!(!is_absolute_url("https:\\\\example.com"));
        assert!(!is_absolute_url("https://exa\tmple.com"));
        assert!(!is_absolute_url(" https://example.com"));
    }
}
