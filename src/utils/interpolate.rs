//! `{Name}` placeholder substitution for translated strings.

/// Replaces every `{Name}` in `template` with the matching substitution.
///
/// Placeholders without a substitution are left as they are.
pub fn interpolate(template: &str, substitutions: &[(&str, &str)]) -> String {
    substitutions
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interpolate_replaces_placeholders() {
        assert_eq!(
            interpolate("You must enter a {LinkType}", &[("LinkType", "URL")]),
            "You must enter a URL"
        );
    }

    #[test]
    fn test_interpolate_keeps_unknown_placeholders() {
        assert_eq!(interpolate("Hello {Name}", &[]), "Hello {Name}");
        assert_eq!(
            interpolate("{A}{B}{A}", &[("A", "x"), ("C", "z")]),
            "x{B}x"
        );
    }
}
