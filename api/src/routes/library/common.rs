//! Shared helpers for the content-library route group.

lazy_static::lazy_static! {
    /// Lowercase slug: `grammar`, `paper-bank`, `grade-10` ...
    static ref CATEGORY_REGEX: regex::Regex = regex::Regex::new("^[a-z0-9][a-z0-9-]{0,62}$").unwrap();
}

/// Categories are data; anything slug-shaped is accepted without code
/// changes.
pub fn valid_category(category: &str) -> bool {
    CATEGORY_REGEX.is_match(category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_slugs() {
        assert!(valid_category("grammar"));
        assert!(valid_category("paper-bank"));
        assert!(valid_category("grade-10"));
    }

    #[test]
    fn rejects_non_slugs() {
        assert!(!valid_category(""));
        assert!(!valid_category("Grammar"));
        assert!(!valid_category("paper bank"));
        assert!(!valid_category("-grammar"));
    }
}
