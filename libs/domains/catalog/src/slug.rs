//! Slug derivation for product titles.

/// Derive a URL-safe slug from a product title.
///
/// Deterministic: ASCII alphanumerics are lowercased and kept, every other
/// run of characters collapses into a single hyphen, and hyphens are trimmed
/// from both ends. The result contains only `[a-z0-9-]`.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_separator = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_separator && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(c.to_ascii_lowercase());
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }

    slug
}
