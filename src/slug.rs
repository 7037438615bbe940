// Folder-name derivation for search terms.

/// Turn a free-text search term into a filesystem-safe slug.
///
/// Keeps ASCII letters, digits, `-` and `_`, turns each run of whitespace
/// into a single `-` and lower-cases the rest. Empty input gives an empty
/// slug; rejecting empty terms is the caller's job.
pub fn sanitize(term: &str) -> String {
    let mut slug = String::with_capacity(term.len());
    let mut in_whitespace = false;

    for c in term.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
                in_whitespace = true;
            }
        } else if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            slug.push(c.to_ascii_lowercase());
            in_whitespace = false;
        }
    }

    slug
}
