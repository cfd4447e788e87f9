//! Slug derivation and well-formedness checks.
//!
//! A post's routing key comes from one of two places:
//!
//! - **Declared**: the `slug` front-matter key. Taken verbatim: a declared
//!   slug is a URL commitment, so it is never rewritten. If it is not
//!   URL-safe, that is the author's error to fix, not ours to paper over.
//! - **Derived**: absent a declaration, the filename stem is sanitized into a
//!   slug (`2024-01-15-My-Post.md` → `2024-01-15-my-post`).
//!
//! Collision detection across the whole set lives in the scan stage; this
//! module only knows about one name at a time.

/// Characters permitted in a declared slug.
///
/// Lowercase alphanumerics, dashes, and underscores: the set that survives a
/// URL path segment without percent-encoding surprises. Uppercase is rejected
/// rather than folded: silently lowercasing a declared slug would change the
/// route between builds.
pub fn is_well_formed(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('-')
        && !slug.ends_with('-')
        && slug
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
}

/// Derive a slug from a filename stem.
///
/// - Lowercases
/// - Replaces non-alphanumeric characters (except dashes/underscores) with dashes
/// - Collapses consecutive dashes into one
/// - Strips leading and trailing dashes
/// - Truncates to `max_len` characters (breaks at last dash before the limit)
pub fn from_stem(stem: &str, max_len: usize) -> String {
    let slug: String = stem
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    // Collapse consecutive dashes
    let mut collapsed = String::with_capacity(slug.len());
    let mut prev_dash = false;
    for c in slug.chars() {
        if c == '-' {
            if !prev_dash {
                collapsed.push('-');
            }
            prev_dash = true;
        } else {
            collapsed.push(c);
            prev_dash = false;
        }
    }

    // Strip leading/trailing dashes
    let trimmed = collapsed.trim_matches('-');

    // Truncate at word boundary (last dash before limit)
    if trimmed.len() <= max_len {
        trimmed.to_string()
    } else {
        let truncated = &trimmed[..max_len];
        match truncated.rfind('-') {
            Some(pos) => truncated[..pos].to_string(),
            None => truncated.to_string(),
        }
    }
}
