//! The `Post` record shared across pipeline stages.
//!
//! A `Post` is built once per source document at scan time, lives for the
//! duration of the build, and is what the external renderer consumes. It is
//! serialized to JSON as part of the collection manifest, so field names here
//! are contract, not implementation detail.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// A fully validated blog post.
///
/// Construction happens in the scan stage; by the time a `Post` exists, the
/// required fields are known non-empty, `published_at` parsed, and (after the
/// resolution pass) `slug` is unique across the collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    /// Source document path, relative to the content root.
    pub source: PathBuf,
    /// Human-readable title. Non-empty.
    pub title: String,
    /// Routing key: declared in front matter, or derived from the filename.
    pub slug: String,
    /// Publish timestamp; default sort key, descending.
    pub published_at: DateTime<Utc>,
    /// Last-modified timestamp, when the author declared one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Author identifier. Non-empty.
    pub author: String,
    /// Tags for filtering and grouping. Deduplicated, declaration order kept.
    pub tags: Vec<String>,
    /// Listing preview / metadata description. Non-empty.
    pub description: String,
    /// Optional cover image reference, resolved by the renderer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Promoted in listings.
    pub featured: bool,
    /// Excluded from every public query view.
    pub draft: bool,
    /// Raw Markdown body, opaque to the pipeline.
    pub body: String,
    /// Unrecognized front-matter keys, passed through to the renderer.
    #[serde(skip_serializing_if = "BTreeMap::is_empty", default)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Post {
    /// Whether the post carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::sample_post;

    #[test]
    fn has_tag_matches_exactly() {
        let post = sample_post("uuid-primary-keys", "2024-01-15T10:30:00Z");
        assert!(post.has_tag("java"));
        assert!(!post.has_tag("jav"));
        assert!(!post.has_tag("Java"));
    }

    #[test]
    fn manifest_json_omits_absent_optionals() {
        let post = sample_post("uuid-primary-keys", "2024-01-15T10:30:00Z");
        let json = serde_json::to_value(&post).unwrap();
        assert!(json.get("updated_at").is_none());
        assert!(json.get("og_image").is_none());
        assert!(json.get("extra").is_none());
        assert_eq!(json["slug"], "uuid-primary-keys");
    }

    #[test]
    fn manifest_json_round_trips() {
        let post = sample_post("uuid-primary-keys", "2024-01-15T10:30:00Z");
        let json = serde_json::to_string(&post).unwrap();
        let back: Post = serde_json::from_str(&json).unwrap();
        assert_eq!(back.slug, post.slug);
        assert_eq!(back.published_at, post.published_at);
        assert_eq!(back.tags, post.tags);
    }
}
