//! Query views over the scanned post set.
//!
//! The [`Collection`] is the pipeline's output contract: the full post set
//! plus the listing queries a renderer needs for index pages, tag pages, and
//! featured strips. It serializes to JSON in its entirety, so a renderer in
//! another process can consume the manifest instead of linking the crate.
//!
//! ## The Draft Guarantee
//!
//! Draft posts stay in the collection (the source set is the source of
//! truth) but are invisible to every public query: `list_published`,
//! `list_by_tag`, `list_featured`, `by_slug`, and `tags` all filter them.
//! There is no parameter that surfaces a draft through these views; tooling
//! that genuinely needs drafts reads [`Collection::posts`], which is
//! explicitly not a listing.
//!
//! ## Ordering
//!
//! Listings sort by publish date with ties broken by ascending slug, in both
//! directions, so rebuilds of an unchanged tree emit identical output.

use crate::config::SiteConfig;
use crate::post::Post;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Listing order for [`Collection::list_published`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Newest publish date first (the default everywhere).
    #[default]
    Newest,
    /// Oldest publish date first (archive pages).
    Oldest,
}

/// All parsed posts for one build, plus the config that produced them.
#[derive(Debug, Serialize)]
pub struct Collection {
    posts: Vec<Post>,
    config: SiteConfig,
}

impl Collection {
    /// Build a collection from validated posts.
    ///
    /// Posts are held newest-first so the manifest itself is deterministic;
    /// queries re-sort as needed.
    pub fn new(mut posts: Vec<Post>, config: SiteConfig) -> Self {
        posts.sort_by(compare_newest_first);
        Self { posts, config }
    }

    /// The full source set, drafts included. Not a public listing.
    pub fn posts(&self) -> &[Post] {
        &self.posts
    }

    /// The config this collection was built with.
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Non-draft posts in the requested order.
    pub fn list_published(&self, order: SortOrder) -> Vec<&Post> {
        let mut posts: Vec<&Post> = self.published().collect();
        if order == SortOrder::Oldest {
            posts.sort_by(|a, b| compare_oldest_first(a, b));
        }
        posts
    }

    /// Published posts carrying `tag`, newest first.
    ///
    /// An unknown tag is not an error; it yields an empty list.
    pub fn list_by_tag(&self, tag: &str) -> Vec<&Post> {
        self.published().filter(|p| p.has_tag(tag)).collect()
    }

    /// Published posts flagged `featured`, newest first.
    pub fn list_featured(&self) -> Vec<&Post> {
        self.published().filter(|p| p.featured).collect()
    }

    /// Look up a published post by its routing key.
    pub fn by_slug(&self, slug: &str) -> Option<&Post> {
        self.published().find(|p| p.slug == slug)
    }

    /// Tag inventory over published posts: `(tag, post count)`, sorted by
    /// count descending then tag ascending. Feeds the renderer's tag index.
    pub fn tags(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for post in self.published() {
            for tag in &post.tags {
                *counts.entry(tag).or_default() += 1;
            }
        }
        let mut tags: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(tag, count)| (tag.to_string(), count))
            .collect();
        tags.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        tags
    }

    /// Serialize the whole collection as the pretty-printed JSON manifest
    /// an out-of-process renderer consumes.
    pub fn to_manifest_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    fn published(&self) -> impl Iterator<Item = &Post> {
        self.posts.iter().filter(|p| !p.draft)
    }
}

fn compare_newest_first(a: &Post, b: &Post) -> Ordering {
    b.published_at
        .cmp(&a.published_at)
        .then_with(|| a.slug.cmp(&b.slug))
}

fn compare_oldest_first(a: &Post, b: &Post) -> Ordering {
    a.published_at
        .cmp(&b.published_at)
        .then_with(|| a.slug.cmp(&b.slug))
}
