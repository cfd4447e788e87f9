//! Shared test utilities for the copydesk test suite.
//!
//! Fixture documents are written into `tempfile` directories so every test
//! gets an isolated content tree it can mutate freely.

use crate::post::Post;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Write a document into a content directory.
pub fn write_doc(dir: &Path, name: &str, contents: &str) {
    std::fs::write(dir.join(name), contents).unwrap();
}

/// A minimal valid front-matter block: required fields filled, `extra_lines`
/// appended verbatim before the closing fence (pass `"slug: ...\n"`,
/// `"tags:\n  - java\n"`, or `""`).
pub fn front(title: &str, pub_datetime: &str, extra_lines: &str) -> String {
    format!(
        "---\n\
         title: {title}\n\
         pubDatetime: {pub_datetime}\n\
         author: jane\n\
         description: A post about {title}.\n\
         {extra_lines}---\n"
    )
}

/// A validated post with the given slug and publish date, tagged
/// `java`/`hibernate`, everything else defaulted.
pub fn sample_post(slug: &str, pub_datetime: &str) -> Post {
    Post {
        source: PathBuf::from(format!("{slug}.md")),
        title: format!("Post {slug}"),
        slug: slug.to_string(),
        published_at: crate::frontmatter::parse_datetime(pub_datetime).unwrap(),
        updated_at: None,
        author: "jane".to_string(),
        tags: vec!["java".to_string(), "hibernate".to_string()],
        description: "A sample post.".to_string(),
        og_image: None,
        featured: false,
        draft: false,
        body: "Body.\n".to_string(),
        extra: BTreeMap::new(),
    }
}

/// Extract slugs from a query result, in order.
pub fn slugs<'a>(posts: &'a [&Post]) -> Vec<&'a str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}
