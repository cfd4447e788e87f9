//! # copydesk
//!
//! A build-time content pipeline for Markdown blogs. Your filesystem is the
//! data source: a directory of Markdown documents with YAML front matter
//! becomes a validated, queryable collection of posts for an external
//! renderer to turn into HTML.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Parse     content/*.md  →  FrontMatter + body   (per document)
//! 2. Resolve   post set      →  unique slugs          (whole set)
//! 3. Index     Collection    →  query views           (listings)
//! ```
//!
//! All three stages run inside [`scan::scan`], synchronously, in one pass.
//! The pipeline is pure over the source files: no network, no database, no
//! state beyond the Markdown tree itself. Rendering (Markdown → HTML,
//! templating, pagination) belongs to an external collaborator that consumes
//! the [`collection::Collection`], either in-process or via its JSON form.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Walks the content tree, validates documents, collects every error |
//! | [`frontmatter`] | `---`-fenced YAML extraction, raw parsing, timestamp parsing |
//! | [`slug`] | Filename-derived slugs and URL-safety checks |
//! | [`post`] | The `Post` record, the renderer's data contract |
//! | [`collection`] | Query views: published, by tag, featured, tag inventory |
//! | [`config`] | Optional `config.toml` at the content root |
//! | [`report`] | Author-facing failure and summary formatting |
//!
//! # Design Decisions
//!
//! ## Errors Come in Lists
//!
//! A scan never stops at the first problem. Every missing field, malformed
//! date, and slug collision across the whole tree lands in one
//! [`scan::BuildFailure`], because fixing dozens of posts one build at a time
//! is miserable. There is no partial success: the build yields a clean
//! collection or nothing.
//!
//! ## Slugs Are Commitments
//!
//! A declared `slug` is taken verbatim and collisions are fatal. Automatic
//! renaming or sanitizing of declared slugs would silently move URLs between
//! builds; only *derived* slugs (from filenames) get sanitized, since they
//! were never promised to anyone.
//!
//! ## Drafts Stay in the Set
//!
//! `draft: true` posts are parsed and validated like everything else (they
//! are part of the source of truth), but no public query view can return
//! one. The exclusion lives in [`collection::Collection`], not in the
//! scanner, so a future author-only preview surface would be a new, explicit
//! method rather than a flag on the existing ones.
//!
//! ## The Body Is Opaque
//!
//! Markdown never gets interpreted here. The body passes through byte-for-
//! byte, as do unrecognized front-matter keys, so the renderer sees exactly
//! what the author wrote.

pub mod collection;
pub mod config;
pub mod frontmatter;
pub mod post;
pub mod report;
pub mod scan;
pub mod slug;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use collection::{Collection, SortOrder};
pub use post::Post;
pub use scan::{BuildFailure, ScanError, scan};
