//! Content scanning and post validation.
//!
//! Stage 1 of the copydesk build pipeline. Walks a content directory of
//! Markdown documents, validates each front-matter block into a typed
//! [`Post`], resolves every post to a unique slug, and produces the
//! [`Collection`] the query views hang off.
//!
//! ## Directory Structure
//!
//! ```text
//! content/                         # Content root
//! ├── config.toml                  # Build config (optional)
//! ├── uuid-primary-keys.md         # Post
//! ├── 2024/                        # Nesting is fine; routes come from slugs
//! │   └── kafka-streams-binder.md
//! ├── _drafts-in-progress.md       # Underscore prefix = ignored entirely
//! └── notes.txt                    # Non-post extension = ignored
//! ```
//!
//! ## Validation
//!
//! The scanner enforces these rules:
//! - Every document has a front-matter block
//! - `title`, `pubDatetime`, `author`, `description` present and non-empty
//! - `pubDatetime` (and `modDatetime`, when declared) parse as timestamps
//! - Declared slugs are URL-safe; no two documents share a slug
//!
//! ## Error Collection
//!
//! Fixing one typo per build across dozens of posts is poor ergonomics, so
//! the scanner does not stop at the first problem: every error in the whole
//! tree is gathered into a single [`BuildFailure`]. A clean scan yields a
//! `Collection`; there is no partial success.

use crate::collection::Collection;
use crate::config::{self, SiteConfig};
use crate::frontmatter::{self, FrontMatter};
use crate::post::Post;
use crate::slug;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("{file}: no front-matter block (expected `---` fences)")]
    MissingFrontMatter { file: PathBuf },
    #[error("{file}: invalid front matter: {source}")]
    FrontMatter {
        file: PathBuf,
        source: serde_yaml::Error,
    },
    #[error("{file}: missing required field `{field}`")]
    MissingField { field: &'static str, file: PathBuf },
    #[error("{file}: cannot parse `{field}` value \"{value}\" as a timestamp")]
    MalformedDate {
        field: &'static str,
        value: String,
        file: PathBuf,
    },
    #[error("{file}: declared slug \"{slug}\" is not URL-safe")]
    InvalidSlug { slug: String, file: PathBuf },
    #[error("duplicate slug \"{slug}\" declared by: {}", join_files(.files))]
    DuplicateSlug { slug: String, files: Vec<PathBuf> },
}

fn join_files(files: &[PathBuf]) -> String {
    files
        .iter()
        .map(|f| f.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Everything wrong with a content tree, in one error.
///
/// `Display` lists each underlying [`ScanError`] on its own line, in
/// deterministic order (file order for per-document errors, slug order for
/// collisions), so build logs are stable across runs.
#[derive(Debug)]
pub struct BuildFailure {
    pub errors: Vec<ScanError>,
}

impl fmt::Display for BuildFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "build failed with {} error(s):", self.errors.len())?;
        for error in &self.errors {
            writeln!(f, "  {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for BuildFailure {}

impl From<ScanError> for BuildFailure {
    fn from(error: ScanError) -> Self {
        Self {
            errors: vec![error],
        }
    }
}

/// Scan a content directory into a [`Collection`].
///
/// Loads `config.toml` (defaults when absent), walks the tree for post
/// documents, validates each one, and resolves slugs across the set. Either
/// every document is clean and a `Collection` comes back, or the full error
/// list does.
pub fn scan(root: &Path) -> Result<Collection, BuildFailure> {
    let config = config::load_config(root).map_err(|e| BuildFailure::from(ScanError::from(e)))?;
    let files = collect_post_files(root, &config).map_err(BuildFailure::from)?;

    let mut posts = Vec::new();
    let mut errors = Vec::new();

    for file in &files {
        match load_post(root, file, &config) {
            Ok(post) => {
                log::debug!("parsed {} (slug: {})", post.source.display(), post.slug);
                posts.push(post);
            }
            Err(mut doc_errors) => errors.append(&mut doc_errors),
        }
    }

    errors.extend(find_duplicate_slugs(&posts));

    if !errors.is_empty() {
        return Err(BuildFailure { errors });
    }

    log::info!(
        "scanned {} document(s) under {}",
        posts.len(),
        root.display()
    );
    Ok(Collection::new(posts, config))
}

/// Discover post documents under the content root, in stable path order.
///
/// Skips hidden and underscore-prefixed entries (files and whole directories)
/// and anything whose extension is not in `scan.extensions`.
fn collect_post_files(root: &Path, config: &SiteConfig) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.path() == root || !is_ignored(e.file_name().to_string_lossy().as_ref()));

    for entry in walker {
        let entry = entry.map_err(|e| {
            ScanError::Io(e.into_io_error().unwrap_or_else(|| {
                std::io::Error::new(std::io::ErrorKind::Other, "content walk failed")
            }))
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.into_path();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if config.scan.extensions.iter().any(|e| *e == ext) {
            files.push(path);
        }
    }
    Ok(files)
}

/// Hidden (`.`) and underscore-prefixed entries are not content.
fn is_ignored(name: &str) -> bool {
    name.starts_with('.') || name.starts_with('_')
}

/// Read and validate a single document into a `Post`.
///
/// Returns *all* of the document's problems, not just the first: a post
/// missing both `title` and `author` reports two errors.
fn load_post(root: &Path, file: &Path, config: &SiteConfig) -> Result<Post, Vec<ScanError>> {
    let rel = file.strip_prefix(root).unwrap_or(file).to_path_buf();

    let source = fs::read_to_string(file).map_err(|e| vec![ScanError::Io(e)])?;
    let (header, body) = frontmatter::extract(&source)
        .ok_or_else(|| vec![ScanError::MissingFrontMatter { file: rel.clone() }])?;
    let fm = frontmatter::parse(header).map_err(|e| {
        vec![ScanError::FrontMatter {
            file: rel.clone(),
            source: e,
        }]
    })?;

    build_post(rel, fm, body.to_string(), config)
}

/// Turn raw front matter into a validated `Post`.
fn build_post(
    file: PathBuf,
    fm: FrontMatter,
    body: String,
    config: &SiteConfig,
) -> Result<Post, Vec<ScanError>> {
    let mut errors = Vec::new();

    let title = required_field("title", fm.title, &file, &mut errors);
    let author = required_field("author", fm.author, &file, &mut errors);
    let description = required_field("description", fm.description, &file, &mut errors);

    let published_at = match fm.pub_datetime.as_deref().map(str::trim) {
        None | Some("") => {
            errors.push(ScanError::MissingField {
                field: "pubDatetime",
                file: file.clone(),
            });
            None
        }
        Some(value) => parse_dated_field("pubDatetime", value, &file, &mut errors),
    };

    let updated_at = match fm.mod_datetime.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => parse_dated_field("modDatetime", value, &file, &mut errors),
    };

    let slug = resolve_slug(&fm.slug, &file, config, &mut errors);

    // Each None above pushed an error, so a clean document has all five.
    let (Some(title), Some(author), Some(description), Some(published_at), Some(slug)) =
        (title, author, description, published_at, slug)
    else {
        return Err(errors);
    };
    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(Post {
        title,
        author,
        description,
        published_at,
        updated_at,
        slug,
        tags: dedup_tags(fm.tags.unwrap_or_default()),
        og_image: fm.og_image.filter(|s| !s.trim().is_empty()),
        featured: fm.featured.unwrap_or(false),
        draft: fm.draft.unwrap_or(false),
        extra: fm.extra,
        body,
        source: file,
    })
}

/// A required string field must be present and non-empty after trimming.
fn required_field(
    field: &'static str,
    value: Option<String>,
    file: &Path,
    errors: &mut Vec<ScanError>,
) -> Option<String> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Some(v),
        _ => {
            errors.push(ScanError::MissingField {
                field,
                file: file.to_path_buf(),
            });
            None
        }
    }
}

fn parse_dated_field(
    field: &'static str,
    value: &str,
    file: &Path,
    errors: &mut Vec<ScanError>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    match frontmatter::parse_datetime(value) {
        Some(dt) => Some(dt),
        None => {
            errors.push(ScanError::MalformedDate {
                field,
                value: value.to_string(),
                file: file.to_path_buf(),
            });
            None
        }
    }
}

/// Declared slug wins but is never rewritten; an absent or empty declaration
/// falls back to the sanitized filename stem.
fn resolve_slug(
    declared: &Option<String>,
    file: &Path,
    config: &SiteConfig,
    errors: &mut Vec<ScanError>,
) -> Option<String> {
    match declared.as_deref().map(str::trim) {
        Some(declared) if !declared.is_empty() => {
            if slug::is_well_formed(declared) {
                Some(declared.to_string())
            } else {
                errors.push(ScanError::InvalidSlug {
                    slug: declared.to_string(),
                    file: file.to_path_buf(),
                });
                None
            }
        }
        _ => {
            let stem = file
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let derived = slug::from_stem(&stem, config.slugs.max_len);
            if derived.is_empty() {
                // Stem sanitized to nothing, e.g. a file named "---.md"
                errors.push(ScanError::MissingField {
                    field: "slug",
                    file: file.to_path_buf(),
                });
                None
            } else {
                Some(derived)
            }
        }
    }
}

/// Deduplicate tags, keeping declaration order.
fn dedup_tags(tags: Vec<String>) -> Vec<String> {
    let mut seen = Vec::new();
    for tag in tags {
        let tag = tag.trim().to_string();
        if !tag.is_empty() && !seen.contains(&tag) {
            seen.push(tag);
        }
    }
    seen
}

/// Group posts by slug; every group of size > 1 is a collision.
///
/// Collisions are fatal, not silently renamed: automatic renaming would
/// produce unstable URLs across builds. Errors come out in slug order with
/// sorted file lists so the author sees a stable report.
fn find_duplicate_slugs(posts: &[Post]) -> Vec<ScanError> {
    let mut by_slug: BTreeMap<&str, Vec<&Path>> = BTreeMap::new();
    for post in posts {
        by_slug.entry(&post.slug).or_default().push(&post.source);
    }

    by_slug
        .into_iter()
        .filter(|(_, files)| files.len() > 1)
        .map(|(slug, mut files)| {
            files.sort();
            ScanError::DuplicateSlug {
                slug: slug.to_string(),
                files: files.into_iter().map(Path::to_path_buf).collect(),
            }
        })
        .collect()
}
