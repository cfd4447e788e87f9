//! Author-facing output formatting.
//!
//! Two reports, one contract: each has a `format_*` function returning
//! `Vec<String>` (pure, testable, no I/O) and a `print_*` wrapper that writes
//! to the terminal. The build wrapper that invokes the pipeline decides where
//! the lines go; nothing here is needed for correctness.
//!
//! ## Failure Report
//!
//! ```text
//! Build failed: 3 error(s)
//!     broken.md: missing required field `title`
//!     broken.md: missing required field `author`
//!     duplicate slug "my-post" declared by: first.md, second.md
//! ```
//!
//! ## Scan Summary
//!
//! ```text
//! Posts
//! 001 UUIDs as Primary Keys
//!     Source: uuid-primary-keys.md
//!     Tags: java, hibernate
//! 002 Kafka Streams Binder [draft]
//!     Source: 2024/kafka-streams-binder.md
//!
//! 1 published, 1 draft, 2 tags
//! ```

use crate::collection::{Collection, SortOrder};
use crate::scan::BuildFailure;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Render a build failure as one line per error, with a count header.
pub fn format_failure(failure: &BuildFailure) -> Vec<String> {
    let mut lines = vec![format!("Build failed: {} error(s)", failure.errors.len())];
    for error in &failure.errors {
        lines.push(format!("    {error}"));
    }
    lines
}

/// Render a content inventory: every post in listing order (drafts last),
/// with source path and tags, then a one-line summary.
pub fn format_summary(collection: &Collection) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    let published = collection.list_published(SortOrder::Newest);
    let drafts: Vec<_> = collection.posts().iter().filter(|p| p.draft).collect();

    for (pos, post) in published.iter().chain(drafts.iter()).enumerate() {
        let marker = if post.draft { " [draft]" } else { "" };
        lines.push(format!("{} {}{marker}", format_index(pos + 1), post.title));
        lines.push(format!("    Source: {}", post.source.display()));
        if !post.tags.is_empty() {
            lines.push(format!("    Tags: {}", post.tags.join(", ")));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} published, {} draft(s), {} tag(s)",
        published.len(),
        drafts.len(),
        collection.tags().len()
    ));
    lines
}

/// Print the failure report to stderr.
pub fn print_failure(failure: &BuildFailure) {
    for line in format_failure(failure) {
        eprintln!("{line}");
    }
}

/// Print the scan summary to stdout.
pub fn print_summary(collection: &Collection) {
    for line in format_summary(collection) {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::Collection;
    use crate::config::SiteConfig;
    use crate::scan::ScanError;
    use crate::test_helpers::sample_post;
    use std::path::PathBuf;

    #[test]
    fn failure_report_counts_and_indents() {
        let failure = BuildFailure {
            errors: vec![
                ScanError::MissingField {
                    field: "title",
                    file: PathBuf::from("broken.md"),
                },
                ScanError::DuplicateSlug {
                    slug: "my-post".into(),
                    files: vec![PathBuf::from("first.md"), PathBuf::from("second.md")],
                },
            ],
        };
        let lines = format_failure(&failure);
        assert_eq!(lines[0], "Build failed: 2 error(s)");
        assert!(lines[1].contains("broken.md"));
        assert!(lines[2].contains("first.md, second.md"));
    }

    #[test]
    fn summary_lists_published_then_drafts() {
        let mut draft = sample_post("wip", "2024-03-01");
        draft.draft = true;
        draft.title = "Work in Progress".into();
        let collection = Collection::new(
            vec![draft, sample_post("done", "2024-01-01")],
            SiteConfig::default(),
        );

        let lines = format_summary(&collection);
        assert_eq!(lines[0], "Posts");
        assert!(lines[1].starts_with("001 "));
        assert!(lines.iter().any(|l| l.contains("[draft]")));
        assert_eq!(lines.last().unwrap(), "1 published, 1 draft(s), 2 tag(s)");
    }

    #[test]
    fn summary_index_is_zero_padded() {
        assert_eq!(format_index(3), "003");
        assert_eq!(format_index(42), "042");
    }
}
