//! Front-matter extraction and raw parsing.
//!
//! Every post document is a YAML front-matter block delimited by `---` lines,
//! followed by a Markdown body:
//!
//! ```text
//! ---
//! title: UUIDs as Primary Keys
//! slug: uuid-primary-keys
//! pubDatetime: 2024-01-15T10:30:00Z
//! author: jane
//! description: Why random UUIDs hurt your B-tree.
//! tags:
//!   - java
//!   - hibernate
//! ---
//! Body starts here and is opaque to the pipeline.
//! ```
//!
//! ## Two-Step Parsing
//!
//! Front matter deserializes into [`FrontMatter`], where every recognized key
//! is optional. Required-ness is deliberately *not* enforced by serde: a
//! missing `title` must surface as a `MissingField` error naming the field and
//! the file, not as an opaque deserializer message. The scan stage performs
//! that validation when it builds a [`crate::post::Post`].
//!
//! ## Pass-Through Keys
//!
//! Keys outside the recognized schema land in [`FrontMatter::extra`] and are
//! carried on the `Post` untouched. The external renderer owns their meaning.
//! Because every recognized key is `skip_serializing_if` when absent,
//! re-serializing a `FrontMatter` yields the same key-value structure it was
//! parsed from (key order aside).
//!
//! ## Dates
//!
//! `pubDatetime` and `modDatetime` arrive as YAML scalars. [`parse_datetime`]
//! accepts RFC 3339, `YYYY-MM-DD HH:MM:SS` (fractional seconds tolerated),
//! and bare `YYYY-MM-DD` (midnight UTC). Naive timestamps are taken as UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Front-matter fence line.
pub const DELIMITER: &str = "---";

/// Raw front matter as declared in the document.
///
/// All recognized keys are optional here; the scan stage decides which are
/// required. Unrecognized keys collect in `extra` for renderer pass-through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(rename = "pubDatetime", skip_serializing_if = "Option::is_none")]
    pub pub_datetime: Option<String>,
    #[serde(rename = "modDatetime", skip_serializing_if = "Option::is_none")]
    pub mod_datetime: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub featured: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(rename = "ogImage", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<String>,
    /// Unrecognized keys, passed through to the renderer untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

/// Split a document into its front-matter block and body.
///
/// The block must open with `---` on the first line (a UTF-8 BOM is
/// tolerated) and close with another `---` line. Returns `None` when either
/// fence is missing; the caller turns that into a per-file error.
///
/// The returned body starts immediately after the closing fence line, so a
/// leading blank line in the body is preserved as authored.
pub fn extract(source: &str) -> Option<(&str, &str)> {
    let doc = source.strip_prefix('\u{feff}').unwrap_or(source);
    let mut lines = doc.split_inclusive('\n');
    let first = lines.next()?;
    if first.trim_end() != DELIMITER {
        return None;
    }
    let mut offset = first.len();
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &doc[first.len()..offset];
            let body = &doc[offset + line.len()..];
            return Some((header, body));
        }
        offset += line.len();
    }
    None
}

/// Parse an extracted front-matter block into its raw form.
///
/// Type errors (e.g. `tags: java` instead of a sequence) surface here;
/// missing required fields do not, by design.
pub fn parse(header: &str) -> Result<FrontMatter, serde_yaml::Error> {
    serde_yaml::from_str(header)
}

/// Parse a front-matter timestamp scalar.
///
/// Accepted forms, tried in order:
/// - RFC 3339: `2024-01-15T10:30:00Z`, `2024-01-15T10:30:00+02:00`
/// - Naive datetime: `2024-01-15 10:30:00`, `2024-01-15T10:30:00.250`
/// - Bare date: `2024-01-15` (midnight UTC)
///
/// Returns `None` for anything else; the caller reports `MalformedDate`.
pub fn parse_datetime(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&dt));
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| Utc.from_utc_datetime(&dt))
}
