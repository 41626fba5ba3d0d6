//! Changelog entry formatting and placement
//!
//! Entries look like:
//!
//! ```text
//! ## [1.2.0] - 05-03-2024
//!
//! * added X
//! ```
//!
//! A new entry is spliced in front of the first existing entry heading, so
//! any preamble stays at the top and existing entries keep their order.

use crate::error::{ReleaseError, Result};
use chrono::NaiveDate;
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

fn heading_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^## \[\d+\.\d+\.\d+").expect("heading regex"))
}

fn paragraph_break_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\r?\n(?:[ \t]*\r?\n)+").expect("paragraph regex"))
}

/// Bullet marker a paragraph must start with to reach the changelog
pub const BULLET_MARKER: char = '*';

/// A single versioned, dated changelog block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub version: String,
    pub date: String,
    pub body: String,
}

impl ChangelogEntry {
    pub fn new(version: impl Into<String>, date: impl Into<String>, body: impl Into<String>) -> Self {
        ChangelogEntry {
            version: version.into(),
            date: date.into(),
            body: body.into(),
        }
    }

    pub fn heading(&self) -> String {
        format!("## [{}] - {}", self.version, self.date)
    }
}

impl fmt::Display for ChangelogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n\n{}\n", self.heading(), self.body)
    }
}

/// `day-month-year` with zero-padded day and month
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d-%m-%Y").to_string()
}

/// Parse a `day-month-year` date and re-render it zero-padded.
///
/// Anything chrono cannot read as `%d-%m-%Y` is a configuration error.
pub fn normalize_date(text: &str) -> Result<String> {
    NaiveDate::parse_from_str(text.trim(), "%d-%m-%Y")
        .map(format_date)
        .map_err(|e| {
            ReleaseError::config(format!(
                "Invalid changelog date '{}': expected dd-mm-yyyy ({})",
                text, e
            ))
        })
}

/// Today's date in the changelog format, in local time
pub fn today() -> String {
    format_date(chrono::Local::now().date_naive())
}

/// Byte offset of the first `## [X.Y.Z` heading at the start of a line
pub fn find_first_entry(document: &str) -> Option<usize> {
    heading_regex().find(document).map(|m| m.start())
}

/// Keep only the bullet paragraphs of a free-form message.
///
/// Paragraphs are separated by blank lines; the result rejoins the kept
/// paragraphs with a single blank line and may be empty.
pub fn sanitize_message(raw: &str) -> String {
    paragraph_break_regex()
        .split(raw)
        .map(str::trim_end)
        .filter(|paragraph| paragraph.starts_with(BULLET_MARKER))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Insert `entry` into `document`, returning the new document.
///
/// Repeated calls with the same entry insert duplicates.
pub fn insert_entry(document: &str, entry: &ChangelogEntry) -> String {
    let newline = line_ending(document);
    let block = with_line_ending(&entry.to_string(), newline);

    if let Some(offset) = find_first_entry(document) {
        debug!(offset, version = %entry.version, "inserting before first changelog entry");
        let mut updated = String::with_capacity(document.len() + block.len() + newline.len());
        updated.push_str(&document[..offset]);
        updated.push_str(&block);
        updated.push_str(newline);
        updated.push_str(&document[offset..]);
        return updated;
    }

    debug!(version = %entry.version, "no changelog entry found, appending");
    append_entry(document, &block, newline)
}

/// `\r\n` when the document already uses it, `\n` otherwise
fn line_ending(document: &str) -> &'static str {
    if document.contains("\r\n") {
        "\r\n"
    } else {
        "\n"
    }
}

fn with_line_ending(text: &str, newline: &str) -> String {
    if newline == "\n" {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\n', newline)
}

fn append_entry(document: &str, block: &str, newline: &str) -> String {
    if document.trim().is_empty() {
        return block.to_string();
    }

    let blank_line = newline.repeat(2);
    let separator = if document.ends_with(&blank_line) {
        String::new()
    } else if document.ends_with(newline) {
        newline.to_string()
    } else {
        blank_line
    };
    format!("{}{}{}", document, separator, block)
}

/// Writes entries into changelog documents.
///
/// In strict mode a document without any entry heading is rejected instead
/// of having the entry appended.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangelogWriter {
    require_existing_entry: bool,
}

impl ChangelogWriter {
    pub fn new(require_existing_entry: bool) -> Self {
        ChangelogWriter {
            require_existing_entry,
        }
    }

    pub fn write(&self, document: &str, entry: &ChangelogEntry) -> Result<String> {
        if self.require_existing_entry && find_first_entry(document).is_none() {
            return Err(ReleaseError::malformed(
                "no '## [MAJOR.MINOR.PATCH]' entry heading found",
            ));
        }
        Ok(insert_entry(document, entry))
    }
}
