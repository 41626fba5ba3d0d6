use std::fmt;

/// Non-fatal conditions met while bumping a release.
/// These should be reported to the user but do not abort the run.
#[derive(Debug, Clone, PartialEq)]
pub enum ReleaseWarning {
    /// Changelog was missing or had no entry heading, so the entry was appended
    FirstChangelogEntry { path: String },
    /// Message contained no bullet paragraphs; changelog left untouched
    EmptyChangelogBody { version: String },
    /// Bumped version still carries the previous prerelease tag
    PrereleaseSuffixKept { version: String },
}

impl fmt::Display for ReleaseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseWarning::FirstChangelogEntry { path } => {
                write!(f, "No existing entries in '{}', appending the first one", path)
            }
            ReleaseWarning::EmptyChangelogBody { version } => {
                write!(
                    f,
                    "Changelog message for {} has no '*' bullet paragraphs, skipping changelog entry",
                    version
                )
            }
            ReleaseWarning::PrereleaseSuffixKept { version } => {
                write!(f, "New version '{}' keeps its prerelease suffix", version)
            }
        }
    }
}
