use crate::domain::ChangeType;
use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::sync::OnceLock;
use tracing::debug;

fn core_triple_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d+)\.(\d+)\.(\d+)").expect("core triple regex"))
}

/// Semantic version representation.
///
/// Build metadata is carried for display only; it never takes part in
/// incrementing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<String>,
    pub build: Option<String>,
}

impl Version {
    /// Create a new release version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
            prerelease: None,
            build: None,
        }
    }

    /// Parse a strict `MAJOR.MINOR.PATCH[-PRERELEASE][+BUILD]` string
    pub fn parse(text: &str) -> Result<Self> {
        let parsed = semver::Version::parse(text)
            .map_err(|e| ReleaseError::invalid_semver(format!("'{}' ({})", text, e)))?;

        Ok(Version {
            major: parsed.major,
            minor: parsed.minor,
            patch: parsed.patch,
            prerelease: (!parsed.pre.is_empty()).then(|| parsed.pre.to_string()),
            build: (!parsed.build.is_empty()).then(|| parsed.build.to_string()),
        })
    }

    pub fn is_prerelease(&self) -> bool {
        self.prerelease.is_some()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.prerelease {
            write!(f, "-{}", pre)?;
        }
        if let Some(build) = &self.build {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

/// Check `text` against the strict SemVer grammar
pub fn validate(text: &str) -> bool {
    semver::Version::parse(text).is_ok()
}

/// Leading `MAJOR.MINOR.PATCH` digits of `text`, without any suffix
pub fn core_triple(text: &str) -> Option<(&str, &str, &str)> {
    let captures = core_triple_regex().captures(text)?;
    Some((
        captures.get(1)?.as_str(),
        captures.get(2)?.as_str(),
        captures.get(3)?.as_str(),
    ))
}

fn parse_component(component: &str, version: &str) -> Result<u64> {
    component
        .parse::<u64>()
        .map_err(|_| ReleaseError::invalid_semver(format!("'{}' component out of range", version)))
}

fn bump_component(value: u64, version: &str) -> Result<u64> {
    value
        .checked_add(1)
        .ok_or_else(|| ReleaseError::invalid_semver(format!("'{}' would overflow", version)))
}

/// Increment `version` according to `change_type`.
///
/// Only the numeric triple is rewritten; a prerelease or build suffix that
/// followed it is reattached unchanged.
pub fn increment(version: &str, change_type: ChangeType) -> Result<String> {
    if !validate(version) {
        return Err(ReleaseError::invalid_semver(version));
    }

    let (major_str, minor_str, patch_str) =
        core_triple(version).ok_or_else(|| ReleaseError::invalid_semver(version))?;
    let major = parse_component(major_str, version)?;
    let minor = parse_component(minor_str, version)?;
    let patch = parse_component(patch_str, version)?;

    let (major, minor, patch) = match change_type {
        ChangeType::Major => (bump_component(major, version)?, 0, 0),
        ChangeType::Minor => (major, bump_component(minor, version)?, 0),
        ChangeType::Patch => (major, minor, bump_component(patch, version)?),
        ChangeType::Unknown => return Err(ReleaseError::UnsupportedChangeType),
    };

    let triple_len = major_str.len() + minor_str.len() + patch_str.len() + 2;
    let suffix = &version[triple_len..];
    let bumped = format!("{}.{}.{}{}", major, minor, patch, suffix);

    debug!(from = version, to = %bumped, %change_type, "incremented version");
    Ok(bumped)
}
