//! Main workflow orchestration logic
//!
//! Reads the manifest and changelog from disk, runs them through the pure
//! domain functions and writes the results back. Kept apart from `main.rs`
//! so the workflow can be driven programmatically without clap.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::analyzer::{ChangeClassifier, ChangeSignal};
use crate::boundary::ReleaseWarning;
use crate::config::Config;
use crate::domain::changelog::{find_first_entry, normalize_date, today};
use crate::domain::{
    increment, sanitize_message, validate, ChangeType, ChangelogEntry, ChangelogWriter, Version,
};
use crate::error::{ReleaseError, Result};
use crate::manifest::Manifest;

/// Arguments for the bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Evidence the change type is classified from
    pub signal: ChangeSignal,

    /// Free-form message sanitized into the changelog body
    pub changelog_message: Option<String>,

    /// Entry date; today's date when absent
    pub date: Option<String>,

    /// Compute everything but write nothing
    pub dry_run: bool,
}

/// Result of a successful bump workflow
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// Version found in the manifest before the bump
    pub current_version: String,

    /// Version written to the manifest
    pub new_version: String,

    pub change_type: ChangeType,

    /// Whether a changelog entry was (or in dry-run mode would be) written
    pub changelog_updated: bool,

    pub warnings: Vec<ReleaseWarning>,
}

impl WorkflowResult {
    /// `key=value` lines for the embedding automation
    pub fn output_lines(&self) -> String {
        format!(
            "current_version={}\nnew_version={}\n",
            self.current_version, self.new_version
        )
    }
}

/// Main bump workflow
///
/// 1. Check changelog inputs and the entry date against configuration
/// 2. Read the current version from the manifest
/// 3. Classify the change signal and increment
/// 4. Optionally build the changelog with a new entry
/// 5. Write the changelog, then the manifest
pub fn run_bump_workflow(args: BumpWorkflowArgs, config: &Config) -> Result<WorkflowResult> {
    config.check_changelog_inputs(args.changelog_message.as_deref())?;
    let date = match args.date.as_deref() {
        Some(date) => normalize_date(date)?,
        None => today(),
    };

    let manifest_path = PathBuf::from(&config.manifest.path);
    let mut manifest = Manifest::load(&manifest_path)?;
    let current_version = manifest.version()?;
    if !validate(&current_version) {
        return Err(ReleaseError::invalid_semver(current_version));
    }

    let classifier = ChangeClassifier::from_config(config)?;
    let change_type = classifier.require(&args.signal)?;
    let new_version = increment(&current_version, change_type)?;
    info!(%current_version, %new_version, %change_type, "computed new version");

    let mut warnings = Vec::new();
    if Version::parse(&new_version)?.is_prerelease() {
        warnings.push(ReleaseWarning::PrereleaseSuffixKept {
            version: new_version.clone(),
        });
    }

    let changelog_document = if config.changelog.add_entry {
        let message = args.changelog_message.as_deref().unwrap_or_default();
        prepare_changelog(config, &new_version, &date, message, &mut warnings)?
    } else {
        None
    };

    manifest.set_version(&new_version)?;
    let manifest_text = manifest.render()?;

    if args.dry_run {
        debug!("dry run, leaving files untouched");
    } else {
        // A failed changelog write must leave the manifest at its old version
        if let Some(document) = &changelog_document {
            fs::write(&config.changelog.filename, document)?;
        }
        fs::write(&manifest_path, manifest_text)?;
    }

    Ok(WorkflowResult {
        current_version,
        new_version,
        change_type,
        changelog_updated: changelog_document.is_some(),
        warnings,
    })
}

/// Build the updated changelog text, or `None` when the step is skipped
fn prepare_changelog(
    config: &Config,
    version: &str,
    date: &str,
    message: &str,
    warnings: &mut Vec<ReleaseWarning>,
) -> Result<Option<String>> {
    let body = sanitize_message(message);
    if body.is_empty() && config.changelog.skip_empty_body {
        warnings.push(ReleaseWarning::EmptyChangelogBody {
            version: version.to_string(),
        });
        return Ok(None);
    }

    let path = Path::new(&config.changelog.filename);
    let document = if path.exists() {
        fs::read_to_string(path)?
    } else {
        String::new()
    };

    if find_first_entry(&document).is_none() && !config.changelog.require_existing_entry {
        warnings.push(ReleaseWarning::FirstChangelogEntry {
            path: config.changelog.filename.clone(),
        });
    }

    let writer = ChangelogWriter::new(config.changelog.require_existing_entry);
    let entry = ChangelogEntry::new(version, date, body);
    writer.write(&document, &entry).map(Some)
}

/// Append workflow outputs to a file such as `$GITHUB_OUTPUT`
pub fn write_outputs(path: &Path, result: &WorkflowResult) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    file.write_all(result.output_lines().as_bytes())?;
    Ok(())
}
