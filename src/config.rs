use crate::error::{ReleaseError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the project-local configuration file
pub const CONFIG_FILE_NAME: &str = "releasebump.toml";

/// Represents the complete configuration for release-bump.
///
/// Contains label and tag triggers, changelog behavior and the manifest location.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub labels: LabelsConfig,

    #[serde(default)]
    pub triggers: TriggersConfig,

    #[serde(default)]
    pub changelog: ChangelogConfig,

    #[serde(default)]
    pub manifest: ManifestConfig,
}

fn default_major_label() -> String {
    "release:major".to_string()
}

fn default_minor_label() -> String {
    "release:minor".to_string()
}

fn default_patch_label() -> String {
    "release:patch".to_string()
}

/// Repository labels that select a change type
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LabelsConfig {
    #[serde(default = "default_major_label")]
    pub major_label: String,

    #[serde(default = "default_minor_label")]
    pub minor_label: String,

    #[serde(default = "default_patch_label")]
    pub patch_label: String,
}

impl Default for LabelsConfig {
    fn default() -> Self {
        LabelsConfig {
            major_label: default_major_label(),
            minor_label: default_minor_label(),
            patch_label: default_patch_label(),
        }
    }
}

fn default_major_keyword() -> String {
    "major".to_string()
}

fn default_minor_keyword() -> String {
    "minor".to_string()
}

fn default_patch_keyword() -> String {
    "patch".to_string()
}

/// Keywords recognized as `#keyword` or `[keyword]` tags in titles and messages
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct TriggersConfig {
    #[serde(default = "default_major_keyword")]
    pub major: String,

    #[serde(default = "default_minor_keyword")]
    pub minor: String,

    #[serde(default = "default_patch_keyword")]
    pub patch: String,
}

impl Default for TriggersConfig {
    fn default() -> Self {
        TriggersConfig {
            major: default_major_keyword(),
            minor: default_minor_keyword(),
            patch: default_patch_keyword(),
        }
    }
}

fn default_changelog_filename() -> String {
    "CHANGELOG.md".to_string()
}

fn default_true() -> bool {
    true
}

/// Controls whether and how a changelog entry is written
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ChangelogConfig {
    #[serde(default)]
    pub add_entry: bool,

    #[serde(default = "default_changelog_filename")]
    pub filename: String,

    /// Reject changelogs that have no entry heading yet
    #[serde(default)]
    pub require_existing_entry: bool,

    /// Skip the changelog step when the sanitized message has no bullets
    #[serde(default = "default_true")]
    pub skip_empty_body: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        ChangelogConfig {
            add_entry: false,
            filename: default_changelog_filename(),
            require_existing_entry: false,
            skip_empty_body: true,
        }
    }
}

fn default_manifest_path() -> String {
    "package.json".to_string()
}

/// Location of the manifest holding the `version` field
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ManifestConfig {
    #[serde(default = "default_manifest_path")]
    pub path: String,
}

impl Default for ManifestConfig {
    fn default() -> Self {
        ManifestConfig {
            path: default_manifest_path(),
        }
    }
}

/// Overrides supplied on the command line or through the environment.
///
/// `None` leaves the file (or default) value in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigOverrides {
    pub major_label: Option<String>,
    pub minor_label: Option<String>,
    pub patch_label: Option<String>,
    pub manifest_path: Option<String>,
    pub changelog_filename: Option<String>,
    pub add_changelog_entry: Option<bool>,
}

impl Config {
    /// Apply command line / environment overrides on top of this configuration
    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Self {
        if let Some(label) = overrides.major_label {
            self.labels.major_label = label;
        }
        if let Some(label) = overrides.minor_label {
            self.labels.minor_label = label;
        }
        if let Some(label) = overrides.patch_label {
            self.labels.patch_label = label;
        }
        if let Some(path) = overrides.manifest_path {
            self.manifest.path = path;
        }
        if let Some(filename) = overrides.changelog_filename {
            self.changelog.filename = filename;
        }
        if let Some(add_entry) = overrides.add_changelog_entry {
            self.changelog.add_entry = add_entry;
        }
        self
    }

    /// Check the changelog settings against the message that will be written.
    ///
    /// Adding an entry needs both a changelog file name and a message.
    pub fn check_changelog_inputs(&self, message: Option<&str>) -> Result<()> {
        if !self.changelog.add_entry {
            return Ok(());
        }
        if self.changelog.filename.trim().is_empty() {
            return Err(ReleaseError::config(
                "add_changelog_entry is set but no changelog filename was given",
            ));
        }
        if message.map(str::trim).unwrap_or_default().is_empty() {
            return Err(ReleaseError::config(
                "add_changelog_entry is set but the changelog message is empty",
            ));
        }
        Ok(())
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasebump.toml` in current directory
/// 3. `.releasebump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new(CONFIG_FILE_NAME).exists() {
        fs::read_to_string(CONFIG_FILE_NAME)?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    parse_config(&config_str)
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<Config> {
    toml::from_str(config_str).map_err(|e| ReleaseError::config(e.to_string()))
}
