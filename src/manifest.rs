//! Manifest documents holding the project `version` field
//!
//! Two formats are understood:
//! - JSON (`package.json`): top-level `"version"`, key order preserved on write
//! - TOML (`Cargo.toml`, `pyproject.toml`, ...): top-level `version` or
//!   `[package].version`, formatting and comments preserved on write

use crate::error::{ReleaseError, Result};
use std::fs;
use std::path::Path;
use toml_edit::DocumentMut;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Json,
    Toml,
}

impl ManifestFormat {
    /// Detect the format from a file extension
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(ManifestFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(ManifestFormat::Toml),
            _ => Err(ReleaseError::manifest(format!(
                "Unsupported manifest '{}': expected a .json or .toml file",
                path.display()
            ))),
        }
    }
}

/// A parsed manifest document
#[derive(Debug, Clone)]
pub enum Manifest {
    Json(serde_json::Value),
    Toml(DocumentMut),
}

impl Manifest {
    /// Read and parse a manifest file
    pub fn load(path: &Path) -> Result<Self> {
        let format = ManifestFormat::from_path(path)?;
        let text = fs::read_to_string(path)?;
        Manifest::parse(&text, format)
    }

    pub fn parse(text: &str, format: ManifestFormat) -> Result<Self> {
        match format {
            ManifestFormat::Json => {
                let value: serde_json::Value = serde_json::from_str(text)?;
                if !value.is_object() {
                    return Err(ReleaseError::manifest("JSON manifest must be an object"));
                }
                Ok(Manifest::Json(value))
            }
            ManifestFormat::Toml => Ok(Manifest::Toml(text.parse::<DocumentMut>()?)),
        }
    }

    /// Current value of the `version` field
    pub fn version(&self) -> Result<String> {
        let version = match self {
            Manifest::Json(value) => value.get("version").and_then(|v| v.as_str()),
            Manifest::Toml(doc) => doc
                .get("version")
                .and_then(|item| item.as_str())
                .or_else(|| {
                    doc.get("package")
                        .and_then(|package| package.get("version"))
                        .and_then(|item| item.as_str())
                }),
        };

        version
            .map(str::to_string)
            .ok_or_else(|| ReleaseError::manifest("No string 'version' field found"))
    }

    /// Replace the `version` field, leaving the rest of the document alone
    pub fn set_version(&mut self, version: &str) -> Result<()> {
        match self {
            Manifest::Json(value) => {
                let field = value
                    .get_mut("version")
                    .filter(|v| v.is_string())
                    .ok_or_else(|| ReleaseError::manifest("No string 'version' field found"))?;
                *field = serde_json::Value::String(version.to_string());
            }
            Manifest::Toml(doc) => {
                if doc.get("version").and_then(|item| item.as_str()).is_some() {
                    doc["version"] = toml_edit::value(version);
                } else if doc
                    .get("package")
                    .and_then(|package| package.get("version"))
                    .and_then(|item| item.as_str())
                    .is_some()
                {
                    doc["package"]["version"] = toml_edit::value(version);
                } else {
                    return Err(ReleaseError::manifest("No string 'version' field found"));
                }
            }
        }
        Ok(())
    }

    /// Serialize the document back to text
    pub fn render(&self) -> Result<String> {
        match self {
            Manifest::Json(value) => {
                let mut text = serde_json::to_string_pretty(value)?;
                text.push('\n');
                Ok(text)
            }
            Manifest::Toml(doc) => Ok(doc.to_string()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render()?)?;
        Ok(())
    }
}
