use crate::config::Config;
use crate::domain::{
    classify_from_labels, classify_from_text, ChangeType, LabelTriggers, TriggerPatterns,
};
use crate::error::{ReleaseError, Result};
use tracing::debug;

/// Raw evidence a change type is derived from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeSignal {
    /// Commit or pull request title
    Text(String),
    /// Label names attached to the pull request
    Labels(Vec<String>),
    /// Category chosen up front by the caller
    Declared(ChangeType),
}

/// Classifies change signals using the configured tags and labels
#[derive(Debug, Clone)]
pub struct ChangeClassifier {
    patterns: TriggerPatterns,
    labels: LabelTriggers,
}

impl ChangeClassifier {
    /// Create a classifier from explicit triggers
    pub fn new(patterns: TriggerPatterns, labels: LabelTriggers) -> Self {
        ChangeClassifier { patterns, labels }
    }

    /// Create a classifier from the loaded configuration
    pub fn from_config(config: &Config) -> Result<Self> {
        let patterns = TriggerPatterns::new(
            &config.triggers.major,
            &config.triggers.minor,
            &config.triggers.patch,
        )?;
        let labels = LabelTriggers::new(
            config.labels.major_label.clone(),
            config.labels.minor_label.clone(),
            config.labels.patch_label.clone(),
        );
        Ok(ChangeClassifier::new(patterns, labels))
    }

    pub fn classify_text(&self, text: Option<&str>) -> ChangeType {
        classify_from_text(text, &self.patterns)
    }

    pub fn classify_labels<S: AsRef<str>>(&self, labels: &[S]) -> ChangeType {
        classify_from_labels(labels, &self.labels)
    }

    /// Classify any signal; `Unknown` is returned, never raised
    pub fn classify(&self, signal: &ChangeSignal) -> ChangeType {
        let change_type = match signal {
            ChangeSignal::Text(text) => self.classify_text(Some(text)),
            ChangeSignal::Labels(labels) => self.classify_labels(labels),
            ChangeSignal::Declared(change_type) => *change_type,
        };
        debug!(?signal, %change_type, "classified change signal");
        change_type
    }

    /// Classify and insist on a concrete change type.
    ///
    /// The error lists the triggers recognized for the signal's strategy.
    pub fn require(&self, signal: &ChangeSignal) -> Result<ChangeType> {
        let change_type = self.classify(signal);
        if change_type.is_known() {
            return Ok(change_type);
        }

        let triggers = match signal {
            ChangeSignal::Text(_) => self.patterns.describe(),
            ChangeSignal::Labels(_) => self.labels.describe(),
            ChangeSignal::Declared(_) => ChangeType::PRIORITY
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
        };
        Err(ReleaseError::unknown_change_type(triggers))
    }
}

impl Default for ChangeClassifier {
    fn default() -> Self {
        ChangeClassifier::new(
            TriggerPatterns::default(),
            LabelTriggers::new("release:major", "release:minor", "release:patch"),
        )
    }
}
