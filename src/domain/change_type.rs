use crate::error::{ReleaseError, Result};
use regex::Regex;
use std::fmt;
use std::str::FromStr;

/// Nature of a proposed change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeType {
    Major,
    Minor,
    Patch,
    /// No trigger matched; callers decide whether this is fatal
    Unknown,
}

impl ChangeType {
    /// Evaluation order shared by every classification strategy
    pub const PRIORITY: [ChangeType; 3] = [ChangeType::Major, ChangeType::Minor, ChangeType::Patch];

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Major => "major",
            ChangeType::Minor => "minor",
            ChangeType::Patch => "patch",
            ChangeType::Unknown => "unknown",
        }
    }

    pub fn is_known(&self) -> bool {
        *self != ChangeType::Unknown
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeType {
    type Err = ReleaseError;

    /// Parses a declared category. `unknown` is not accepted as a declaration.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "major" => Ok(ChangeType::Major),
            "minor" => Ok(ChangeType::Minor),
            "patch" => Ok(ChangeType::Patch),
            _ => Err(ReleaseError::unknown_change_type(["major", "minor", "patch"])),
        }
    }
}

/// Inline tag matchers, one per known change type.
///
/// Each matcher accepts `#keyword` or `[keyword]` (whitespace allowed inside
/// the brackets), case-insensitively. Matching holds no state between calls.
#[derive(Debug, Clone)]
pub struct TriggerPatterns {
    keywords: [String; 3],
    matchers: [Regex; 3],
}

impl TriggerPatterns {
    /// Build matchers for custom tag keywords
    pub fn new(major: &str, minor: &str, patch: &str) -> Result<Self> {
        let keywords = [major.to_string(), minor.to_string(), patch.to_string()];
        let mut matchers = Vec::with_capacity(3);
        for keyword in &keywords {
            if keyword.trim().is_empty() {
                return Err(ReleaseError::config("Trigger keywords must not be empty"));
            }
            let escaped = regex::escape(keyword.trim());
            let pattern = format!(r"(?i)(?:#{escaped}\b|\[\s*{escaped}\s*\])");
            let re = Regex::new(&pattern).map_err(|e| {
                ReleaseError::config(format!("Invalid trigger keyword '{}': {}", keyword, e))
            })?;
            matchers.push(re);
        }

        let matchers: [Regex; 3] = matchers
            .try_into()
            .map_err(|_| ReleaseError::config("Expected exactly three trigger patterns"))?;

        Ok(TriggerPatterns { keywords, matchers })
    }

    fn matcher(&self, change_type: ChangeType) -> Option<&Regex> {
        match change_type {
            ChangeType::Major => Some(&self.matchers[0]),
            ChangeType::Minor => Some(&self.matchers[1]),
            ChangeType::Patch => Some(&self.matchers[2]),
            ChangeType::Unknown => None,
        }
    }

    /// Check a single change type's pattern against the text
    pub fn matches(&self, change_type: ChangeType, text: &str) -> bool {
        self.matcher(change_type)
            .map(|re| re.is_match(text))
            .unwrap_or(false)
    }

    /// Human-readable list of recognized tags, in priority order
    pub fn describe(&self) -> Vec<String> {
        self.keywords
            .iter()
            .flat_map(|k| [format!("#{}", k), format!("[{}]", k)])
            .collect()
    }
}

impl Default for TriggerPatterns {
    fn default() -> Self {
        // Fixed keywords always compile
        TriggerPatterns::new("major", "minor", "patch").expect("default trigger patterns")
    }
}

/// Label names mapped to change types, compared by exact equality
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTriggers {
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl LabelTriggers {
    pub fn new(
        major: impl Into<String>,
        minor: impl Into<String>,
        patch: impl Into<String>,
    ) -> Self {
        LabelTriggers {
            major: major.into(),
            minor: minor.into(),
            patch: patch.into(),
        }
    }

    fn label(&self, change_type: ChangeType) -> Option<&str> {
        match change_type {
            ChangeType::Major => Some(&self.major),
            ChangeType::Minor => Some(&self.minor),
            ChangeType::Patch => Some(&self.patch),
            ChangeType::Unknown => None,
        }
    }

    pub fn describe(&self) -> Vec<String> {
        vec![self.major.clone(), self.minor.clone(), self.patch.clone()]
    }
}

/// Classify free text by inline tag. Absent or blank text is `Unknown`.
pub fn classify_from_text(text: Option<&str>, patterns: &TriggerPatterns) -> ChangeType {
    let text = match text {
        Some(t) if !t.trim().is_empty() => t,
        _ => return ChangeType::Unknown,
    };

    ChangeType::PRIORITY
        .into_iter()
        .find(|change_type| patterns.matches(*change_type, text))
        .unwrap_or(ChangeType::Unknown)
}

/// Classify by label membership
pub fn classify_from_labels<S: AsRef<str>>(labels: &[S], triggers: &LabelTriggers) -> ChangeType {
    ChangeType::PRIORITY
        .into_iter()
        .find(|change_type| {
            triggers
                .label(*change_type)
                .map(|wanted| labels.iter().any(|l| l.as_ref() == wanted))
                .unwrap_or(false)
        })
        .unwrap_or(ChangeType::Unknown)
}
