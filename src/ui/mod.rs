//! User interface module - terminal output for the release-bump binary.
//!
//! All display logic lives in `formatter`; nothing here prompts, so the tool
//! can run unattended inside CI.

pub mod formatter;

// Re-export formatter functions for convenience
pub use formatter::{
    display_boundary_warning, display_classification, display_error, display_status,
    display_success, display_version, display_version_change,
};
