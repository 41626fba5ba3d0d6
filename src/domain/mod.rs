//! Domain logic - pure release bookkeeping rules, free of file and process I/O

pub mod change_type;
pub mod changelog;
pub mod version;

pub use change_type::{
    classify_from_labels, classify_from_text, ChangeType, LabelTriggers, TriggerPatterns,
};
pub use changelog::{insert_entry, sanitize_message, ChangelogEntry, ChangelogWriter};
pub use version::{core_triple, increment, validate, Version};
