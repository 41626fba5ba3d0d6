//! Classification engine turning raw change signals into change types

pub mod change_classifier;

pub use change_classifier::{ChangeClassifier, ChangeSignal};
