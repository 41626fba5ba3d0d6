//! Programmatic entry points behind the command line

pub mod orchestration;

pub use orchestration::{run_bump_workflow, write_outputs, BumpWorkflowArgs, WorkflowResult};
