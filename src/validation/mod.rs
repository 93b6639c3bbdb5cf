mod ai;
mod issue;
mod parameters;
mod pipeline;
mod profile;
mod source_map;
mod structural;
mod versions;

pub use issue::{SourceLocation, ValidationIssue, ValidationResult, ValidationSeverity};
pub use pipeline::{validate_with_profile, run as run_all_passes};
pub use profile::Profile;
pub use source_map::SourceMap;

/// Validate a workflow at the default (`Runtime`) profile.
pub fn validate_workflow(workflow: &crate::models::TypedWorkflow) -> ValidationResult {
    pipeline::validate(workflow)
}
