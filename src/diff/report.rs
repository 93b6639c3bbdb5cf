use super::operations::Operation;
use crate::models::TypedWorkflow;
use serde::{Deserialize, Serialize};

/// A diff request: the operations to apply plus how strictly to apply
/// them. `continueOnError: false` (the default) makes the whole request
/// atomic -- the first failing operation aborts the batch and the
/// original workflow is returned unchanged.
#[derive(Debug, Deserialize)]
pub struct DiffRequest {
    pub operations: Vec<Operation>,
    #[serde(rename = "continueOnError", default)]
    pub continue_on_error: bool,
}

#[derive(Debug, Serialize)]
pub struct OperationOutcome {
    pub index: usize,
    pub tag: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DiffResult {
    pub success: bool,
    pub workflow: TypedWorkflow,
    #[serde(rename = "operationsApplied")]
    pub operations_applied: usize,
    pub applied: Vec<OperationOutcome>,
    pub failed: Vec<OperationOutcome>,
    pub warnings: Vec<String>,
    #[serde(rename = "shouldActivate")]
    pub should_activate: bool,
    #[serde(rename = "shouldDeactivate")]
    pub should_deactivate: bool,
}

impl DiffResult {
    pub fn message(&self) -> String {
        if self.success {
            format!("{} operation(s) applied", self.operations_applied)
        } else {
            format!(
                "{} operation(s) applied, {} failed",
                self.operations_applied,
                self.failed.len()
            )
        }
    }
}
