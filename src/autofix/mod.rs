mod rules;

pub use rules::{Confidence, Fix};

use crate::diff::{DiffEngine, DiffRequest, DiffResult, Operation};
use crate::models::TypedWorkflow;
use crate::validation::{run_all_passes, Profile};

/// Finds `Fix`es for the issues the validator's full (unfiltered) pass
/// raises, then either reports them (dry run) or applies the accepted
/// ones through the Diff Engine -- reusing its atomic/best-effort and
/// rename-map machinery instead of mutating the workflow directly.
pub struct Autofixer;

pub struct AutofixReport {
    pub fixes: Vec<Fix>,
}

impl Autofixer {
    /// Propose fixes without changing anything.
    pub fn propose(workflow: &TypedWorkflow) -> AutofixReport {
        let issues = run_all_passes(workflow);
        let fixes = rules::propose_fixes(workflow, &issues);
        AutofixReport { fixes }
    }

    /// Propose fixes, keep only those at or above `min_confidence`, and
    /// apply them through the Diff Engine.
    pub fn apply(workflow: &TypedWorkflow, min_confidence: Confidence) -> (DiffResult, Vec<Fix>) {
        let report = Self::propose(workflow);
        let (accepted, skipped): (Vec<Fix>, Vec<Fix>) = report
            .fixes
            .into_iter()
            .partition(|f| f.confidence >= min_confidence);

        let operations: Vec<Operation> = accepted.iter().map(|f| f.operation.clone()).collect();
        let request = DiffRequest {
            operations,
            continue_on_error: true,
        };
        let result = DiffEngine::apply(workflow, request);
        let mut fixes = accepted;
        fixes.extend(skipped);
        (result, fixes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    #[test]
    fn test_propose_suggests_type_fix_for_typo() {
        let wf = TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes: vec![Node::new(
                "1".into(),
                "Hook".into(),
                "n8n-nodes-base.webhok".into(),
            )],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        };
        let report = Autofixer::propose(&wf);
        assert!(report.fixes.iter().any(|f| f.rule == "unknown-type-suggestion"));
    }
}
