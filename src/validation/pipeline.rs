use super::issue::{ValidationIssue, ValidationResult};
use super::profile::{self, Profile};
use crate::models::TypedWorkflow;

/// Runs every validation pass in order and dedups the combined list.
///
/// Two passes can legitimately raise the same `(code, node)` pair (e.g.
/// `structural` and `parameters` both touching a renamed duplicate), so
/// findings are deduplicated by that pair rather than kept as one
/// combined bag -- this is the single dedup key used everywhere in the
/// pipeline, replacing what used to be two different keys depending on
/// which pass raised the issue.
pub fn run(workflow: &TypedWorkflow) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    issues.extend(super::structural::check(workflow));
    issues.extend(super::parameters::check(workflow));
    issues.extend(super::versions::check(workflow));
    issues.extend(super::ai::check(workflow));

    let mut seen = std::collections::HashSet::new();
    issues.retain(|i| seen.insert((i.code.clone(), i.node.clone())));
    issues
}

pub fn validate(workflow: &TypedWorkflow) -> ValidationResult {
    validate_with_profile(workflow, Profile::Runtime)
}

pub fn validate_with_profile(workflow: &TypedWorkflow, p: Profile) -> ValidationResult {
    let issues = profile::filter(run(workflow), p);
    ValidationResult { issues }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    #[test]
    fn test_pipeline_dedupes_overlapping_passes() {
        let wf = TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes: vec![
                Node::new("1".into(), "Same".into(), "n8n-nodes-base.noOp".into()),
                Node::new("2".into(), "Same".into(), "n8n-nodes-base.noOp".into()),
            ],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        };
        let issues = run(&wf);
        let count = issues.iter().filter(|i| i.code == "duplicate-node-name").count();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_validate_is_pure() {
        let wf = TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes: vec![Node::new("1".into(), "A".into(), "n8n-nodes-base.manualTrigger".into())],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        };
        let a = validate(&wf);
        let b = validate(&wf);
        assert_eq!(a.issues.len(), b.issues.len());
    }
}
