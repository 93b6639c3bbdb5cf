use super::issue::ValidationIssue;
use crate::models::TypedWorkflow;
use std::collections::HashSet;

/// Shape and structural checks: names, ids, trigger presence, connection
/// references, orphans, self-loops. Runs first in the pipeline -- later
/// passes assume a workflow with no dangling connection references.
pub fn check(workflow: &TypedWorkflow) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if workflow.name.trim().is_empty() {
        issues.push(ValidationIssue::error("empty-workflow-name", "Workflow has empty name"));
    }

    if workflow.nodes.is_empty() {
        issues.push(ValidationIssue::warning("empty-workflow", "Workflow has no nodes"));
        return issues;
    }

    let (dup_ids, dup_names) = workflow.duplicate_node_issues();
    for id in dup_ids {
        issues.push(ValidationIssue::error("duplicate-node-id", format!("Duplicate node ID: {id}")));
    }
    for name in dup_names {
        issues.push(
            ValidationIssue::error("duplicate-node-name", format!("Duplicate node name: {name}"))
                .with_node(name),
        );
    }

    for node in &workflow.nodes {
        if node.name.trim().is_empty() {
            issues.push(
                ValidationIssue::error("empty-node-name", "Node has empty name").with_node(node.id.clone()),
            );
        }
    }

    if !workflow.has_trigger() {
        issues.push(ValidationIssue::warning(
            "missing-trigger",
            "No trigger node found. Workflow can only be executed manually.",
        ));
    } else if !workflow.has_activatable_trigger() {
        issues.push(ValidationIssue::warning(
            "no-activatable-trigger",
            "Workflow has a trigger but none of them permit activation (e.g. only an executeWorkflowTrigger is present).",
        ));
    }

    let valid_names = workflow.normalized_node_names();
    let connections = workflow.connections_flat();
    for conn in &connections {
        if !valid_names.contains(&crate::models::common::normalize_name(&conn.source_node)) {
            issues.push(
                ValidationIssue::error(
                    "dangling-connection-source",
                    format!("Connection references non-existent source node: {}", conn.source_node),
                )
                .with_node(conn.source_node.clone()),
            );
        }
        if !valid_names.contains(&crate::models::common::normalize_name(&conn.target_node)) {
            issues.push(
                ValidationIssue::error(
                    "dangling-connection-target",
                    format!("Connection references non-existent target node: {}", conn.target_node),
                )
                .with_node(conn.target_node.clone()),
            );
        }
        if conn.source_node == conn.target_node {
            issues.push(
                ValidationIssue::warning(
                    "self-loop",
                    format!("Node '{}' has a self-loop connection", conn.source_node),
                )
                .with_node(conn.source_node.clone()),
            );
        }
    }

    let mut connected: HashSet<&str> = HashSet::new();
    for conn in &connections {
        connected.insert(&conn.source_node);
        connected.insert(&conn.target_node);
    }
    for node in &workflow.nodes {
        if !node.is_trigger() && !connected.contains(node.name.as_str()) {
            issues.push(
                ValidationIssue::warning(
                    "orphan-node",
                    format!("Node '{}' is not connected to any other node", node.name),
                )
                .with_node(node.name.clone()),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    fn wf(nodes: Vec<Node>) -> TypedWorkflow {
        TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes,
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        }
    }

    #[test]
    fn test_empty_workflow_warns() {
        let issues = check(&wf(vec![]));
        assert!(issues.iter().any(|i| i.code == "empty-workflow"));
    }

    #[test]
    fn test_duplicate_names_detected() {
        let issues = check(&wf(vec![
            Node::new("1".into(), "Same".into(), "n8n-nodes-base.noOp".into()),
            Node::new("2".into(), "Same".into(), "n8n-nodes-base.noOp".into()),
        ]));
        assert!(issues.iter().any(|i| i.code == "duplicate-node-name"));
    }

    #[test]
    fn test_execute_workflow_trigger_only_is_not_activatable() {
        let issues = check(&wf(vec![Node::new(
            "1".into(),
            "Sub".into(),
            "n8n-nodes-base.executeWorkflowTrigger".into(),
        )]));
        assert!(issues.iter().any(|i| i.code == "no-activatable-trigger"));
    }
}
