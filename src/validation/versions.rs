use super::issue::ValidationIssue;
use crate::catalog::{breaking_changes_for, BreakingChangeSeverity, Catalog};
use crate::models::TypedWorkflow;

/// Flags nodes sitting below the catalog's known `maxVersion` when a
/// recorded breaking change separates their current version from it --
/// surfacing the migration before the user hits it at runtime rather
/// than after.
pub fn check(workflow: &TypedWorkflow) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for node in &workflow.nodes {
        let Some(def) = Catalog::get(&node.node_type) else { continue };
        if node.type_version >= def.max_version {
            continue;
        }

        let changes = breaking_changes_for(&node.node_type, node.type_version, def.max_version);
        for change in changes {
            let code = match change.severity {
                BreakingChangeSeverity::Error => "breaking-change-pending",
                BreakingChangeSeverity::Warning => "breaking-change-pending-warning",
                BreakingChangeSeverity::Info => "version-note",
            };
            let mut issue = if change.severity == BreakingChangeSeverity::Error {
                ValidationIssue::error(code, format!(
                    "{} is on typeVersion {} but upgrading to {} requires migrating '{}'",
                    node.name, node.type_version, change.to_version, change.property_path
                ))
            } else {
                ValidationIssue::warning(code, format!(
                    "{} is on typeVersion {}; upgrading to {} changes '{}'",
                    node.name, node.type_version, change.to_version, change.property_path
                ))
            };
            issue = issue
                .with_node(node.name.clone())
                .with_location(format!("{}.{}", node.name, change.property_path))
                .with_hint(change.hint.clone());
            if change.auto_migratable {
                issue = issue.with_suggestions(vec!["run `workflows autofix` to migrate automatically".to_string()]);
            }
            issues.push(issue);
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    #[test]
    fn test_outdated_if_node_flags_pending_breaking_change() {
        let mut node = Node::new("1".into(), "If".into(), "n8n-nodes-base.if".into());
        node.type_version = 1.0;
        let wf = TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes: vec![node],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        };
        let issues = check(&wf);
        assert!(issues.iter().any(|i| i.code == "breaking-change-pending"));
    }
}
