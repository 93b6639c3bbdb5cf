use crate::catalog::breaking_changes_for;
use crate::diff::Operation;
use crate::models::TypedWorkflow;
use crate::validation::ValidationIssue;
use serde::Serialize;
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fix {
    pub rule: String,
    pub confidence: Confidence,
    pub description: String,
    pub node: Option<String>,
    #[serde(skip)]
    pub operation: Operation,
}

/// Turns validator issues into concrete `Operation`s. Only issues with an
/// unambiguous, mechanical repair produce a fix; anything needing a human
/// judgment call (an arbitrary missing parameter value, a genuinely new
/// node type) surfaces only as a validation issue, never a guessed fix.
pub fn propose_fixes(workflow: &TypedWorkflow, issues: &[ValidationIssue]) -> Vec<Fix> {
    let mut fixes = Vec::new();

    for issue in issues {
        match issue.code.as_str() {
            "unknown-node-type" => {
                // `Catalog::suggest` only returns a candidate above its own
                // 0.5 normalized-edit-distance threshold, so a present
                // suggestion is already a high-confidence typo fix.
                if let (Some(node_name), Some(suggestion)) =
                    (issue.node.as_ref(), issue.suggestions.first())
                {
                    fixes.push(Fix {
                        rule: "unknown-type-suggestion".to_string(),
                        confidence: Confidence::High,
                        description: format!("Change {node_name}'s type to '{suggestion}'"),
                        node: Some(node_name.clone()),
                        operation: Operation::UpdateNode {
                            node_name: node_name.clone(),
                            updates: json!({ "type": suggestion }),
                            changes: serde_json::Value::Null,
                        },
                    });
                }
            }

            "breaking-change-pending-warning" => {
                if let Some(node_name) = &issue.node {
                    if let Some(node) = workflow.find_node(node_name) {
                        let changes = breaking_changes_for(&node.node_type, node.type_version, f64::MAX);
                        if let Some(change) =
                            changes.iter().find(|c| c.auto_migratable)
                        {
                            fixes.push(Fix {
                                rule: "version-migration".to_string(),
                                confidence: Confidence::Medium,
                                description: format!(
                                    "Bump {node_name} to typeVersion {}",
                                    change.to_version
                                ),
                                node: Some(node_name.clone()),
                                operation: Operation::UpdateNode {
                                    node_name: node_name.clone(),
                                    updates: json!({ "typeVersion": change.to_version }),
                                    changes: serde_json::Value::Null,
                                },
                            });
                        }
                    }
                }
            }

            _ => {}
        }
    }

    fixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use std::collections::HashMap;

    #[test]
    fn test_unknown_type_produces_high_confidence_fix_on_exact_family_match() {
        let wf = TypedWorkflow {
            id: None,
            name: "Test".into(),
            active: false,
            nodes: vec![Node::new("1".into(), "Hook".into(), "n8n-nodes-base.webhok".into())],
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        };
        let issue = ValidationIssue::warning("unknown-node-type", "x")
            .with_node("Hook")
            .with_suggestions(vec!["n8n-nodes-base.webhook".to_string()]);
        let fixes = propose_fixes(&wf, &[issue]);
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].confidence, Confidence::High);
    }
}
