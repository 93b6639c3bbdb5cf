use super::issue::ValidationIssue;
use crate::catalog::Catalog;
use crate::models::TypedWorkflow;

/// Catalog-driven parameter checks: unknown node types (with a fuzzy
/// "did you mean") and missing required properties, honoring each
/// property's `displayOptions` visibility predicate so a property only
/// required under one branch (e.g. `jsCode` when `language: javaScript`)
/// doesn't fire when that branch isn't selected.
pub fn check(workflow: &TypedWorkflow) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    for node in &workflow.nodes {
        if node.disabled {
            continue;
        }

        let Some(def) = Catalog::get(&node.node_type) else {
            let mut issue = ValidationIssue::warning(
                "unknown-node-type",
                format!("Unrecognized node type: {}", node.node_type),
            )
            .with_node(node.name.clone());
            if let Some(suggestion) = Catalog::suggest(&node.node_type) {
                issue = issue.with_suggestions(vec![suggestion.to_string()]);
            }
            issues.push(issue);
            continue;
        };

        if node.type_version > def.max_version {
            issues.push(
                ValidationIssue::warning(
                    "node-version-ahead-of-catalog",
                    format!(
                        "{} uses typeVersion {} but the known catalog tops out at {}",
                        node.node_type, node.type_version, def.max_version
                    ),
                )
                .with_node(node.name.clone()),
            );
        }

        for prop in def.required_properties() {
            let visible = prop
                .display_options
                .as_ref()
                .map(|d| d.is_visible(&node.parameters))
                .unwrap_or(true);
            if !visible {
                continue;
            }
            let present = node
                .parameters
                .get(&prop.name)
                .map(|v| !v.is_null())
                .unwrap_or(false);
            if !present {
                issues.push(
                    ValidationIssue::error(
                        "missing-required-parameter",
                        format!("{} is missing required parameter '{}'", node.name, prop.name),
                    )
                    .with_node(node.name.clone())
                    .with_location(format!("{}.parameters.{}", node.name, prop.name))
                    .with_hint(format!("Set '{}' ({})", prop.display_name, prop.property_type)),
                );
            }
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;
    use serde_json::json;
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
    fn test_missing_required_param_flagged() {
        let node = Node::new("1".into(), "HTTP".into(), "n8n-nodes-base.httpRequest".into());
        let issues = check(&wf(vec![node]));
        assert!(issues.iter().any(|i| i.code == "missing-required-parameter" && i.message.contains("url")));
    }

    #[test]
    fn test_display_options_hide_irrelevant_branch() {
        let mut node = Node::new("1".into(), "Code".into(), "n8n-nodes-base.code".into());
        node.parameters = json!({ "language": "python", "pythonCode": "print(1)" });
        let issues = check(&wf(vec![node]));
        assert!(!issues.iter().any(|i| i.message.contains("jsCode")));
    }

    #[test]
    fn test_unknown_type_suggests_fix() {
        let node = Node::new("1".into(), "Hook".into(), "n8n-nodes-base.webhok".into());
        let issues = check(&wf(vec![node]));
        let issue = issues.iter().find(|i| i.code == "unknown-node-type").unwrap();
        assert_eq!(issue.suggestions, vec!["n8n-nodes-base.webhook".to_string()]);
    }
}
