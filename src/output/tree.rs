use crate::autofix::{Confidence, Fix};
use crate::validation::ValidationIssue;
use std::collections::BTreeMap;

/// Render validation issues grouped by the node they belong to, workflow-
/// level issues (no `node`) first under an "(workflow)" heading.
pub fn print_issue_tree(issues: &[&ValidationIssue]) {
    let mut by_node: BTreeMap<String, Vec<&ValidationIssue>> = BTreeMap::new();
    for issue in issues {
        let key = issue.node.clone().unwrap_or_else(|| "(workflow)".to_string());
        by_node.entry(key).or_default().push(issue);
    }

    for (node, node_issues) in &by_node {
        println!("{node}");
        for issue in node_issues {
            let marker = match issue.severity {
                crate::validation::ValidationSeverity::Error => "x",
                crate::validation::ValidationSeverity::Warning => "!",
            };
            println!("  [{marker}] ({}) {}", issue.code, issue.message);
            if let Some(hint) = &issue.hint {
                println!("      hint: {hint}");
            }
        }
    }
}

/// Render proposed fixes grouped by confidence, highest first.
pub fn print_fix_tree(fixes: &[Fix]) {
    let mut by_confidence: BTreeMap<Confidence, Vec<&Fix>> = BTreeMap::new();
    for fix in fixes {
        by_confidence.entry(fix.confidence).or_default().push(fix);
    }

    for confidence in [Confidence::High, Confidence::Medium, Confidence::Low] {
        let Some(group) = by_confidence.get(&confidence) else {
            continue;
        };
        println!("{confidence:?}");
        for fix in group {
            let node = fix.node.as_deref().unwrap_or("(workflow)");
            println!("  [{node}] {} ({})", fix.description, fix.rule);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::Operation;

    #[test]
    fn groups_fixes_by_confidence() {
        let fixes = vec![
            Fix {
                rule: "a".into(),
                confidence: Confidence::Low,
                description: "low fix".into(),
                node: None,
                operation: Operation::CleanStaleConnections,
            },
            Fix {
                rule: "b".into(),
                confidence: Confidence::High,
                description: "high fix".into(),
                node: Some("Node1".into()),
                operation: Operation::CleanStaleConnections,
            },
        ];
        print_fix_tree(&fixes);
    }
}
