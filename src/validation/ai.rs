use super::issue::ValidationIssue;
use crate::models::TypedWorkflow;

const LANGCHAIN_PREFIX: &str = "@n8n/n8n-nodes-langchain.";

/// LangChain topology checks: an Agent node needs a connected language
/// model on its `ai_languageModel` input to do anything at runtime.
/// Unlike `main` connections, these are optional from the graph's
/// perspective (the workflow still parses and runs other branches), so
/// this is its own pass rather than folded into structural checks.
pub fn check(workflow: &TypedWorkflow) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();
    let connections = workflow.connections_flat();

    for node in &workflow.nodes {
        if node.disabled || !node.node_type.starts_with(LANGCHAIN_PREFIX) {
            continue;
        }
        if node.local_type() != "agent" {
            continue;
        }

        let has_model = connections
            .iter()
            .any(|c| c.target_node == node.name && c.target_type == "ai_languageModel");
        if !has_model {
            issues.push(
                ValidationIssue::error(
                    "agent-missing-language-model",
                    format!("AI Agent '{}' has no language model connected", node.name),
                )
                .with_node(node.name.clone())
                .with_hint("Connect a Chat Model node to the agent's Language Model input"),
            );
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Connection, Node};
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
    fn test_agent_without_model_flagged() {
        let agent = Node::new(
            "1".into(),
            "Agent".into(),
            "@n8n/n8n-nodes-langchain.agent".into(),
        );
        let issues = check(&wf(vec![agent]));
        assert!(issues.iter().any(|i| i.code == "agent-missing-language-model"));
    }

    #[test]
    fn test_agent_with_model_connection_passes() {
        let agent = Node::new(
            "1".into(),
            "Agent".into(),
            "@n8n/n8n-nodes-langchain.agent".into(),
        );
        let model = Node::new(
            "2".into(),
            "Model".into(),
            "@n8n/n8n-nodes-langchain.lmChatOpenAi".into(),
        );
        let mut workflow = wf(vec![agent, model]);
        workflow.add_connection(Connection::new_full(
            "Model".into(),
            0,
            "ai_languageModel".into(),
            "Agent".into(),
            0,
            "ai_languageModel".into(),
        ));
        let issues = check(&workflow);
        assert!(!issues.iter().any(|i| i.code == "agent-missing-language-model"));
    }
}
