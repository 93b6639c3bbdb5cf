use crate::models::{common::generate_token, Node};
use serde_json::{json, Value};

/// Parameter keys the server fills in and rejects on write; stripped
/// before any node is sent back through `update_workflow`.
const READ_ONLY_KEYS: &[&str] = &["__rl_cached", "resultsUrl", "lastExecuted"];

/// Normalizes node parameter shapes the Diff Engine and CLI editors might
/// otherwise leave inconsistent: filter-node defaults, operator shape,
/// condition ids, and stripped read-only fields. Every pass here is
/// idempotent: running the sanitizer twice produces the same JSON as
/// running it once.
pub struct Sanitizer;

impl Sanitizer {
    /// Sanitize a single node in place. Called by the Diff Engine as its
    /// final per-node pass after every operation has applied.
    pub fn sanitize_node(node: &mut Node) {
        strip_read_only_keys(&mut node.parameters);

        if node.is_filter_node() {
            sanitize_filter_conditions(&mut node.parameters);
        }
    }

    /// Sanitize every node in a workflow.
    pub fn sanitize_all(nodes: &mut [Node]) {
        for node in nodes.iter_mut() {
            Self::sanitize_node(node);
        }
    }
}

fn strip_read_only_keys(params: &mut Value) {
    if let Value::Object(map) = params {
        for key in READ_ONLY_KEYS {
            map.remove(*key);
        }
        for value in map.values_mut() {
            strip_read_only_keys(value);
        }
    } else if let Value::Array(items) = params {
        for item in items.iter_mut() {
            strip_read_only_keys(item);
        }
    }
}

/// `if`/`switch` filter conditions carry an `options` block with defaults
/// (`caseSensitive`, `looseTypeValidation`, `version`) that the n8n editor
/// always writes but hand-built or machine-generated workflows often omit.
/// Each condition in `conditions.conditions[]` also needs a stable `id`
/// (generated once, kept on re-sanitize) and its `operator.type` inferred
/// from the compared values when missing.
fn sanitize_filter_conditions(params: &mut Value) {
    let Some(conditions) = params.get_mut("conditions") else {
        return;
    };
    let Value::Object(block) = conditions else {
        return;
    };

    let options = block
        .entry("options")
        .or_insert_with(|| json!({}));
    if let Value::Object(opts) = options {
        opts.entry("caseSensitive").or_insert(json!(true));
        opts.entry("looseTypeValidation").or_insert(json!(false));
        opts.entry("version").or_insert(json!(2));
    }

    if let Some(Value::Array(rows)) = block.get_mut("conditions") {
        for row in rows.iter_mut() {
            sanitize_condition_row(row);
        }
    }
}

fn sanitize_condition_row(row: &mut Value) {
    let Value::Object(obj) = row else { return };

    obj.entry("id").or_insert_with(|| json!(generate_token()));

    let left_type = value_type_tag(obj.get("leftValue"));
    let needs_operator = !matches!(obj.get("operator"), Some(Value::Object(op)) if op.contains_key("type"));
    if needs_operator {
        let inferred = left_type.unwrap_or("string");
        obj.insert(
            "operator".to_string(),
            json!({ "type": inferred, "operation": "equals" }),
        );
    }
}

fn value_type_tag(value: Option<&Value>) -> Option<&'static str> {
    match value {
        Some(Value::Number(_)) => Some("number"),
        Some(Value::Bool(_)) => Some("boolean"),
        Some(Value::String(_)) => Some("string"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Node;

    fn filter_node(conditions: Value) -> Node {
        let mut node = Node::new("1".into(), "If".into(), "n8n-nodes-base.if".into());
        node.type_version = 2.2;
        node.parameters = json!({ "conditions": conditions });
        node
    }

    #[test]
    fn test_injects_missing_options_defaults() {
        let mut node = filter_node(json!({ "conditions": [] }));
        Sanitizer::sanitize_node(&mut node);
        let opts = &node.parameters["conditions"]["options"];
        assert_eq!(opts["caseSensitive"], json!(true));
        assert_eq!(opts["looseTypeValidation"], json!(false));
    }

    #[test]
    fn test_infers_operator_type_from_left_value() {
        let mut node = filter_node(json!({
            "conditions": [
                { "leftValue": 42, "rightValue": 10 }
            ]
        }));
        Sanitizer::sanitize_node(&mut node);
        let row = &node.parameters["conditions"]["conditions"][0];
        assert_eq!(row["operator"]["type"], json!("number"));
        assert!(row["id"].is_string());
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let mut node = filter_node(json!({
            "conditions": [ { "leftValue": "a", "rightValue": "b" } ]
        }));
        Sanitizer::sanitize_node(&mut node);
        let once = node.parameters.clone();
        Sanitizer::sanitize_node(&mut node);
        assert_eq!(once, node.parameters);
    }

    #[test]
    fn test_strips_read_only_keys_recursively() {
        let mut node = Node::new("1".into(), "HTTP".into(), "n8n-nodes-base.httpRequest".into());
        node.parameters = json!({ "url": "https://x", "resultsUrl": "https://cache/1", "nested": { "lastExecuted": "now" } });
        Sanitizer::sanitize_node(&mut node);
        assert!(node.parameters.get("resultsUrl").is_none());
        assert!(node.parameters["nested"].get("lastExecuted").is_none());
        assert_eq!(node.parameters["url"], json!("https://x"));
    }
}
