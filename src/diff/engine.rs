use super::operations::Operation;
use super::rename::RenameMap;
use super::report::{DiffResult, DiffRequest, OperationOutcome};
use crate::models::{normalize_name, Connection, Node, TypedWorkflow, WorkflowTag};
use crate::sanitizer::Sanitizer;
use tracing::{debug, warn};

/// Applies a batch of `Operation`s to a workflow in two passes: node
/// operations first (so renames are known before connections are
/// rewritten), then connection and metadata operations with the
/// invocation's rename map applied to every node-name argument. Ends with
/// a sanitizer sweep over every node, so the result is always in the same
/// normalized shape the editor itself would produce.
///
/// `continueOnError: false` (the default) makes the whole batch atomic:
/// the first failing operation discards all changes and returns the
/// original workflow. `continueOnError: true` applies everything it can
/// and reports failures alongside successes.
pub struct DiffEngine;

impl DiffEngine {
    pub fn apply(workflow: &TypedWorkflow, request: DiffRequest) -> DiffResult {
        let mut working = workflow.clone();
        let mut rename_map = RenameMap::new();
        let mut applied = Vec::new();
        let mut failed = Vec::new();
        let mut warnings = Vec::new();
        let mut should_activate = false;
        let mut should_deactivate = false;

        let (node_ops, other_ops): (Vec<_>, Vec<_>) = request
            .operations
            .into_iter()
            .enumerate()
            .partition(|(_, op)| op.is_node_pass());

        for (index, op) in node_ops.into_iter().chain(other_ops) {
            let tag = op.tag().to_string();
            debug!(operation = %tag, index, "applying diff operation");

            match apply_one(
                &mut working,
                &op,
                &mut rename_map,
                &mut warnings,
                &mut should_activate,
                &mut should_deactivate,
            ) {
                Ok(()) => applied.push(OperationOutcome {
                    index,
                    tag,
                    message: "ok".to_string(),
                }),
                Err(message) => {
                    warn!(operation = %tag, index, %message, "diff operation failed");
                    failed.push(OperationOutcome { index, tag, message });
                    if !request.continue_on_error {
                        return DiffResult {
                            success: false,
                            workflow: workflow.clone(),
                            operations_applied: 0,
                            applied: Vec::new(),
                            failed,
                            warnings,
                            should_activate: false,
                            should_deactivate: false,
                        };
                    }
                }
            }
        }

        Sanitizer::sanitize_all(&mut working.nodes);

        DiffResult {
            success: failed.is_empty(),
            operations_applied: applied.len(),
            workflow: working,
            applied,
            failed,
            warnings,
            should_activate,
            should_deactivate,
        }
    }
}

fn apply_one(
    workflow: &mut TypedWorkflow,
    op: &Operation,
    rename_map: &mut RenameMap,
    warnings: &mut Vec<String>,
    should_activate: &mut bool,
    should_deactivate: &mut bool,
) -> std::result::Result<(), String> {
    match op {
        Operation::AddNode { node } => {
            let mut node: Node = serde_json::from_value(node.clone())
                .map_err(|e| format!("invalid node payload: {e}"))?;
            if node.id.is_empty() {
                node.id = Node::generate_id();
            }
            if workflow.name_collides(&node.name, None) {
                return Err(format!("a node named '{}' already exists", node.name));
            }
            workflow.add_node(node);
            Ok(())
        }

        Operation::RemoveNode { node_name } => {
            let resolved = rename_map.resolve(node_name);
            workflow
                .remove_node(resolved)
                .map(|_| ())
                .ok_or_else(|| format!("node '{node_name}' not found"))
        }

        Operation::UpdateNode { node_name, updates, changes } => {
            let resolved = rename_map.resolve(node_name).to_string();

            if matches!(updates, serde_json::Value::Null) && !matches!(changes, serde_json::Value::Null) {
                return Err(format!(
                    "received key 'changes' -- updateNode expects the patch under 'updates', e.g. {{\"type\":\"updateNode\",\"nodeName\":\"{node_name}\",\"updates\":{{...}}}}"
                ));
            }

            let serde_json::Value::Object(updates) = updates.clone() else {
                return Err("updates must be a JSON object".to_string());
            };
            if updates.is_empty() {
                return Err(
                    "updates field is empty -- did you mean to send the patch under 'updates'?"
                        .to_string(),
                );
            }

            if let Some(name) = updates.get("name").and_then(|v| v.as_str()) {
                let node_id = workflow
                    .find_node(&resolved)
                    .ok_or_else(|| format!("node '{node_name}' not found"))?
                    .id
                    .clone();
                if workflow.name_collides(name, Some(&node_id)) {
                    return Err(format!("a node named '{name}' already exists"));
                }
            }

            let old_name = {
                let node = workflow
                    .find_node_mut(&resolved)
                    .ok_or_else(|| format!("node '{node_name}' not found"))?;
                let old_name = node.name.clone();

                if let Some(name) = updates.get("name").and_then(|v| v.as_str()) {
                    node.name = name.to_string();
                }
                if let Some(new_type) = updates.get("type").and_then(|v| v.as_str()) {
                    node.node_type = new_type.to_string();
                }
                if let Some(disabled) = updates.get("disabled").and_then(|v| v.as_bool()) {
                    node.disabled = disabled;
                }
                if let Some(params) = updates.get("parameters") {
                    node.parameters = params.clone();
                }
                if let Some(v) = updates.get("typeVersion").and_then(|v| v.as_f64()) {
                    node.type_version = v;
                }
                old_name
            };

            if let Some(new_name) = updates.get("name").and_then(|v| v.as_str()) {
                if new_name != old_name {
                    workflow.rename_node_in_connections(&old_name, new_name);
                    rename_map.record(&old_name, new_name);
                }
            }
            Ok(())
        }

        Operation::MoveNode { node_name, position } => {
            let resolved = rename_map.resolve(node_name).to_string();
            let node = workflow
                .find_node_mut(&resolved)
                .ok_or_else(|| format!("node '{node_name}' not found"))?;
            node.position = crate::models::Position::new(position.0, position.1);
            Ok(())
        }

        Operation::EnableNode { node_name } => set_disabled(workflow, rename_map, node_name, false),
        Operation::DisableNode { node_name } => set_disabled(workflow, rename_map, node_name, true),

        Operation::AddConnection {
            source,
            target,
            source_output,
            target_input,
            source_index,
            target_index,
            branch,
            case,
        } => {
            let source_name = workflow
                .get_node_name(rename_map.resolve(source))
                .unwrap_or_else(|| rename_map.resolve(source).to_string());
            let target_name = workflow
                .get_node_name(rename_map.resolve(target))
                .unwrap_or_else(|| rename_map.resolve(target).to_string());

            let local_type = workflow
                .find_node(&source_name)
                .ok_or_else(|| format!("source node '{source}' not found"))?
                .local_type()
                .to_string();
            if workflow.find_node(&target_name).is_none() {
                return Err(format!("target node '{target}' not found"));
            }

            let resolved_output = resolve_smart_index(
                &local_type,
                *source_output,
                *source_index,
                branch,
                *case,
                warnings,
            )?;
            let resolved_target = target_index.unwrap_or(*target_input);

            let already_exists = workflow.connections_flat().iter().any(|c| {
                c.source_node == source_name
                    && c.source_output == resolved_output
                    && c.target_node == target_name
            });
            if already_exists {
                return Err(format!(
                    "connection {source_name} -> {target_name} already exists"
                ));
            }

            workflow.add_connection(Connection::new_full(
                source_name,
                resolved_output,
                "main".to_string(),
                target_name,
                resolved_target,
                "main".to_string(),
            ));
            Ok(())
        }

        Operation::RemoveConnection { source, target } => {
            let source_name = rename_map.resolve(source).to_string();
            let target_name = rename_map.resolve(target).to_string();
            if workflow.remove_connection(&source_name, &target_name) {
                Ok(())
            } else {
                Err(format!("connection {source} -> {target} not found"))
            }
        }

        Operation::RewireConnection {
            source,
            from,
            to,
            source_output,
            target_input,
            source_index,
            branch,
            case,
        } => {
            let source_name = workflow
                .get_node_name(rename_map.resolve(source))
                .unwrap_or_else(|| rename_map.resolve(source).to_string());
            let from_name = workflow
                .get_node_name(rename_map.resolve(from))
                .unwrap_or_else(|| rename_map.resolve(from).to_string());
            let to_name = workflow
                .get_node_name(rename_map.resolve(to))
                .unwrap_or_else(|| rename_map.resolve(to).to_string());

            let local_type = workflow
                .find_node(&source_name)
                .ok_or_else(|| format!("source node '{source}' not found"))?
                .local_type()
                .to_string();
            if workflow.find_node(&from_name).is_none() {
                return Err(format!("node '{from}' not found"));
            }
            if workflow.find_node(&to_name).is_none() {
                return Err(format!("node '{to}' not found"));
            }

            let resolved_output = resolve_smart_index(
                &local_type,
                *source_output,
                *source_index,
                branch,
                *case,
                warnings,
            )?;

            if !workflow.remove_connection(&source_name, &from_name) {
                return Err(format!(
                    "no connection at that output/index from '{source}' to '{from}'"
                ));
            }

            workflow.add_connection(Connection::new_full(
                source_name,
                resolved_output,
                "main".to_string(),
                to_name,
                *target_input,
                "main".to_string(),
            ));
            Ok(())
        }

        Operation::CleanStaleConnections => {
            let names = workflow.normalized_node_names();
            let removed = crate::models::connection::clean_stale(&mut workflow.connections, &names);
            if !removed.is_empty() {
                warnings.push(format!(
                    "removed {} stale connection(s) referencing deleted nodes",
                    removed.len()
                ));
            }
            Ok(())
        }

        Operation::ReplaceConnections { connections } => {
            let names = workflow.normalized_node_names();
            for (source, outputs) in connections {
                if !names.contains(&normalize_name(source)) {
                    return Err(format!("source node '{source}' not found"));
                }
                for indices in outputs.values() {
                    for targets in indices {
                        for endpoint in targets {
                            if !names.contains(&normalize_name(&endpoint.node)) {
                                return Err(format!("target node '{}' not found", endpoint.node));
                            }
                        }
                    }
                }
            }
            workflow.connections = connections.clone();
            Ok(())
        }

        Operation::UpdateSettings { settings } => {
            workflow.settings.merge(settings);
            Ok(())
        }

        Operation::UpdateName { name } => {
            workflow.name = name.clone();
            Ok(())
        }

        Operation::AddTag { tag } => {
            workflow.add_tag(WorkflowTag {
                id: String::new(),
                name: tag.clone(),
            });
            Ok(())
        }

        Operation::RemoveTag { tag } => {
            workflow.remove_tag(tag);
            Ok(())
        }

        Operation::ActivateWorkflow => {
            if !workflow.has_activatable_trigger() {
                return Err(
                    "no activatable trigger -- this workflow has no enabled trigger that can activate it (executeWorkflowTrigger cannot activate a workflow)"
                        .to_string(),
                );
            }
            *should_activate = true;
            Ok(())
        }

        Operation::DeactivateWorkflow => {
            *should_deactivate = true;
            Ok(())
        }
    }
}

/// Resolves an `addConnection`/`rewireConnection` output index from the
/// smart aliases: `branch` (`if` nodes) and `case` (`switch` nodes) take
/// priority over an explicit `sourceIndex`, which itself overrides the
/// legacy `sourceOutput` numeric field. Using `sourceIndex` directly on
/// an `if`/`switch` source is allowed but produces a warning.
fn resolve_smart_index(
    local_type: &str,
    legacy_output: u32,
    source_index: Option<u32>,
    branch: &Option<String>,
    case: Option<u32>,
    warnings: &mut Vec<String>,
) -> std::result::Result<u32, String> {
    if let Some(b) = branch {
        return match b.as_str() {
            "true" => Ok(0),
            "false" => Ok(1),
            other => Err(format!(
                "invalid branch '{other}' -- expected 'true' or 'false'"
            )),
        };
    }
    if let Some(c) = case {
        return Ok(c);
    }
    if let Some(idx) = source_index {
        if local_type == "if" || local_type == "switch" {
            warnings.push(format!(
                "sourceIndex used directly on a '{local_type}' node; prefer 'branch' or 'case'"
            ));
        }
        return Ok(idx);
    }
    Ok(legacy_output)
}

fn set_disabled(
    workflow: &mut TypedWorkflow,
    rename_map: &mut RenameMap,
    node_name: &str,
    disabled: bool,
) -> std::result::Result<(), String> {
    let resolved = rename_map.resolve(node_name).to_string();
    let node = workflow
        .find_node_mut(&resolved)
        .ok_or_else(|| format!("node '{node_name}' not found"))?;
    node.disabled = disabled;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::connection::{ConnectionEndpoint, ConnectionsMap};
    use serde_json::{json, Value};
    use std::collections::HashMap;

    fn workflow_with(nodes: Vec<Node>) -> TypedWorkflow {
        TypedWorkflow {
            id: Some("wf1".into()),
            name: "Test".into(),
            active: false,
            nodes,
            connections: HashMap::new(),
            settings: Default::default(),
            tags: vec![],
            version_id: None,
        }
    }

    fn trigger() -> Node {
        Node::new("1".into(), "Start".into(), "n8n-nodes-base.manualTrigger".into())
    }

    #[test]
    fn test_atomic_batch_rolls_back_on_failure() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![
                Operation::DisableNode { node_name: "Start".into() },
                Operation::RemoveNode { node_name: "Ghost".into() },
            ],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert_eq!(result.operations_applied, 0);
        assert!(!result.workflow.nodes[0].disabled, "rolled-back workflow must be unchanged");
    }

    #[test]
    fn test_continue_on_error_applies_the_rest() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![
                Operation::RemoveNode { node_name: "Ghost".into() },
                Operation::DisableNode { node_name: "Start".into() },
            ],
            continue_on_error: true,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert_eq!(result.operations_applied, 1);
        assert!(result.workflow.nodes[0].disabled);
    }

    #[test]
    fn test_rename_then_connect_uses_rename_map() {
        let mut target = Node::new("2".into(), "Target".into(), "n8n-nodes-base.noOp".into());
        target.position = crate::models::Position::new(200, 0);
        let wf = workflow_with(vec![trigger(), target]);

        let request = DiffRequest {
            operations: vec![
                Operation::UpdateNode {
                    node_name: "Start".into(),
                    updates: json!({ "name": "Trigger" }),
                    changes: Value::Null,
                },
                Operation::AddConnection {
                    source: "Start".into(),
                    target: "Target".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: None,
                    case: None,
                },
            ],
            continue_on_error: false,
        };

        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        let flat = result.workflow.connections_flat();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].source_node, "Trigger");
    }

    #[test]
    fn test_clean_stale_after_remove_node_is_not_double_counted() {
        let mut target = Node::new("2".into(), "Target".into(), "n8n-nodes-base.noOp".into());
        target.position = crate::models::Position::new(200, 0);
        let mut wf = workflow_with(vec![trigger(), target]);
        wf.add_connection(Connection::new("Start".into(), "Target".into()));

        let request = DiffRequest {
            operations: vec![
                Operation::RemoveNode { node_name: "Target".into() },
                Operation::CleanStaleConnections,
            ],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert!(result.workflow.connections.is_empty());
    }

    #[test]
    fn test_empty_updates_object_is_rejected() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![Operation::UpdateNode {
                node_name: "Start".into(),
                updates: json!({}),
                changes: Value::Null,
            }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("updates"));
    }

    #[test]
    fn test_changes_key_is_named_in_the_error() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![Operation::UpdateNode {
                node_name: "Start".into(),
                updates: Value::Null,
                changes: json!({ "name": "B" }),
            }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("changes"));
        assert!(result.failed[0].message.contains("updates"));
    }

    #[test]
    fn test_activation_is_not_inferred_from_added_trigger() {
        let no_op = Node::new("1".into(), "Start".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![no_op]);
        let webhook = Node::new("2".into(), "Hook".into(), "n8n-nodes-base.webhook".into());
        let request = DiffRequest {
            operations: vec![Operation::AddNode {
                node: serde_json::to_value(webhook).unwrap(),
            }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success);
        assert!(!result.should_activate, "activation must come from an explicit operation");
    }

    #[test]
    fn test_activate_workflow_sets_flag_when_activatable_trigger_present() {
        let webhook = Node::new("1".into(), "Hook".into(), "n8n-nodes-base.webhook".into());
        let wf = workflow_with(vec![webhook]);
        let request = DiffRequest {
            operations: vec![Operation::ActivateWorkflow],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert!(result.should_activate);
    }

    #[test]
    fn test_activate_workflow_rejects_execute_workflow_trigger_only() {
        let trigger = Node::new(
            "1".into(),
            "Caller".into(),
            "n8n-nodes-base.executeWorkflowTrigger".into(),
        );
        let wf = workflow_with(vec![trigger]);
        let request = DiffRequest {
            operations: vec![Operation::ActivateWorkflow],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("activatable trigger"));
    }

    #[test]
    fn test_deactivate_workflow_sets_flag() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![Operation::DeactivateWorkflow],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success);
        assert!(result.should_deactivate);
    }

    fn if_node() -> Node {
        let mut n = Node::new("3".into(), "Branch".into(), "n8n-nodes-base.if".into());
        n.type_version = 2.2;
        n
    }

    #[test]
    fn test_add_connection_branch_alias_resolves_to_output_index() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let b = Node::new("4".into(), "B".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![if_node(), a, b]);

        let request = DiffRequest {
            operations: vec![
                Operation::AddConnection {
                    source: "Branch".into(),
                    target: "A".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: Some("true".into()),
                    case: None,
                },
                Operation::AddConnection {
                    source: "Branch".into(),
                    target: "B".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: Some("false".into()),
                    case: None,
                },
            ],
            continue_on_error: false,
        };

        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        let flat = result.workflow.connections_flat();
        let to_a = flat.iter().find(|c| c.target_node == "A").unwrap();
        let to_b = flat.iter().find(|c| c.target_node == "B").unwrap();
        assert_eq!(to_a.source_output, 0);
        assert_eq!(to_b.source_output, 1);
    }

    #[test]
    fn test_add_connection_different_if_outputs_to_same_target_are_not_duplicates() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![if_node(), a]);

        let request = DiffRequest {
            operations: vec![
                Operation::AddConnection {
                    source: "Branch".into(),
                    target: "A".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: Some("true".into()),
                    case: None,
                },
                Operation::AddConnection {
                    source: "Branch".into(),
                    target: "A".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: Some("false".into()),
                    case: None,
                },
            ],
            continue_on_error: false,
        };

        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert_eq!(result.workflow.connections_flat().len(), 2);
    }

    #[test]
    fn test_add_connection_rejects_exact_duplicate() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![trigger(), a]);

        let request = DiffRequest {
            operations: vec![
                Operation::AddConnection {
                    source: "Start".into(),
                    target: "A".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: None,
                    case: None,
                },
                Operation::AddConnection {
                    source: "Start".into(),
                    target: "A".into(),
                    source_output: 0,
                    target_input: 0,
                    source_index: None,
                    target_index: None,
                    branch: None,
                    case: None,
                },
            ],
            continue_on_error: false,
        };

        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("already exists"));
    }

    #[test]
    fn test_add_connection_source_index_grows_sparse_output_array() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![trigger(), a]);

        let request = DiffRequest {
            operations: vec![Operation::AddConnection {
                source: "Start".into(),
                target: "A".into(),
                source_output: 0,
                target_input: 0,
                source_index: Some(7),
                target_index: None,
                branch: None,
                case: None,
            }],
            continue_on_error: false,
        };

        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        let outputs = &result.workflow.connections["Start"]["main"];
        assert_eq!(outputs.len(), 8);
        assert!(outputs[0..7].iter().all(|slot| slot.is_empty()));
        assert_eq!(outputs[7].len(), 1);
    }

    #[test]
    fn test_add_tag_is_idempotent() {
        let wf = workflow_with(vec![trigger()]);
        let request = DiffRequest {
            operations: vec![
                Operation::AddTag { tag: "prod".into() },
                Operation::AddTag { tag: "prod".into() },
            ],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert_eq!(result.workflow.tags.len(), 1);
    }

    #[test]
    fn test_remove_tag_is_idempotent() {
        let mut wf = workflow_with(vec![trigger()]);
        wf.tags.push(WorkflowTag { id: "1".into(), name: "prod".into() });
        let request = DiffRequest {
            operations: vec![
                Operation::RemoveTag { tag: "prod".into() },
                Operation::RemoveTag { tag: "prod".into() },
            ],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert!(result.workflow.tags.is_empty());
    }

    #[test]
    fn test_replace_connections_rejects_unknown_target() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![trigger(), a]);

        let mut bogus = ConnectionsMap::new();
        bogus.insert(
            "Start".into(),
            HashMap::from([(
                "main".to_string(),
                vec![vec![ConnectionEndpoint {
                    node: "Ghost".into(),
                    connection_type: "main".into(),
                    index: 0,
                }]],
            )]),
        );

        let request = DiffRequest {
            operations: vec![Operation::ReplaceConnections { connections: bogus }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("not found"));
    }

    #[test]
    fn test_replace_connections_swaps_the_table() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![trigger(), a]);

        let mut table = ConnectionsMap::new();
        table.insert(
            "Start".into(),
            HashMap::from([(
                "main".to_string(),
                vec![vec![ConnectionEndpoint {
                    node: "A".into(),
                    connection_type: "main".into(),
                    index: 0,
                }]],
            )]),
        );

        let request = DiffRequest {
            operations: vec![Operation::ReplaceConnections { connections: table }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        assert_eq!(result.workflow.connections_flat().len(), 1);
    }

    #[test]
    fn test_rewire_connection_moves_target_atomically() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let b = Node::new("3".into(), "B".into(), "n8n-nodes-base.noOp".into());
        let mut wf = workflow_with(vec![trigger(), a, b]);
        wf.add_connection(Connection::new("Start".into(), "A".into()));

        let request = DiffRequest {
            operations: vec![Operation::RewireConnection {
                source: "Start".into(),
                from: "A".into(),
                to: "B".into(),
                source_output: 0,
                target_input: 0,
                source_index: None,
                branch: None,
                case: None,
            }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(result.success, "{:?}", result.failed);
        let flat = result.workflow.connections_flat();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].target_node, "B");
    }

    #[test]
    fn test_rewire_connection_missing_source_connection_fails() {
        let a = Node::new("2".into(), "A".into(), "n8n-nodes-base.noOp".into());
        let b = Node::new("3".into(), "B".into(), "n8n-nodes-base.noOp".into());
        let wf = workflow_with(vec![trigger(), a, b]);

        let request = DiffRequest {
            operations: vec![Operation::RewireConnection {
                source: "Start".into(),
                from: "A".into(),
                to: "B".into(),
                source_output: 0,
                target_input: 0,
                source_index: None,
                branch: None,
                case: None,
            }],
            continue_on_error: false,
        };
        let result = DiffEngine::apply(&wf, request);
        assert!(!result.success);
        assert!(result.failed[0].message.contains("no connection"));
    }
}
