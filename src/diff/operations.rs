use crate::models::connection::ConnectionsMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One requested change in a diff request. Tagged on the wire by `type`,
/// matching the shape the editor's external JSON diff format already
/// uses (`diff::workflow_diff`'s in-process `NodeChange` enum is the
/// read-only analogue of this — this is the write side).
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum Operation {
    #[serde(rename = "addNode")]
    AddNode { node: Value },

    #[serde(rename = "removeNode")]
    RemoveNode {
        #[serde(rename = "nodeName")]
        node_name: String,
    },

    #[serde(rename = "updateNode")]
    UpdateNode {
        #[serde(rename = "nodeName")]
        node_name: String,
        #[serde(default)]
        updates: Value,
        /// Captures the common mistake of sending the patch under
        /// `changes` instead of `updates`, so the applier can name the
        /// mistake explicitly instead of leaving it empty.
        #[serde(default)]
        changes: Value,
    },

    #[serde(rename = "moveNode")]
    MoveNode {
        #[serde(rename = "nodeName")]
        node_name: String,
        position: (i32, i32),
    },

    #[serde(rename = "enableNode")]
    EnableNode {
        #[serde(rename = "nodeName")]
        node_name: String,
    },

    #[serde(rename = "disableNode")]
    DisableNode {
        #[serde(rename = "nodeName")]
        node_name: String,
    },

    #[serde(rename = "addConnection")]
    AddConnection {
        source: String,
        target: String,
        #[serde(rename = "sourceOutput", default)]
        source_output: u32,
        #[serde(rename = "targetInput", default)]
        target_input: u32,
        /// Explicit output index. On an `if`/`switch` source this is
        /// accepted but warned on -- use `branch`/`case` instead.
        #[serde(rename = "sourceIndex", default)]
        source_index: Option<u32>,
        #[serde(rename = "targetIndex", default)]
        target_index: Option<u32>,
        /// `"true"`/`"false"` shortcut for an `if` node's two outputs.
        #[serde(default)]
        branch: Option<String>,
        /// Shortcut for a `switch` node's numbered case output.
        #[serde(default)]
        case: Option<u32>,
    },

    #[serde(rename = "removeConnection")]
    RemoveConnection { source: String, target: String },

    #[serde(rename = "rewireConnection")]
    RewireConnection {
        source: String,
        from: String,
        to: String,
        #[serde(rename = "sourceOutput", default)]
        source_output: u32,
        #[serde(rename = "targetInput", default)]
        target_input: u32,
        #[serde(rename = "sourceIndex", default)]
        source_index: Option<u32>,
        #[serde(default)]
        branch: Option<String>,
        #[serde(default)]
        case: Option<u32>,
    },

    #[serde(rename = "cleanStaleConnections")]
    CleanStaleConnections,

    #[serde(rename = "replaceConnections")]
    ReplaceConnections { connections: ConnectionsMap },

    #[serde(rename = "updateSettings")]
    UpdateSettings { settings: Value },

    #[serde(rename = "updateName")]
    UpdateName { name: String },

    #[serde(rename = "addTag")]
    AddTag { tag: String },

    #[serde(rename = "removeTag")]
    RemoveTag { tag: String },

    #[serde(rename = "activateWorkflow")]
    ActivateWorkflow,

    #[serde(rename = "deactivateWorkflow")]
    DeactivateWorkflow,
}

impl Operation {
    /// Human-readable tag, used in error messages and the report.
    pub fn tag(&self) -> &'static str {
        match self {
            Operation::AddNode { .. } => "addNode",
            Operation::RemoveNode { .. } => "removeNode",
            Operation::UpdateNode { .. } => "updateNode",
            Operation::MoveNode { .. } => "moveNode",
            Operation::EnableNode { .. } => "enableNode",
            Operation::DisableNode { .. } => "disableNode",
            Operation::AddConnection { .. } => "addConnection",
            Operation::RemoveConnection { .. } => "removeConnection",
            Operation::RewireConnection { .. } => "rewireConnection",
            Operation::CleanStaleConnections => "cleanStaleConnections",
            Operation::ReplaceConnections { .. } => "replaceConnections",
            Operation::UpdateSettings { .. } => "updateSettings",
            Operation::UpdateName { .. } => "updateName",
            Operation::AddTag { .. } => "addTag",
            Operation::RemoveTag { .. } => "removeTag",
            Operation::ActivateWorkflow => "activateWorkflow",
            Operation::DeactivateWorkflow => "deactivateWorkflow",
        }
    }

    /// Node operations run in pass one, before the rename map is applied
    /// to connections; connection/metadata operations run in pass two.
    pub fn is_node_pass(&self) -> bool {
        matches!(
            self,
            Operation::AddNode { .. }
                | Operation::RemoveNode { .. }
                | Operation::UpdateNode { .. }
                | Operation::MoveNode { .. }
                | Operation::EnableNode { .. }
                | Operation::DisableNode { .. }
        )
    }
}
