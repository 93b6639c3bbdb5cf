use crate::models::common::{normalize_name, truncate};
use crate::output::Outputable;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single connection endpoint (target of a connection)
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectionEndpoint {
    pub node: String,

    #[serde(rename = "type", default = "default_connection_type")]
    pub connection_type: String,

    #[serde(default)]
    pub index: u32,
}

fn default_connection_type() -> String {
    "main".to_string()
}

/// n8n's native connection format (source-keyed)
/// Format: { "NodeName": { "main": [[{ "node": "TargetNode", "type": "main", "index": 0 }]] } }
pub type ConnectionsMap = HashMap<String, HashMap<String, Vec<Vec<ConnectionEndpoint>>>>;

/// Flattened connection for display/manipulation
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Connection {
    pub source_node: String,
    pub source_output: u32,
    pub source_type: String,
    pub target_node: String,
    pub target_input: u32,
    pub target_type: String,
}

impl Connection {
    /// Create a new connection with default types
    pub fn new(source_node: String, target_node: String) -> Self {
        Self {
            source_node,
            source_output: 0,
            source_type: "main".to_string(),
            target_node,
            target_input: 0,
            target_type: "main".to_string(),
        }
    }

    /// Create a connection with full parameters
    pub fn new_full(
        source_node: String,
        source_output: u32,
        source_type: String,
        target_node: String,
        target_input: u32,
        target_type: String,
    ) -> Self {
        Self {
            source_node,
            source_output,
            source_type,
            target_node,
            target_input,
            target_type,
        }
    }

    /// Convert from n8n's nested format to flat list
    pub fn from_connections_map(map: &ConnectionsMap) -> Vec<Self> {
        let mut connections = Vec::new();

        for (source_node, outputs) in map {
            for (output_type, output_indices) in outputs {
                for (output_index, targets) in output_indices.iter().enumerate() {
                    for target in targets {
                        connections.push(Connection {
                            source_node: source_node.clone(),
                            source_output: output_index as u32,
                            source_type: output_type.clone(),
                            target_node: target.node.clone(),
                            target_input: target.index,
                            target_type: target.connection_type.clone(),
                        });
                    }
                }
            }
        }

        connections
    }

    /// Convert flat list back to n8n's nested format
    pub fn to_connections_map(connections: &[Self]) -> ConnectionsMap {
        let mut map: ConnectionsMap = HashMap::new();

        for conn in connections {
            Self::add_to_map(&mut map, conn);
        }

        map
    }

    /// Add a single connection to an existing map, growing the output
    /// array with empty slots until `source_output` is reachable.
    pub fn add_to_map(map: &mut ConnectionsMap, conn: &Connection) {
        let outputs = map.entry(conn.source_node.clone()).or_default();
        let indices = outputs.entry(conn.source_type.clone()).or_default();

        while indices.len() <= conn.source_output as usize {
            indices.push(Vec::new());
        }

        indices[conn.source_output as usize].push(ConnectionEndpoint {
            node: conn.target_node.clone(),
            connection_type: conn.target_type.clone(),
            index: conn.target_input,
        });
    }

    /// Remove connections from source to target in a map. Returns true if
    /// anything was removed. Trailing empty slots collapse, empty labels
    /// are deleted, and an emptied source key is deleted.
    pub fn remove_from_map(map: &mut ConnectionsMap, from_node: &str, to_node: &str) -> bool {
        let mut removed = false;
        if let Some(outputs) = map.get_mut(from_node) {
            for indices in outputs.values_mut() {
                for targets in indices.iter_mut() {
                    let before = targets.len();
                    targets.retain(|t| t.node != to_node);
                    if targets.len() < before {
                        removed = true;
                    }
                }
            }
        }
        if removed {
            prune_empty(map);
        }
        removed
    }

    /// Pairs `(source, target)` whose source or target name is not in
    /// `names`. Used by the connection-reference validation pass and by
    /// `cleanStaleConnections`. Distinct pairs are deduplicated.
    pub fn stale_pairs(
        map: &ConnectionsMap,
        names: &std::collections::HashSet<String>,
    ) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for (source, outputs) in map {
            let source_known = names.contains(&normalize_name(source));
            for indices in outputs.values() {
                for targets in indices {
                    for target in targets {
                        let target_known = names.contains(&normalize_name(&target.node));
                        if !source_known || !target_known {
                            let key = (source.clone(), target.node.clone());
                            if seen.insert(key.clone()) {
                                pairs.push(key);
                            }
                        }
                    }
                }
            }
        }
        pairs
    }
}

/// Remove trailing empty inner arrays, empty output labels, and empty
/// source entries from a connections map. Idempotent: a second call is a
/// no-op.
pub fn prune_empty(map: &mut ConnectionsMap) {
    let mut empty_sources = Vec::new();
    for (source, outputs) in map.iter_mut() {
        let mut empty_labels = Vec::new();
        for (label, indices) in outputs.iter_mut() {
            while matches!(indices.last(), Some(slot) if slot.is_empty()) {
                indices.pop();
            }
            if indices.is_empty() {
                empty_labels.push(label.clone());
            }
        }
        for label in empty_labels {
            outputs.remove(&label);
        }
        if outputs.is_empty() {
            empty_sources.push(source.clone());
        }
    }
    for source in empty_sources {
        map.remove(&source);
    }
}

/// Remove every connection whose source or target name is not present in
/// `names`. Returns the distinct `(source, target)` pairs removed.
pub fn clean_stale(
    map: &mut ConnectionsMap,
    names: &std::collections::HashSet<String>,
) -> Vec<(String, String)> {
    let stale = Connection::stale_pairs(map, names);
    for outputs in map.values_mut() {
        for indices in outputs.values_mut() {
            for targets in indices.iter_mut() {
                targets.retain(|t| names.contains(&normalize_name(&t.node)));
            }
        }
    }
    map.retain(|source, _| names.contains(&normalize_name(source)));
    prune_empty(map);
    stale
}

impl Outputable for Connection {
    fn headers() -> Vec<&'static str> {
        vec!["FROM NODE", "OUTPUT", "TO NODE", "INPUT"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            truncate(&self.source_node, 25),
            format!("{}[{}]", self.source_type, self.source_output),
            truncate(&self.target_node, 25),
            format!("{}[{}]", self.target_type, self.target_input),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connections_roundtrip() {
        let connections = vec![
            Connection::new("Node1".to_string(), "Node2".to_string()),
            Connection::new_full(
                "Node2".to_string(),
                0,
                "main".to_string(),
                "Node3".to_string(),
                0,
                "main".to_string(),
            ),
        ];

        let map = Connection::to_connections_map(&connections);
        let flat = Connection::from_connections_map(&map);

        assert_eq!(connections.len(), flat.len());
    }

    #[test]
    fn test_add_remove_connection() {
        let mut map: ConnectionsMap = HashMap::new();

        let conn = Connection::new("A".to_string(), "B".to_string());
        Connection::add_to_map(&mut map, &conn);

        let flat = Connection::from_connections_map(&map);
        assert_eq!(flat.len(), 1);

        let removed = Connection::remove_from_map(&mut map, "A", "B");
        assert!(removed);
        assert!(map.is_empty(), "emptied source key must be deleted");

        let flat = Connection::from_connections_map(&map);
        assert_eq!(flat.len(), 0);
    }

    #[test]
    fn test_add_to_map_grows_sparse_output_slots() {
        let mut map: ConnectionsMap = HashMap::new();
        let conn = Connection::new_full(
            "If".to_string(),
            7,
            "main".to_string(),
            "Target".to_string(),
            0,
            "main".to_string(),
        );
        Connection::add_to_map(&mut map, &conn);

        let indices = &map["If"]["main"];
        assert_eq!(indices.len(), 8);
        for slot in &indices[..7] {
            assert!(slot.is_empty());
        }
        assert_eq!(indices[7].len(), 1);
    }

    #[test]
    fn test_clean_stale_counts_distinct_pairs() {
        let mut map: ConnectionsMap = HashMap::new();
        map.insert(
            "A".to_string(),
            HashMap::from([(
                "main".to_string(),
                vec![vec![
                    ConnectionEndpoint { node: "B".to_string(), connection_type: "main".to_string(), index: 0 },
                    ConnectionEndpoint { node: "GONE".to_string(), connection_type: "main".to_string(), index: 0 },
                ]],
            )]),
        );
        map.insert(
            "GHOST".to_string(),
            HashMap::from([(
                "main".to_string(),
                vec![vec![ConnectionEndpoint { node: "A".to_string(), connection_type: "main".to_string(), index: 0 }]],
            )]),
        );

        let names: std::collections::HashSet<String> =
            ["A", "B"].iter().map(|s| s.to_string()).collect();

        let stale = Connection::stale_pairs(&map, &names);
        assert_eq!(stale.len(), 2);

        let mut map2 = map.clone();
        let removed = clean_stale(&mut map2, &names);
        assert_eq!(removed.len(), 2);

        // second invocation is a no-op
        let removed_again = clean_stale(&mut map2, &names);
        assert!(removed_again.is_empty());
    }
}
