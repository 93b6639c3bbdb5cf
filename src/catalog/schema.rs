use crate::output::Outputable;
use serde::{Deserialize, Serialize};

/// A single configurable property of a node type, as n8n's own node
/// descriptions model it (`INodeProperties`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropertyDef {
    pub name: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    #[serde(rename = "type")]
    pub property_type: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub default: serde_json::Value,
    /// Visibility predicate: property is only relevant when the named
    /// sibling parameters hold one of the listed values.
    #[serde(rename = "displayOptions", default)]
    pub display_options: Option<DisplayOptions>,
    #[serde(default)]
    pub options: Vec<PropertyOption>,
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct DisplayOptions {
    #[serde(default)]
    pub show: std::collections::HashMap<String, Vec<serde_json::Value>>,
    #[serde(default)]
    pub hide: std::collections::HashMap<String, Vec<serde_json::Value>>,
}

impl DisplayOptions {
    /// Whether a property governed by these options is relevant given the
    /// current (flattened) parameter values of a node.
    pub fn is_visible(&self, params: &serde_json::Value) -> bool {
        for (key, allowed) in &self.show {
            let current = params.get(key).cloned().unwrap_or(serde_json::Value::Null);
            if !allowed.iter().any(|v| v == &current) {
                return false;
            }
        }
        for (key, forbidden) in &self.hide {
            let current = params.get(key).cloned().unwrap_or(serde_json::Value::Null);
            if forbidden.iter().any(|v| v == &current) {
                return false;
            }
        }
        true
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PropertyOption {
    pub name: String,
    pub value: serde_json::Value,
}

/// A catalog entry for one node type at its latest known version.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeTypeDef {
    /// Fully qualified type, e.g. "n8n-nodes-base.httpRequest"
    #[serde(rename = "type")]
    pub node_type: String,
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub category: String,
    #[serde(rename = "maxVersion")]
    pub max_version: f64,
    #[serde(default)]
    pub is_trigger: bool,
    #[serde(default)]
    pub properties: Vec<PropertyDef>,
}

impl NodeTypeDef {
    pub fn required_properties(&self) -> impl Iterator<Item = &PropertyDef> {
        self.properties.iter().filter(|p| p.required)
    }
}

impl Outputable for NodeTypeDef {
    fn headers() -> Vec<&'static str> {
        vec!["TYPE", "NAME", "CATEGORY", "MAX VERSION", "TRIGGER"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.node_type.clone(),
            self.display_name.clone(),
            self.category.clone(),
            self.max_version.to_string(),
            self.is_trigger.to_string(),
        ]
    }
}

/// A recorded breaking change between two `typeVersion`s of a node type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BreakingChange {
    #[serde(rename = "nodeType")]
    pub node_type: String,
    #[serde(rename = "fromVersion")]
    pub from_version: f64,
    #[serde(rename = "toVersion")]
    pub to_version: f64,
    #[serde(rename = "propertyPath")]
    pub property_path: String,
    pub kind: BreakingChangeKind,
    pub severity: BreakingChangeSeverity,
    #[serde(rename = "autoMigratable")]
    pub auto_migratable: bool,
    pub hint: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakingChangeKind {
    Renamed,
    Removed,
    DefaultChanged,
    ShapeChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum BreakingChangeSeverity {
    Info,
    Warning,
    Error,
}

impl Outputable for BreakingChange {
    fn headers() -> Vec<&'static str> {
        vec!["TYPE", "FROM", "TO", "PATH", "KIND", "SEVERITY", "AUTO-FIX"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.node_type.clone(),
            self.from_version.to_string(),
            self.to_version.to_string(),
            self.property_path.clone(),
            format!("{:?}", self.kind),
            format!("{:?}", self.severity),
            self.auto_migratable.to_string(),
        ]
    }
}
