use crate::output::Outputable;
use serde::{Deserialize, Serialize};

/// A project-scoped key/value variable, usable from workflow expressions
/// as `$vars.<key>`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Variable {
    #[serde(default)]
    pub id: Option<String>,
    pub key: String,
    pub value: String,
    #[serde(rename = "type", default)]
    pub variable_type: Option<String>,
}

impl Outputable for Variable {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "KEY", "VALUE"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone().unwrap_or_else(|| "-".to_string()),
            self.key.clone(),
            self.value.clone(),
        ]
    }
}

/// Variable creation request
#[derive(Debug, Clone, Serialize)]
pub struct VariableCreate {
    pub key: String,
    pub value: String,
}
