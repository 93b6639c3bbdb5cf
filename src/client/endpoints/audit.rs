use crate::client::N8nClient;
use crate::error::Result;
use serde_json::Value;

/// Category flags accepted by n8n's security audit generator.
#[derive(Debug, Default, serde::Serialize)]
pub struct AuditRequest {
    #[serde(rename = "additionalOptions", skip_serializing_if = "Option::is_none")]
    pub additional_options: Option<Value>,
}

impl N8nClient {
    /// Trigger a security audit report for the instance. The response shape
    /// is instance-defined (risk categories, affected workflows/credentials)
    /// so it is passed through as raw JSON rather than modeled field-by-field.
    pub async fn generate_audit(&self) -> Result<Value> {
        self.post("/audit", &AuditRequest::default()).await
    }
}
