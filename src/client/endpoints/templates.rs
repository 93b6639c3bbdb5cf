use crate::client::endpoints::workflows::WorkflowListParams;
use crate::client::N8nClient;
use crate::error::Result;
use crate::models::Workflow;

/// n8n has no dedicated "templates" resource in its public API; a template
/// is conventionally a workflow tagged `template`. This wraps the existing
/// workflow listing with that filter so `templates list` reads like any
/// other catalog, without inventing a new server endpoint.
impl N8nClient {
    pub async fn list_templates(&self) -> Result<Vec<Workflow>> {
        let params = WorkflowListParams {
            tags: Some("template".to_string()),
            ..Default::default()
        };
        self.list_all_workflows(params).await
    }
}
