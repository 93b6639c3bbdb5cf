use crate::client::N8nClient;
use crate::error::Result;
use crate::models::{Variable, VariableCreate};

impl N8nClient {
    /// List all project variables
    pub async fn list_variables(&self) -> Result<Vec<Variable>> {
        self.get("/variables").await
    }

    /// Create a new variable
    pub async fn create_variable(&self, key: &str, value: &str) -> Result<Variable> {
        let request = VariableCreate {
            key: key.to_string(),
            value: value.to_string(),
        };
        self.post("/variables", &request).await
    }

    /// Delete a variable
    pub async fn delete_variable(&self, id: &str) -> Result<()> {
        self.delete(&format!("/variables/{}", id)).await
    }
}
