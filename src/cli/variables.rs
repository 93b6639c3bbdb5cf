use clap::{Args, Subcommand};

#[derive(Args)]
pub struct VariablesCommand {
    #[command(subcommand)]
    pub action: VariablesAction,
}

#[derive(Subcommand)]
pub enum VariablesAction {
    /// List all variables
    List,

    /// Create a new variable
    Create {
        /// Variable key
        key: String,

        /// Variable value
        value: String,
    },

    /// Delete a variable
    Delete {
        /// Variable ID
        id: String,
    },
}
