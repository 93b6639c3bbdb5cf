use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct CatalogCommand {
    #[command(subcommand)]
    pub action: CatalogAction,
}

#[derive(Subcommand)]
pub enum CatalogAction {
    /// List all known node types
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
    },

    /// Show the definition of a single node type
    Get {
        /// Node type, local name, or full package-qualified name
        node_type: String,
    },

    /// Fuzzy-search node types by name
    Search {
        /// Search query
        query: String,
    },

    /// List known categories
    Categories,

    /// Check a local workflow file's node types against the catalog
    Validate {
        /// Path to workflow JSON file (use - for stdin)
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}
