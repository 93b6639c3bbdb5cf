use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Args)]
pub struct ControlCommand {
    #[command(subcommand)]
    pub action: ControlAction,
}

#[derive(Subcommand)]
pub enum ControlAction {
    /// Apply a batch of operations (a diff request JSON file) to a workflow
    Apply {
        /// Workflow ID (mutually exclusive with --file)
        #[arg(conflicts_with = "file")]
        id: Option<String>,

        /// Local workflow file to apply to instead of a live workflow
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,

        /// Path to a diff request JSON file (use - for stdin)
        #[arg(value_name = "OPERATIONS")]
        operations: PathBuf,

        /// Show the result without uploading/saving it
        #[arg(long)]
        dry_run: bool,

        /// Skip taking a history snapshot before applying
        #[arg(long)]
        no_snapshot: bool,
    },

    /// Propose or apply automatic fixes for validator-detected issues
    Autofix {
        /// Workflow ID (mutually exclusive with --file)
        #[arg(conflicts_with = "file")]
        id: Option<String>,

        /// Local workflow file to fix instead of a live workflow
        #[arg(long, conflicts_with = "id")]
        file: Option<PathBuf>,

        /// Only show what would change; do not apply or upload
        #[arg(long)]
        dry_run: bool,

        /// Minimum confidence required to apply a fix
        #[arg(long, default_value = "medium", value_enum)]
        min_confidence: ConfidenceArg,

        /// Skip taking a history snapshot before applying
        #[arg(long)]
        no_snapshot: bool,
    },

    /// List saved snapshots for a workflow
    History {
        /// Workflow ID
        id: String,
    },

    /// Roll a workflow back to a previous snapshot
    Rollback {
        /// Workflow ID
        id: String,

        /// Snapshot index to restore (0 = most recent)
        #[arg(long, default_value = "0")]
        index: usize,

        /// Show the restored workflow without uploading it
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ConfidenceArg {
    Low,
    Medium,
    High,
}

impl From<ConfidenceArg> for crate::autofix::Confidence {
    fn from(value: ConfidenceArg) -> Self {
        match value {
            ConfidenceArg::Low => crate::autofix::Confidence::Low,
            ConfidenceArg::Medium => crate::autofix::Confidence::Medium,
            ConfidenceArg::High => crate::autofix::Confidence::High,
        }
    }
}
