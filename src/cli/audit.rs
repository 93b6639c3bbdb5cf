use clap::{Args, Subcommand};

#[derive(Args)]
pub struct AuditCommand {
    #[command(subcommand)]
    pub action: AuditAction,
}

#[derive(Subcommand)]
pub enum AuditAction {
    /// Generate a security audit report for the instance
    Generate,
}
