use clap::{Args, Subcommand};

#[derive(Args)]
pub struct TemplatesCommand {
    #[command(subcommand)]
    pub action: TemplatesAction,
}

#[derive(Subcommand)]
pub enum TemplatesAction {
    /// List workflows tagged as templates
    List,
}
