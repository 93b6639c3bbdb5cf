pub mod autofix;
pub mod catalog;
pub mod cli;
pub mod client;
pub mod config;
pub mod diff;
pub mod editor;
pub mod error;
pub mod history;
pub mod models;
pub mod output;
pub mod sanitizer;
pub mod validation;

pub use cli::{Cli, Commands};
pub use client::N8nClient;
pub use config::{load_config, validate_config, CliOverrides, Config};
pub use error::{N8nError, Result};
pub use output::{OutputFormat, Outputable, print_output, print_single};
