mod format;
mod json;
mod table;
mod tree;

pub use format::{print_output, print_single, Outputable, OutputFormat};
pub use tree::{print_fix_tree, print_issue_tree};
