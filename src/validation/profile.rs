use super::issue::{ValidationIssue, ValidationSeverity};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Which subset of findings a caller wants back. Earlier revisions of
/// this validator had a separate "legacy" and "enhanced" filter path over
/// two different issue shapes; both now run through this one filter over
/// the single `ValidationIssue` list produced by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Deserialize, Serialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Profile {
    /// Only findings that would make the server reject the workflow.
    Minimal,
    /// Default: everything that affects what happens when the workflow runs.
    #[default]
    Runtime,
    /// Compact, deduplicated set sized for passing to an LLM as context.
    AiFriendly,
    /// Everything, including cosmetic/style findings, with some warnings
    /// promoted to errors.
    Strict,
}

const COSMETIC_CODES: &[&str] = &["orphan-node", "self-loop", "node-version-ahead-of-catalog"];
const STRICT_PROMOTED: &[&str] = &["missing-trigger", "orphan-node", "no-activatable-trigger"];

pub fn filter(issues: Vec<ValidationIssue>, profile: Profile) -> Vec<ValidationIssue> {
    match profile {
        Profile::Minimal => issues
            .into_iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
            .collect(),

        Profile::Runtime => issues
            .into_iter()
            .filter(|i| !COSMETIC_CODES.contains(&i.code.as_str()))
            .collect(),

        Profile::AiFriendly => {
            let mut seen = std::collections::HashSet::new();
            issues
                .into_iter()
                .filter(|i| !COSMETIC_CODES.contains(&i.code.as_str()))
                .map(|mut i| {
                    i.source_location = None;
                    i
                })
                .filter(|i| seen.insert((i.code.clone(), i.node.clone())))
                .collect()
        }

        Profile::Strict => issues
            .into_iter()
            .map(|mut i| {
                if STRICT_PROMOTED.contains(&i.code.as_str()) {
                    i.severity = ValidationSeverity::Error;
                }
                i
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_keeps_errors_only() {
        let issues = vec![
            ValidationIssue::error("a", "e"),
            ValidationIssue::warning("orphan-node", "w"),
        ];
        let filtered = filter(issues, Profile::Minimal);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_ai_friendly_dedupes_by_code_and_node() {
        let issues = vec![
            ValidationIssue::error("x", "one").with_node("A"),
            ValidationIssue::error("x", "one again").with_node("A"),
        ];
        let filtered = filter(issues, Profile::AiFriendly);
        assert_eq!(filtered.len(), 1);
    }

    #[test]
    fn test_strict_promotes_missing_trigger_to_error() {
        let issues = vec![ValidationIssue::warning("missing-trigger", "w")];
        let filtered = filter(issues, Profile::Strict);
        assert_eq!(filtered[0].severity, ValidationSeverity::Error);
    }
}
