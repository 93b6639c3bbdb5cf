use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidationSeverity {
    Warning,
    Error,
}

/// One finding from a validator pass. `code` is a short machine-stable
/// identifier (e.g. `"missing-trigger"`, `"unknown-node-type"`) so callers
/// can filter or dedupe without string-matching `message`.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationIssue {
    pub code: String,
    pub severity: ValidationSeverity,
    pub message: String,
    pub node: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_location: Option<SourceLocation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SourceLocation {
    pub line: usize,
    pub column: usize,
    pub snippet: String,
}

impl ValidationIssue {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: ValidationSeverity::Error,
            message: message.into(),
            node: None,
            location: None,
            source_location: None,
            suggestions: Vec::new(),
            hint: None,
        }
    }

    pub fn warning(code: &str, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            severity: ValidationSeverity::Warning,
            message: message.into(),
            node: None,
            location: None,
            source_location: None,
            suggestions: Vec::new(),
            hint: None,
        }
    }

    pub fn with_node(mut self, node: impl Into<String>) -> Self {
        self.node = Some(node.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: Vec<String>) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn with_source_location(mut self, source_location: SourceLocation) -> Self {
        self.source_location = Some(source_location);
        self
    }
}

/// Ordered collection of issues produced by a full validator run.
#[derive(Debug, Serialize)]
pub struct ValidationResult {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        !self
            .issues
            .iter()
            .any(|i| i.severity == ValidationSeverity::Error)
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Error)
            .collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues
            .iter()
            .filter(|i| i.severity == ValidationSeverity::Warning)
            .collect()
    }

    pub fn format(&self, include_warnings: bool) -> String {
        let mut output = Vec::new();
        for issue in &self.issues {
            if !include_warnings && issue.severity == ValidationSeverity::Warning {
                continue;
            }
            let prefix = match issue.severity {
                ValidationSeverity::Error => "ERROR",
                ValidationSeverity::Warning => "WARNING",
            };
            let node_info = issue
                .node
                .as_ref()
                .map(|n| format!(" [{}]", n))
                .unwrap_or_default();
            let mut line = format!("{}{} ({}): {}", prefix, node_info, issue.code, issue.message);
            if let Some(hint) = &issue.hint {
                line.push_str(&format!("\n  hint: {hint}"));
            }
            output.push(line);
        }
        output.join("\n")
    }
}
