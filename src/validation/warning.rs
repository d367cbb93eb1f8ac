//! Diagnostic types for check results.

use std::fmt;

use crate::types::PartKind;

/// Severity level for a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Warning,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// A single check diagnostic.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Severity level.
    pub severity: Severity,
    /// Machine-readable diagnostic code (e.g. "skingen::check::missing-texture").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// The part the diagnostic is about, if any.
    pub part: Option<PartKind>,
    /// Optional help text suggesting how to fix the issue.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create an error diagnostic.
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, code, message)
    }

    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, code, message)
    }

    fn new(severity: Severity, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: code.into(),
            message: message.into(),
            part: None,
            help: None,
        }
    }

    /// Attach the part this diagnostic concerns.
    pub fn for_part(mut self, part: PartKind) -> Self {
        self.part = Some(part);
        self
    }

    /// Add help text to this diagnostic.
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.part {
            Some(part) => write!(f, "{}: {}", part, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Collects diagnostics from checks.
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    diagnostics: Vec<Diagnostic>,
}

impl ValidationResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add an error diagnostic.
    pub fn error(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::error(code, message));
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Check if there are any errors.
    pub fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(|d| d.severity == Severity::Error)
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity == Severity::Warning)
    }

    /// Count errors.
    pub fn error_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Error)
            .count()
    }

    /// Count warnings.
    pub fn warning_count(&self) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
            .count()
    }

    /// Check if there are no diagnostics at all.
    pub fn is_ok(&self) -> bool {
        self.diagnostics.is_empty()
    }

    /// Merge another result into this one, tagging untagged entries with `part`.
    pub fn merge_part(&mut self, part: PartKind, other: ValidationResult) {
        self.diagnostics
            .extend(other.diagnostics.into_iter().map(|d| match d.part {
                Some(_) => d,
                None => d.for_part(part),
            }));
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Whether any diagnostic carries `code`.
    pub fn has_code(&self, code: &str) -> bool {
        self.diagnostics.iter().any(|d| d.code == code)
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_result() {
        let result = ValidationResult::new();
        assert!(result.is_ok());
        assert!(!result.has_errors());
        assert!(!result.has_warnings());
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.warning_count(), 0);
    }

    #[test]
    fn test_error_diagnostic() {
        let mut result = ValidationResult::new();
        result.error("skingen::test", "mask is not square");

        assert!(result.has_errors());
        assert!(!result.has_warnings());
        assert!(!result.is_ok());
        assert_eq!(result.error_count(), 1);
        assert!(result.has_code("skingen::test"));
    }

    #[test]
    fn test_warning_diagnostic() {
        let mut result = ValidationResult::new();
        result.warning("skingen::test", "decal without placement");

        assert!(!result.has_errors());
        assert!(result.has_warnings());
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_merge_part_tags_diagnostics() {
        let mut part = ValidationResult::new();
        part.warning("skingen::a", "untagged");
        part.push(Diagnostic::error("skingen::b", "tagged").for_part(PartKind::Body));

        let mut all = ValidationResult::new();
        all.merge_part(PartKind::Head, part);

        let parts: Vec<_> = all.iter().map(|d| d.part).collect();
        assert_eq!(parts, vec![Some(PartKind::Head), Some(PartKind::Body)]);
        assert_eq!(all.iter().next().unwrap().to_string(), "head: untagged");
    }

    #[test]
    fn test_diagnostic_with_help() {
        let d = Diagnostic::error("skingen::test", "missing diffuse")
            .with_help("Re-extract the package textures");
        assert_eq!(d.help.as_deref(), Some("Re-extract the package textures"));
    }
}
