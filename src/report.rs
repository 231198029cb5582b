//! Non-fatal diagnostics collected while splitting and editing.
//!
//! Everything reported here is a warning. Failures that stop a cell or a
//! run are `CutError`s instead.

use std::fmt;

/// A single warning.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    /// Machine-readable code (e.g. "memecut::encode::gif-fallback").
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Result id the diagnostic is about, if any.
    pub cell: Option<usize>,
    /// Optional help text.
    pub help: Option<String>,
}

impl Diagnostic {
    /// Create a warning diagnostic.
    pub fn warning(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            cell: None,
            help: None,
        }
    }

    /// Attach the result id this diagnostic concerns.
    pub fn for_cell(mut self, id: usize) -> Self {
        self.cell = Some(id);
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
        match self.cell {
            // Ids are shown 1-based to match output file names
            Some(id) => write!(f, "cell {}: {}", id + 1, self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Collects diagnostics.
#[derive(Debug, Clone, Default)]
pub struct Report {
    diagnostics: Vec<Diagnostic>,
}

impl Report {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a diagnostic.
    pub fn push(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Add a warning diagnostic.
    pub fn warning(&mut self, code: impl Into<String>, message: impl Into<String>) {
        self.push(Diagnostic::warning(code, message));
    }

    /// Check if there are any warnings.
    pub fn has_warnings(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.len()
    }

    /// Merge another report into this one.
    pub fn merge(&mut self, other: Report) {
        self.diagnostics.extend(other.diagnostics);
    }

    /// Diagnostics concerning one result id.
    pub fn for_cell(&self, id: usize) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.cell == Some(id))
    }

    /// Iterate over diagnostics.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

impl Extend<Diagnostic> for Report {
    fn extend<T: IntoIterator<Item = Diagnostic>>(&mut self, iter: T) {
        self.diagnostics.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = Report::new();
        assert!(report.is_empty());
        assert!(!report.has_warnings());
        assert_eq!(report.warning_count(), 0);
    }

    #[test]
    fn test_warning_diagnostic() {
        let mut report = Report::new();
        report.warning("memecut::test", "something looks off");

        assert!(report.has_warnings());
        assert_eq!(report.warning_count(), 1);
    }

    #[test]
    fn test_merge() {
        let mut a = Report::new();
        a.push(Diagnostic::warning("memecut::a", "warning a").for_cell(1));

        let mut b = Report::new();
        b.warning("memecut::b", "warning b");

        a.merge(b);
        assert_eq!(a.warning_count(), 2);
        assert_eq!(a.iter().next().map(|d| d.code.as_str()), Some("memecut::a"));
    }

    #[test]
    fn test_cell_display_is_one_based() {
        let d = Diagnostic::warning("memecut::test", "fell back").for_cell(0);
        assert_eq!(d.to_string(), "cell 1: fell back");
    }

    #[test]
    fn test_for_cell_filter() {
        let mut report = Report::new();
        report.push(Diagnostic::warning("memecut::x", "a").for_cell(2));
        report.push(Diagnostic::warning("memecut::x", "b").for_cell(3));
        assert_eq!(report.for_cell(3).count(), 1);
    }

    #[test]
    fn test_diagnostic_with_help() {
        let d = Diagnostic::warning("memecut::test", "odd grid").with_help("Check cut.yaml");
        assert_eq!(d.help.as_deref(), Some("Check cut.yaml"));
    }
}
