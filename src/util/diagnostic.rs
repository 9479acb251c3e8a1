//! User-friendly diagnostic messages.
//!
//! Every diagnostic names the offending C declaration, the cause, and when
//! possible what to change in the input or configuration.

use std::fmt;
use std::path::PathBuf;

use miette::{Diagnostic as MietteDiagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when a C type is not known to the translator.
    pub const UNKNOWN_TYPE: &str =
        "help: Declare the type in the C project or list it under `parser.base_types`";

    /// Suggestion when a name collapses onto its namespace.
    pub const NAME_EQUAL_TO_NAMESPACE: &str =
        "help: Check `parser.namespace`; the declaration must add at least one word to it";

    /// Suggestion when a list declaration lacks its element type.
    pub const MISSING_CONTAINED_TYPE: &str =
        "help: Annotate the list argument with its contained type";

    /// Suggestion when a referenced class or enum could not be built.
    pub const UNRESOLVED_REFERENCE: &str =
        "help: Fix the referenced declaration; it was skipped earlier in the run";
}

/// Severity level for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Severity level
    pub severity: Severity,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Error,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Create a new warning diagnostic.
    pub fn warning(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            severity: Severity::Warning,
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            match self.severity {
                Severity::Error => "\x1b[1;31merror\x1b[0m",
                Severity::Warning => "\x1b[1;33mwarning\x1b[0m",
            }
        } else {
            match self.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            }
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  -> {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Malformed C project description, pointing into the offending file.
#[derive(Debug, Error, MietteDiagnostic)]
#[error("invalid C project description: {message}")]
#[diagnostic(
    code(wrapgen::project::syntax),
    help("The file must be a JSON object with `enums` and `classes` arrays")
)]
pub struct ProjectSyntaxError {
    pub message: String,
    #[source_code]
    pub src: NamedSource<String>,
    #[label("here")]
    pub span: SourceSpan,
}

impl ProjectSyntaxError {
    /// Build from a JSON error on `contents`, read from `name`.
    pub fn from_json(name: &str, contents: &str, err: &serde_json::Error) -> Self {
        let offset = byte_offset(contents, err.line(), err.column());
        ProjectSyntaxError {
            message: err.to_string(),
            src: NamedSource::new(name, contents.to_string()),
            span: SourceSpan::from((offset, 0)),
        }
    }

    /// Render with miette's graphical handler.
    pub fn render(&self, color: bool) -> String {
        let theme = if color {
            miette::GraphicalTheme::unicode()
        } else {
            miette::GraphicalTheme::unicode_nocolor()
        };
        let mut out = String::new();
        let handler = miette::GraphicalReportHandler::new_themed(theme);
        if handler.render_report(&mut out, self).is_err() {
            return self.to_string();
        }
        out
    }
}

/// Byte offset of a 1-based line and column, clamped to the text.
fn byte_offset(contents: &str, line: usize, column: usize) -> usize {
    let line_start: usize = contents
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    (line_start + column.saturating_sub(1)).min(contents.len())
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::warning("skipped method `linphone_core_get_sound_daemon`")
            .with_context("unknown C type `LinphoneSoundDaemon`")
            .with_location("linphone.json")
            .with_suggestion("Declare the type in the C project");

        let output = diag.format(false);
        assert!(output.starts_with("warning: skipped method"));
        assert!(output.contains("  --> linphone.json"));
        assert!(output.contains("  -> unknown C type"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("1. Declare the type"));
    }

    #[test]
    fn test_project_syntax_error_points_at_line() {
        let contents = "{\n  \"enums\": [\n    3\n  ]\n}";
        let err = serde_json::from_str::<Vec<String>>(contents).unwrap_err();
        let diag = ProjectSyntaxError::from_json("project.json", contents, &err);

        assert_eq!(byte_offset(contents, 2, 3), 4);
        assert!(diag.message.contains("line 1"));
        let rendered = diag.render(false);
        assert!(rendered.contains("wrapgen::project::syntax"));
        assert!(rendered.contains("project.json"));
    }

    #[test]
    fn test_colored_severity() {
        let output = Diagnostic::error("boom").format(true);
        assert!(output.starts_with("\x1b[1;31merror\x1b[0m: boom"));
    }
}
