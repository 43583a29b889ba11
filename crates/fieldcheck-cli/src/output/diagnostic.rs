//! Miette diagnostics for catalog files.

use std::path::Path;

use fieldcheck::parser::CatalogEntry;
use fieldcheck::LoadError;
use miette::{miette, Diagnostic, NamedSource, Report, SourceSpan};
use thiserror::Error;

/// A catalog error pointing into the file.
///
/// Note: Fields are read by miette derive macros, not directly by code.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fieldcheck::catalog))]
pub struct CatalogDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("error here")]
    span: SourceSpan,

    message: String,

    #[help]
    help: Option<String>,
}

impl CatalogDiagnostic {
    /// Create a diagnostic over a byte span of the file.
    pub fn new(
        path: &Path,
        content: &str,
        span: (usize, usize),
        message: String,
        help: Option<String>,
    ) -> Self {
        CatalogDiagnostic {
            src: source(path, content),
            span: span.into(),
            message,
            help,
        }
    }
}

/// A non-fatal lint finding for one catalog entry.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(fieldcheck::lint), severity(Warning))]
pub struct LintDiagnostic {
    #[source_code]
    src: NamedSource<String>,

    #[label("in this entry")]
    span: SourceSpan,

    message: String,
}

impl LintDiagnostic {
    pub fn new(path: &Path, content: &str, span: (usize, usize), message: String) -> Self {
        LintDiagnostic {
            src: source(path, content),
            span: span.into(),
            message,
        }
    }
}

/// Convert a catalog load failure into a report with source context.
pub fn load_error_report(path: &Path, content: &str, err: LoadError) -> Report {
    let (line, column, message, help) = match err {
        LoadError::Parse {
            line,
            column,
            message,
            ..
        } => (line, column, format!("syntax error: {message}"), None),
        LoadError::DuplicateEntry { line, name, .. } => (
            line,
            1,
            format!("'{name}' is already defined in this file"),
            Some("remove one of the entries".to_string()),
        ),
        LoadError::Catalog { line, source, .. } => (line, 1, source.to_string(), None),
        LoadError::Io { .. } => return miette!("{err}"),
    };
    let span = (byte_offset(content, line, column), 1);
    CatalogDiagnostic::new(path, content, span, message, help).into()
}

/// The byte span of a whole catalog entry.
pub fn entry_span(entry: &CatalogEntry) -> (usize, usize) {
    (entry.offset, entry.len)
}

fn source(path: &Path, content: &str) -> NamedSource<String> {
    NamedSource::new(path.display().to_string(), content.to_string())
}

/// Convert a 1-based line and character column to a byte offset.
///
/// Clamped to the content length to avoid a miette panic on out-of-bounds
/// spans.
pub fn byte_offset(content: &str, line: usize, column: usize) -> usize {
    let line_start: usize = content
        .split_inclusive('\n')
        .take(line.saturating_sub(1))
        .map(str::len)
        .sum();
    let rest = content.get(line_start..).unwrap_or_default();
    let within = rest
        .char_indices()
        .nth(column.saturating_sub(1))
        .map_or(rest.len(), |(i, _)| i);
    (line_start + within).min(content.len())
}

#[cfg(test)]
mod tests {
    use super::byte_offset;

    #[test]
    fn offset_of_first_character() {
        assert_eq!(byte_offset("abc", 1, 1), 0);
    }

    #[test]
    fn offset_counts_multibyte_columns() {
        let content = "a = \"x\";\n名字 = ?";
        assert_eq!(byte_offset(content, 2, 4), "a = \"x\";\n名字 ".len());
    }

    #[test]
    fn offset_is_clamped() {
        assert_eq!(byte_offset("ab", 9, 9), 2);
    }
}
