//! Error and warning types for translation catalogs.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::engine::format_suggestions;
use crate::parser::ParseError;

/// Errors raised while assembling a translator.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// A catalog-tier template collides with an existing one and replacement
    /// was not requested.
    #[error("locale '{locale}' already has a template for rule '{rule}'; pass replace = true to override it")]
    DuplicateTemplate { locale: String, rule: String },

    /// The template text does not parse.
    #[error("invalid template for rule '{rule}': {source}")]
    InvalidTemplate {
        rule: String,
        #[source]
        source: ParseError,
    },

    /// The locale identifier does not parse.
    #[error("invalid locale '{locale}': {message}")]
    InvalidLocale { locale: String, message: String },
}

/// Errors that occur while loading a catalog file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// File I/O error when reading the catalog.
    #[error("failed to read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Parse error with file location context.
    #[error("{path}:{line}:{column}: {message}")]
    Parse {
        path: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    /// The same name appears twice in one file.
    #[error("{path}:{line}: '{name}' is already defined in this file")]
    DuplicateEntry {
        path: PathBuf,
        line: usize,
        name: String,
    },

    /// An entry was rejected by the translator.
    #[error("{path}:{line}: {source}")]
    Catalog {
        path: PathBuf,
        line: usize,
        #[source]
        source: CatalogError,
    },
}

impl LoadError {
    pub(crate) fn from_parse(path: PathBuf, error: &ParseError) -> Self {
        let (line, column) = error.position();
        LoadError::Parse {
            path,
            line,
            column,
            message: error.message(),
        }
    }
}

/// Non-fatal problems found by [`Translator::check_placeholders`].
///
/// [`Translator::check_placeholders`]: crate::Translator::check_placeholders
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogWarning {
    /// The template references an argument its rule never supplies.
    #[error(
        "template for '{rule}' in '{locale}' uses {{{index}}}, but the rule supplies {supplied} argument(s)"
    )]
    PlaceholderOutOfRange {
        locale: String,
        rule: String,
        index: usize,
        supplied: usize,
    },

    /// The template never mentions the field.
    #[error("template for '{rule}' in '{locale}' does not reference the field name {{0}}")]
    MissingFieldName { locale: String, rule: String },

    /// The template belongs to a rule the registry does not know.
    #[error("template for unknown rule '{rule}' in '{locale}'{}", format_suggestions(.suggestions))]
    UnknownRule {
        locale: String,
        rule: String,
        suggestions: Vec<String>,
    },
}
