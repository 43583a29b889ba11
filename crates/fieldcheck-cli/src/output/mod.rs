//! Output formatting for CLI commands.

pub mod diagnostic;
pub mod table;

pub use diagnostic::{
    byte_offset, entry_span, load_error_report, CatalogDiagnostic, LintDiagnostic,
};
