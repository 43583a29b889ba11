//! Message template and catalog file parsers.
//!
//! Templates are plain text with positional placeholders (`{0}`, `{1}`) and
//! `{{`/`}}` escapes. Catalog files (`.fcat`) hold `name = "text";` entries
//! and `//` line comments; the same format carries both rule templates and
//! display names.

mod catalog;
mod error;
mod template;

pub use catalog::{CatalogEntry, parse_catalog};
pub use error::ParseError;
pub use template::{MessageTemplate, Segment, parse_template};

/// Calculate line and column from original input and remaining input.
fn calculate_position(original: &str, remaining: &str) -> (usize, usize) {
    let consumed = original.len() - remaining.len();
    let consumed_str = &original[..consumed];
    let line = consumed_str.chars().filter(|&c| c == '\n').count() + 1;
    let column = match consumed_str.rfind('\n') {
        Some(pos) => consumed_str[pos + 1..].chars().count() + 1,
        None => consumed_str.chars().count() + 1,
    };
    (line, column)
}
