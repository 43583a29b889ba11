//! Localized message rendering.
//!
//! A [`TranslatorBuilder`] collects templates in three tiers (built-in base
//! templates, catalog additions, custom rules) and flattens them into a
//! read-only [`Translator`]. [`DisplayNames`] maps field identifiers to
//! labels independently of the translator.

mod defaults;
mod display;
mod error;
mod translator;
mod transforms;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

pub use defaults::{BASE_LANGUAGES, base_templates};
pub use display::DisplayNames;
pub use error::{CatalogError, CatalogWarning, LoadError};
pub use transforms::{
    ParamFn, ParamTransforms, builtin_transform, display_date_pattern, transform_param,
};
pub use translator::{Coverage, Tier, Translator, TranslatorBuilder};

use crate::parser::{CatalogEntry, parse_catalog};

fn read_catalog(path: &Path) -> Result<String, LoadError> {
    fs::read_to_string(path).map_err(|e| LoadError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Parse catalog text, rejecting names defined twice.
fn parse_entries(content: &str, path: &Path) -> Result<Vec<CatalogEntry>, LoadError> {
    let entries =
        parse_catalog(content).map_err(|e| LoadError::from_parse(path.to_path_buf(), &e))?;

    let mut seen = HashSet::new();
    for entry in &entries {
        if !seen.insert(entry.name.as_str()) {
            return Err(LoadError::DuplicateEntry {
                path: path.to_path_buf(),
                line: entry.line,
                name: entry.name.clone(),
            });
        }
    }
    Ok(entries)
}

/// Placeholder path for catalogs loaded from a string.
fn string_source(label: &str) -> PathBuf {
    PathBuf::from(format!("<{label}>"))
}
