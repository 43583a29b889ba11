use std::collections::HashMap;
use std::path::Path;

use tracing::debug;

use super::{LoadError, parse_entries, read_catalog, string_source};

/// Field identifier to localized label.
///
/// Lookups never fail: an unmapped field resolves to its own identifier, so
/// partially localized setups still produce readable messages.
///
/// ```
/// use fieldcheck::DisplayNames;
///
/// let names: DisplayNames = [("FamilyName", "名字")].into_iter().collect();
/// assert_eq!(names.resolve("FamilyName"), "名字");
/// assert_eq!(names.resolve("Nickname"), "Nickname");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DisplayNames {
    names: HashMap<String, String>,
}

impl DisplayNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `field` to `label`, returning the previous label.
    pub fn insert(&mut self, field: impl Into<String>, label: impl Into<String>) -> Option<String> {
        self.names.insert(field.into(), label.into())
    }

    /// The label for `field`, or `field` itself when unmapped.
    pub fn resolve<'a>(&'a self, field: &'a str) -> &'a str {
        self.names.get(field).map_or(field, String::as_str)
    }

    /// The label for `field`, if one is mapped.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.names.get(field).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Load display names from a catalog file (`Field = "label";`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let content = read_catalog(path)?;
        Self::parse(&content, path)
    }

    /// Load display names from catalog text.
    pub fn load_str(content: &str) -> Result<Self, LoadError> {
        Self::parse(content, &string_source("display names"))
    }

    fn parse(content: &str, path: &Path) -> Result<Self, LoadError> {
        let names: Self = parse_entries(content, path)?
            .into_iter()
            .map(|entry| (entry.name, entry.value))
            .collect();
        debug!(path = %path.display(), count = names.len(), "loaded display names");
        Ok(names)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DisplayNames {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            names: iter
                .into_iter()
                .map(|(field, label)| (field.into(), label.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for DisplayNames {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.names.extend(
            iter.into_iter()
                .map(|(field, label)| (field.into(), label.into())),
        );
    }
}
