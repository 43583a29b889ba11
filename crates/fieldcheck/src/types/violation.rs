use std::slice::Iter;
use std::vec::IntoIter;

use serde::Serialize;

use super::{Rule, Value};

/// The recorded outcome of one failed rule against one field's value.
///
/// Violations are data, not errors: [`Validator::validate`] returns them in a
/// [`Violations`] list. Each one carries enough metadata for verbose
/// diagnostics and serializes with serde.
///
/// [`Validator::validate`]: crate::Validator::validate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    field: String,
    rule: String,
    param: Option<String>,
    value: Value,
}

impl Violation {
    pub fn new(field: impl Into<String>, rule: &Rule, value: Value) -> Self {
        Self {
            field: field.into(),
            rule: rule.name().to_string(),
            param: rule.param().map(str::to_string),
            value,
        }
    }

    /// Identifier of the field that failed.
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Name of the rule that failed.
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The rule's raw parameter, before any display transform.
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// The value observed when the rule failed.
    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// All violations from one evaluation, in field then rule declaration order.
///
/// An empty list means the record passed.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Violations(Vec<Violation>);

impl Violations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: Violation) {
        self.0.push(violation);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> Iter<'_, Violation> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Violation] {
        &self.0
    }

    /// Violations raised against one field.
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a Violation> {
        self.0.iter().filter(move |v| v.field == field)
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
