//! One locale's end-to-end pipeline: validate, then render.

use bon::Builder;

use crate::engine::{EvalError, ValidateError, Validator};
use crate::translate::{DisplayNames, Translator};
use crate::types::{Constraints, Record, Validate, Violations};

/// A validator, translator and display names bundled for one locale.
///
/// Built once at setup and reused; every method takes `&self`.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use fieldcheck::{DisplayNames, Localizer, Translator, Value};
///
/// let names: DisplayNames = [("FamilyName", "名字")].into_iter().collect();
/// let localizer = Localizer::builder()
///     .translator(Translator::builder("ja")?.build())
///     .names(names)
///     .build();
///
/// let constraints = localizer.validator().declare().field("FamilyName", "required")?.finish();
/// let record = HashMap::from([("FamilyName".to_string(), Value::from(""))]);
///
/// let messages = localizer.validate(&record, &constraints)?;
/// assert_eq!(messages, ["名字は必須フィールドです"]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Builder)]
pub struct Localizer {
    translator: Translator,

    /// Defaults to a validator with the built-in rules.
    #[builder(default)]
    validator: Validator,

    /// Defaults to no mappings, so fields render under their identifiers.
    #[builder(default)]
    names: DisplayNames,
}

impl Localizer {
    pub fn translator(&self) -> &Translator {
        &self.translator
    }

    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    pub fn names(&self) -> &DisplayNames {
        &self.names
    }

    /// Render violations in order.
    pub fn messages(&self, violations: &Violations) -> Vec<String> {
        self.translator.render_all(violations, &self.names)
    }

    /// Validate a record and render its violations.
    ///
    /// An empty vector means the record passed.
    pub fn validate<R: Record + ?Sized>(
        &self,
        record: &R,
        constraints: &Constraints,
    ) -> Result<Vec<String>, EvalError> {
        let violations = self.validator.validate(record, constraints)?;
        Ok(self.messages(&violations))
    }

    /// Validate a [`Validate`] type against its own declarations and render
    /// its violations.
    pub fn validate_declared<T: Validate>(&self, record: &T) -> Result<Vec<String>, ValidateError> {
        let violations = self.validator.validate_declared(record)?;
        Ok(self.messages(&violations))
    }
}
