//! The evaluation engine.

use tracing::{debug, trace};

use crate::engine::registry::{Outcome, RuleError, RuleRegistry};
use crate::engine::{DeclarationError, EvalError, ValidateError};
use crate::types::{Constraints, FieldConstraint, Record, Validate, Violation, Violations};

/// Evaluates records against declared constraints.
///
/// A `Validator` owns its [`RuleRegistry`]. Constraints are resolved against
/// that registry once, at setup time, and can then be used to validate any
/// number of records.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use fieldcheck::{Validator, Value};
///
/// let validator = Validator::new();
/// let constraints = validator
///     .declare()
///     .field("FamilyName", "required")?
///     .field("FirstName", "min=10")?
///     .finish();
///
/// let record = HashMap::from([
///     ("FamilyName".to_string(), Value::from("")),
///     ("FirstName".to_string(), Value::from("John")),
/// ]);
///
/// let violations = validator.validate(&record, &constraints)?;
/// assert_eq!(violations.len(), 2);
/// assert_eq!(violations.as_slice()[0].rule(), "required");
/// assert_eq!(violations.as_slice()[1].rule(), "min");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct Validator {
    registry: RuleRegistry,
}

impl Default for Validator {
    fn default() -> Self {
        Self::with_registry(RuleRegistry::with_builtins())
    }
}

impl Validator {
    /// Create a validator with the built-in rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a validator from a prepared registry.
    pub fn with_registry(registry: RuleRegistry) -> Self {
        Self { registry }
    }

    /// Get the rule registry (read-only).
    pub fn registry(&self) -> &RuleRegistry {
        &self.registry
    }

    /// Start declaring constraints checked against this validator's rules.
    pub fn declare(&self) -> ConstraintsBuilder<'_> {
        ConstraintsBuilder {
            registry: &self.registry,
            constraints: Constraints::default(),
        }
    }

    /// Resolve the static declarations of a [`Validate`] type.
    pub fn constraints_for<T: Validate>(&self) -> Result<Constraints, DeclarationError> {
        T::DECLARATIONS
            .iter()
            .try_fold(self.declare(), |builder, (field, raw)| {
                builder.field(*field, raw)
            })
            .map(ConstraintsBuilder::finish)
    }

    /// Evaluate every declared rule against the record.
    ///
    /// Fields are visited in declaration order and rules in rule order. A
    /// failing rule never stops evaluation: every rule runs, including rules
    /// after a failed `required`. Returns an empty list when the record
    /// passes.
    pub fn validate<R: Record + ?Sized>(
        &self,
        record: &R,
        constraints: &Constraints,
    ) -> Result<Violations, EvalError> {
        let mut violations = Violations::new();

        for compiled in constraints.compiled() {
            let field = compiled.constraint.field();
            let value = record
                .value(field)
                .ok_or_else(|| EvalError::UnknownField {
                    field: field.to_string(),
                })?;

            let rules = compiled.constraint.rules().iter();
            for (rule, evaluator) in rules.zip(compiled.evaluators.iter()) {
                let outcome = evaluator(&value, rule.param()).map_err(|e| match e {
                    RuleError::UnsupportedKind => EvalError::UnsupportedKind {
                        rule: rule.name().to_string(),
                        field: field.to_string(),
                        kind: value.kind(),
                    },
                    RuleError::InvalidParameter => EvalError::InvalidParameter {
                        rule: rule.name().to_string(),
                        param: rule.param().unwrap_or_default().to_string(),
                    },
                })?;

                trace!(field, rule = %rule, ?outcome, "evaluated rule");
                if let Outcome::Fail(observed) = outcome {
                    violations.push(Violation::new(field, rule, observed));
                }
            }
        }

        debug!(
            rules = constraints.rule_count(),
            violations = violations.len(),
            "validated record"
        );
        Ok(violations)
    }

    /// Resolve and evaluate the static declarations of a [`Validate`] type.
    ///
    /// Convenience for one-off checks; resolve once with
    /// [`Validator::constraints_for`] when validating many records.
    pub fn validate_declared<T: Validate>(&self, record: &T) -> Result<Violations, ValidateError> {
        let constraints = self.constraints_for::<T>()?;
        Ok(self.validate(record, &constraints)?)
    }
}

/// Collects field constraints, resolving each rule as it is declared.
///
/// Returned by [`Validator::declare`]. Every method fails fast, so a
/// constraint set is never partially configured.
pub struct ConstraintsBuilder<'a> {
    registry: &'a RuleRegistry,
    constraints: Constraints,
}

impl ConstraintsBuilder<'_> {
    /// Declare rules for a field from a constraint string.
    pub fn field(self, field: impl Into<String>, raw: &str) -> Result<Self, DeclarationError> {
        let constraint = FieldConstraint::parse(field, raw)?;
        self.constraint(constraint)
    }

    /// Declare an already-built field constraint.
    pub fn constraint(mut self, constraint: FieldConstraint) -> Result<Self, DeclarationError> {
        let evaluators = constraint
            .rules()
            .iter()
            .map(|rule| self.registry.lookup(constraint.field(), rule))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            field = constraint.field(),
            rules = evaluators.len(),
            "declared constraint"
        );
        self.constraints.push(constraint, evaluators);
        Ok(self)
    }

    /// Finish declaring.
    pub fn finish(self) -> Constraints {
        self.constraints
    }
}
