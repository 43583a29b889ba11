//! Rule registry mapping rule names to evaluator functions.

use std::collections::HashMap;

use fieldcheck_syntax::{ParamSpec, check_param};
use tracing::debug;

use crate::engine::DeclarationError;
use crate::engine::error::compute_suggestions;
use crate::rules::register_builtins;
use crate::types::{Rule, Value};

/// Result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Pass,
    /// The rule failed; carries the value that was observed.
    Fail(Value),
}

impl Outcome {
    /// `Pass` when `passed` holds, otherwise `Fail` with a copy of `value`.
    pub fn check(passed: bool, value: &Value) -> Self {
        if passed {
            Outcome::Pass
        } else {
            Outcome::Fail(value.clone())
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Outcome::Pass)
    }
}

/// Why an evaluator could not produce an [`Outcome`].
///
/// The engine attaches the field and rule names and reports it as an
/// [`EvalError`](crate::EvalError).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleError {
    /// The evaluator does not handle this kind of value.
    UnsupportedKind,
    /// The parameter could not be interpreted.
    InvalidParameter,
}

/// Evaluator function signature.
///
/// Takes:
/// - `value`: the field's current value
/// - `param`: the rule's parameter, if one was declared
///
/// Returns the outcome, or a [`RuleError`] if evaluation cannot run.
pub type EvaluatorFn = fn(&Value, Option<&str>) -> Result<Outcome, RuleError>;

#[derive(Debug, Clone, Copy)]
struct RegisteredRule {
    spec: ParamSpec,
    evaluator: EvaluatorFn,
}

/// A registry for storing and looking up rule evaluators.
///
/// Registration happens during setup; once the registry is moved into a
/// [`Validator`](crate::Validator) it is read-only.
///
/// # Example
///
/// ```
/// use fieldcheck::{Outcome, ParamSpec, RuleError, RuleRegistry, Value};
///
/// fn even_length(value: &Value, _: Option<&str>) -> Result<Outcome, RuleError> {
///     let len = value.as_str().map_or(0, |s| s.chars().count());
///     Ok(Outcome::check(len % 2 == 0, value))
/// }
///
/// let mut registry = RuleRegistry::with_builtins();
/// registry.register("evenlength", ParamSpec::None, even_length);
/// assert!(registry.contains("evenlength"));
/// assert!(registry.contains("required"));
/// ```
#[derive(Debug, Default, Clone)]
pub struct RuleRegistry {
    rules: HashMap<String, RegisteredRule>,
}

impl RuleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in rules.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        register_builtins(&mut registry);
        registry
    }

    /// Associate a rule name with an evaluator.
    ///
    /// Registering an existing name replaces its evaluator.
    pub fn register(&mut self, name: impl Into<String>, spec: ParamSpec, evaluator: EvaluatorFn) {
        let name = name.into();
        debug!(rule = %name, ?spec, "registering rule");
        self.rules.insert(name, RegisteredRule { spec, evaluator });
    }

    /// Get the evaluator for a rule name.
    pub fn get(&self, name: &str) -> Option<EvaluatorFn> {
        self.rules.get(name).map(|r| r.evaluator)
    }

    /// Get the parameter spec for a rule name.
    pub fn param_spec(&self, name: &str) -> Option<ParamSpec> {
        self.rules.get(name).map(|r| r.spec)
    }

    /// Check if a rule is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Resolve a declared rule to its evaluator.
    ///
    /// Fails with [`DeclarationError::UnknownRule`] when the name is not
    /// registered, and with [`DeclarationError::MalformedConstraint`] when the
    /// parameter does not fit the rule's [`ParamSpec`].
    pub fn lookup(&self, field: &str, rule: &Rule) -> Result<EvaluatorFn, DeclarationError> {
        let Some(registered) = self.rules.get(rule.name()) else {
            return Err(DeclarationError::UnknownRule {
                field: field.to_string(),
                rule: rule.name().to_string(),
                suggestions: compute_suggestions(
                    rule.name(),
                    self.rules.keys().map(String::as_str),
                ),
            });
        };

        check_param(rule.name(), registered.spec, rule.param()).map_err(|reason| {
            DeclarationError::MalformedConstraint {
                field: field.to_string(),
                constraint: rule.to_string(),
                reason,
            }
        })?;

        Ok(registered.evaluator)
    }
}
