use std::fmt::{Display, Formatter, Result as FmtResult};

use fieldcheck_syntax::check_constraint;
use serde::Serialize;

use crate::engine::{DeclarationError, EvaluatorFn};

/// One named, optionally parametrized constraint attached to a field.
///
/// ```
/// use fieldcheck::Rule;
///
/// let rule = Rule::with_param("min", "10");
/// assert_eq!(rule.name(), "min");
/// assert_eq!(rule.param(), Some("10"));
/// assert_eq!(rule.to_string(), "min=10");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Rule {
    name: String,
    param: Option<String>,
}

impl Rule {
    /// A rule without a parameter.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    /// A rule with a parameter, such as `min=10`.
    pub fn with_param(name: impl Into<String>, param: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param: Some(param.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }
}

impl Display for Rule {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.name, param),
            None => write!(f, "{}", self.name),
        }
    }
}

/// The ordered rules declared for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldConstraint {
    field: String,
    rules: Vec<Rule>,
}

impl FieldConstraint {
    pub fn new(field: impl Into<String>, rules: Vec<Rule>) -> Self {
        Self {
            field: field.into(),
            rules,
        }
    }

    /// Parse a constraint string such as `"required,min=10"`.
    ///
    /// Only syntax and built-in parameter shapes are checked here; rule names
    /// are resolved against a [`RuleRegistry`](crate::RuleRegistry) when the
    /// constraint is added to a [`Constraints`] set.
    pub fn parse(field: impl Into<String>, raw: &str) -> Result<Self, DeclarationError> {
        let field = field.into();
        let tokens = check_constraint(raw).map_err(|reason| {
            DeclarationError::MalformedConstraint {
                field: field.clone(),
                constraint: raw.to_string(),
                reason,
            }
        })?;
        let rules = tokens
            .into_iter()
            .map(|token| Rule {
                name: token.name,
                param: token.param,
            })
            .collect();
        Ok(Self { field, rules })
    }

    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }
}

/// A checked set of field constraints, in field declaration order.
///
/// Built through [`Validator::declare`](crate::Validator::declare) or
/// [`Validator::constraints_for`](crate::Validator::constraints_for), both of
/// which resolve every rule against the validator's registry. Each rule keeps
/// the evaluator it resolved to, so holding a `Constraints` means every rule
/// it names can run.
#[derive(Debug, Clone, Default)]
pub struct Constraints {
    fields: Vec<CompiledField>,
}

/// A field's rules paired index-for-index with their evaluators.
#[derive(Debug, Clone)]
pub(crate) struct CompiledField {
    pub(crate) constraint: FieldConstraint,
    pub(crate) evaluators: Vec<EvaluatorFn>,
}

impl Constraints {
    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldConstraint> {
        self.fields.iter().map(|f| &f.constraint)
    }

    /// Look up the declaration for one field.
    pub fn field(&self, name: &str) -> Option<&FieldConstraint> {
        self.fields().find(|constraint| constraint.field == name)
    }

    /// Total number of declared rules across all fields.
    pub fn rule_count(&self) -> usize {
        self.fields.iter().map(|f| f.evaluators.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields with their resolved evaluators, in evaluation order.
    pub(crate) fn compiled(&self) -> &[CompiledField] {
        &self.fields
    }

    /// Append a resolved field, merging into an earlier declaration of the
    /// same field so the field keeps its first position.
    pub(crate) fn push(&mut self, constraint: FieldConstraint, evaluators: Vec<EvaluatorFn>) {
        match self
            .fields
            .iter_mut()
            .find(|f| f.constraint.field == constraint.field)
        {
            Some(existing) => {
                existing.constraint.rules.extend(constraint.rules);
                existing.evaluators.extend(evaluators);
            }
            None => self.fields.push(CompiledField {
                constraint,
                evaluators,
            }),
        }
    }
}
