//! Rule dispatch and evaluation.
//!
//! This module holds the rule registry, the validator that walks a record's
//! declared constraints, and the error types for both phases.

mod error;
mod registry;
mod validator;

pub(crate) use error::format_suggestions;
pub use error::{DeclarationError, EvalError, ValidateError, compute_suggestions};
pub use registry::{EvaluatorFn, Outcome, RuleError, RuleRegistry};
pub use validator::{ConstraintsBuilder, Validator};
