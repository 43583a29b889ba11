//! Built-in rule evaluators.

mod color;
mod datetime;
mod length;
mod presence;

pub use color::is_color;
pub use datetime::{LayoutError, parse_layout};

use fieldcheck_syntax::BuiltinRule;

use crate::engine::{EvaluatorFn, RuleRegistry};

/// The evaluator implementing a built-in rule.
pub fn builtin_evaluator(rule: BuiltinRule) -> EvaluatorFn {
    match rule {
        BuiltinRule::Required => presence::required,
        BuiltinRule::Min => length::min,
        BuiltinRule::Max => length::max,
        BuiltinRule::IsColor => color::iscolor,
        BuiltinRule::Datetime => datetime::datetime,
    }
}

/// Register every built-in rule.
pub(crate) fn register_builtins(registry: &mut RuleRegistry) {
    for rule in BuiltinRule::ALL {
        registry.register(rule.name(), rule.param_spec(), builtin_evaluator(rule));
    }
}
