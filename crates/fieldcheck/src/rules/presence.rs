use crate::engine::{Outcome, RuleError};
use crate::types::Value;

/// `required`: the value must be present and non-zero.
///
/// Strings must be non-empty (whitespace counts as content), numbers
/// non-zero, booleans `true`.
pub(crate) fn required(value: &Value, _param: Option<&str>) -> Result<Outcome, RuleError> {
    let present = match value {
        Value::String(s) => !s.is_empty(),
        Value::Integer(n) => *n != 0,
        Value::Float(x) => *x != 0.0,
        Value::Bool(b) => *b,
        Value::Missing => false,
    };
    Ok(Outcome::check(present, value))
}
