//! `min` and `max` bounds.
//!
//! Strings are measured in characters (Unicode scalar values), numbers by
//! their value.

use crate::engine::{Outcome, RuleError};
use crate::types::Value;

enum Measure {
    Count(i64),
    Number(f64),
}

fn limit(param: Option<&str>) -> Result<i64, RuleError> {
    param
        .and_then(|p| p.trim().parse().ok())
        .ok_or(RuleError::InvalidParameter)
}

fn measure(value: &Value) -> Result<Option<Measure>, RuleError> {
    match value {
        Value::String(s) => Ok(Some(Measure::Count(
            i64::try_from(s.chars().count()).unwrap_or(i64::MAX),
        ))),
        Value::Integer(n) => Ok(Some(Measure::Count(*n))),
        Value::Float(x) => Ok(Some(Measure::Number(*x))),
        Value::Bool(_) => Err(RuleError::UnsupportedKind),
        Value::Missing => Ok(None),
    }
}

/// `min=<n>`: length or value must be at least `n`.
pub(crate) fn min(value: &Value, param: Option<&str>) -> Result<Outcome, RuleError> {
    let limit = limit(param)?;
    let passed = match measure(value)? {
        Some(Measure::Count(n)) => n >= limit,
        Some(Measure::Number(x)) => x >= limit as f64,
        None => false,
    };
    Ok(Outcome::check(passed, value))
}

/// `max=<n>`: length or value must be at most `n`.
pub(crate) fn max(value: &Value, param: Option<&str>) -> Result<Outcome, RuleError> {
    let limit = limit(param)?;
    let passed = match measure(value)? {
        Some(Measure::Count(n)) => n <= limit,
        Some(Measure::Number(x)) => x <= limit as f64,
        None => false,
    };
    Ok(Outcome::check(passed, value))
}
