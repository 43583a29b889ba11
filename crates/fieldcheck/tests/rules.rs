//! Integration tests for the built-in rules, run through the validator.

use std::collections::HashMap;

use fieldcheck::rules::builtin_evaluator;
use fieldcheck::{BuiltinRule, EvalError, Outcome, RuleError, Validator, Value, is_color};

/// Validate a single field and return whether it passed.
fn passes(constraint: &str, value: impl Into<Value>) -> bool {
    let validator = Validator::new();
    let constraints = validator
        .declare()
        .field("Field", constraint)
        .unwrap()
        .finish();
    let record = HashMap::from([("Field".to_string(), value.into())]);
    validator.validate(&record, &constraints).unwrap().is_empty()
}

/// Run one built-in evaluator directly.
fn evaluate(
    rule: BuiltinRule,
    value: impl Into<Value>,
    param: Option<&str>,
) -> Result<Outcome, RuleError> {
    builtin_evaluator(rule)(&value.into(), param)
}

// =========================================================================
// required
// =========================================================================

#[test]
fn test_required_rejects_empty_and_missing() {
    assert!(!passes("required", ""));
    assert!(!passes("required", Value::Missing));
    assert!(passes("required", "x"));
}

#[test]
fn test_required_checks_every_kind() {
    let required = |value: Value| {
        evaluate(BuiltinRule::Required, value, None)
            .unwrap()
            .is_pass()
    };
    assert!(required(1.into()));
    assert!(!required(0.into()));
    assert!(required(0.5.into()));
    assert!(!required(0.0.into()));
    assert!(required(true.into()));
    assert!(!required(false.into()));
    assert!(!required(Value::Missing));
}

#[test]
fn test_required_does_not_trim() {
    assert!(passes("required", " "));
}

#[test]
fn test_required_rejects_zero_values() {
    assert!(!passes("required", 0));
    assert!(!passes("required", false));
    assert!(passes("required", 7));
}

// =========================================================================
// min / max
// =========================================================================

#[test]
fn test_min_boundary() {
    assert!(passes("min=4", "John"));
    assert!(!passes("min=5", "John"));
}

#[test]
fn test_max_boundary_counts_characters() {
    assert!(passes("max=3", "名字名"));
    assert!(!passes("max=3", "名字名字"));
}

#[test]
fn test_min_and_max_together() {
    assert!(passes("min=2,max=4", "abc"));
    assert!(!passes("min=2,max=4", "a"));
    assert!(!passes("min=2,max=4", "abcde"));
}

#[test]
fn test_min_fails_missing_value() {
    assert!(!passes("min=0", Value::Missing));
}

#[test]
fn test_min_counts_characters_not_bytes() {
    // Four characters, twelve bytes.
    assert!(passes("min=4", "山田太郎"));
    assert!(!passes("min=5", "山田太郎"));
}

#[test]
fn test_min_fails_with_observed_value() {
    assert_eq!(
        evaluate(BuiltinRule::Min, "John", Some("10")),
        Ok(Outcome::Fail(Value::from("John")))
    );
}

#[test]
fn test_numbers_compare_by_value() {
    assert!(passes("min=18", 18));
    assert!(!passes("min=18", 17));
    assert!(passes("max=3", 2.5));
    assert!(!passes("max=3", 3.5));
}

#[test]
fn test_length_rules_reject_bool() {
    assert_eq!(
        evaluate(BuiltinRule::Min, true, Some("1")),
        Err(RuleError::UnsupportedKind)
    );
}

#[test]
fn test_non_numeric_limit_is_invalid() {
    assert_eq!(
        evaluate(BuiltinRule::Max, "abc", Some("ten")),
        Err(RuleError::InvalidParameter)
    );
}

// =========================================================================
// iscolor
// =========================================================================

#[test]
fn test_iscolor_accepts_css_forms() {
    for color in [
        "#fff",
        "#FFFA",
        "#00ff00",
        "#00ff0080",
        "rgb(0, 128, 255)",
        "rgb(0%, 50%, 100%)",
        "RGBA(0,0,0,0.5)",
        "hsl(120, 100%, 50%)",
        "hsla(360, 0%, 0%, 1)",
        "rebeccapurple",
        "Transparent",
        "aliceblue",
        "yellowgreen",
    ] {
        assert!(is_color(color), "expected {color:?} to be a color");
        assert!(passes("iscolor", color));
    }
}

#[test]
fn test_iscolor_rejects_malformed_values() {
    for color in [
        "foo",
        "",
        "#ff",
        "#ggg",
        "#12345",
        "#ff888",
        "rgb(256, 0, 0)",
        "rgb(0, 50%, 0)",
        "rgb(0, 0)",
        "rgba(0, 0, 0, 1.5)",
        "hsl(361, 0%, 0%)",
        "hsl(0, 0, 0)",
        "rgb(0 0 0)",
    ] {
        assert!(!is_color(color), "expected {color:?} not to be a color");
        assert!(!passes("iscolor", color));
    }
}

#[test]
fn test_iscolor_rejects_numbers_with_error() {
    let validator = Validator::new();
    let constraints = validator
        .declare()
        .field("Color", "iscolor")
        .unwrap()
        .finish();
    let record = HashMap::from([("Color".to_string(), Value::from(true))]);

    let err = validator.validate(&record, &constraints).unwrap_err();
    assert!(matches!(err, EvalError::UnsupportedKind { kind: "bool", .. }));
}

// =========================================================================
// datetime
// =========================================================================

#[test]
fn test_datetime_iso_date() {
    assert!(passes("datetime=2006-01-02", "2023-02-28"));
    assert!(!passes("datetime=2006-01-02", "2023-02-30"));
    assert!(!passes("datetime=2006-01-02", "2023/02/28"));
    assert!(!passes("datetime=2006-01-02", "tomorrow"));
}

#[test]
fn test_datetime_leap_years() {
    assert!(passes("datetime=2006-01-02", "2024-02-29"));
    assert!(!passes("datetime=2006-01-02", "2023-02-29"));
}

#[test]
fn test_datetime_with_time() {
    assert!(passes("datetime=2006-01-02 15:04", "2023-06-01 23:59"));
    assert!(!passes("datetime=2006-01-02 15:04", "2023-06-01 24:00"));
}

#[test]
fn test_datetime_escaped_comma_layout() {
    assert!(passes("datetime=Jan 20x2C 2006", "Mar 14, 2023"));
}

#[test]
fn test_datetime_fails_missing_value() {
    assert!(!passes("datetime=2006-01-02", Value::Missing));
}
