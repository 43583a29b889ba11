//! Error types for constraint declaration and evaluation.

use fieldcheck_syntax::SyntaxError;
use strsim::levenshtein;
use thiserror::Error;

/// Errors raised while declaring constraints.
///
/// These are setup-time failures: a program that hits one should stop
/// initializing rather than validate with a partial constraint set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeclarationError {
    /// The constraint string could not be parsed, or a rule's parameter does
    /// not fit the rule.
    #[error("malformed constraint '{constraint}' on field '{field}': {reason}")]
    MalformedConstraint {
        field: String,
        constraint: String,
        #[source]
        reason: SyntaxError,
    },

    /// A declaration names a rule with no registered evaluator.
    #[error("unknown rule '{rule}' on field '{field}'{}", format_suggestions(.suggestions))]
    UnknownRule {
        field: String,
        rule: String,
        suggestions: Vec<String>,
    },
}

/// An error that prevented evaluation from running.
///
/// Failed rules are never reported this way; they become
/// [`Violation`](crate::Violation)s.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The record does not expose a field that has constraints.
    #[error("record has no field '{field}'")]
    UnknownField { field: String },

    /// A rule was applied to a value kind it cannot evaluate.
    #[error("rule '{rule}' cannot evaluate {kind} value of field '{field}'")]
    UnsupportedKind {
        rule: String,
        field: String,
        kind: &'static str,
    },

    /// A rule's parameter could not be interpreted at evaluation time.
    #[error("rule '{rule}' has invalid parameter '{param}'")]
    InvalidParameter { rule: String, param: String },
}

/// Either failure of [`Validator::validate_declared`](crate::Validator::validate_declared).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidateError {
    #[error(transparent)]
    Declaration(#[from] DeclarationError),

    #[error(transparent)]
    Eval(#[from] EvalError),
}

pub(crate) fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

/// Compute typo suggestions for `name` from the available candidates.
///
/// Returns up to three candidates within a small edit distance, closest
/// first.
pub fn compute_suggestions<'a>(
    name: &str,
    available: impl IntoIterator<Item = &'a str>,
) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .into_iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, candidate))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.cmp(b.1)));
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}
