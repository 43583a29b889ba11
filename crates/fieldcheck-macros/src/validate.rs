//! Compile-time validation for `#[derive(Validate)]`.
//!
//! Checks each constraint literal with the same tokenizer the runtime uses,
//! rejects exposed field names that collide, and turns near-misses of
//! built-in rule names into errors with suggestions. Rule names that are not
//! close to a built-in are left alone: they may be registered at runtime.

use std::collections::HashSet;

use fieldcheck_syntax::{builtin_rule_names, check_constraint, resolve_builtin};
use strsim::levenshtein;
use syn::LitStr;

use crate::input::ValidateInput;

/// Validate the parsed derive input.
pub fn validate(input: &ValidateInput) -> syn::Result<()> {
    let mut names = HashSet::new();
    for field in &input.fields {
        let name = field.name();
        let name_span = field
            .rename
            .as_ref()
            .map_or_else(|| field.member.span(), LitStr::span);

        if name.is_empty() {
            return Err(syn::Error::new(name_span, "field name cannot be empty"));
        }
        if !names.insert(name.clone()) {
            return Err(syn::Error::new(
                name_span,
                format!("field name '{name}' is used by more than one field"),
            ));
        }

        let tokens = check_constraint(&field.rules.value()).map_err(|e| {
            syn::Error::new(field.rules.span(), format!("invalid constraint: {e}"))
        })?;

        for token in &tokens {
            if resolve_builtin(&token.name).is_some() {
                continue;
            }
            let suggestions = compute_suggestions(&token.name, builtin_rule_names());
            if !suggestions.is_empty() {
                return Err(syn::Error::new(
                    field.rules.span(),
                    format!(
                        "unknown rule '{}'; did you mean: {}?",
                        token.name,
                        suggestions.join(", ")
                    ),
                ));
            }
        }
    }
    Ok(())
}

/// Compute typo suggestions for a name from a list of available names.
fn compute_suggestions(name: &str, available: &[&str]) -> Vec<String> {
    let max_distance = if name.len() <= 3 { 1 } else { 2 };
    let mut suggestions: Vec<(usize, &str)> = available
        .iter()
        .filter_map(|candidate| {
            let dist = levenshtein(name, candidate);
            if dist <= max_distance && dist > 0 {
                Some((dist, *candidate))
            } else {
                None
            }
        })
        .collect();

    suggestions.sort_by_key(|(dist, _)| *dist);
    suggestions
        .into_iter()
        .take(3)
        .map(|(_, s)| s.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use syn::{DeriveInput, parse_quote};

    use super::*;
    use crate::parse::parse_input;

    fn check(input: DeriveInput) -> syn::Result<()> {
        validate(&parse_input(&input).unwrap())
    }

    // =========================================================================
    // Constraint syntax
    // =========================================================================

    #[test]
    fn test_valid_constraints_pass() {
        let result = check(parse_quote! {
            struct User {
                #[validate("required", rename = "FamilyName")]
                family_name: String,
                #[validate("required,min=10")]
                first_name: String,
                #[validate("iscolor")]
                color: String,
                #[validate("datetime=2006-01-02")]
                birthdate: String,
            }
        });
        assert!(result.is_ok());
    }

    #[test]
    fn test_missing_parameter_rejected() {
        let err = check(parse_quote! {
            struct User {
                #[validate("min")]
                name: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().starts_with("invalid constraint:"));
    }

    #[test]
    fn test_non_integer_parameter_rejected() {
        let err = check(parse_quote! {
            struct User {
                #[validate("min=ten")]
                name: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("ten"));
    }

    #[test]
    fn test_empty_rule_rejected() {
        let result = check(parse_quote! {
            struct User {
                #[validate("required,,min=1")]
                name: String,
            }
        });
        assert!(result.is_err());
    }

    // =========================================================================
    // Rule names
    // =========================================================================

    #[test]
    fn test_near_miss_suggests_builtin() {
        let err = check(parse_quote! {
            struct User {
                #[validate("requird")]
                name: String,
            }
        })
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown rule 'requird'; did you mean: required?"
        );
    }

    #[test]
    fn test_custom_rule_allowed() {
        let result = check(parse_quote! {
            struct User {
                #[validate("required,kana")]
                name: String,
            }
        });
        assert!(result.is_ok());
    }

    // =========================================================================
    // Field names
    // =========================================================================

    #[test]
    fn test_duplicate_exposed_name_rejected() {
        let err = check(parse_quote! {
            struct User {
                #[validate("required", rename = "Name")]
                first: String,
                #[validate("required", rename = "Name")]
                last: String,
            }
        })
        .unwrap_err();
        assert!(err.to_string().contains("more than one field"));
    }

    #[test]
    fn test_empty_rename_rejected() {
        let result = check(parse_quote! {
            struct User {
                #[validate("required", rename = "")]
                name: String,
            }
        });
        assert!(result.is_err());
    }

    // =========================================================================
    // Suggestions
    // =========================================================================

    #[test]
    fn test_suggestions_exact_match_excluded() {
        assert!(compute_suggestions("min", &["min", "max"]).is_empty());
    }

    #[test]
    fn test_suggestions_one_char_off_short() {
        assert_eq!(compute_suggestions("mim", &["min", "max"]), vec!["min"]);
    }

    #[test]
    fn test_suggestions_two_chars_off_long() {
        assert_eq!(
            compute_suggestions("iscolr", &["iscolor", "required"]),
            vec!["iscolor"]
        );
    }
}
