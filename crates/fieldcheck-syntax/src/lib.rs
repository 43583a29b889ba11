//! Shared constraint syntax used by both runtime and macro validation.
//!
//! This crate centralizes constraint-string tokenization and the built-in rule
//! table to avoid drift between compile-time (`fieldcheck-macros`) and runtime
//! (`fieldcheck`) behavior.
//!
//! A constraint string is a list of rules separated by `,`. Each rule is a
//! name optionally followed by `=` and a parameter:
//!
//! ```
//! use fieldcheck_syntax::tokenize;
//!
//! let rules = tokenize("required,min=10").unwrap();
//! assert_eq!(rules[0].name, "required");
//! assert_eq!(rules[1].param.as_deref(), Some("10"));
//! ```
//!
//! A literal comma inside a parameter is written `0x2C`.

use std::error::Error;
use std::fmt;

/// Separates rules within one constraint string.
pub const RULE_SEPARATOR: char = ',';

/// Separates a rule name from its parameter.
pub const PARAM_SEPARATOR: char = '=';

/// Escape sequence for a literal comma inside a parameter.
pub const COMMA_ESCAPE: &str = "0x2C";

/// Canonical built-in rule identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltinRule {
    Required,
    Min,
    Max,
    IsColor,
    Datetime,
}

impl BuiltinRule {
    /// All built-in rules, in registration order.
    pub const ALL: [BuiltinRule; 5] = [
        BuiltinRule::Required,
        BuiltinRule::Min,
        BuiltinRule::Max,
        BuiltinRule::IsColor,
        BuiltinRule::Datetime,
    ];

    /// The name used in constraint strings.
    pub fn name(self) -> &'static str {
        match self {
            BuiltinRule::Required => "required",
            BuiltinRule::Min => "min",
            BuiltinRule::Max => "max",
            BuiltinRule::IsColor => "iscolor",
            BuiltinRule::Datetime => "datetime",
        }
    }

    /// The parameter this rule accepts.
    pub fn param_spec(self) -> ParamSpec {
        match self {
            BuiltinRule::Required | BuiltinRule::IsColor => ParamSpec::None,
            BuiltinRule::Min | BuiltinRule::Max => ParamSpec::Required(ParamKind::Integer),
            BuiltinRule::Datetime => ParamSpec::Required(ParamKind::Text),
        }
    }
}

/// Resolve a rule name to a built-in rule.
pub fn resolve_builtin(name: &str) -> Option<BuiltinRule> {
    BuiltinRule::ALL.into_iter().find(|rule| rule.name() == name)
}

/// Names of all built-in rules.
///
/// Used for diagnostics and typo suggestions.
pub fn builtin_rule_names() -> &'static [&'static str] {
    BUILTIN_NAMES
}

const BUILTIN_NAMES: &[&str] = &["required", "min", "max", "iscolor", "datetime"];

/// The shape of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// A base-10 signed integer.
    Integer,
    /// Any non-empty text.
    Text,
}

/// Whether a rule takes a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamSpec {
    None,
    Optional(ParamKind),
    Required(ParamKind),
}

/// One rule token from a constraint string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleToken {
    /// Rule name with surrounding whitespace removed.
    pub name: String,
    /// Parameter after `=`, with escapes resolved.
    pub param: Option<String>,
    /// Byte offset of the rule within the constraint string.
    pub offset: usize,
}

/// An error in constraint syntax.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxError {
    /// A rule segment had no name (`",min=1"`, `"required,"`, `"=5"`).
    EmptyRuleName { offset: usize },
    /// A rule name contained characters outside `[A-Za-z0-9_]`.
    InvalidRuleName { name: String, offset: usize },
    /// `name=` with nothing after the separator.
    EmptyParameter { rule: String, offset: usize },
    /// A rule that requires a parameter was declared without one.
    MissingParameter { rule: String },
    /// A parameter was given to a rule that takes none.
    UnexpectedParameter { rule: String, param: String },
    /// An integer parameter did not parse.
    InvalidInteger { rule: String, param: String },
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxError::EmptyRuleName { offset } => {
                write!(f, "empty rule name at offset {offset}")
            }
            SyntaxError::InvalidRuleName { name, offset } => {
                write!(f, "invalid rule name '{name}' at offset {offset}")
            }
            SyntaxError::EmptyParameter { rule, offset } => {
                write!(f, "rule '{rule}' has an empty parameter at offset {offset}")
            }
            SyntaxError::MissingParameter { rule } => {
                write!(f, "rule '{rule}' requires a parameter")
            }
            SyntaxError::UnexpectedParameter { rule, param } => {
                write!(f, "rule '{rule}' takes no parameter, got '{param}'")
            }
            SyntaxError::InvalidInteger { rule, param } => {
                write!(f, "rule '{rule}' expects an integer parameter, got '{param}'")
            }
        }
    }
}

impl Error for SyntaxError {}

/// Split a constraint string into rule tokens.
///
/// An empty (or all-whitespace) string declares no rules. Only the shape of
/// each rule is checked here; use [`check_param`] to validate a parameter
/// against a rule's [`ParamSpec`].
pub fn tokenize(raw: &str) -> Result<Vec<RuleToken>, SyntaxError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut tokens = Vec::new();
    let mut offset = 0;
    for segment in raw.split(RULE_SEPARATOR) {
        tokens.push(tokenize_rule(segment, offset)?);
        offset += segment.len() + RULE_SEPARATOR.len_utf8();
    }
    Ok(tokens)
}

fn tokenize_rule(segment: &str, offset: usize) -> Result<RuleToken, SyntaxError> {
    let (name, param) = match segment.split_once(PARAM_SEPARATOR) {
        Some((name, param)) => (name.trim(), Some(param)),
        None => (segment.trim(), None),
    };

    if name.is_empty() {
        return Err(SyntaxError::EmptyRuleName { offset });
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SyntaxError::InvalidRuleName {
            name: name.to_string(),
            offset,
        });
    }

    let param = match param {
        Some(param) if param.trim().is_empty() => {
            return Err(SyntaxError::EmptyParameter {
                rule: name.to_string(),
                offset,
            });
        }
        Some(param) => Some(param.replace(COMMA_ESCAPE, ",")),
        None => None,
    };

    Ok(RuleToken {
        name: name.to_string(),
        param,
        offset,
    })
}

/// Check a rule's parameter against its spec.
pub fn check_param(rule: &str, spec: ParamSpec, param: Option<&str>) -> Result<(), SyntaxError> {
    match (spec, param) {
        (ParamSpec::None, None) => Ok(()),
        (ParamSpec::None, Some(param)) => Err(SyntaxError::UnexpectedParameter {
            rule: rule.to_string(),
            param: param.to_string(),
        }),
        (ParamSpec::Required(_), None) => Err(SyntaxError::MissingParameter {
            rule: rule.to_string(),
        }),
        (ParamSpec::Optional(_), None) => Ok(()),
        (ParamSpec::Required(kind) | ParamSpec::Optional(kind), Some(param)) => {
            check_kind(rule, kind, param)
        }
    }
}

fn check_kind(rule: &str, kind: ParamKind, param: &str) -> Result<(), SyntaxError> {
    match kind {
        ParamKind::Integer if param.trim().parse::<i64>().is_err() => {
            Err(SyntaxError::InvalidInteger {
                rule: rule.to_string(),
                param: param.to_string(),
            })
        }
        ParamKind::Integer | ParamKind::Text => Ok(()),
    }
}

/// Tokenize a constraint string and check every built-in rule's parameter.
///
/// Rules that are not built in are accepted as-is, since custom rules are
/// registered at runtime.
pub fn check_constraint(raw: &str) -> Result<Vec<RuleToken>, SyntaxError> {
    let tokens = tokenize(raw)?;
    for token in &tokens {
        if let Some(rule) = resolve_builtin(&token.name) {
            check_param(&token.name, rule.param_spec(), token.param.as_deref())?;
        }
    }
    Ok(tokens)
}
