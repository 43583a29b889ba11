//! Parameter transforms applied before a parameter is substituted into a
//! message.

use std::collections::HashMap;

use fieldcheck_syntax::{BuiltinRule, resolve_builtin};

/// Parameter transform signature: raw parameter in, display text out.
pub type ParamFn = fn(&str) -> String;

/// Reference-layout tokens and their display forms, in replacement order.
const DATE_TOKENS: &[(&str, &str)] = &[
    ("2006", "YYYY"),
    ("01", "MM"),
    ("02", "DD"),
    ("15", "HH"),
    ("04", "mm"),
    ("05", "ss"),
];

/// Rewrite a reference-date layout into a user-facing pattern.
///
/// Each token replaces only its first occurrence, so `2006-01-02` becomes
/// `YYYY-MM-DD` and already-rewritten text passes through unchanged.
///
/// ```
/// use fieldcheck::display_date_pattern;
///
/// assert_eq!(display_date_pattern("2006-01-02"), "YYYY-MM-DD");
/// assert_eq!(display_date_pattern("2006-01-02 15:04:05"), "YYYY-MM-DD HH:mm:ss");
/// assert_eq!(display_date_pattern("YYYY-MM-DD"), "YYYY-MM-DD");
/// ```
pub fn display_date_pattern(layout: &str) -> String {
    DATE_TOKENS
        .iter()
        .fold(layout.to_string(), |acc, (token, display)| {
            acc.replacen(token, display, 1)
        })
}

/// The built-in transform for a rule, if it has one.
pub fn builtin_transform(rule: &str) -> Option<ParamFn> {
    match resolve_builtin(rule)? {
        BuiltinRule::Datetime => Some(display_date_pattern),
        BuiltinRule::Required | BuiltinRule::Min | BuiltinRule::Max | BuiltinRule::IsColor => None,
    }
}

/// Apply the built-in transform for `rule`; identity for rules without one.
pub fn transform_param(rule: &str, raw: &str) -> String {
    match builtin_transform(rule) {
        Some(transform) => transform(raw),
        None => raw.to_string(),
    }
}

/// Registry for parameter transforms.
///
/// Transforms are registered per-language with universal transforms
/// available to all. Language-specific transforms take precedence over
/// universal transforms.
#[derive(Debug, Clone, Default)]
pub struct ParamTransforms {
    universal: HashMap<String, ParamFn>,
    language_specific: HashMap<String, HashMap<String, ParamFn>>,
}

impl ParamTransforms {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in transforms as universal entries.
    pub fn with_builtins() -> Self {
        let mut transforms = Self::new();
        for rule in BuiltinRule::ALL {
            if let Some(transform) = builtin_transform(rule.name()) {
                transforms.register(rule.name(), transform);
            }
        }
        transforms
    }

    /// Register a transform for every language.
    pub fn register(&mut self, rule: impl Into<String>, transform: ParamFn) {
        self.universal.insert(rule.into(), transform);
    }

    /// Register a transform for one language subtag (e.g. `"ja"`).
    pub fn register_for_language(
        &mut self,
        language: impl Into<String>,
        rule: impl Into<String>,
        transform: ParamFn,
    ) {
        self.language_specific
            .entry(language.into())
            .or_default()
            .insert(rule.into(), transform);
    }

    /// Get a transform by rule name for a language.
    ///
    /// Checks language-specific transforms first, then falls back to universal.
    pub fn get(&self, rule: &str, language: &str) -> Option<ParamFn> {
        if let Some(f) = self
            .language_specific
            .get(language)
            .and_then(|transforms| transforms.get(rule))
        {
            return Some(*f);
        }
        self.universal.get(rule).copied()
    }

    /// Transform `raw` for display; identity when nothing is registered.
    pub fn apply(&self, rule: &str, language: &str, raw: &str) -> String {
        match self.get(rule, language) {
            Some(transform) => transform(raw),
            None => raw.to_string(),
        }
    }
}
