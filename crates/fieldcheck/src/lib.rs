pub mod engine;
mod localizer;
pub mod parser;
pub mod rules;
pub mod translate;
pub mod types;

pub use engine::{
    ConstraintsBuilder, DeclarationError, EvalError, EvaluatorFn, Outcome, RuleError,
    RuleRegistry, ValidateError, Validator, compute_suggestions,
};
pub use fieldcheck_syntax::{
    BuiltinRule, ParamKind, ParamSpec, SyntaxError, builtin_rule_names,
};
pub use localizer::Localizer;
pub use parser::{MessageTemplate, ParseError};
pub use rules::{LayoutError, is_color, parse_layout};
pub use translate::{
    CatalogError, CatalogWarning, Coverage, DisplayNames, LoadError, ParamFn, ParamTransforms,
    Tier, Translator, TranslatorBuilder, base_templates, display_date_pattern, transform_param,
};
pub use types::{
    AccessorFn, Accessors, Bound, Constraints, FieldConstraint, Record, Rule, ToValue, Validate,
    Value, Violation, Violations,
};

// Re-export the derive macro
pub use fieldcheck_macros::Validate;
