//! Base-tier templates shipped with the crate.

const EN: &[(&str, &str)] = &[
    ("required", "{0} is a required field"),
    ("min", "{0} must be at least {1} characters in length"),
    ("max", "{0} must be a maximum of {1} characters in length"),
    ("min.number", "{0} must be {1} or greater"),
    ("max.number", "{0} must be {1} or less"),
    ("iscolor", "{0} must be a valid color"),
    ("datetime", "{0} does not match the {1} format"),
];

const JA: &[(&str, &str)] = &[
    ("required", "{0}は必須フィールドです"),
    ("min", "{0}の長さは少なくとも{1}文字でなければなりません"),
    ("max", "{0}の長さは最大でも{1}文字でなければなりません"),
    ("min.number", "{0}は{1}かそれ以上でなければなりません"),
    ("max.number", "{0}は{1}かそれ以下でなければなりません"),
    ("iscolor", "{0}は正しい色でなければなりません"),
    ("datetime", "{0}は{1}の書式と一致しません"),
];

/// Languages with built-in templates.
pub const BASE_LANGUAGES: &[&str] = &["en", "ja"];

/// Built-in `(rule, template)` pairs for a language subtag.
///
/// A `<rule>.number` key is the wording used when the observed value is a
/// number. Languages without built-in templates get an empty slice.
pub fn base_templates(language: &str) -> &'static [(&'static str, &'static str)] {
    match language {
        "en" => EN,
        "ja" => JA,
        _ => &[],
    }
}
