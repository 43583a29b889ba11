//! Internal types for the `Validate` derive.
//!
//! These keep the spans of the struct's field names and constraint literals
//! so errors point at the offending attribute.

use syn::ext::IdentExt;
use syn::{Generics, Ident, LitStr};

/// A struct deriving `Validate`.
pub struct ValidateInput {
    pub ident: Ident,
    pub generics: Generics,
    pub fields: Vec<FieldSpec>,
}

/// One field carrying `#[validate(...)]`.
pub struct FieldSpec {
    /// The Rust field.
    pub member: Ident,
    /// The constraint string literal.
    pub rules: LitStr,
    /// `rename = "..."`, if present.
    pub rename: Option<LitStr>,
}

impl FieldSpec {
    /// The identifier the field is exposed under.
    pub fn name(&self) -> String {
        match &self.rename {
            Some(rename) => rename.value(),
            None => self.member.unraw().to_string(),
        }
    }
}
