use proc_macro::TokenStream;

mod codegen;
mod input;
mod parse;
mod validate;

/// Derives `fieldcheck::Record` and `fieldcheck::Validate` for a struct with
/// named fields.
///
/// Each field carrying `#[validate("...")]` becomes part of the record under
/// its own name, or under `rename = "..."` when given, and contributes one
/// `(field, constraint)` declaration. Constraint strings are checked while
/// compiling: malformed syntax, a missing or unexpected parameter on a
/// built-in rule, or a near-miss of a built-in rule name is a compile error.
///
/// # Generated Code
///
/// ```ignore
/// #[derive(Validate)]
/// struct User {
///     #[validate("required", rename = "FamilyName")]
///     family_name: String,
/// }
///
/// // impl fieldcheck::Record for User {
/// //     fn value(&self, field: &str) -> Option<Value> {
/// //         match field { "FamilyName" => Some(self.family_name.to_value()), _ => None }
/// //     }
/// // }
/// // impl fieldcheck::Validate for User {
/// //     const DECLARATIONS: &'static [(&'static str, &'static str)] =
/// //         &[("FamilyName", "required")];
/// // }
/// ```
#[proc_macro_derive(Validate, attributes(validate))]
pub fn derive_validate(input: TokenStream) -> TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);

    let input = match parse::parse_input(&input) {
        Ok(input) => input,
        Err(e) => return e.to_compile_error().into(),
    };

    if let Err(e) = validate::validate(&input) {
        return e.to_compile_error().into();
    }

    codegen::codegen(&input).into()
}
