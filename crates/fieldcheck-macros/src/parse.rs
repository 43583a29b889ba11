//! Parsing of the derive input and its `#[validate(...)]` attributes.
//!
//! Accepted attribute forms:
//!
//! ```text
//! #[validate("required,min=10")]
//! #[validate("required", rename = "FamilyName")]
//! ```

use syn::parse::ParseStream;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, Ident, LitStr, Token};

use crate::input::{FieldSpec, ValidateInput};

/// Parse a derive input into a [`ValidateInput`].
pub fn parse_input(input: &DeriveInput) -> syn::Result<ValidateInput> {
    let Data::Struct(data) = &input.data else {
        return Err(syn::Error::new(
            input.ident.span(),
            "Validate can only be derived for structs with named fields",
        ));
    };
    let Fields::Named(named) = &data.fields else {
        return Err(syn::Error::new(
            data.fields.span(),
            "Validate requires named fields",
        ));
    };

    let mut fields = Vec::new();
    for field in &named.named {
        let Some(member) = &field.ident else {
            continue;
        };
        if let Some((rules, rename)) = parse_field_attrs(&field.attrs)? {
            fields.push(FieldSpec {
                member: member.clone(),
                rules,
                rename,
            });
        }
    }

    Ok(ValidateInput {
        ident: input.ident.clone(),
        generics: input.generics.clone(),
        fields,
    })
}

/// Find the field's `#[validate(...)]` attribute, if any.
fn parse_field_attrs(attrs: &[Attribute]) -> syn::Result<Option<(LitStr, Option<LitStr>)>> {
    let mut found = None;
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("validate")) {
        if found.is_some() {
            return Err(syn::Error::new(
                attr.span(),
                "duplicate #[validate] attribute; combine rules with ','",
            ));
        }
        found = Some(attr.parse_args_with(validate_args)?);
    }
    Ok(found)
}

/// Parse `"rules" (, rename = "Name")?`.
fn validate_args(input: ParseStream) -> syn::Result<(LitStr, Option<LitStr>)> {
    let rules: LitStr = input.parse()?;
    let mut rename = None;

    while input.peek(Token![,]) {
        input.parse::<Token![,]>()?;
        if input.is_empty() {
            break;
        }
        let key: Ident = input.parse()?;
        if key != "rename" {
            return Err(syn::Error::new(
                key.span(),
                format!("unknown validate option `{key}`, expected `rename`"),
            ));
        }
        if rename.is_some() {
            return Err(syn::Error::new(key.span(), "duplicate `rename` option"));
        }
        input.parse::<Token![=]>()?;
        rename = Some(input.parse::<LitStr>()?);
    }

    if !input.is_empty() {
        return Err(input.error("expected `,`"));
    }
    Ok((rules, rename))
}
