//! Code generation for `#[derive(Validate)]`.

use proc_macro2::TokenStream;
use quote::quote;

use crate::input::ValidateInput;

/// Generate the `Record` and `Validate` impls.
pub fn codegen(input: &ValidateInput) -> TokenStream {
    let ident = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let names: Vec<String> = input.fields.iter().map(|field| field.name()).collect();
    let members = input.fields.iter().map(|field| &field.member);
    let rules = input.fields.iter().map(|field| &field.rules);

    let lookup = if names.is_empty() {
        quote! {
            let _ = field;
            ::core::option::Option::None
        }
    } else {
        quote! {
            match field {
                #(#names => ::core::option::Option::Some(
                    ::fieldcheck::ToValue::to_value(&self.#members)
                ),)*
                _ => ::core::option::Option::None,
            }
        }
    };

    quote! {
        impl #impl_generics ::fieldcheck::Record for #ident #ty_generics #where_clause {
            fn value(&self, field: &str) -> ::core::option::Option<::fieldcheck::Value> {
                #lookup
            }
        }

        impl #impl_generics ::fieldcheck::Validate for #ident #ty_generics #where_clause {
            const DECLARATIONS: &'static [(&'static str, &'static str)] = &[
                #((#names, #rules),)*
            ];
        }
    }
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::parse::parse_input;

    #[test]
    fn test_declarations_follow_field_order() {
        let input = parse_input(&parse_quote! {
            struct User {
                #[validate("required", rename = "FamilyName")]
                family_name: String,
                nickname: String,
                #[validate("min=10")]
                first_name: String,
            }
        })
        .unwrap();
        let code = codegen(&input).to_string();
        let family = code.find("\"FamilyName\" , \"required\"").unwrap();
        let first = code.find("\"first_name\" , \"min=10\"").unwrap();
        assert!(family < first);
        assert!(!code.contains("nickname"));
    }
}
