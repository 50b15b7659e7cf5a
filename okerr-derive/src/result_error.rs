//! Implementation of the `#[derive(ResultError)]` macro.

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::spanned::Spanned;
use syn::{Attribute, Data, DeriveInput, Fields, LitStr, Member, Type, parse_macro_input};

/// Main implementation of the `ResultError` derive macro.
pub fn derive_result_error_impl(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let expanded = expand(&input).unwrap_or_else(syn::Error::into_compile_error);
    TokenStream::from(expanded)
}

fn expand(input: &DeriveInput) -> syn::Result<TokenStream2> {
    let name = &input.ident;
    let tag = tag_of(&input.attrs)?.unwrap_or_else(|| name.to_string());

    let origin_method = match &input.data {
        Data::Struct(data_struct) => origin_field(&data_struct.fields)?
            .map(|field| origin_method(&field))
            .unwrap_or_default(),
        Data::Enum(_) => TokenStream2::new(),
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "ResultError cannot be derived for unions.",
            ));
        }
    };

    let (impl_generics, type_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::okerr::ResultError for #name #type_generics #where_clause {
            const TAG: &'static str = #tag;

            #origin_method
        }
    })
}

/// Reads `#[result_error(tag = "...")]`.
fn tag_of(attributes: &[Attribute]) -> syn::Result<Option<String>> {
    let mut tag = None;
    for attribute in attributes
        .iter()
        .filter(|attribute| attribute.path().is_ident("result_error"))
    {
        attribute.parse_nested_meta(|meta| {
            if meta.path.is_ident("tag") {
                let value: LitStr = meta.value()?.parse()?;
                tag = Some(value.value());
                Ok(())
            } else {
                Err(meta.error("unsupported result_error key, expected `tag`"))
            }
        })?;
    }
    Ok(tag)
}

struct OriginField {
    member: Member,
    optional: bool,
}

/// Finds the single field marked `#[origin]`, if any.
fn origin_field(fields: &Fields) -> syn::Result<Option<OriginField>> {
    let mut found: Option<OriginField> = None;
    for (index, field) in fields.iter().enumerate() {
        let Some(marker) = field
            .attrs
            .iter()
            .find(|attribute| attribute.path().is_ident("origin"))
        else {
            continue;
        };
        if found.is_some() {
            return Err(syn::Error::new(
                marker.span(),
                "only one field may be marked #[origin]",
            ));
        }
        let member = field
            .ident
            .clone()
            .map_or_else(|| Member::from(index), Member::Named);
        found = Some(OriginField {
            member,
            optional: is_option(&field.ty),
        });
    }
    Ok(found)
}

/// `true` when the last path segment of `ty` is `Option`.
///
/// Both `std::option::Option` and `okerr::Option` qualify; the generated
/// accessor converts either one into the std form.
fn is_option(ty: &Type) -> bool {
    match ty {
        Type::Path(path) => path
            .path
            .segments
            .last()
            .is_some_and(|segment| segment.ident == "Option"),
        _ => false,
    }
}

fn origin_method(field: &OriginField) -> TokenStream2 {
    let member = &field.member;
    let body = if field.optional {
        quote! {
            ::core::convert::Into::<::core::option::Option<&::okerr::Origin>>::into(
                self.#member.as_ref(),
            )
        }
    } else {
        quote! { ::core::option::Option::Some(&self.#member) }
    };
    quote! {
        fn origin(&self) -> ::core::option::Option<&::okerr::Origin> {
            #body
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use syn::parse_quote;

    #[rstest]
    fn tag_defaults_to_type_name() {
        let input: DeriveInput = parse_quote! {
            struct NotFound;
        };
        let expanded = expand(&input).unwrap().to_string();
        assert!(expanded.contains("\"NotFound\""));
        assert!(!expanded.contains("fn origin"));
    }

    #[rstest]
    fn explicit_tag_wins() {
        let input: DeriveInput = parse_quote! {
            #[result_error(tag = "Missing")]
            enum LookupError { Absent, Hidden }
        };
        let expanded = expand(&input).unwrap().to_string();
        assert!(expanded.contains("\"Missing\""));
    }

    #[rstest]
    #[case::required(parse_quote! { struct Failure { #[origin] cause: ::okerr::Origin } }, "Some")]
    #[case::optional(parse_quote! { struct Failure { #[origin] cause: Option<Origin> } }, "Into")]
    #[case::tuple(parse_quote! { struct Failure(u8, #[origin] Origin); }, "self . 1")]
    fn origin_field_is_exposed(#[case] input: DeriveInput, #[case] fragment: &str) {
        let expanded = expand(&input).unwrap().to_string();
        assert!(expanded.contains("fn origin"));
        assert!(expanded.contains(fragment), "{expanded}");
    }

    #[rstest]
    fn second_origin_field_is_rejected() {
        let input: DeriveInput = parse_quote! {
            struct Failure { #[origin] first: Origin, #[origin] second: Origin }
        };
        assert!(expand(&input).is_err());
    }

    #[rstest]
    fn unknown_key_is_rejected() {
        let input: DeriveInput = parse_quote! {
            #[result_error(code = 4)]
            struct Failure;
        };
        assert!(expand(&input).is_err());
    }

    #[rstest]
    fn unions_are_rejected() {
        let input: DeriveInput = parse_quote! {
            union Bits { a: u8, b: i8 }
        };
        assert!(expand(&input).is_err());
    }
}
