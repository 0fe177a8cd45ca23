//! `#[derive(HasParams)]` implementation.

use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Fields, Index, Member, Type};

const MISSING_ATTR: &str = "no field marked with #[params]; add #[params] to the field \
                            holding the plugin's parameter collection";

/// Locate the single `#[params]` field, as a member usable in `self.<member>`.
fn find_params_field(input: &DeriveInput) -> syn::Result<(Member, &Type)> {
    let name = &input.ident;
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        Data::Enum(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "HasParams can only be derived for structs, not enums",
            ))
        }
        Data::Union(_) => {
            return Err(syn::Error::new_spanned(
                name,
                "HasParams can only be derived for structs, not unions",
            ))
        }
    };

    if let Fields::Unit = fields {
        return Err(syn::Error::new_spanned(
            name,
            "HasParams cannot be derived for unit structs",
        ));
    }

    let mut found: Option<(Member, &Type)> = None;
    for (position, field) in fields.iter().enumerate() {
        if !field.attrs.iter().any(|attr| attr.path().is_ident("params")) {
            continue;
        }
        if found.is_some() {
            return Err(syn::Error::new_spanned(
                field,
                "only one field can be marked with #[params]",
            ));
        }
        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(position)),
        };
        found = Some((member, &field.ty));
    }

    found.ok_or_else(|| syn::Error::new_spanned(name, MISSING_ATTR))
}

/// Generate the `HasParams` impl for a struct.
pub fn derive_has_params_impl(input: DeriveInput) -> syn::Result<TokenStream> {
    let (member, field_type) = find_params_field(&input)?;
    let struct_name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::patchbay::core::plugin::HasParams for #struct_name #ty_generics #where_clause {
            type Params = #field_type;

            fn params(&self) -> &Self::Params {
                &self.#member
            }

            fn params_mut(&mut self) -> &mut Self::Params {
                &mut self.#member
            }
        }
    })
}
