// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field definition and assignment utilities for generated views.

use proc_macro2::TokenStream;
use quote::quote;

use super::{docs, syntax};
use crate::{config::AccessorStyle, error::EmissionError, view::ProjectedField};

/// Generate `#[doc] #[attr] pub name: Type` definitions.
pub fn definitions(fields: &[ProjectedField], view: &str) -> Result<Vec<TokenStream>, EmissionError> {
    fields
        .iter()
        .map(|f| {
            let name = syntax::ident(&f.name, view)?;
            let ty = syntax::ty(&f.ty.to_string(), view)?;
            let docs = docs::doc_attrs(f.docs.as_deref());
            let attrs = f
                .attrs
                .iter()
                .map(|attr| syntax::meta(attr, view).map(|meta| quote! { #[#meta] }))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(quote! {
                #(#docs)*
                #(#attrs)*
                pub #name: #ty
            })
        })
        .collect()
}

/// Generate `name: <accessor expression>` assignments.
pub fn assigns(
    fields: &[ProjectedField],
    style: &AccessorStyle,
    view: &str
) -> Result<Vec<TokenStream>, EmissionError> {
    fields
        .iter()
        .map(|f| {
            let name = syntax::ident(&f.name, view)?;
            let value = f.accessor.to_tokens(style, view)?;
            Ok(quote! { #name: #value })
        })
        .collect()
}
