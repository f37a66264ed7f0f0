// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generated code markers.

use proc_macro2::TokenStream;
use quote::quote;

/// First line of every generated file.
pub const HEADER: &str = "// @generated by viewgen. Do not edit by hand.";

/// Attribute placed on generated trait impls.
pub fn generated() -> TokenStream {
    quote! { #[automatically_derived] }
}

/// `use` line importing a source module into a generated file.
pub fn import(package: &str) -> String {
    format!("#[allow(unused_imports)]\nuse {package}::*;")
}
