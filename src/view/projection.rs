// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Projection struct generation.
//!
//! This module turns a composed field set into a [`ProjectionDef`], a pure
//! description of the view, and renders it:
//!
//! | Source | Spec | View |
//! |--------|------|------|
//! | `Order` | default | `OrderView` |
//! | `Order` | `scene = "summary"` | `OrderSummaryView` |
//! | `Order` | `grid` | `OrderGridView` |
//!
//! # Generated Code
//!
//! ```rust,ignore
//! /// Projection of `Order`.
//! #[derive(Debug, Clone, Default, PartialEq)]
//! pub struct OrderView {
//!     pub customer_name: String,
//!     pub id: i64
//! }
//!
//! impl OrderView {
//!     pub fn from_source(source: Option<&crate::model::Order>) -> Self { ... }
//!     pub fn from_collection<'a, I, C>(sources: I) -> C { ... }
//!     pub fn from_list(sources: &[crate::model::Order]) -> Vec<Self> { ... }
//! }
//!
//! #[automatically_derived]
//! impl From<&crate::model::Order> for OrderView { ... }
//!
//! #[automatically_derived]
//! impl From<crate::model::Order> for OrderView { ... }
//! ```
//!
//! Rendering is all-or-nothing: any name, type, or attribute that does not
//! parse fails the whole view with an [`EmissionError`].

use proc_macro2::TokenStream;
use quote::quote;

use super::{
    accessor::{AccessorExpr, synthesize},
    classify::Classifier,
    compose::ResolvedFieldDescriptor,
    parse::ProjectionSpec,
    sink::GeneratedUnit
};
use crate::{
    config::GeneratorConfig,
    error::EmissionError,
    metadata::{TypeDef, TypeRef},
    utils::{docs, fields, marker, syntax}
};

/// Name of the marker field holding otherwise unused type parameters.
const PHANTOM_FIELD: &str = "__phantom";

/// A field of the generated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedField {
    /// Field name.
    pub name:     String,
    /// Field type in the view.
    pub ty:       TypeRef,
    /// Documentation.
    pub docs:     Option<String>,
    /// Passthrough attributes.
    pub attrs:    Vec<String>,
    /// How the field is populated.
    pub accessor: AccessorExpr
}

/// A generated conversion entry point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// `from_source(Option<&S>) -> Self`.
    FromSource,
    /// `from_collection(impl IntoIterator<Item = &S>) -> impl FromIterator<Self>`.
    FromCollection,
    /// `from_list(&[S]) -> Vec<Self>`.
    FromList,
    /// `From<&S>` and `From<S>`.
    FromConversions
}

impl Operation {
    /// Every operation, in emission order.
    pub const ALL: [Self; 4] = [
        Self::FromSource,
        Self::FromCollection,
        Self::FromList,
        Self::FromConversions
    ];

    /// Human-readable signature for `source`.
    pub fn signature(self, source: &str) -> String {
        match self {
            Self::FromSource => format!("fn from_source(source: Option<&{source}>) -> Self"),
            Self::FromCollection => format!(
                "fn from_collection<'a, I, C>(sources: I) -> C where I: IntoIterator<Item = &'a {source}>, C: FromIterator<Self>"
            ),
            Self::FromList => format!("fn from_list(sources: &[{source}]) -> Vec<Self>"),
            Self::FromConversions => format!("impl From<&{source}> + From<{source}>")
        }
    }
}

/// Complete description of one generated view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionDef {
    /// Target module path.
    pub package:        String,
    /// View type name.
    pub name:           String,
    /// Qualified source type path.
    pub source:         String,
    /// Module path of the source type.
    pub source_package: String,
    /// Type parameters, shared with the source.
    pub generics:       Vec<String>,
    /// Documentation.
    pub docs:           Option<String>,
    /// Passthrough attributes of the struct.
    pub attrs:          Vec<String>,
    /// Fields in declaration order.
    pub fields:         Vec<ProjectedField>,
    /// Conversion entry points.
    pub operations:     Vec<Operation>,
    /// Modules glob-imported by the generated file.
    pub imports:        Vec<String>
}

impl ProjectionDef {
    /// `package::Name`, or `Name` at the crate root.
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    /// Type parameters not mentioned by any field type.
    pub fn unused_generics(&self) -> Vec<&str> {
        self.generics
            .iter()
            .filter(|g| !self.fields.iter().any(|f| mentions(&f.ty, g)))
            .map(String::as_str)
            .collect()
    }

    /// Render the struct and its conversions.
    ///
    /// # Errors
    ///
    /// Returns [`EmissionError`] when a name, type, derive, or attribute
    /// does not parse.
    pub fn to_tokens(&self, config: &GeneratorConfig) -> Result<TokenStream, EmissionError> {
        let view = self.name.as_str();
        let name = syntax::ident(&self.name, view)?;
        let params = self
            .generics
            .iter()
            .map(|g| syntax::ident(g, view))
            .collect::<Result<Vec<_>, _>>()?;
        let generics = if params.is_empty() {
            quote! {}
        } else {
            quote! { <#(#params),*> }
        };
        let impl_generics = if params.is_empty() {
            quote! {}
        } else {
            quote! { <#(#params: ::core::clone::Clone + ::core::default::Default),*> }
        };
        let source = syntax::ty(&self.source_type(), view)?;

        let doc_attrs = docs::doc_attrs(self.docs.as_deref());
        let derives = config
            .derives
            .iter()
            .map(|d| syntax::path(d, view))
            .collect::<Result<Vec<_>, _>>()?;
        let derive_attr = if derives.is_empty() {
            quote! {}
        } else {
            quote! { #[derive(#(#derives),*)] }
        };
        let attrs = self
            .attrs
            .iter()
            .map(|attr| syntax::meta(attr, view).map(|meta| quote! { #[#meta] }))
            .collect::<Result<Vec<_>, _>>()?;

        let field_defs = fields::definitions(&self.fields, view)?;
        let assigns = fields::assigns(&self.fields, &config.accessor, view)?;

        let unused = self
            .unused_generics()
            .into_iter()
            .map(|g| syntax::ident(g, view))
            .collect::<Result<Vec<_>, _>>()?;
        let (phantom_def, phantom_init) = if unused.is_empty() {
            (quote! {}, quote! {})
        } else {
            let phantom = syntax::ident(PHANTOM_FIELD, view)?;
            (
                quote! {
                    #[doc(hidden)]
                    pub #phantom: ::core::marker::PhantomData<fn() -> (#(#unused,)*)>,
                },
                quote! { #phantom: ::core::marker::PhantomData, }
            )
        };
        let discard = if self.fields.is_empty() {
            quote! { let _ = source; }
        } else {
            quote! {}
        };
        let source_bound = if params.is_empty() {
            quote! {}
        } else {
            quote! { , #source: 'a }
        };

        let from_source_doc = format!(
            " Build a `{}` from an optional source; an absent source yields the default view.",
            self.name
        );
        let marker = marker::generated();

        Ok(quote! {
            #(#doc_attrs)*
            #derive_attr
            #(#attrs)*
            pub struct #name #generics {
                #(#field_defs,)*
                #phantom_def
            }

            impl #impl_generics #name #generics {
                #[doc = #from_source_doc]
                pub fn from_source(source: ::core::option::Option<&#source>) -> Self {
                    #discard
                    Self {
                        #(#assigns,)*
                        #phantom_init
                    }
                }

                /// Convert every source element, preserving order.
                pub fn from_collection<'a, I, C>(sources: I) -> C
                where
                    I: ::core::iter::IntoIterator<Item = &'a #source>,
                    C: ::core::iter::FromIterator<Self>
                    #source_bound
                {
                    sources
                        .into_iter()
                        .map(|source| Self::from_source(::core::option::Option::Some(source)))
                        .collect()
                }

                /// Convert a slice of sources into a `Vec`, preserving order.
                pub fn from_list(sources: &[#source]) -> ::std::vec::Vec<Self> {
                    Self::from_collection(sources)
                }
            }

            #marker
            impl #impl_generics ::core::convert::From<&#source> for #name #generics {
                fn from(source: &#source) -> Self {
                    Self::from_source(::core::option::Option::Some(source))
                }
            }

            #marker
            impl #impl_generics ::core::convert::From<#source> for #name #generics {
                fn from(source: #source) -> Self {
                    Self::from_source(::core::option::Option::Some(&source))
                }
            }
        })
    }

    /// Render to source text.
    ///
    /// # Errors
    ///
    /// See [`to_tokens`](Self::to_tokens).
    pub fn render(&self, config: &GeneratorConfig) -> Result<String, EmissionError> {
        Ok(self.to_tokens(config)?.to_string())
    }

    /// Render into an output unit.
    ///
    /// # Errors
    ///
    /// See [`to_tokens`](Self::to_tokens).
    pub fn to_unit(&self, config: &GeneratorConfig) -> Result<GeneratedUnit, EmissionError> {
        Ok(GeneratedUnit {
            package: self.package.clone(),
            name:    self.name.clone(),
            source:  self.source.clone(),
            imports: self.imports.clone(),
            code:    self.render(config)?
        })
    }

    /// Source type with its parameters, e.g. `crate::model::Page<T>`.
    fn source_type(&self) -> String {
        if self.generics.is_empty() {
            self.source.clone()
        } else {
            format!("{}<{}>", self.source, self.generics.join(", "))
        }
    }
}

/// Builds [`ProjectionDef`]s from composed fields.
#[derive(Debug, Clone, Copy)]
pub struct Emitter<'a> {
    config: &'a GeneratorConfig
}

impl<'a> Emitter<'a> {
    /// Create an emitter.
    pub fn new(config: &'a GeneratorConfig) -> Self {
        Self {
            config
        }
    }

    /// Describe the view of `source` for `spec`.
    pub fn emit(
        &self,
        source: &TypeDef,
        spec: &ProjectionSpec,
        composed: &[ResolvedFieldDescriptor]
    ) -> ProjectionDef {
        let package = spec
            .package
            .clone()
            .or_else(|| self.config.package.clone())
            .unwrap_or_else(|| source.package.clone());
        let imports = if package != source.package && !source.package.is_empty() {
            vec![source.package.clone()]
        } else {
            Vec::new()
        };

        ProjectionDef {
            name: spec.view_name(&source.name, self.config),
            source: source.qualified_name(),
            source_package: source.package.clone(),
            generics: source.generics.clone(),
            docs: Some(
                source
                    .docs
                    .clone()
                    .unwrap_or_else(|| format!("Projection of `{}`.", source.name))
            ),
            attrs: self.passthrough(&source.attrs),
            fields: composed.iter().map(|f| self.project(f)).collect(),
            operations: Operation::ALL.to_vec(),
            package,
            imports
        }
    }

    fn project(&self, field: &ResolvedFieldDescriptor) -> ProjectedField {
        let accessor = synthesize(field);
        let ty = match (&accessor, &field.substitution) {
            (AccessorExpr::ContainerSubstitution { projection, .. }, Some(substitution)) => {
                let (peeled, _) = Classifier::peel(&field.path.field.ty);
                peeled.substitute_args(
                    |arg| substitution.replaces.contains(&arg.to_string()),
                    &TypeRef::named(projection.clone())
                )
            }
            (AccessorExpr::ScalarSubstitution { projection, .. }, _) => {
                TypeRef::named(projection.clone())
            }
            _ => field.path.field.ty.clone()
        };
        ProjectedField {
            name: field.name.clone(),
            ty,
            docs: field.docs.clone(),
            attrs: self.passthrough(&field.attrs),
            accessor
        }
    }

    fn passthrough(&self, attrs: &[String]) -> Vec<String> {
        attrs
            .iter()
            .filter(|attr| self.config.is_passthrough(attr_name(attr)))
            .cloned()
            .collect()
    }
}

/// Leading path of attribute meta text (`serde` in `serde(rename = "x")`).
fn attr_name(meta: &str) -> &str {
    meta.split(|c: char| c == '(' || c == '=' || c.is_whitespace())
        .next()
        .unwrap_or(meta)
}

fn mentions(ty: &TypeRef, name: &str) -> bool {
    match ty {
        TypeRef::Variable(variable) => variable == name,
        TypeRef::Named { path, args } => path == name || args.iter().any(|arg| mentions(arg, name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attr_names() {
        assert_eq!(attr_name("serde(rename = \"id\")"), "serde");
        assert_eq!(attr_name("serde (skip)"), "serde");
        assert_eq!(attr_name("doc = \"x\""), "doc");
        assert_eq!(attr_name("non_exhaustive"), "non_exhaustive");
    }

    #[test]
    fn mentions_nested_variables() {
        let ty = TypeRef::generic("Vec", [TypeRef::generic("Option", [TypeRef::variable("T")])]);
        assert!(mentions(&ty, "T"));
        assert!(!mentions(&ty, "U"));
    }

    #[test]
    fn operation_signatures() {
        assert_eq!(
            Operation::FromList.signature("Order"),
            "fn from_list(sources: &[Order]) -> Vec<Self>"
        );
        assert_eq!(Operation::ALL.len(), 4);
    }
}
