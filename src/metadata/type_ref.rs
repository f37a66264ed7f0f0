// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Declared field types.
//!
//! A [`TypeRef`] keeps just enough of a Rust type to classify it and to
//! render it back: the path as written and its generic arguments. Anything
//! that is not a path (references, tuples, arrays) is kept as opaque text in
//! a `Named` path with no arguments.

use std::fmt;

use quote::ToTokens;
use serde::{Deserialize, Serialize};
use syn::{GenericArgument, PathArguments, Type};

/// A declared type.
///
/// Serialized as Rust type text, e.g. `"Option<Vec<Item>>"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeRef {
    /// A concrete type path with optional generic arguments.
    Named {
        /// Path as written (`Vec`, `std::collections::VecDeque`).
        path: String,
        /// Generic type arguments in declaration order.
        args: Vec<TypeRef>
    },

    /// A generic parameter of the owning type.
    Variable(String)
}

impl TypeRef {
    /// A type without arguments.
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named {
            path: path.into(),
            args: Vec::new()
        }
    }

    /// A type with generic arguments.
    pub fn generic(path: impl Into<String>, args: impl IntoIterator<Item = TypeRef>) -> Self {
        Self::Named {
            path: path.into(),
            args: args.into_iter().collect()
        }
    }

    /// A generic parameter.
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Parse Rust type text.
    ///
    /// # Errors
    ///
    /// Returns the parser error when `text` is not a Rust type.
    pub fn parse(text: &str) -> syn::Result<Self> {
        let ty: Type = syn::parse_str(text)?;
        Ok(Self::from_syn(&ty, &[]))
    }

    /// Convert a parsed type. Single-segment paths listed in `generics`
    /// become [`TypeRef::Variable`].
    pub fn from_syn(ty: &Type, generics: &[String]) -> Self {
        match ty {
            Type::Group(group) => Self::from_syn(&group.elem, generics),
            Type::Paren(paren) => Self::from_syn(&paren.elem, generics),
            Type::Path(type_path) if type_path.qself.is_none() => {
                let path = &type_path.path;
                let mut text = path
                    .segments
                    .iter()
                    .map(|segment| segment.ident.to_string())
                    .collect::<Vec<_>>()
                    .join("::");
                if path.leading_colon.is_some() {
                    text.insert_str(0, "::");
                }

                let args = match path.segments.last().map(|segment| &segment.arguments) {
                    Some(PathArguments::AngleBracketed(bracketed)) => bracketed
                        .args
                        .iter()
                        .filter_map(|arg| match arg {
                            GenericArgument::Type(inner) => Some(Self::from_syn(inner, generics)),
                            _ => None
                        })
                        .collect(),
                    _ => Vec::new()
                };

                if args.is_empty() && generics.iter().any(|g| *g == text) {
                    Self::Variable(text)
                } else {
                    Self::Named { path: text, args }
                }
            }
            other => Self::named(other.to_token_stream().to_string())
        }
    }

    /// Rebind single-segment paths naming one of `generics` as variables.
    pub fn bind_variables(&mut self, generics: &[String]) {
        match self {
            Self::Named { path, args } if args.is_empty() && generics.contains(path) => {
                let name = path.clone();
                *self = Self::Variable(name);
            }
            Self::Named { args, .. } => {
                for arg in args {
                    arg.bind_variables(generics);
                }
            }
            Self::Variable(_) => {}
        }
    }

    /// The path (or variable name) without arguments.
    pub fn path(&self) -> &str {
        match self {
            Self::Named { path, .. } => path,
            Self::Variable(name) => name
        }
    }

    /// Generic arguments; empty for variables.
    pub fn args(&self) -> &[TypeRef] {
        match self {
            Self::Named { args, .. } => args,
            Self::Variable(_) => &[]
        }
    }

    /// Whether this is a generic parameter.
    pub fn is_variable(&self) -> bool {
        matches!(self, Self::Variable(_))
    }

    /// Copy with every direct argument matching `replace` swapped for
    /// `with`. The outer type itself is never replaced.
    pub fn substitute_args<F>(&self, replace: F, with: &TypeRef) -> Self
    where
        F: Fn(&TypeRef) -> bool
    {
        match self {
            Self::Named { path, args } => Self::Named {
                path: path.clone(),
                args: args
                    .iter()
                    .map(|arg| {
                        if replace(arg) {
                            with.clone()
                        } else {
                            arg.clone()
                        }
                    })
                    .collect()
            },
            Self::Variable(_) => self.clone()
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable(name) => f.write_str(name),
            Self::Named { path, args } => {
                f.write_str(path)?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (i, arg) in args.iter().enumerate() {
                        if i > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
        }
    }
}

impl TryFrom<String> for TypeRef {
    type Error = syn::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TypeRef> for String {
    fn from(value: TypeRef) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_nested_generics() {
        let ty = TypeRef::parse("Option<Vec<Item>>").unwrap();
        assert_eq!(
            ty,
            TypeRef::generic("Option", [TypeRef::generic("Vec", [TypeRef::named("Item")])])
        );
        assert_eq!(ty.to_string(), "Option<Vec<Item>>");
    }

    #[test]
    fn keeps_qualified_paths() {
        let ty = TypeRef::parse("std::collections::VecDeque<crate::model::Item>").unwrap();
        assert_eq!(ty.path(), "std::collections::VecDeque");
        assert_eq!(ty.args()[0].path(), "crate::model::Item");
    }

    #[test]
    fn generic_parameters_become_variables() {
        let ty: Type = syn::parse_quote!(Vec<T>);
        let parsed = TypeRef::from_syn(&ty, &["T".to_string()]);
        assert_eq!(parsed, TypeRef::generic("Vec", [TypeRef::variable("T")]));
    }

    #[test]
    fn bind_variables_after_deserialization() {
        let mut ty = TypeRef::parse("HashMap<K, Item>").unwrap();
        ty.bind_variables(&["K".to_string()]);
        assert!(ty.args()[0].is_variable());
        assert!(!ty.args()[1].is_variable());
    }

    #[test]
    fn opaque_types_round_trip_through_syn() {
        let ty = TypeRef::parse("&'static str").unwrap();
        assert!(ty.args().is_empty());
        assert!(syn::parse_str::<Type>(&ty.to_string()).is_ok());
    }

    #[test]
    fn substitute_replaces_matching_arguments_only() {
        let ty = TypeRef::parse("BTreeMap<String, Item>").unwrap();
        let replaced = ty.substitute_args(|arg| arg.path() == "Item", &TypeRef::named("ItemView"));
        assert_eq!(replaced.to_string(), "BTreeMap<String, ItemView>");
    }

    #[test]
    fn serde_uses_type_text() {
        let json = serde_json::to_string(&TypeRef::parse("Vec<u8>").unwrap()).unwrap();
        assert_eq!(json, "\"Vec<u8>\"");
        let back: TypeRef = serde_json::from_str(&json).unwrap();
        assert_eq!(back, TypeRef::generic("Vec", [TypeRef::named("u8")]));
    }
}
