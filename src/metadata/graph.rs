// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory metadata provider.

use std::collections::{BTreeMap, HashMap};

use super::{TypeDef, TypeMetadataProvider};
use crate::error::MetadataError;

/// A set of [`TypeDef`]s indexed by qualified and simple name.
///
/// Lookups try the qualified name first (`crate::model::Order`). A simple
/// name (`Order`) matches when exactly one type carries it, which is how
/// field types are usually written in source. A partial path
/// (`model::Order`) matches a single type whose qualified name ends with it;
/// a foreign path such as `std::time::Duration` never matches a local
/// `Duration`.
///
/// # Example
///
/// ```rust
/// use viewgen::{FieldDef, MetadataGraph, TypeDef, TypeMetadataProvider, TypeRef};
///
/// let mut graph = MetadataGraph::new();
/// graph.insert(
///     TypeDef::new("Customer")
///         .in_package("crate::model")
///         .with_field(FieldDef::new("name", TypeRef::named("String")))
/// );
///
/// assert!(graph.type_def("Customer").is_some());
/// assert!(graph.type_def("crate::model::Customer").is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct MetadataGraph {
    types:    BTreeMap<String, TypeDef>,
    by_short: HashMap<String, Vec<String>>
}

impl MetadataGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of type definitions.
    ///
    /// Field types are written as Rust type text; names listed in a type's
    /// `generics` become type variables.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Parse`] for malformed JSON or type text.
    pub fn from_json_str(json: &str) -> Result<Self, MetadataError> {
        let types: Vec<TypeDef> = serde_json::from_str(json)?;
        let mut graph = Self::new();
        for ty in types {
            graph.insert(ty);
        }
        Ok(graph)
    }

    /// Add or replace a type. Field types are normalized against the type's
    /// generic parameters.
    pub fn insert(&mut self, mut ty: TypeDef) {
        ty.normalize();
        let qualified = ty.qualified_name();
        if !self.types.contains_key(&qualified) {
            self.by_short
                .entry(ty.name.clone())
                .or_default()
                .push(qualified.clone());
        }
        self.types.insert(qualified, ty);
    }

    /// Number of types.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether the graph holds no types.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// All types in qualified-name order.
    pub fn iter(&self) -> impl Iterator<Item = &TypeDef> {
        self.types.values()
    }
}

impl TypeMetadataProvider for MetadataGraph {
    fn type_def(&self, name: &str) -> Option<&TypeDef> {
        if let Some(ty) = self.types.get(name) {
            return Some(ty);
        }
        let mut relative = name.trim_start_matches("::");
        while let Some(rest) = relative
            .strip_prefix("self::")
            .or_else(|| relative.strip_prefix("super::"))
        {
            relative = rest;
        }
        let short = relative.rsplit("::").next().unwrap_or(relative);
        let candidates = self.by_short.get(short)?;

        // A qualified name only matches types whose path ends with it.
        let suffix = format!("::{relative}");
        let mut matching = candidates
            .iter()
            .filter(|qualified| short == relative || qualified.ends_with(&suffix));
        match (matching.next(), matching.next()) {
            (Some(only), None) => self.types.get(only),
            _ => None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::{FieldDef, TypeRef};

    #[test]
    fn ambiguous_short_names_need_qualification() {
        let mut graph = MetadataGraph::new();
        graph.insert(TypeDef::new("Item").in_package("crate::a"));
        graph.insert(TypeDef::new("Item").in_package("crate::b"));

        assert!(graph.type_def("Item").is_none());
        assert!(graph.type_def("crate::a::Item").is_some());
        assert_eq!(graph.len(), 2);
    }

    #[test]
    fn partial_paths_match_by_suffix() {
        let mut graph = MetadataGraph::new();
        graph.insert(TypeDef::new("Customer").in_package("crate::model"));
        assert!(graph.type_def("model::Customer").is_some());
        assert!(graph.type_def("self::Customer").is_some());
        assert!(graph.type_def("super::model::Customer").is_some());
        assert!(graph.type_def("crate::other::Customer").is_none());
    }

    #[test]
    fn foreign_paths_do_not_match_local_types() {
        let mut graph = MetadataGraph::new();
        graph.insert(TypeDef::new("Duration").in_package("crate::model"));
        assert!(graph.type_def("Duration").is_some());
        assert!(graph.type_def("std::time::Duration").is_none());
        assert!(graph.type_def("core::time::Duration").is_none());
    }

    #[test]
    fn reinserting_does_not_duplicate_short_index() {
        let mut graph = MetadataGraph::new();
        graph.insert(TypeDef::new("Order"));
        graph.insert(TypeDef::new("Order").with_field(FieldDef::new("id", TypeRef::named("i64"))));
        assert_eq!(graph.len(), 1);
        assert_eq!(graph.type_def("Order").unwrap().fields.len(), 1);
    }

    #[test]
    fn loads_json_and_binds_generics() {
        let graph = MetadataGraph::from_json_str(
            r#"[
                {
                    "name": "Page",
                    "package": "crate::model",
                    "generics": ["T"],
                    "fields": [
                        { "name": "items", "ty": "Vec<T>" },
                        { "name": "total", "ty": "u64", "markers": { "transient": true } }
                    ]
                }
            ]"#
        )
        .unwrap();

        let page = graph.type_def("Page").unwrap();
        assert_eq!(page.fields[0].ty, TypeRef::generic("Vec", [TypeRef::variable("T")]));
        assert!(page.fields[1].markers.transient);
    }

    #[test]
    fn rejects_malformed_types() {
        let err = MetadataGraph::from_json_str(r#"[{ "name": "A", "fields": [{ "name": "x", "ty": "Vec<" }] }]"#)
            .unwrap_err();
        assert!(matches!(err, MetadataError::Parse(_)));
    }
}
