// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field type classification.
//!
//! Turns a declared [`TypeRef`] into the shape the synthesizer cares about:
//!
//! | Declared type | `name` | `optional` | `container` | `args` |
//! |---------------|--------|------------|-------------|--------|
//! | `String` | `String` | no | - | - |
//! | `Option<Customer>` | `Customer` | yes | - | - |
//! | `Vec<Item>` | `Vec` | no | `List` (`Vec`) | `{Item}` |
//! | `Option<std::collections::BTreeSet<Tag>>` | `std::collections::BTreeSet` | yes | `Collection` (`BTreeSet`) | `{Tag}` |
//! | `T` (generic) | `T` | no | - | - |
//!
//! Classification never fails: unrecognized types are plain scalars.

use std::collections::BTreeSet;

use crate::{
    config::{ContainerKind, ContainerRegistry},
    metadata::{FieldDef, TypeRef}
};

const OPTION_PATHS: [&str; 3] = ["Option", "std::option::Option", "core::option::Option"];

/// Shape of a field type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    /// Path of the type after peeling `Option` (without arguments).
    pub name: String,

    /// An `Option` wrapper was peeled.
    pub optional: bool,

    /// Container kind, when the type is a registered container.
    pub container: Option<ContainerKind>,

    /// Last path segment of the container (`VecDeque`).
    pub container_name: Option<String>,

    /// Generic argument names of the peeled type.
    pub args: BTreeSet<String>,

    /// The peeled type is a generic parameter of the source.
    pub variable: bool
}

impl TypeDescriptor {
    /// Whether the type is a registered container.
    pub fn is_container(&self) -> bool {
        self.container.is_some()
    }
}

/// Classification of a field: its shape plus a requested substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Type shape.
    pub descriptor:   TypeDescriptor,
    /// View type named by the field's `project` marker.
    pub substitution: Option<String>
}

/// Classifies types against a container registry.
#[derive(Debug, Clone, Copy)]
pub struct Classifier<'a> {
    containers: &'a ContainerRegistry
}

impl<'a> Classifier<'a> {
    /// Create a classifier.
    pub fn new(containers: &'a ContainerRegistry) -> Self {
        Self {
            containers
        }
    }

    /// Peel one `Option` wrapper.
    ///
    /// Returns the inner type and whether a wrapper was removed.
    pub fn peel(ty: &TypeRef) -> (&TypeRef, bool) {
        match ty.args() {
            [inner] if OPTION_PATHS.contains(&trim_root(ty.path())) && !ty.is_variable() => {
                (inner, true)
            }
            _ => (ty, false)
        }
    }

    /// Classify a declared type.
    pub fn classify(&self, ty: &TypeRef) -> TypeDescriptor {
        let (peeled, optional) = Self::peel(ty);
        let path = trim_root(peeled.path());
        let container = if peeled.is_variable() {
            None
        } else {
            self.containers.kind_of(path)
        };

        TypeDescriptor {
            name: peeled.path().to_string(),
            optional,
            container,
            container_name: container
                .map(|_| path.rsplit("::").next().unwrap_or(path).to_string()),
            args: peeled.args().iter().map(ToString::to_string).collect(),
            variable: peeled.is_variable()
        }
    }

    /// Classify a field, including its `project` marker.
    pub fn classify_field(&self, field: &FieldDef) -> Classification {
        Classification {
            descriptor:   self.classify(&field.ty),
            substitution: field.markers.project.clone()
        }
    }
}

fn trim_root(path: &str) -> &str {
    path.strip_prefix("::").unwrap_or(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::FieldMarkers;

    fn classify(text: &str) -> TypeDescriptor {
        let registry = ContainerRegistry::default();
        Classifier::new(&registry).classify(&TypeRef::parse(text).unwrap())
    }

    #[test]
    fn scalar() {
        let d = classify("String");
        assert_eq!(d.name, "String");
        assert!(!d.optional);
        assert!(!d.is_container());
        assert!(d.args.is_empty());
    }

    #[test]
    fn option_is_peeled_once() {
        let d = classify("Option<Customer>");
        assert_eq!(d.name, "Customer");
        assert!(d.optional);

        let nested = classify("Option<Option<u8>>");
        assert_eq!(nested.name, "Option");
        assert!(nested.optional);

        let qualified = classify("::core::option::Option<u8>");
        assert_eq!(qualified.name, "u8");
        assert!(qualified.optional);
    }

    #[test]
    fn containers() {
        let list = classify("Vec<Item>");
        assert_eq!(list.container, Some(ContainerKind::List));
        assert_eq!(list.container_name.as_deref(), Some("Vec"));
        assert!(list.args.contains("Item"));

        let set = classify("Option<std::collections::BTreeSet<Tag>>");
        assert!(set.optional);
        assert_eq!(set.container, Some(ContainerKind::Collection));
        assert_eq!(set.container_name.as_deref(), Some("BTreeSet"));
    }

    #[test]
    fn unregistered_generic_is_scalar() {
        let d = classify("HashMap<String, Item>");
        assert!(!d.is_container());
        assert_eq!(d.args.len(), 2);
    }

    #[test]
    fn custom_container() {
        let mut registry = ContainerRegistry::empty();
        registry.register("smallvec::SmallVec", ContainerKind::List);
        let classifier = Classifier::new(&registry);
        let d = classifier.classify(&TypeRef::parse("smallvec::SmallVec<Item>").unwrap());
        assert_eq!(d.container, Some(ContainerKind::List));
        assert_eq!(d.container_name.as_deref(), Some("SmallVec"));
        assert!(!classifier.classify(&TypeRef::parse("Vec<Item>").unwrap()).is_container());
    }

    #[test]
    fn variables() {
        let d = Classifier::new(&ContainerRegistry::default())
            .classify(&TypeRef::generic("Option", [TypeRef::variable("T")]));
        assert!(d.variable);
        assert!(d.optional);
        assert_eq!(d.name, "T");
    }

    #[test]
    fn field_substitution() {
        let field = FieldDef::new("items", TypeRef::parse("Vec<Item>").unwrap()).with_markers(
            FieldMarkers {
                project: Some("ItemView".to_string()),
                ..FieldMarkers::default()
            }
        );
        let registry = ContainerRegistry::default();
        let c = Classifier::new(&registry).classify_field(&field);
        assert_eq!(c.substitution.as_deref(), Some("ItemView"));
        assert!(c.descriptor.is_container());
    }
}
