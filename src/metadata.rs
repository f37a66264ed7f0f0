// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type metadata facade.
//!
//! The generator never inspects live Rust types. Everything it knows about a
//! source record comes through [`TypeMetadataProvider`], which exposes plain
//! data:
//!
//! ```text
//! TypeDef
//! ├── name: String             (simple name, e.g. "Order")
//! ├── package: String          (module path, e.g. "crate::model")
//! ├── generics: Vec<String>    (type parameters, e.g. ["T"])
//! ├── parent: Option<ParentLink>
//! ├── docs / attrs             (carried into views verbatim)
//! └── fields: Vec<FieldDef>
//!     └── FieldDef
//!         ├── name: String
//!         ├── ty: TypeRef      (Named { path, args } | Variable)
//!         ├── docs / attrs
//!         └── markers: FieldMarkers
//! ```
//!
//! A parent link models inheritance the Rust way: either an embedded parent
//! field (`via = Some("audit")`, accessed as `v.audit.created_by`) or a
//! `Deref` parent (`via = None`, accessed through auto-deref).
//!
//! [`MetadataGraph`] is the in-memory provider. It can be assembled by
//! hand, loaded from JSON, or produced from Rust sources by
//! [`SourceModel`](crate::SourceModel).

mod graph;
mod type_ref;

pub use graph::MetadataGraph;
use serde::{Deserialize, Serialize};
pub use type_ref::TypeRef;

/// Read access to source type metadata.
///
/// Only [`type_def`](Self::type_def) is required; the remaining operations
/// have defaults that read the plain data on [`TypeDef`].
pub trait TypeMetadataProvider {
    /// Look up a type by qualified or simple name.
    fn type_def(&self, name: &str) -> Option<&TypeDef>;

    /// Fields declared directly on `ty`, in declaration order.
    fn own_fields<'t>(&self, ty: &'t TypeDef) -> &'t [FieldDef] {
        &ty.fields
    }

    /// The parent type of `ty`, if it has one the provider knows.
    fn parent(&self, ty: &TypeDef) -> Option<&TypeDef> {
        ty.parent
            .as_ref()
            .and_then(|link| self.type_def(&link.type_name))
    }

    /// Whether `name` is a record type (a type the provider describes).
    fn is_record(&self, name: &str) -> bool {
        self.type_def(name).is_some()
    }
}

/// Inheritance link from a type to its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParentLink {
    /// Parent type name.
    pub type_name: String,

    /// Field embedding the parent, or `None` for a `Deref` parent.
    #[serde(default)]
    pub via: Option<String>
}

/// Description of a source record type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDef {
    /// Simple name (e.g. `Order`).
    pub name: String,

    /// Module path (e.g. `crate::model`). Empty for the crate root.
    #[serde(default)]
    pub package: String,

    /// Generic type parameter names.
    #[serde(default)]
    pub generics: Vec<String>,

    /// Inheritance link.
    #[serde(default)]
    pub parent: Option<ParentLink>,

    /// Documentation carried into generated views.
    #[serde(default)]
    pub docs: Option<String>,

    /// Passthrough attributes (meta text, e.g. `serde(rename_all = "camelCase")`).
    #[serde(default)]
    pub attrs: Vec<String>,

    /// Declared fields.
    #[serde(default)]
    pub fields: Vec<FieldDef>
}

impl TypeDef {
    /// Create an empty type in the crate root.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:     name.into(),
            package:  String::new(),
            generics: Vec::new(),
            parent:   None,
            docs:     None,
            attrs:    Vec::new(),
            fields:   Vec::new()
        }
    }

    /// Set the module path.
    #[must_use]
    pub fn in_package(mut self, package: impl Into<String>) -> Self {
        self.package = package.into();
        self
    }

    /// Append a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    /// Declare a generic type parameter.
    #[must_use]
    pub fn with_generic(mut self, name: impl Into<String>) -> Self {
        self.generics.push(name.into());
        self
    }

    /// Set the parent link.
    #[must_use]
    pub fn with_parent(mut self, type_name: impl Into<String>, via: Option<&str>) -> Self {
        self.parent = Some(ParentLink {
            type_name: type_name.into(),
            via:       via.map(str::to_string)
        });
        self
    }

    /// Set the documentation.
    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Fully qualified path (`package::Name`, or `Name` at the crate root).
    pub fn qualified_name(&self) -> String {
        if self.package.is_empty() {
            self.name.clone()
        } else {
            format!("{}::{}", self.package, self.name)
        }
    }

    /// Find an own field by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Turn single-segment paths naming a generic parameter into
    /// [`TypeRef::Variable`].
    pub fn normalize(&mut self) {
        let generics = self.generics.clone();
        for field in &mut self.fields {
            field.ty.bind_variables(&generics);
        }
    }
}

/// Description of one declared field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    /// Field name as declared.
    pub name: String,

    /// Declared type.
    pub ty: TypeRef,

    /// Documentation.
    #[serde(default)]
    pub docs: Option<String>,

    /// Passthrough attributes (meta text).
    #[serde(default)]
    pub attrs: Vec<String>,

    /// Generator markers.
    #[serde(default)]
    pub markers: FieldMarkers
}

impl FieldDef {
    /// Create an unmarked field.
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name: name.into(),
            ty,
            docs: None,
            attrs: Vec::new(),
            markers: FieldMarkers::default()
        }
    }

    /// Set the documentation.
    #[must_use]
    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = Some(docs.into());
        self
    }

    /// Add a passthrough attribute.
    #[must_use]
    pub fn with_attr(mut self, attr: impl Into<String>) -> Self {
        self.attrs.push(attr.into());
        self
    }

    /// Replace the markers.
    #[must_use]
    pub fn with_markers(mut self, markers: FieldMarkers) -> Self {
        self.markers = markers;
        self
    }
}

/// Field-level generator markers.
///
/// | Marker | Attribute | Effect |
/// |--------|-----------|--------|
/// | `exclude` | `#[view(skip)]`, `#[view(skip_in(a, b))]` | Dropped from discovery |
/// | `transient` | `#[view(transient)]` | Not persisted, dropped in every mode |
/// | `relation` | `#[view(relation)]` | Association, dropped in grid mode |
/// | `project` | `#[view(project = "ItemView")]` | Substituted by another view |
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldMarkers {
    /// Scenes the field is excluded from; an empty list excludes it from all.
    pub exclude: Option<Vec<String>>,

    /// Non-persistent field.
    pub transient: bool,

    /// Association to another record.
    pub relation: bool,

    /// View type used instead of the raw field type.
    pub project: Option<String>
}

impl FieldMarkers {
    /// Whether the exclusion marker applies to `scene`.
    pub fn excludes_scene(&self, scene: Option<&str>) -> bool {
        match &self.exclude {
            None => false,
            Some(scenes) if scenes.is_empty() => true,
            Some(scenes) => scene.is_some_and(|s| scenes.iter().any(|name| name == s))
        }
    }
}
